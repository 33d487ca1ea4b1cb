use xen_core::Value;

use crate::core::heap::fatal_alloc;
use crate::errors::RuntimeError;

const MIN_CAPACITY: usize = 8;

#[inline]
fn grown(cap: usize) -> usize {
    if cap < MIN_CAPACITY { MIN_CAPACITY } else { cap * 2 }
}

fn reserve_for_push<T>(buf: &mut Vec<T>, what: &str) {
    if buf.len() < buf.capacity() {
        return;
    }
    let target = grown(buf.capacity());
    if buf.try_reserve_exact(target - buf.len()).is_err() {
        fatal_alloc(what);
    }
}

fn in_bounds(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

/// Growable sequence of values.
///
/// Out-of-range reads yield `null` and out-of-range writes are ignored.
#[derive(Debug, Clone, Default)]
pub struct Array {
    values: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        let mut values = Vec::new();
        if values.try_reserve_exact(cap).is_err() {
            fatal_alloc("array storage");
        }
        Self { values }
    }

    /// `len` copies of `fill`, or `None` when the storage cannot be reserved.
    pub fn try_filled(len: usize, fill: Value) -> Option<Self> {
        let mut values = Vec::new();
        values.try_reserve_exact(len).ok()?;
        values.resize(len, fill);
        Some(Self { values })
    }

    pub fn push(&mut self, value: Value) {
        reserve_for_push(&mut self.values, "array storage");
        self.values.push(value);
    }

    /// Removes the last element, `null` when empty.
    pub fn pop(&mut self) -> Value {
        self.values.pop().unwrap_or(Value::NULL)
    }

    pub fn get(&self, index: i64) -> Value {
        in_bounds(index, self.values.len()).map_or(Value::NULL, |i| self.values[i])
    }

    /// Returns `false` and leaves the array untouched when `index` is out of range.
    pub fn set(&mut self, index: i64, value: Value) -> bool {
        match in_bounds(index, self.values.len()) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn reverse(&mut self) {
        self.values.reverse();
    }

    pub fn first(&self) -> Option<Value> {
        self.values.first().copied()
    }

    pub fn last(&self) -> Option<Value> {
        self.values.last().copied()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }
}

/// Growable byte buffer. Unlike [`Array`], out-of-range access is an error.
#[derive(Debug, Clone, Default)]
pub struct ByteArray {
    bytes: Vec<u8>,
}

impl ByteArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        let mut bytes = Vec::new();
        if bytes.try_reserve_exact(cap).is_err() {
            fatal_alloc("byte array storage");
        }
        Self { bytes }
    }

    pub fn push(&mut self, byte: u8) {
        reserve_for_push(&mut self.bytes, "byte array storage");
        self.bytes.push(byte);
    }

    /// Removes the last byte, `0` when empty.
    pub fn pop(&mut self) -> u8 {
        self.bytes.pop().unwrap_or(0)
    }

    pub fn get(&self, index: i64) -> Result<u8, RuntimeError> {
        in_bounds(index, self.bytes.len())
            .map(|i| self.bytes[i])
            .ok_or(RuntimeError::IndexOutOfRange {
                index,
                len: self.bytes.len(),
            })
    }

    pub fn set(&mut self, index: i64, byte: u8) -> Result<(), RuntimeError> {
        let len = self.bytes.len();
        let i = in_bounds(index, len).ok_or(RuntimeError::IndexOutOfRange { index, len })?;
        self.bytes[i] = byte;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_starts_at_eight_then_doubles() {
        let mut a = Array::new();
        assert_eq!(a.capacity(), 0);
        a.push(Value::NULL);
        assert_eq!(a.capacity(), 8);
        for _ in 0..8 {
            a.push(Value::TRUE);
        }
        assert_eq!(a.len(), 9);
        assert_eq!(a.capacity(), 16);
    }

    #[test]
    fn filled_reports_reserve_failure() {
        let a = Array::try_filled(3, Value::TRUE).unwrap();
        assert_eq!(a.as_slice(), &[Value::TRUE; 3]);
        assert!(Array::try_filled(usize::MAX / 2, Value::NULL).is_none());
    }

    #[test]
    fn out_of_range_is_silent() {
        let mut a = Array::new();
        a.push(Value::from_f64(1.0));
        assert_eq!(a.get(5), Value::NULL);
        assert_eq!(a.get(-1), Value::NULL);
        assert!(!a.set(1, Value::TRUE));
        assert!(a.set(0, Value::TRUE));
        assert_eq!(a.as_slice(), &[Value::TRUE]);
    }

    #[test]
    fn pop_on_empty_yields_null() {
        let mut a = Array::new();
        assert!(a.pop().is_null());
    }

    #[test]
    fn byte_array_bounds_are_errors() {
        let mut b = ByteArray::new();
        b.push(7);
        assert_eq!(b.get(0), Ok(7));
        assert_eq!(b.get(1), Err(RuntimeError::IndexOutOfRange { index: 1, len: 1 }));
        assert!(b.set(3, 1).is_err());
        assert_eq!(b.pop(), 7);
        assert_eq!(b.pop(), 0);
    }
}
