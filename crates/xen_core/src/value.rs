//! Runtime value representation.
//!
//! Defines the runtime value representation using NaN-boxing: every number is
//! stored as its own IEEE-754 bits, and the remaining variants live in the
//! negative quiet-NaN space that no canonical float ever occupies.

use crate::gc::ObjectId;
use ahash::RandomState;
use hashbrown::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};

pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

/// Fixed-seed hasher so that string hashes are reproducible within a process.
pub fn fast_hasher() -> RandomState {
    RandomState::with_seeds(0, 0, 0, 0)
}

pub fn fast_map_new<K: Eq + Hash, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(fast_hasher())
}

pub fn fast_map_with_capacity<K: Eq + Hash, V>(cap: usize) -> FastHashMap<K, V> {
    HashMap::with_capacity_and_hasher(cap, fast_hasher())
}

/// Hash of a string's bytes, as stored in interned string headers.
#[inline]
pub fn hash_str(s: &str) -> u64 {
    let mut hasher = fast_hasher().build_hasher();
    hasher.write(s.as_bytes());
    hasher.finish()
}

// NaN-Boxing constants
pub const QNAN: u64 = 0x7ff8000000000000;
pub const TAG_BASE: u64 = 0xfff0000000000000;
pub const TAG_MASK: u64 = 0x000f000000000000;
pub const PAYLOAD_MASK: u64 = 0x0000ffffffffffff;

pub const TAG_NULL: u64 = 0x0001;
pub const TAG_BOOL: u64 = 0x0002;
pub const TAG_OBJ: u64 = 0x0003;

/// The discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    Object,
}

#[derive(Copy, Clone)]
pub struct Value(u64);

impl Default for Value {
    fn default() -> Self {
        Self::NULL
    }
}

impl Value {
    pub const NULL: Value = Value(TAG_BASE | (TAG_NULL << 48));
    pub const TRUE: Value = Value(TAG_BASE | (TAG_BOOL << 48) | 1);
    pub const FALSE: Value = Value(TAG_BASE | (TAG_BOOL << 48));

    #[inline(always)]
    pub fn from_f64(f: f64) -> Self {
        if f.is_nan() {
            return Self(QNAN);
        }
        Self(f.to_bits())
    }

    #[inline(always)]
    pub fn from_bool(b: bool) -> Self {
        if b { Self::TRUE } else { Self::FALSE }
    }

    #[inline(always)]
    pub fn object(id: ObjectId) -> Self {
        debug_assert!(id.0 as u64 <= PAYLOAD_MASK, "object id exceeds 48 bits");
        Self(TAG_BASE | (TAG_OBJ << 48) | (id.0 as u64 & PAYLOAD_MASK))
    }

    #[inline(always)]
    fn is_tagged(&self) -> bool {
        (self.0 & TAG_BASE) == TAG_BASE && (self.0 & TAG_MASK) != 0
    }

    #[inline(always)]
    fn get_tag(&self) -> u64 {
        if self.is_tagged() {
            (self.0 & TAG_MASK) >> 48
        } else {
            0
        }
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self.get_tag() {
            0 => ValueKind::Number,
            TAG_NULL => ValueKind::Null,
            TAG_BOOL => ValueKind::Bool,
            _ => ValueKind::Object,
        }
    }

    #[inline(always)]
    pub fn is_number(&self) -> bool {
        !self.is_tagged()
    }
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.get_tag() == TAG_NULL
    }
    #[inline(always)]
    pub fn is_bool(&self) -> bool {
        self.get_tag() == TAG_BOOL
    }
    #[inline(always)]
    pub fn is_obj(&self) -> bool {
        self.get_tag() == TAG_OBJ
    }

    /// Raw numeric payload. Only meaningful when [`Value::is_number`] holds.
    #[inline(always)]
    pub fn as_f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    /// Raw boolean payload. Only meaningful when [`Value::is_bool`] holds.
    #[inline(always)]
    pub fn as_bool(&self) -> bool {
        (self.0 & 1) != 0
    }

    /// Raw handle payload. Only meaningful when [`Value::is_obj`] holds.
    #[inline(always)]
    pub fn as_obj_id(&self) -> ObjectId {
        ObjectId((self.0 & PAYLOAD_MASK) as usize)
    }

    pub fn as_number(&self) -> Option<f64> {
        self.is_number().then(|| self.as_f64())
    }

    pub fn as_boolean(&self) -> Option<bool> {
        self.is_bool().then(|| self.as_bool())
    }

    pub fn as_object(&self) -> Option<ObjectId> {
        self.is_obj().then(|| self.as_obj_id())
    }

    /// `null` and `false` are falsey, as is the number zero.
    pub fn is_falsey(&self) -> bool {
        match self.kind() {
            ValueKind::Null => true,
            ValueKind::Bool => !self.as_bool(),
            ValueKind::Number => self.as_f64() == 0.0,
            ValueKind::Object => false,
        }
    }

    /// Name of the primitive variant. Objects report `"object"`; the runtime
    /// refines it using the heap header.
    pub fn type_name(&self) -> &'static str {
        match self.kind() {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Object => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.is_number() && other.is_number() {
            return self.as_f64() == other.as_f64();
        }
        self.0 == other.0
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::from_f64(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::from_bool(b)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::object(id)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::Null => write!(f, "Null"),
            ValueKind::Bool => write!(f, "Bool({})", self.as_bool()),
            ValueKind::Number => write!(f, "Number({})", self.as_f64()),
            ValueKind::Object => write!(f, "Object({})", self.as_obj_id()),
        }
    }
}
