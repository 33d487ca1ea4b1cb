//! Object construction and typed access.

use crate::core::object::{
    Array, BoundMethod, BoundTarget, ByteArray, Chunk, Dict, Function, ManagedObject, Namespace, NativeFn,
    NativeFunction,
};
use crate::core::{ObjKind, ObjectId, Value};
use crate::errors::RuntimeError;

use super::Runtime;

/// Largest element count `new_array_filled` accepts.
pub const MAX_ARRAY_LEN: usize = 1 << 28;

impl Runtime {
    pub fn new_function(&mut self, name: Option<&str>, arity: u32, chunk: Chunk) -> ObjectId {
        let name = name.map(|n| self.heap.intern_copy(n));
        self.heap.alloc(ManagedObject::Function(Box::new(Function::new(name, arity, chunk))))
    }

    pub fn new_native(&mut self, name: &str, function: NativeFn) -> ObjectId {
        self.heap.alloc(ManagedObject::NativeFunction(NativeFunction {
            name: name.into(),
            owner: None,
            function,
        }))
    }

    /// Native installed as a member of namespace `owner`.
    pub fn new_namespace_native(&mut self, owner: &str, name: &str, function: NativeFn) -> ObjectId {
        self.heap.alloc(ManagedObject::NativeFunction(NativeFunction {
            name: name.into(),
            owner: Some(owner.into()),
            function,
        }))
    }

    pub fn new_namespace(&mut self, name: &str) -> ObjectId {
        self.heap.alloc(ManagedObject::Namespace(Box::new(Namespace::new(name))))
    }

    pub fn new_array(&mut self) -> ObjectId {
        self.heap.alloc(ManagedObject::Array(Array::new()))
    }

    pub fn new_array_from(&mut self, values: impl IntoIterator<Item = Value>) -> ObjectId {
        let values = values.into_iter();
        let mut array = Array::with_capacity(values.size_hint().0);
        for value in values {
            array.push(value);
        }
        self.heap.alloc(ManagedObject::Array(array))
    }

    /// Array of `len` copies of `fill`. Lengths above [`MAX_ARRAY_LEN`] and
    /// failed reservations are errors, not aborts.
    pub fn new_array_filled(&mut self, len: usize, fill: Value) -> Result<ObjectId, RuntimeError> {
        let too_large = RuntimeError::TooLarge {
            op: "array",
            requested: len,
            limit: MAX_ARRAY_LEN,
        };
        if len > MAX_ARRAY_LEN {
            return Err(too_large);
        }
        let array = Array::try_filled(len, fill).ok_or(too_large)?;
        Ok(self.heap.alloc(ManagedObject::Array(array)))
    }

    pub fn new_dict(&mut self) -> ObjectId {
        self.heap.alloc(ManagedObject::Dict(Dict::new()))
    }

    pub fn new_u8array(&mut self) -> ObjectId {
        self.heap.alloc(ManagedObject::U8Array(ByteArray::new()))
    }

    pub fn new_bound_native(&mut self, receiver: Value, name: &str, function: NativeFn) -> ObjectId {
        self.heap.alloc(ManagedObject::BoundMethod(BoundMethod {
            receiver,
            target: BoundTarget::Native(function),
            name: name.into(),
        }))
    }

    pub fn new_bound_function(&mut self, receiver: Value, function: ObjectId) -> ObjectId {
        let name: Box<str> = self
            .function(function)
            .and_then(|f| f.name)
            .and_then(|n| self.heap.str_content(n))
            .unwrap_or("<anonymous>")
            .into();
        self.heap.alloc(ManagedObject::BoundMethod(BoundMethod {
            receiver,
            target: BoundTarget::Function(function),
            name,
        }))
    }

    /// Heap kind of `value`, `None` for primitives.
    pub fn kind_of(&self, value: Value) -> Option<ObjKind> {
        value.as_object().and_then(|id| self.heap.try_kind_of(id))
    }

    pub fn function(&self, id: ObjectId) -> Option<&Function> {
        match self.heap.try_get(id) {
            Some(ManagedObject::Function(f)) => Some(f),
            _ => None,
        }
    }

    pub fn native(&self, id: ObjectId) -> Option<&NativeFunction> {
        match self.heap.try_get(id) {
            Some(ManagedObject::NativeFunction(n)) => Some(n),
            _ => None,
        }
    }

    pub fn namespace_obj(&self, id: ObjectId) -> Option<&Namespace> {
        match self.heap.try_get(id) {
            Some(ManagedObject::Namespace(ns)) => Some(ns),
            _ => None,
        }
    }

    pub(crate) fn namespace_obj_mut(&mut self, id: ObjectId) -> Option<&mut Namespace> {
        match self.heap.try_get_mut(id) {
            Some(ManagedObject::Namespace(ns)) => Some(ns),
            _ => None,
        }
    }

    pub fn array(&self, id: ObjectId) -> Option<&Array> {
        match self.heap.try_get(id) {
            Some(ManagedObject::Array(a)) => Some(a),
            _ => None,
        }
    }

    pub fn array_mut(&mut self, id: ObjectId) -> Option<&mut Array> {
        match self.heap.try_get_mut(id) {
            Some(ManagedObject::Array(a)) => Some(a),
            _ => None,
        }
    }

    pub fn dict(&self, id: ObjectId) -> Option<&Dict> {
        match self.heap.try_get(id) {
            Some(ManagedObject::Dict(d)) => Some(d),
            _ => None,
        }
    }

    pub(crate) fn dict_mut(&mut self, id: ObjectId) -> Option<&mut Dict> {
        match self.heap.try_get_mut(id) {
            Some(ManagedObject::Dict(d)) => Some(d),
            _ => None,
        }
    }

    pub fn u8array(&self, id: ObjectId) -> Option<&ByteArray> {
        match self.heap.try_get(id) {
            Some(ManagedObject::U8Array(b)) => Some(b),
            _ => None,
        }
    }

    pub fn u8array_mut(&mut self, id: ObjectId) -> Option<&mut ByteArray> {
        match self.heap.try_get_mut(id) {
            Some(ManagedObject::U8Array(b)) => Some(b),
            _ => None,
        }
    }

    pub fn bound_method(&self, id: ObjectId) -> Option<&BoundMethod> {
        match self.heap.try_get(id) {
            Some(ManagedObject::BoundMethod(b)) => Some(b),
            _ => None,
        }
    }

    fn dict_key(&self, key: Value) -> Result<ObjectId, RuntimeError> {
        match key.as_object() {
            Some(id) if self.heap.try_kind_of(id) == Some(ObjKind::Str) => Ok(id),
            _ => Err(RuntimeError::DictKeyType(self.type_name(key))),
        }
    }

    /// Inserts or replaces `key`. Non-string keys are rejected and the
    /// dictionary is left untouched.
    pub fn dict_set(&mut self, dict: ObjectId, key: Value, value: Value) -> Result<(), RuntimeError> {
        let key = self.dict_key(key)?;
        if let Some(d) = self.dict_mut(dict) {
            d.set(key, value);
        }
        Ok(())
    }

    pub fn dict_get(&self, dict: ObjectId, key: Value) -> Result<Option<Value>, RuntimeError> {
        let key = self.dict_key(key)?;
        Ok(self.dict(dict).and_then(|d| d.get(key)))
    }

    pub fn dict_remove(&mut self, dict: ObjectId, key: Value) -> Result<bool, RuntimeError> {
        let key = self.dict_key(key)?;
        Ok(self.dict_mut(dict).is_some_and(|d| d.remove(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeConfig;

    fn runtime() -> Runtime {
        Runtime::with_config(RuntimeConfig {
            echo_errors: false,
            ..RuntimeConfig::default()
        })
    }

    #[test]
    fn dict_rejects_non_string_keys() {
        let mut rt = runtime();
        let d = rt.new_dict();
        let err = rt.dict_set(d, Value::from_f64(1.0), Value::TRUE).unwrap_err();
        assert_eq!(err, RuntimeError::DictKeyType("number"));
        assert_eq!(rt.dict(d).map(|d| d.len()), Some(0));
    }

    #[test]
    fn dict_keys_match_by_content() {
        let mut rt = runtime();
        let d = rt.new_dict();
        let k1 = rt.new_string("name");
        rt.dict_set(d, k1, Value::from_f64(1.0)).unwrap();
        let k2 = rt.string_value(String::from("name"));
        assert_eq!(rt.dict_get(d, k2).unwrap(), Some(Value::from_f64(1.0)));
        assert!(rt.dict_remove(d, k2).unwrap());
        assert_eq!(rt.dict_get(d, k1).unwrap(), None);
    }

    #[test]
    fn bound_function_takes_function_name() {
        let mut rt = runtime();
        let f = rt.new_function(Some("greet"), 0, Chunk::new());
        let b = rt.new_bound_function(Value::NULL, f);
        assert_eq!(rt.bound_method(b).map(|b| &*b.name), Some("greet"));
    }
}
