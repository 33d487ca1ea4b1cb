//! Class and instance model.
//!
//! Property names and method names share one namespace per class: a name can
//! be a property or a method, never both.

use crate::core::object::{Class, Instance, ManagedObject, NativeFn};
use crate::core::{ObjectId, Value};
use crate::errors::RuntimeError;

use super::Runtime;

impl Runtime {
    pub fn define_class(&mut self, name: &str) -> ObjectId {
        tracing::debug!(target: "xen_runtime::classes", name, "define class");
        let name = self.heap.intern_copy(name);
        self.heap.alloc(ManagedObject::Class(Box::new(Class::new(name))))
    }

    pub fn class(&self, id: ObjectId) -> Option<&Class> {
        match self.heap.try_get(id) {
            Some(ManagedObject::Class(c)) => Some(c),
            _ => None,
        }
    }

    pub fn instance(&self, id: ObjectId) -> Option<&Instance> {
        match self.heap.try_get(id) {
            Some(ManagedObject::Instance(i)) => Some(i),
            _ => None,
        }
    }

    pub fn class_name(&self, class: ObjectId) -> &str {
        self.class(class)
            .and_then(|c| self.heap.str_content(c.name))
            .unwrap_or("<unknown>")
    }

    fn expect_class(&self, class: ObjectId, op: &'static str) -> Result<&Class, RuntimeError> {
        self.class(class).ok_or_else(|| RuntimeError::ArgumentType {
            op,
            param: "class",
            expected: "class",
            actual: self.type_name(Value::object(class)),
        })
    }

    fn expect_class_mut(&mut self, class: ObjectId, op: &'static str) -> Result<&mut Class, RuntimeError> {
        let actual = self.type_name(Value::object(class));
        match self.heap.try_get_mut(class) {
            Some(ManagedObject::Class(c)) => Ok(c),
            _ => Err(RuntimeError::ArgumentType {
                op,
                param: "class",
                expected: "class",
                actual,
            }),
        }
    }

    fn duplicate_member(&self, class: ObjectId, member: &str) -> RuntimeError {
        RuntimeError::DuplicateMember {
            class: self.class_name(class).to_string(),
            member: member.to_string(),
        }
    }

    pub(crate) fn property_slot(&self, cls: &Class, name: &str) -> Option<usize> {
        let interned = self.heap.lookup_interned(name);
        cls.properties()
            .iter()
            .find(|p| Some(p.name) == interned || self.heap.str_content(p.name) == Some(name))
            .map(|p| p.index)
    }

    /// Appends a property and returns its slot.
    pub fn add_property(
        &mut self,
        class: ObjectId,
        name: &str,
        default: Value,
        is_private: bool,
    ) -> Result<usize, RuntimeError> {
        let name_id = self.heap.intern_copy(name);
        let cls = self.expect_class(class, "add_property")?;
        if self.property_slot(cls, name).is_some() || cls.has_method(name_id) {
            return Err(self.duplicate_member(class, name));
        }
        let slot = self
            .expect_class_mut(class, "add_property")?
            .push_property(name_id, default, is_private);
        Ok(slot)
    }

    fn insert_method(
        &mut self,
        class: ObjectId,
        name: &str,
        method: Value,
        is_private: bool,
        op: &'static str,
    ) -> Result<(), RuntimeError> {
        let name_id = self.heap.intern_copy(name);
        let cls = self.expect_class(class, op)?;
        if self.property_slot(cls, name).is_some() {
            return Err(self.duplicate_member(class, name));
        }
        self.expect_class_mut(class, op)?
            .insert_method(name_id, method, is_private);
        Ok(())
    }

    /// Adds a script method. A method of the same name in the same table is
    /// replaced.
    pub fn add_method(
        &mut self,
        class: ObjectId,
        name: &str,
        function: ObjectId,
        is_private: bool,
    ) -> Result<(), RuntimeError> {
        self.insert_method(class, name, Value::object(function), is_private, "add_method")
    }

    pub fn add_native_method(
        &mut self,
        class: ObjectId,
        name: &str,
        function: NativeFn,
        is_private: bool,
    ) -> Result<(), RuntimeError> {
        self.expect_class(class, "add_native_method")?;
        let native = self.new_native(name, function);
        self.insert_method(class, name, Value::object(native), is_private, "add_native_method")
    }

    pub fn set_initializer(&mut self, class: ObjectId, function: ObjectId) -> Result<(), RuntimeError> {
        self.expect_class_mut(class, "set_initializer")?.initializer = Some(function);
        Ok(())
    }

    pub fn set_native_initializer(&mut self, class: ObjectId, function: NativeFn) -> Result<(), RuntimeError> {
        self.expect_class_mut(class, "set_native_initializer")?.native_initializer = Some(function);
        Ok(())
    }

    /// Creates an instance with every field set to its property default, then
    /// runs the native initializer with the instance as receiver.
    ///
    /// A script initializer is left to the interpreter.
    pub fn instantiate(&mut self, class: ObjectId) -> Result<ObjectId, RuntimeError> {
        let cls = self.expect_class(class, "instantiate")?;
        let fields = cls.default_fields();
        let native_init = cls.native_initializer;
        let id = self.heap.alloc(ManagedObject::Instance(Instance::new(class, fields)));
        if let Some(init) = native_init {
            init(self, &[Value::object(id)])?;
        }
        Ok(id)
    }

    pub fn get_field(&self, instance: ObjectId, name: &str) -> Option<Value> {
        let inst = self.instance(instance)?;
        let slot = self.property_slot(self.class(inst.class)?, name)?;
        inst.field(slot)
    }

    /// Writes a field. Unknown names are ignored and reported as `false`.
    pub fn set_field(&mut self, instance: ObjectId, name: &str, value: Value) -> bool {
        let Some(slot) = self
            .instance(instance)
            .and_then(|inst| self.class(inst.class))
            .and_then(|cls| self.property_slot(cls, name))
        else {
            return false;
        };
        match self.heap.try_get_mut(instance) {
            Some(ManagedObject::Instance(inst)) => inst.set_slot(slot, value),
            _ => false,
        }
    }

    pub fn is_property_private(&self, class: ObjectId, name: &str) -> bool {
        self.class(class)
            .and_then(|cls| self.property_slot(cls, name).map(|slot| cls.properties()[slot].is_private))
            .unwrap_or(false)
    }

    pub fn find_property_index(&self, class: ObjectId, name: &str) -> Option<usize> {
        self.class(class).and_then(|cls| self.property_slot(cls, name))
    }
}
