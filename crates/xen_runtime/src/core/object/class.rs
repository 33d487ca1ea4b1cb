use xen_core::{FastHashMap, ObjectId, Value, fast_map_new};

use super::function::NativeFn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDef {
    pub name: ObjectId,
    pub default: Value,
    pub is_private: bool,
    /// Slot in every instance's field array. Assigned densely and never
    /// renumbered.
    pub index: usize,
}

/// User-defined type: ordered property slots plus public and private method
/// tables. Method values are script functions or native functions.
pub struct Class {
    pub name: ObjectId,
    properties: Vec<PropertyDef>,
    methods: FastHashMap<ObjectId, Value>,
    private_methods: FastHashMap<ObjectId, Value>,
    pub initializer: Option<ObjectId>,
    pub native_initializer: Option<NativeFn>,
}

impl Class {
    pub fn new(name: ObjectId) -> Self {
        Self {
            name,
            properties: Vec::new(),
            methods: fast_map_new(),
            private_methods: fast_map_new(),
            initializer: None,
            native_initializer: None,
        }
    }

    pub fn properties(&self) -> &[PropertyDef] {
        &self.properties
    }

    pub(crate) fn push_property(&mut self, name: ObjectId, default: Value, is_private: bool) -> usize {
        let index = self.properties.len();
        self.properties.push(PropertyDef {
            name,
            default,
            is_private,
            index,
        });
        index
    }

    pub(crate) fn insert_method(&mut self, name: ObjectId, method: Value, is_private: bool) {
        let table = if is_private {
            &mut self.private_methods
        } else {
            &mut self.methods
        };
        table.insert(name, method);
    }

    pub fn method(&self, name: ObjectId) -> Option<Value> {
        self.methods.get(&name).copied()
    }

    pub fn private_method(&self, name: ObjectId) -> Option<Value> {
        self.private_methods.get(&name).copied()
    }

    pub fn has_method(&self, name: ObjectId) -> bool {
        self.methods.contains_key(&name) || self.private_methods.contains_key(&name)
    }

    pub fn method_count(&self) -> usize {
        self.methods.len() + self.private_methods.len()
    }

    /// Field values seeded from the property defaults in slot order.
    pub fn default_fields(&self) -> Box<[Value]> {
        self.properties.iter().map(|p| p.default).collect()
    }
}

pub struct Instance {
    pub class: ObjectId,
    fields: Box<[Value]>,
}

impl Instance {
    pub fn new(class: ObjectId, fields: Box<[Value]>) -> Self {
        Self { class, fields }
    }

    pub fn fields(&self) -> &[Value] {
        &self.fields
    }

    pub fn field(&self, slot: usize) -> Option<Value> {
        self.fields.get(slot).copied()
    }

    pub(crate) fn set_slot(&mut self, slot: usize, value: Value) -> bool {
        match self.fields.get_mut(slot) {
            Some(field) => {
                *field = value;
                true
            }
            None => false,
        }
    }
}
