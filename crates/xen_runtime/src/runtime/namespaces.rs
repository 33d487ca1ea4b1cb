//! Global bindings and the namespace registry.

use crate::core::object::NativeFn;
use crate::core::{ObjectId, Value};

use super::Runtime;

impl Runtime {
    /// Installs or replaces the module binding `name`.
    pub fn register_namespace(&mut self, name: &str, value: Value) {
        tracing::debug!(target: "xen_runtime::namespaces", name, "register namespace");
        if let Some(slot) = self.namespaces.get_mut(name) {
            *slot = value;
        } else {
            self.namespaces.insert(name.into(), value);
        }
    }

    /// Module binding registered under `name`.
    pub fn namespace(&self, name: &str) -> Option<Value> {
        self.namespaces.get(name).copied()
    }

    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(|k| &**k)
    }

    /// Sets `name` inside namespace object `ns`. Returns `false` when `ns` is
    /// not a namespace.
    pub fn namespace_set(&mut self, ns: ObjectId, name: &str, value: Value) -> bool {
        match self.namespace_obj_mut(ns) {
            Some(ns) => {
                ns.set(name, value);
                true
            }
            None => false,
        }
    }

    pub fn namespace_get(&self, ns: ObjectId, name: &str) -> Option<Value> {
        self.namespace_obj(ns).and_then(|ns| ns.get(name))
    }

    pub fn define_global(&mut self, name: &str, value: Value) {
        if let Some(slot) = self.globals.get_mut(name) {
            *slot = value;
        } else {
            self.globals.insert(name.into(), value);
        }
    }

    /// Defines a global native function.
    pub fn define_native(&mut self, name: &str, function: NativeFn) -> ObjectId {
        let id = self.new_native(name, function);
        self.define_global(name, Value::object(id));
        id
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).copied()
    }

    pub fn global_names(&self) -> impl Iterator<Item = &str> {
        self.globals.keys().map(|k| &**k)
    }

    /// Resolves a native by qualified name: `ns.name` looks inside the
    /// namespace, a bare name looks at the globals.
    pub fn resolve_native(&self, qualified: &str) -> Option<Value> {
        let value = match qualified.split_once('.') {
            Some((ns, name)) => {
                let ns = self.namespace(ns)?.as_object()?;
                self.namespace_get(ns, name)?
            }
            None => self.global(qualified)?,
        };
        let id = value.as_object()?;
        self.native(id).map(|_| value)
    }
}
