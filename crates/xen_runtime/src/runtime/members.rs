//! Member access and calls.

use crate::core::object::{BoundTarget, ManagedObject, NativeFn};
use crate::core::{ObjKind, ObjectId, Value};
use crate::errors::RuntimeError;
use crate::methods;

use super::Runtime;

/// Whether private members are visible. Code inside a class body uses
/// `Internal`; everything else uses `External`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAccess {
    External,
    Internal,
}

/// What a callee value resolves to.
#[derive(Clone, Copy)]
pub enum Callable {
    Native(NativeFn),
    Bound { receiver: Value, target: BoundTarget },
    Function(ObjectId),
    Class(ObjectId),
}

impl Runtime {
    fn unknown_member(&self, receiver: Value, name: &str) -> RuntimeError {
        RuntimeError::UnknownMember {
            member: name.to_string(),
            ty: self.type_name(receiver),
        }
    }

    /// Resolves `receiver.name`.
    ///
    /// Built-in members flagged as properties are evaluated immediately; other
    /// built-in and class methods come back as bound methods. Namespace members
    /// and instance fields are returned as stored.
    pub fn get_member(&mut self, receiver: Value, name: &str, access: MemberAccess) -> Result<Value, RuntimeError> {
        if let Some(table) = methods::table_for(receiver, &self.heap) {
            let entry = methods::lookup(table, name).ok_or_else(|| self.unknown_member(receiver, name))?;
            if entry.is_property {
                return (entry.function)(self, &[receiver]);
            }
            return Ok(Value::object(self.new_bound_native(receiver, entry.name, entry.function)));
        }

        let Some(id) = receiver.as_object() else {
            return Err(self.unknown_member(receiver, name));
        };
        match self.heap.try_kind_of(id) {
            Some(ObjKind::Namespace) => self
                .namespace_get(id, name)
                .ok_or_else(|| self.unknown_member(receiver, name)),
            Some(ObjKind::Instance) => self.instance_member(id, name, access),
            _ => Err(self.unknown_member(receiver, name)),
        }
    }

    fn instance_member(&mut self, id: ObjectId, name: &str, access: MemberAccess) -> Result<Value, RuntimeError> {
        let receiver = Value::object(id);
        let (class_id, field) = {
            let Some(inst) = self.instance(id) else {
                return Err(self.unknown_member(receiver, name));
            };
            let Some(cls) = self.class(inst.class) else {
                return Err(self.unknown_member(receiver, name));
            };
            let field = self.property_slot(cls, name).map(|slot| {
                (
                    cls.properties()[slot].is_private,
                    inst.field(slot).unwrap_or(Value::NULL),
                )
            });
            (inst.class, field)
        };

        let private = |rt: &Runtime| RuntimeError::PrivateMember {
            class: rt.class_name(class_id).to_string(),
            member: name.to_string(),
        };

        if let Some((is_private, value)) = field {
            if is_private && access == MemberAccess::External {
                return Err(private(&*self));
            }
            return Ok(value);
        }

        let name_id = self.heap.lookup_interned(name);
        let (public, hidden) = match (name_id, self.class(class_id)) {
            (Some(n), Some(cls)) => (cls.method(n), cls.private_method(n)),
            _ => (None, None),
        };
        let method = match (public, hidden, access) {
            (Some(m), _, _) => m,
            (None, Some(m), MemberAccess::Internal) => m,
            (None, Some(_), MemberAccess::External) => return Err(private(&*self)),
            (None, None, _) => return Err(self.unknown_member(receiver, name)),
        };
        self.bind(receiver, method)
    }

    fn bind(&mut self, receiver: Value, method: Value) -> Result<Value, RuntimeError> {
        let id = method
            .as_object()
            .ok_or_else(|| RuntimeError::NotCallable(self.type_name(method)))?;
        let bound = match self.heap.try_get(id) {
            Some(ManagedObject::NativeFunction(n)) => {
                let (name, function) = (n.name.clone(), n.function);
                self.new_bound_native(receiver, &name, function)
            }
            Some(ManagedObject::Function(_)) => self.new_bound_function(receiver, id),
            _ => return Err(RuntimeError::NotCallable(self.type_name(method))),
        };
        Ok(Value::object(bound))
    }

    /// Looks up `name` on `receiver` and calls it with `args`.
    pub fn invoke_method(&mut self, receiver: Value, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        if let Some(table) = methods::table_for(receiver, &self.heap) {
            let entry = methods::lookup(table, name).ok_or_else(|| self.unknown_member(receiver, name))?;
            let full = Self::with_receiver(receiver, args);
            return (entry.function)(self, &full);
        }
        let member = self.get_member(receiver, name, MemberAccess::External)?;
        self.call(member, args)
    }

    pub fn resolve_call(&self, callee: Value) -> Result<Callable, RuntimeError> {
        let not_callable = || RuntimeError::NotCallable(self.type_name(callee));
        let id = callee.as_object().ok_or_else(not_callable)?;
        match self.heap.try_get(id) {
            Some(ManagedObject::NativeFunction(n)) => Ok(Callable::Native(n.function)),
            Some(ManagedObject::BoundMethod(b)) => Ok(Callable::Bound {
                receiver: b.receiver,
                target: b.target,
            }),
            Some(ManagedObject::Function(_)) => Ok(Callable::Function(id)),
            Some(ManagedObject::Class(_)) => Ok(Callable::Class(id)),
            _ => Err(not_callable()),
        }
    }

    /// Calls a native, bound native or class. Script functions and bound
    /// script methods belong to the interpreter and are refused.
    pub fn call(&mut self, callee: Value, args: &[Value]) -> Result<Value, RuntimeError> {
        match self.resolve_call(callee)? {
            Callable::Native(function) => function(self, args),
            Callable::Bound {
                receiver,
                target: BoundTarget::Native(function),
            } => {
                let full = Self::with_receiver(receiver, args);
                function(self, &full)
            }
            Callable::Bound {
                target: BoundTarget::Function(id),
                ..
            }
            | Callable::Function(id) => Err(RuntimeError::ScriptFunction(self.display(Value::object(id)))),
            Callable::Class(class) => self.instantiate(class).map(Value::object),
        }
    }
}
