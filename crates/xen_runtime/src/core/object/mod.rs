//! Heap object variants.

mod array;
mod class;
mod dict;
mod function;
mod namespace;
mod string;

pub use array::{Array, ByteArray};
pub use class::{Class, Instance, PropertyDef};
pub use dict::Dict;
pub use function::{BoundMethod, BoundTarget, Chunk, Function, NativeFn, NativeFunction};
pub use namespace::Namespace;
pub use string::XenString;

use std::mem::size_of;
use xen_core::{ObjKind, Value};

pub enum ManagedObject {
    Str(XenString),
    Function(Box<Function>),
    NativeFunction(NativeFunction),
    Namespace(Box<Namespace>),
    Array(Array),
    Dict(Dict),
    Class(Box<Class>),
    Instance(Instance),
    BoundMethod(BoundMethod),
    U8Array(ByteArray),
}

impl ManagedObject {
    #[inline]
    pub fn kind(&self) -> ObjKind {
        match self {
            ManagedObject::Str(_) => ObjKind::Str,
            ManagedObject::Function(_) => ObjKind::Function,
            ManagedObject::NativeFunction(_) => ObjKind::NativeFunction,
            ManagedObject::Namespace(_) => ObjKind::Namespace,
            ManagedObject::Array(_) => ObjKind::Array,
            ManagedObject::Dict(_) => ObjKind::Dict,
            ManagedObject::Class(_) => ObjKind::Class,
            ManagedObject::Instance(_) => ObjKind::Instance,
            ManagedObject::BoundMethod(_) => ObjKind::BoundMethod,
            ManagedObject::U8Array(_) => ObjKind::U8Array,
        }
    }

    /// Approximate number of bytes owned by this object, header included.
    pub fn size(&self) -> usize {
        let base = size_of::<ManagedObject>();
        let deep = match self {
            ManagedObject::Str(s) => s.len(),
            ManagedObject::Function(f) => {
                size_of::<Function>()
                    + f.chunk.code.capacity()
                    + f.chunk.lines.capacity() * size_of::<u32>()
                    + f.chunk.constants.capacity() * size_of::<Value>()
            }
            ManagedObject::NativeFunction(n) => n.name.len() + n.owner.as_ref().map_or(0, |o| o.len()),
            ManagedObject::Namespace(ns) => {
                size_of::<Namespace>()
                    + ns.name().len()
                    + ns.iter().map(|(k, _)| k.len() + size_of::<Value>() + 16).sum::<usize>()
            }
            ManagedObject::Array(a) => a.capacity() * size_of::<Value>(),
            ManagedObject::Dict(d) => d.capacity() * (size_of::<xen_core::ObjectId>() + size_of::<Value>() + 1),
            ManagedObject::Class(c) => {
                size_of::<Class>()
                    + c.properties().len() * size_of::<PropertyDef>()
                    + c.method_count() * (size_of::<xen_core::ObjectId>() + size_of::<Value>() + 1)
            }
            ManagedObject::Instance(i) => i.fields().len() * size_of::<Value>(),
            ManagedObject::BoundMethod(b) => b.name.len(),
            ManagedObject::U8Array(b) => b.capacity(),
        };
        base + deep
    }
}
