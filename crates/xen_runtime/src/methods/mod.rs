//! Per-type member tables for the built-in value kinds.
//!
//! Each table is a static list scanned linearly; the receiver's kind picks the
//! table. Natives receive the receiver as `args[0]`.

use crate::core::object::NativeFn;
use crate::core::{Heap, ObjKind, Value, ValueKind};

pub(crate) mod array;
pub(crate) mod common;
pub(crate) mod dict;
pub(crate) mod number;
pub(crate) mod str;

#[derive(Clone, Copy)]
pub struct MethodEntry {
    pub name: &'static str,
    pub function: NativeFn,
    /// Properties are evaluated on access instead of producing a bound method.
    pub is_property: bool,
}

impl MethodEntry {
    pub(crate) const fn method(name: &'static str, function: NativeFn) -> Self {
        Self {
            name,
            function,
            is_property: false,
        }
    }

    pub(crate) const fn property(name: &'static str, function: NativeFn) -> Self {
        Self {
            name,
            function,
            is_property: true,
        }
    }
}

/// Member table for the kind of `receiver`, `None` for kinds without one.
pub fn table_for(receiver: Value, heap: &Heap) -> Option<&'static [MethodEntry]> {
    match receiver.kind() {
        ValueKind::Number => Some(number::METHODS),
        ValueKind::Object => match heap.try_kind_of(receiver.as_obj_id())? {
            ObjKind::Str => Some(str::METHODS),
            ObjKind::Array => Some(array::METHODS),
            ObjKind::Dict => Some(dict::METHODS),
            _ => None,
        },
        ValueKind::Null | ValueKind::Bool => None,
    }
}

pub fn lookup(table: &'static [MethodEntry], name: &str) -> Option<&'static MethodEntry> {
    table.iter().find(|entry| entry.name == name)
}

/// Member names of the table for `kind`, in table order.
pub fn member_names(kind: ObjKind) -> Vec<&'static str> {
    let table: &[MethodEntry] = match kind {
        ObjKind::Str => str::METHODS,
        ObjKind::Array => array::METHODS,
        ObjKind::Dict => dict::METHODS,
        _ => &[],
    };
    table.iter().map(|e| e.name).collect()
}

pub fn number_member_names() -> Vec<&'static str> {
    number::METHODS.iter().map(|e| e.name).collect()
}
