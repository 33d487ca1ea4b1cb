//! Heap handle types.

use std::fmt;

/// Handle to a heap-allocated object.
///
/// Handles are indices into the owning runtime's heap registry. They are only
/// meaningful for the runtime that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type tag stored in every heap object header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjKind {
    Str,
    Function,
    NativeFunction,
    Namespace,
    Array,
    Dict,
    Class,
    Instance,
    BoundMethod,
    U8Array,
}

impl ObjKind {
    pub const ALL: [ObjKind; 10] = [
        ObjKind::Str,
        ObjKind::Function,
        ObjKind::NativeFunction,
        ObjKind::Namespace,
        ObjKind::Array,
        ObjKind::Dict,
        ObjKind::Class,
        ObjKind::Instance,
        ObjKind::BoundMethod,
        ObjKind::U8Array,
    ];

    /// Name reported by `typeof`.
    pub fn type_name(self) -> &'static str {
        match self {
            ObjKind::Str => "string",
            ObjKind::Function => "function",
            ObjKind::NativeFunction => "native_function",
            ObjKind::Namespace => "namespace",
            ObjKind::Array => "array",
            ObjKind::Dict => "dictionary",
            ObjKind::Class => "class",
            ObjKind::Instance => "instance",
            ObjKind::BoundMethod => "bound_method",
            ObjKind::U8Array => "u8array",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ObjKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
