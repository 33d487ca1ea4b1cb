//! Core types for the Xen runtime.
//!
//! This crate contains the fundamental types that are independent of the runtime:
//! - `Value` - NaN-boxed runtime value representation
//! - `ObjectId` - Handle to a heap-allocated object
//! - `ObjKind` - Type tag carried by every heap object header
//! - fast hash map helpers shared by the interner and dictionaries

pub mod gc;
pub mod value;

pub use gc::{ObjKind, ObjectId};
pub use value::{FastHashMap, Value, ValueKind, fast_hasher, fast_map_new, fast_map_with_capacity, hash_str};
