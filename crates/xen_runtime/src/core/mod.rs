//! Heap registry, string interner and the object variants it owns.

pub mod heap;
pub mod intern;
pub mod object;

pub use heap::{Heap, TeardownStats};
pub use object::ManagedObject;
pub use xen_core::{ObjKind, ObjectId, Value, ValueKind};
