//! Xen language runtime: object model, heap, built-in library and bytecode
//! persistence. Bytecode execution lives with the interpreter; this crate
//! provides everything it calls into.

#![allow(clippy::new_without_default)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::unnecessary_cast)]

pub mod builtins_registry;
pub mod core;
pub mod errors;
pub mod methods;
pub mod persist;
pub mod util;

mod builtins;
mod runtime;

pub use builtins_registry::{BuiltinProvider, BuiltinRegistry, StdBuiltinProvider};
pub use core::object::{Chunk, NativeFn};
pub use core::{Heap, ManagedObject, ObjKind, ObjectId, TeardownStats, Value, ValueKind};
pub use errors::RuntimeError;
pub use persist::{PersistError, Program};
pub use runtime::{Callable, MAX_ARRAY_LEN, MemberAccess, Runtime, RuntimeConfig};
pub use util::{Capabilities, Clock, FileSystem, LineReader, RngAlgorithm};
