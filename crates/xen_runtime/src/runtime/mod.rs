//! Runtime module - the state every native and the interpreter share.
//!
//! The `Runtime` struct lives in core.rs; the other submodules extend it with
//! object construction, the namespace registry, the class model, member
//! dispatch and display.

mod classes;
mod config;
mod display;
mod members;
mod namespaces;
mod objects;

pub use config::RuntimeConfig;
pub use members::{Callable, MemberAccess};
pub use objects::MAX_ARRAY_LEN;

mod core;
pub use self::core::Runtime;
