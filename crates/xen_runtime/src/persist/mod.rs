//! Binary persistence of compiled functions (`.xenb`).
//!
//! Layout, little-endian throughout:
//!
//! ```text
//! magic        "XENB"
//! version      u8
//! line count   u32          highest source line, diagnostic only
//! function record:
//!   name len   u32          bytes + 1; the name is NUL-terminated, empty for the script
//!   name       [u8]
//!   arity      u32
//!   constants  u32, then per entry: tag u8, payload len u32, payload
//!   code len   u32
//!   code       [u8]
//! ```
//!
//! Constant tags: 0 null, 1 bool, 2 number, 3 string, 4 nested function
//! record, 5 native function by qualified name. Per-byte line numbers are not
//! stored; loaded chunks carry zeroes.

mod reader;
mod writer;

use std::path::Path;

use thiserror::Error;

use crate::Runtime;
use crate::core::ObjectId;

pub use reader::decode;
pub use writer::encode;

pub const MAGIC: [u8; 4] = *b"XENB";
pub const VERSION: u8 = 1;
/// Maximum nesting of function constants.
pub const MAX_DEPTH: usize = 64;

pub(crate) const TAG_NULL: u8 = 0;
pub(crate) const TAG_BOOL: u8 = 1;
pub(crate) const TAG_NUMBER: u8 = 2;
pub(crate) const TAG_STRING: u8 = 3;
pub(crate) const TAG_FUNCTION: u8 = 4;
pub(crate) const TAG_NATIVE: u8 = 5;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("not a xenb file (bad magic)")]
    BadMagic,
    #[error("unsupported xenb version {0}")]
    UnsupportedVersion(u8),
    #[error("unexpected end of input at offset {offset}")]
    Truncated { offset: usize },
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("string at offset {offset} is not NUL-terminated")]
    MissingNul { offset: usize },
    #[error("unknown constant tag {tag} at offset {offset}")]
    UnknownTag { tag: u8, offset: usize },
    #[error("constant with tag {tag} has invalid length {len}")]
    BadLength { tag: u8, len: u32 },
    #[error("native function '{0}' is not defined in this runtime")]
    UnresolvedNative(String),
    #[error("constant {index} is a {kind} and cannot be persisted")]
    Unserializable { index: usize, kind: &'static str },
    #[error("{count} trailing bytes at offset {offset}")]
    TrailingBytes { offset: usize, count: usize },
    #[error("function constants nested deeper than {}", MAX_DEPTH)]
    TooDeep,
    #[error("{0} does not fit in a u32 length")]
    TooLarge(&'static str),
    #[error("expected a function, got {0}")]
    NotAFunction(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A decoded program: the entry function plus header metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Program {
    pub function: ObjectId,
    pub line_count: u32,
    pub version: u8,
}

pub fn save(rt: &Runtime, function: ObjectId, path: impl AsRef<Path>) -> Result<(), PersistError> {
    let bytes = encode(rt, function)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

pub fn load(rt: &mut Runtime, path: impl AsRef<Path>) -> Result<Program, PersistError> {
    let bytes = std::fs::read(path)?;
    decode(rt, &bytes)
}
