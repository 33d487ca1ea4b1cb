use xen_core::{ObjectId, Value};

use crate::Runtime;
use crate::errors::RuntimeError;

/// Native calling convention. Receiver-bound natives see the receiver as
/// `args[0]`.
pub type NativeFn = fn(&mut Runtime, &[Value]) -> Result<Value, RuntimeError>;

/// Compiled code for one function: opaque instruction bytes, the source line
/// of each byte, and the constant pool.
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub code: Vec<u8>,
    pub lines: Vec<u32>,
    pub constants: Vec<Value>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        self.lines.push(line);
    }

    /// Appends a constant and returns its pool index.
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.push(value);
        self.constants.len() - 1
    }

    /// Highest source line recorded, zero for an empty chunk.
    pub fn line_count(&self) -> u32 {
        self.lines.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Function {
    pub arity: u32,
    /// Interned name; `None` for the top-level script.
    pub name: Option<ObjectId>,
    pub chunk: Chunk,
}

impl Function {
    pub fn new(name: Option<ObjectId>, arity: u32, chunk: Chunk) -> Self {
        Self { arity, name, chunk }
    }
}

pub struct NativeFunction {
    pub name: Box<str>,
    /// Namespace the function was installed into, if any.
    pub owner: Option<Box<str>>,
    pub function: NativeFn,
}

impl NativeFunction {
    /// `name` for globals, `ns.name` for namespace members.
    pub fn qualified_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{owner}.{}", self.name),
            None => self.name.to_string(),
        }
    }
}

#[derive(Clone, Copy)]
pub enum BoundTarget {
    Native(NativeFn),
    Function(ObjectId),
}

pub struct BoundMethod {
    pub receiver: Value,
    pub target: BoundTarget,
    pub name: Box<str>,
}
