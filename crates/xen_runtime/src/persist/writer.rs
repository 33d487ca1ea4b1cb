use crate::Runtime;
use crate::core::object::{Function, ManagedObject};
use crate::core::{ObjectId, Value, ValueKind};

use super::{
    MAGIC, MAX_DEPTH, PersistError, TAG_BOOL, TAG_FUNCTION, TAG_NATIVE, TAG_NULL, TAG_NUMBER, TAG_STRING, VERSION,
};

/// Serializes `function` and every function reachable through its constant
/// pool.
pub fn encode(rt: &Runtime, function: ObjectId) -> Result<Vec<u8>, PersistError> {
    let root = rt
        .function(function)
        .ok_or_else(|| PersistError::NotAFunction(rt.type_name(Value::object(function))))?;
    let mut w = Writer { rt, buf: Vec::with_capacity(64 + root.chunk.code.len()) };
    w.buf.extend_from_slice(&MAGIC);
    w.u8(VERSION);
    w.u32(root.chunk.line_count());
    w.function(root, 0)?;
    tracing::debug!(target: "xen_runtime::persist", bytes = w.buf.len(), "encoded program");
    Ok(w.buf)
}

struct Writer<'rt> {
    rt: &'rt Runtime,
    buf: Vec<u8>,
}

fn len_u32(len: usize, what: &'static str) -> Result<u32, PersistError> {
    u32::try_from(len).map_err(|_| PersistError::TooLarge(what))
}

impl Writer<'_> {
    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Length-prefixed, NUL-terminated string. The prefix counts the NUL.
    fn c_str(&mut self, s: &str, what: &'static str) -> Result<(), PersistError> {
        self.u32(len_u32(s.len() + 1, what)?);
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
        Ok(())
    }

    fn function(&mut self, f: &Function, depth: usize) -> Result<(), PersistError> {
        if depth > MAX_DEPTH {
            return Err(PersistError::TooDeep);
        }
        let rt = self.rt;
        let name = f.name.and_then(|n| rt.heap().str_content(n)).unwrap_or("");
        self.c_str(name, "function name")?;
        self.u32(f.arity);
        self.u32(len_u32(f.chunk.constants.len(), "constant pool")?);
        for (index, &constant) in f.chunk.constants.iter().enumerate() {
            self.constant(index, constant, depth)?;
        }
        self.u32(len_u32(f.chunk.code.len(), "code")?);
        self.buf.extend_from_slice(&f.chunk.code);
        Ok(())
    }

    fn constant(&mut self, index: usize, value: Value, depth: usize) -> Result<(), PersistError> {
        match value.kind() {
            ValueKind::Null => {
                self.u8(TAG_NULL);
                self.u32(1);
                self.u8(0);
            }
            ValueKind::Bool => {
                self.u8(TAG_BOOL);
                self.u32(1);
                self.u8(value.as_bool() as u8);
            }
            ValueKind::Number => {
                self.u8(TAG_NUMBER);
                self.u32(8);
                self.buf.extend_from_slice(&value.as_f64().to_le_bytes());
            }
            ValueKind::Object => {
                let rt = self.rt;
                match rt.heap().try_get(value.as_obj_id()) {
                    Some(ManagedObject::Str(s)) => {
                        self.u8(TAG_STRING);
                        self.c_str(s.as_str(), "string constant")?;
                    }
                    Some(ManagedObject::Function(f)) => {
                        self.u8(TAG_FUNCTION);
                        // payload length is patched once the record is written
                        let at = self.buf.len();
                        self.u32(0);
                        self.function(f, depth + 1)?;
                        let len = len_u32(self.buf.len() - at - 4, "nested function")?;
                        self.buf[at..at + 4].copy_from_slice(&len.to_le_bytes());
                    }
                    Some(ManagedObject::NativeFunction(n)) => {
                        self.u8(TAG_NATIVE);
                        self.c_str(&n.qualified_name(), "native name")?;
                    }
                    _ => {
                        return Err(PersistError::Unserializable {
                            index,
                            kind: rt.type_name(value),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
