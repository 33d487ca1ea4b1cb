use crate::Runtime;
use crate::core::object::Chunk;
use crate::core::{ObjectId, Value};

use super::{
    MAGIC, MAX_DEPTH, PersistError, Program, TAG_BOOL, TAG_FUNCTION, TAG_NATIVE, TAG_NULL, TAG_NUMBER, TAG_STRING,
    VERSION,
};

/// Rebuilds a program from `bytes`. String constants are interned; natives
/// are resolved by qualified name against the runtime's registry.
pub fn decode(rt: &mut Runtime, bytes: &[u8]) -> Result<Program, PersistError> {
    let mut r = Reader::new(bytes, 0);
    if r.take(MAGIC.len()).map_err(|_| PersistError::BadMagic)? != MAGIC {
        return Err(PersistError::BadMagic);
    }
    let version = r.u8()?;
    if version != VERSION {
        return Err(PersistError::UnsupportedVersion(version));
    }
    let line_count = r.u32()?;
    let function = read_function(rt, &mut r, 0)?;
    r.finish()?;
    tracing::debug!(target: "xen_runtime::persist", bytes = bytes.len(), line_count, "decoded program");
    Ok(Program {
        function,
        line_count,
        version,
    })
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    /// Offset of `bytes` within the whole file, for error positions.
    base: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], base: usize) -> Self {
        Self { bytes, pos: 0, base }
    }

    fn offset(&self) -> usize {
        self.base + self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], PersistError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(PersistError::Truncated { offset: self.offset() })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], PersistError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, PersistError> {
        Ok(self.array::<1>()?[0])
    }

    fn u32(&mut self) -> Result<u32, PersistError> {
        Ok(u32::from_le_bytes(self.array()?))
    }

    /// `len` bytes holding UTF-8 text followed by a single NUL.
    fn c_str(&mut self, len: u32) -> Result<&'a str, PersistError> {
        let offset = self.offset();
        let raw = self.take(len as usize)?;
        let Some((&0, text)) = raw.split_last() else {
            return Err(PersistError::MissingNul { offset });
        };
        std::str::from_utf8(text).map_err(|_| PersistError::InvalidUtf8 { offset })
    }

    fn finish(&self) -> Result<(), PersistError> {
        let count = self.bytes.len() - self.pos;
        if count != 0 {
            return Err(PersistError::TrailingBytes {
                offset: self.offset(),
                count,
            });
        }
        Ok(())
    }
}

fn read_function(rt: &mut Runtime, r: &mut Reader<'_>, depth: usize) -> Result<ObjectId, PersistError> {
    if depth > MAX_DEPTH {
        return Err(PersistError::TooDeep);
    }
    let name_len = r.u32()?;
    let name = r.c_str(name_len)?;
    let arity = r.u32()?;
    let count = r.u32()? as usize;
    tracing::trace!(target: "xen_runtime::persist", name, arity, count, depth, "function record");

    // every entry takes at least five bytes, so a bogus count cannot
    // reserve more than the input could hold
    let mut chunk = Chunk::new();
    chunk.constants.reserve(count.min(r.bytes.len() / 5));
    for _ in 0..count {
        let value = read_constant(rt, r, depth)?;
        chunk.constants.push(value);
    }

    let code_len = r.u32()?;
    chunk.code = r.take(code_len as usize)?.to_vec();
    chunk.lines = vec![0; chunk.code.len()];

    let name = (!name.is_empty()).then_some(name);
    Ok(rt.new_function(name, arity, chunk))
}

fn read_constant(rt: &mut Runtime, r: &mut Reader<'_>, depth: usize) -> Result<Value, PersistError> {
    let tag_offset = r.offset();
    let tag = r.u8()?;
    let len = r.u32()?;
    let payload_base = r.offset();
    let payload = r.take(len as usize)?;
    tracing::trace!(target: "xen_runtime::persist", tag, len, offset = tag_offset, "constant");

    let bad_length = || PersistError::BadLength { tag, len };
    let value = match tag {
        // null carries one padding byte; anything beyond it is skipped
        TAG_NULL => {
            if payload.is_empty() {
                return Err(bad_length());
            }
            Value::NULL
        }
        TAG_BOOL => match payload {
            [b] => Value::from_bool(*b != 0),
            _ => return Err(bad_length()),
        },
        TAG_NUMBER => {
            let bytes: [u8; 8] = payload.try_into().map_err(|_| bad_length())?;
            Value::from_f64(f64::from_le_bytes(bytes))
        }
        TAG_STRING => {
            let text = Reader::new(payload, payload_base).c_str(len)?;
            Value::object(rt.intern_copy(text))
        }
        TAG_FUNCTION => {
            let mut nested = Reader::new(payload, payload_base);
            let id = read_function(rt, &mut nested, depth + 1)?;
            nested.finish()?;
            Value::object(id)
        }
        TAG_NATIVE => {
            let name = Reader::new(payload, payload_base).c_str(len)?;
            rt.resolve_native(name)
                .ok_or_else(|| PersistError::UnresolvedNative(name.to_string()))?
        }
        _ => {
            return Err(PersistError::UnknownTag {
                tag,
                offset: tag_offset,
            });
        }
    };
    Ok(value)
}
