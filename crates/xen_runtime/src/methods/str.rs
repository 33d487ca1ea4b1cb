//! String members. Positions and lengths count characters, not bytes.

use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;

use super::MethodEntry;
use super::common::{expect_number, expect_str, optional, type_error};

pub(crate) static METHODS: &[MethodEntry] = &[
    MethodEntry::property("len", str_len),
    MethodEntry::method("upper", str_upper),
    MethodEntry::method("lower", str_lower),
    MethodEntry::method("trim", str_trim),
    MethodEntry::method("contains", str_contains),
    MethodEntry::method("starts_with", str_starts_with),
    MethodEntry::method("ends_with", str_ends_with),
    MethodEntry::method("substr", str_substr),
    MethodEntry::method("find", str_find),
    MethodEntry::method("split", str_split),
    MethodEntry::method("replace", str_replace),
];

pub(crate) fn str_len(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "len", "string", 0)?;
    Ok(Value::from_f64(text.chars().count() as f64))
}

pub(crate) fn str_upper(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let upper = expect_str(rt, args, "upper", "string", 0)?.to_uppercase();
    Ok(rt.string_value(upper))
}

pub(crate) fn str_lower(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let lower = expect_str(rt, args, "lower", "string", 0)?.to_lowercase();
    Ok(rt.string_value(lower))
}

pub(crate) fn str_trim(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let trimmed = expect_str(rt, args, "trim", "string", 0)?.trim().to_string();
    Ok(rt.string_value(trimmed))
}

pub(crate) fn str_contains(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "contains", "string", 0)?;
    let needle = expect_str(rt, args, "contains", "needle", 1)?;
    Ok(Value::from_bool(text.contains(needle)))
}

pub(crate) fn str_starts_with(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "starts_with", "string", 0)?;
    let prefix = expect_str(rt, args, "starts_with", "prefix", 1)?;
    Ok(Value::from_bool(text.starts_with(prefix)))
}

pub(crate) fn str_ends_with(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "ends_with", "string", 0)?;
    let suffix = expect_str(rt, args, "ends_with", "suffix", 1)?;
    Ok(Value::from_bool(text.ends_with(suffix)))
}

/// `substr(start, len?)`: a negative start clamps to zero, a start past the end
/// yields the empty string and the length is clamped to what remains.
pub(crate) fn str_substr(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "substr", "string", 0)?;
    let start = expect_number(rt, args, "substr", "start", 1)?;
    let len = match optional(args, 2) {
        Some(v) => Some(
            v.as_number()
                .ok_or_else(|| type_error(rt, v, "substr", "length", "number"))?,
        ),
        None => None,
    };

    let count = text.chars().count() as i64;
    let start = (start as i64).max(0);
    let piece = if start >= count {
        String::new()
    } else {
        let remaining = count - start;
        let len = len.map_or(remaining, |l| (l as i64).clamp(0, remaining));
        text.chars().skip(start as usize).take(len as usize).collect()
    };
    Ok(rt.string_value(piece))
}

/// Character index of the first occurrence, `-1` when absent.
pub(crate) fn str_find(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "find", "string", 0)?;
    let needle = expect_str(rt, args, "find", "needle", 1)?;
    let index = text
        .find(needle)
        .map_or(-1.0, |byte| text[..byte].chars().count() as f64);
    Ok(Value::from_f64(index))
}

/// Splits on `delimiter`. An empty delimiter splits into characters; a
/// trailing empty piece is dropped.
pub(crate) fn str_split(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "split", "string", 0)?;
    let delim = expect_str(rt, args, "split", "delimiter", 1)?;
    let mut pieces: Vec<String> = if delim.is_empty() {
        text.chars().map(String::from).collect()
    } else {
        text.split(delim).map(str::to_string).collect()
    };
    if pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }
    let values: Vec<Value> = pieces.into_iter().map(|p| rt.string_value(p)).collect();
    Ok(Value::object(rt.new_array_from(values)))
}

pub(crate) fn str_replace(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let text = expect_str(rt, args, "replace", "string", 0)?;
    let find = expect_str(rt, args, "replace", "find", 1)?;
    let with = expect_str(rt, args, "replace", "replacement", 2)?;
    if find.is_empty() || !text.contains(find) {
        return Ok(args[0]);
    }
    let replaced = text.replace(find, with);
    Ok(rt.string_value(replaced))
}
