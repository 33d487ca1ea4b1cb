use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;

use super::MethodEntry;
use super::common::{expect_array, expect_str, optional, require};

pub(crate) static METHODS: &[MethodEntry] = &[
    MethodEntry::property("len", arr_len),
    MethodEntry::method("push", arr_push),
    MethodEntry::method("pop", arr_pop),
    MethodEntry::property("first", arr_first),
    MethodEntry::property("last", arr_last),
    MethodEntry::method("clear", arr_clear),
    MethodEntry::method("contains", arr_contains),
    MethodEntry::method("index_of", arr_index_of),
    MethodEntry::method("reverse", arr_reverse),
    MethodEntry::method("join", arr_join),
];

pub(crate) fn arr_len(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "len", "array", 0)?;
    Ok(Value::from_f64(rt.array(id).map_or(0, |a| a.len()) as f64))
}

/// Appends every argument after the receiver and returns the new length.
pub(crate) fn arr_push(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "push", "array", 0)?;
    require(args, "push", "value", 1)?;
    let Some(array) = rt.array_mut(id) else {
        return Ok(Value::NULL);
    };
    for &value in &args[1..] {
        array.push(value);
    }
    Ok(Value::from_f64(array.len() as f64))
}

pub(crate) fn arr_pop(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "pop", "array", 0)?;
    Ok(rt.array_mut(id).map_or(Value::NULL, |a| a.pop()))
}

pub(crate) fn arr_first(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "first", "array", 0)?;
    Ok(rt.array(id).and_then(|a| a.first()).unwrap_or(Value::NULL))
}

pub(crate) fn arr_last(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "last", "array", 0)?;
    Ok(rt.array(id).and_then(|a| a.last()).unwrap_or(Value::NULL))
}

pub(crate) fn arr_clear(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "clear", "array", 0)?;
    if let Some(array) = rt.array_mut(id) {
        array.clear();
    }
    Ok(Value::NULL)
}

fn position(rt: &Runtime, args: &[Value], op: &'static str) -> Result<Option<usize>, RuntimeError> {
    let id = expect_array(rt, args, op, "array", 0)?;
    let needle = require(args, op, "value", 1)?;
    Ok(rt
        .array(id)
        .and_then(|a| a.as_slice().iter().position(|&v| v == needle)))
}

pub(crate) fn arr_contains(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_bool(position(rt, args, "contains")?.is_some()))
}

/// Index of the first equal element, `-1` when absent.
pub(crate) fn arr_index_of(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let index = position(rt, args, "index_of")?.map_or(-1.0, |i| i as f64);
    Ok(Value::from_f64(index))
}

/// Reverses in place and returns the receiver.
pub(crate) fn arr_reverse(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "reverse", "array", 0)?;
    if let Some(array) = rt.array_mut(id) {
        array.reverse();
    }
    Ok(args[0])
}

/// Joins the display form of each element with `delimiter` (default `", "`).
pub(crate) fn arr_join(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_array(rt, args, "join", "array", 0)?;
    let delim = match optional(args, 1) {
        Some(_) => expect_str(rt, args, "join", "delimiter", 1)?.to_string(),
        None => String::from(", "),
    };
    let joined = {
        let elements = rt.array(id).map(|a| a.as_slice()).unwrap_or(&[]);
        elements
            .iter()
            .map(|&v| rt.display(v))
            .collect::<Vec<_>>()
            .join(&delim)
    };
    Ok(rt.string_value(joined))
}
