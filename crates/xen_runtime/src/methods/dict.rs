use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;

use super::MethodEntry;
use super::common::{expect_dict, require};

pub(crate) static METHODS: &[MethodEntry] = &[
    MethodEntry::property("len", dict_len),
    MethodEntry::method("keys", dict_keys),
    MethodEntry::method("values", dict_values),
    MethodEntry::method("has", dict_has),
    MethodEntry::method("remove", dict_remove),
    MethodEntry::method("clear", dict_clear),
];

pub(crate) fn dict_len(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_dict(rt, args, "len", "dictionary", 0)?;
    Ok(Value::from_f64(rt.dict(id).map_or(0, |d| d.len()) as f64))
}

/// Keys in storage order.
pub(crate) fn dict_keys(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_dict(rt, args, "keys", "dictionary", 0)?;
    let keys: Vec<Value> = rt
        .dict(id)
        .map(|d| d.iter().map(|(k, _)| Value::object(k)).collect())
        .unwrap_or_default();
    Ok(Value::object(rt.new_array_from(keys)))
}

pub(crate) fn dict_values(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_dict(rt, args, "values", "dictionary", 0)?;
    let values: Vec<Value> = rt
        .dict(id)
        .map(|d| d.iter().map(|(_, v)| v).collect())
        .unwrap_or_default();
    Ok(Value::object(rt.new_array_from(values)))
}

pub(crate) fn dict_has(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_dict(rt, args, "has", "dictionary", 0)?;
    let key = require(args, "has", "key", 1)?;
    Ok(Value::from_bool(rt.dict_get(id, key)?.is_some()))
}

pub(crate) fn dict_remove(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_dict(rt, args, "remove", "dictionary", 0)?;
    let key = require(args, "remove", "key", 1)?;
    Ok(Value::from_bool(rt.dict_remove(id, key)?))
}

pub(crate) fn dict_clear(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = expect_dict(rt, args, "clear", "dictionary", 0)?;
    if let Some(dict) = rt.dict_mut(id) {
        dict.clear();
    }
    Ok(Value::NULL)
}
