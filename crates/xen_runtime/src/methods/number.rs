use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;
use crate::util::format_number;

use super::MethodEntry;
use super::common::expect_number;

pub(crate) static METHODS: &[MethodEntry] = &[
    MethodEntry::method("abs", num_abs),
    MethodEntry::method("floor", num_floor),
    MethodEntry::method("ceil", num_ceil),
    MethodEntry::method("round", num_round),
    MethodEntry::method("to_string", num_to_string),
];

pub(crate) fn num_abs(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(expect_number(rt, args, "abs", "value", 0)?.abs()))
}

pub(crate) fn num_floor(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(expect_number(rt, args, "floor", "value", 0)?.floor()))
}

pub(crate) fn num_ceil(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(expect_number(rt, args, "ceil", "value", 0)?.ceil()))
}

/// Rounds half away from zero.
pub(crate) fn num_round(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(expect_number(rt, args, "round", "value", 0)?.round()))
}

pub(crate) fn num_to_string(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let n = expect_number(rt, args, "to_string", "value", 0)?;
    Ok(rt.string_value(format_number(n)))
}
