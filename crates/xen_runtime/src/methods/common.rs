use crate::Runtime;
use crate::core::{ObjKind, ObjectId, Value};
use crate::errors::RuntimeError;

/// Argument at `position`, or a missing-argument error naming `param`.
pub(crate) fn require(args: &[Value], op: &'static str, param: &'static str, position: usize) -> Result<Value, RuntimeError> {
    args.get(position)
        .copied()
        .ok_or(RuntimeError::MissingArgument { op, param, position })
}

pub(crate) fn check_max(args: &[Value], op: &'static str, max: usize) -> Result<(), RuntimeError> {
    if args.len() > max {
        return Err(RuntimeError::TooManyArguments {
            op,
            max,
            actual: args.len(),
        });
    }
    Ok(())
}

pub(crate) fn type_error(
    rt: &Runtime,
    value: Value,
    op: &'static str,
    param: &'static str,
    expected: &'static str,
) -> RuntimeError {
    RuntimeError::ArgumentType {
        op,
        param,
        expected,
        actual: rt.type_name(value),
    }
}

pub(crate) fn expect_number(
    rt: &Runtime,
    args: &[Value],
    op: &'static str,
    param: &'static str,
    position: usize,
) -> Result<f64, RuntimeError> {
    let value = require(args, op, param, position)?;
    value
        .as_number()
        .ok_or_else(|| type_error(rt, value, op, param, "number"))
}

pub(crate) fn expect_str<'a>(
    rt: &'a Runtime,
    args: &[Value],
    op: &'static str,
    param: &'static str,
    position: usize,
) -> Result<&'a str, RuntimeError> {
    let value = require(args, op, param, position)?;
    rt.as_str(value)
        .ok_or_else(|| type_error(rt, value, op, param, "string"))
}

fn expect_kind(
    rt: &Runtime,
    args: &[Value],
    kind: ObjKind,
    op: &'static str,
    param: &'static str,
    position: usize,
) -> Result<ObjectId, RuntimeError> {
    let value = require(args, op, param, position)?;
    match value.as_object() {
        Some(id) if rt.heap.try_kind_of(id) == Some(kind) => Ok(id),
        _ => Err(type_error(rt, value, op, param, kind.type_name())),
    }
}

pub(crate) fn expect_array(
    rt: &Runtime,
    args: &[Value],
    op: &'static str,
    param: &'static str,
    position: usize,
) -> Result<ObjectId, RuntimeError> {
    expect_kind(rt, args, ObjKind::Array, op, param, position)
}

pub(crate) fn expect_dict(
    rt: &Runtime,
    args: &[Value],
    op: &'static str,
    param: &'static str,
    position: usize,
) -> Result<ObjectId, RuntimeError> {
    expect_kind(rt, args, ObjKind::Dict, op, param, position)
}

/// Optional trailing argument; `None` when absent or `null`.
pub(crate) fn optional(args: &[Value], position: usize) -> Option<Value> {
    args.get(position).copied().filter(|v| !v.is_null())
}
