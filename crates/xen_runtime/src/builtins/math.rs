use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;
use crate::methods::common::expect_number;

fn unary(rt: &Runtime, args: &[Value], op: &'static str, f: fn(f64) -> f64) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(f(expect_number(rt, args, op, "value", 0)?)))
}

pub fn builtin_sqrt(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(rt, args, "sqrt", f64::sqrt)
}

pub fn builtin_sin(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(rt, args, "sin", f64::sin)
}

pub fn builtin_cos(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(rt, args, "cos", f64::cos)
}

pub fn builtin_tan(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(rt, args, "tan", f64::tan)
}

pub fn builtin_log(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(rt, args, "log", f64::ln)
}

pub fn builtin_log10(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(rt, args, "log10", f64::log10)
}

pub fn builtin_exp(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(rt, args, "exp", f64::exp)
}

pub fn builtin_pow(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let base = expect_number(rt, args, "pow", "base", 0)?;
    let exponent = expect_number(rt, args, "pow", "exponent", 1)?;
    Ok(Value::from_f64(base.powf(exponent)))
}

/// Smallest of the numeric arguments. The first must be a number; later
/// non-numbers are skipped.
pub fn builtin_min(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let first = expect_number(rt, args, "min", "value", 0)?;
    let min = args[1..]
        .iter()
        .filter_map(Value::as_number)
        .fold(first, |acc, n| if n < acc { n } else { acc });
    Ok(Value::from_f64(min))
}

pub fn builtin_max(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let first = expect_number(rt, args, "max", "value", 0)?;
    let max = args[1..]
        .iter()
        .filter_map(Value::as_number)
        .fold(first, |acc, n| if n > acc { n } else { acc });
    Ok(Value::from_f64(max))
}

/// Uniform number in `[0, 1)`.
pub fn builtin_random(rt: &mut Runtime, _args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(rt.next_random()))
}
