//! Global functions: `typeof` and the type constructors.

use crate::Runtime;
use crate::core::{Value, ValueKind};
use crate::errors::RuntimeError;
use crate::methods::common::{check_max, require, type_error};
use crate::util::format_number;

pub fn builtin_typeof(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let value = require(args, "typeof", "value", 0)?;
    let name = rt.type_name(value);
    Ok(rt.new_string(name))
}

/// Longest leading numeric literal of `text`, `0` when there is none.
fn parse_number_prefix(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

pub fn builtin_number(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let value = require(args, "number", "construct_from", 0)?;
    let n = match value.kind() {
        ValueKind::Null => 0.0,
        ValueKind::Bool => f64::from(u8::from(value.as_bool())),
        ValueKind::Number => return Ok(value),
        ValueKind::Object => match rt.as_str(value) {
            Some(text) => parse_number_prefix(text),
            None => {
                return Err(RuntimeError::Construction {
                    target: "number",
                    from: rt.type_name(value),
                });
            }
        },
    };
    Ok(Value::from_f64(n))
}

pub fn builtin_string(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let value = require(args, "string", "construct_from", 0)?;
    if rt.as_str(value).is_some() {
        return Ok(value);
    }
    let text = match value.as_number() {
        Some(n) => format_number(n),
        None => rt.display(value),
    };
    Ok(rt.string_value(text))
}

/// `null`, `false` and `0` are false; everything else is true.
pub fn builtin_bool(_rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let value = require(args, "bool", "construct_from", 0)?;
    Ok(Value::from_bool(!value.is_falsey()))
}

/// `array(count?, default?)`: `count` copies of `default` (or `null`).
pub fn builtin_array(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    check_max(args, "array", 2)?;
    let count = match args.first() {
        Some(&v) => v
            .as_number()
            .ok_or_else(|| type_error(rt, v, "array", "count", "number"))?,
        None => 0.0,
    };
    if !count.is_finite() {
        return Err(RuntimeError::Construction {
            target: "array",
            from: "a non-finite count",
        });
    }
    let fill = args.get(1).copied().unwrap_or(Value::NULL);
    let count = if count > 0.0 { count as usize } else { 0 };
    let id = rt.new_array_filled(count, fill)?;
    Ok(Value::object(id))
}

#[cfg(test)]
mod tests {
    use super::parse_number_prefix;

    #[test]
    fn numeric_prefixes() {
        assert_eq!(parse_number_prefix("42"), 42.0);
        assert_eq!(parse_number_prefix("  -3.5kg"), -3.5);
        assert_eq!(parse_number_prefix("1e3x"), 1000.0);
        assert_eq!(parse_number_prefix("2e"), 2.0);
        assert_eq!(parse_number_prefix(".25"), 0.25);
        assert_eq!(parse_number_prefix("abc"), 0.0);
        assert_eq!(parse_number_prefix(""), 0.0);
    }
}
