use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;

/// Seconds since the Unix epoch.
pub fn builtin_now(rt: &mut Runtime, _args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(rt.caps().clock.unix_secs()))
}

/// Monotonic seconds since the process first asked.
pub fn builtin_clock(rt: &mut Runtime, _args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::from_f64(rt.caps().clock.mono_secs()))
}
