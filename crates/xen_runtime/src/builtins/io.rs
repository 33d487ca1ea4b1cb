//! Console natives. Output accumulates in the runtime's output buffer; input
//! comes from the configured line reader.

use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;
use crate::methods::common::require;

fn write_all(rt: &mut Runtime, args: &[Value]) {
    for &value in args {
        let text = rt.display(value);
        rt.write_output(&text);
    }
}

pub fn builtin_println(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    require(args, "println", "msg", 0)?;
    write_all(rt, args);
    rt.write_output("\n");
    Ok(Value::NULL)
}

pub fn builtin_print(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    require(args, "print", "msg", 0)?;
    write_all(rt, args);
    Ok(Value::NULL)
}

/// `input(prompt?)`: one line without its terminator, `null` at end of input.
pub fn builtin_input(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    if let Some(prompt) = args.first().and_then(|&v| rt.as_str(v)).map(str::to_string) {
        rt.write_output(&prompt);
    }
    match rt.caps_mut().input.read_line() {
        Some(line) => Ok(rt.string_value(line)),
        None => Ok(Value::NULL),
    }
}

pub fn builtin_clear(rt: &mut Runtime, _args: &[Value]) -> Result<Value, RuntimeError> {
    rt.write_output("\x1b[2J\x1b[H");
    Ok(Value::TRUE)
}

/// Waits for a line. Returns the newline code, or `-1` at end of input.
pub fn builtin_pause(rt: &mut Runtime, _args: &[Value]) -> Result<Value, RuntimeError> {
    let code = match rt.caps_mut().input.read_line() {
        Some(_) => f64::from(b'\n'),
        None => -1.0,
    };
    Ok(Value::from_f64(code))
}
