//! Filesystem and process natives.
//!
//! Every path argument is checked against the runtime's allowed roots before
//! the filesystem capability is touched.

use std::process::Command;

use crate::Runtime;
use crate::core::Value;
use crate::errors::RuntimeError;
use crate::methods::common::{expect_str, optional};

fn expect_path(rt: &Runtime, args: &[Value], op: &'static str, param: &'static str) -> Result<String, RuntimeError> {
    let path = expect_str(rt, args, op, param, 0)?.to_string();
    if !rt.caps().path_allowed(&path) {
        return Err(RuntimeError::PathNotAllowed { op, path });
    }
    Ok(path)
}

fn flag(args: &[Value], position: usize) -> bool {
    optional(args, position)
        .and_then(|v| v.as_boolean())
        .unwrap_or(false)
}

/// Reports `err` and yields `false`, for natives whose failure value is a bool.
fn fail(rt: &mut Runtime, err: RuntimeError) -> Result<Value, RuntimeError> {
    rt.report(&err);
    Ok(Value::FALSE)
}

pub fn builtin_readtxt(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let path = expect_path(rt, args, "readtxt", "filename")?;
    let text = rt
        .caps()
        .fs
        .read_to_string(&path)
        .map_err(|e| RuntimeError::io("readtxt", format!("failed to open file {path}: {e}")))?;
    Ok(rt.string_value(text))
}

pub fn builtin_readlines(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let path = expect_path(rt, args, "readlines", "filename")?;
    let text = rt
        .caps()
        .fs
        .read_to_string(&path)
        .map_err(|e| RuntimeError::io("readlines", format!("failed to open file {path}: {e}")))?;
    let lines: Vec<Value> = text.lines().map(|line| rt.new_string(line)).collect();
    Ok(Value::object(rt.new_array_from(lines)))
}

/// Records the exit request; the embedder decides when to stop.
pub fn builtin_exit(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let code = args.first().and_then(Value::as_number).map_or(0, |n| n as i32);
    tracing::info!(target: "xen_runtime::os", code, "exit requested");
    rt.write_output(&format!("Xen was terminated with exit code {code}\n"));
    rt.request_exit(code);
    Ok(Value::NULL)
}

/// `exec(cmd, args?)`: runs `cmd` directly, without a shell, and returns its
/// exit status (`-1` when it was terminated by a signal).
pub fn builtin_exec(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let program = expect_str(rt, args, "exec", "cmd", 0)?.to_string();
    let argv: Vec<String> = optional(args, 1)
        .and_then(|v| v.as_object())
        .and_then(|id| rt.array(id))
        .map(|a| {
            a.as_slice()
                .iter()
                .filter_map(|&v| rt.as_str(v).map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    tracing::debug!(target: "xen_runtime::os", %program, args = argv.len(), "exec");
    let status = Command::new(&program)
        .args(&argv)
        .status()
        .map_err(|e| RuntimeError::io("exec", format!("failed to run {program}: {e}")))?;
    Ok(Value::from_f64(status.code().map_or(-1.0, f64::from)))
}

/// `mkdir(dir, overwrite?)`: an existing directory is left alone unless
/// `overwrite` is set, in which case it is removed and recreated.
pub fn builtin_mkdir(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let dir = expect_path(rt, args, "mkdir", "dir")?;
    let overwrite = flag(args, 1);
    if rt.caps().fs.is_dir(&dir) {
        if !overwrite {
            return Ok(Value::FALSE);
        }
        if let Err(e) = rt.caps().fs.remove_dir_all(&dir) {
            return fail(rt, RuntimeError::io("mkdir", format!("failed to remove directory '{dir}': {e}")));
        }
    }
    Ok(Value::from_bool(rt.caps().fs.create_dir(&dir).is_ok()))
}

/// `rmdir(dir, recursive?)`
pub fn builtin_rmdir(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let dir = expect_path(rt, args, "rmdir", "dir")?;
    let result = if flag(args, 1) {
        rt.caps().fs.remove_dir_all(&dir)
    } else {
        rt.caps().fs.remove_dir(&dir)
    };
    match result {
        Ok(()) => Ok(Value::TRUE),
        Err(e) => fail(rt, RuntimeError::io("rmdir", format!("failed to remove directory '{dir}': {e}"))),
    }
}

pub fn builtin_rm(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let path = expect_path(rt, args, "rm", "filename")?;
    let fs = &rt.caps().fs;
    let failure = if !fs.exists(&path) {
        Some(format!("file does not exist: {path}"))
    } else if !fs.is_file(&path) {
        Some(format!("path is not a file: {path}"))
    } else {
        fs.remove_file(&path)
            .err()
            .map(|e| format!("failed to delete file {path}: {e}"))
    };
    match failure {
        None => Ok(Value::TRUE),
        Some(message) => fail(rt, RuntimeError::io("rm", message)),
    }
}

pub fn builtin_exists(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let path = expect_path(rt, args, "exists", "path")?;
    Ok(Value::from_bool(rt.caps().fs.exists(&path)))
}
