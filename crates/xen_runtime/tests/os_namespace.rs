mod common;

use std::fs;

use xen_runtime::{Runtime, RuntimeError, Value};

use common::{namespace_fn, quiet_runtime};

fn os_call(rt: &mut Runtime, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let f = namespace_fn(rt, "os", name);
    rt.call(f, args)
}

fn path_value(rt: &mut Runtime, path: &std::path::Path) -> Value {
    rt.new_string(&path.to_string_lossy())
}

#[test]
fn read_text_and_lines() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "alpha\nbeta\n").unwrap();

    let mut rt = quiet_runtime();
    let p = path_value(&mut rt, &file);
    let text = os_call(&mut rt, "readtxt", &[p]).unwrap();
    assert_eq!(rt.as_str(text), Some("alpha\nbeta\n"));
    let lines = os_call(&mut rt, "readlines", &[p]).unwrap();
    assert_eq!(rt.display(lines), "[alpha, beta]");

    let missing = path_value(&mut rt, &dir.path().join("nope.txt"));
    assert!(matches!(os_call(&mut rt, "readtxt", &[missing]), Err(RuntimeError::Io { .. })));
}

#[test]
fn directories_and_files() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("out");
    let mut rt = quiet_runtime();
    let d = path_value(&mut rt, &sub);

    assert_eq!(os_call(&mut rt, "mkdir", &[d]), Ok(Value::TRUE));
    assert_eq!(os_call(&mut rt, "exists", &[d]), Ok(Value::TRUE));
    assert_eq!(os_call(&mut rt, "mkdir", &[d]), Ok(Value::FALSE));
    assert_eq!(os_call(&mut rt, "mkdir", &[d, Value::TRUE]), Ok(Value::TRUE));

    let file = sub.join("data.bin");
    fs::write(&file, [1, 2, 3]).unwrap();
    let f = path_value(&mut rt, &file);
    assert_eq!(os_call(&mut rt, "rm", &[f]), Ok(Value::TRUE));
    assert_eq!(os_call(&mut rt, "rm", &[f]), Ok(Value::FALSE));
    assert_eq!(os_call(&mut rt, "rm", &[d]), Ok(Value::FALSE));
    assert_eq!(rt.take_diagnostics().len(), 2);

    fs::write(sub.join("keep.txt"), "x").unwrap();
    assert_eq!(os_call(&mut rt, "rmdir", &[d]), Ok(Value::FALSE));
    assert_eq!(os_call(&mut rt, "rmdir", &[d, Value::TRUE]), Ok(Value::TRUE));
    assert_eq!(os_call(&mut rt, "exists", &[d]), Ok(Value::FALSE));
}

#[test]
fn paths_outside_allowed_roots_are_refused() {
    let allowed = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let secret = other.path().join("secret.txt");
    fs::write(&secret, "hidden").unwrap();

    let mut rt = quiet_runtime();
    rt.add_allowed_root(&allowed.path().to_string_lossy());
    let p = path_value(&mut rt, &secret);
    assert!(matches!(
        os_call(&mut rt, "readtxt", &[p]),
        Err(RuntimeError::PathNotAllowed { op: "readtxt", .. })
    ));
    let escape = path_value(&mut rt, &allowed.path().join("..").join("x"));
    assert!(matches!(
        os_call(&mut rt, "mkdir", &[escape]),
        Err(RuntimeError::PathNotAllowed { .. })
    ));

    let inside = allowed.path().join("ok.txt");
    fs::write(&inside, "fine").unwrap();
    let p = path_value(&mut rt, &inside);
    let text = os_call(&mut rt, "readtxt", &[p]).unwrap();
    assert_eq!(rt.as_str(text), Some("fine"));

    rt.clear_allowed_roots();
    let p = path_value(&mut rt, &secret);
    assert!(os_call(&mut rt, "readtxt", &[p]).is_ok());
}

#[test]
fn exit_is_recorded_not_performed() {
    let mut rt = quiet_runtime();
    assert_eq!(rt.exit_code(), None);
    os_call(&mut rt, "exit", &[Value::from_f64(3.0)]).unwrap();
    assert_eq!(rt.exit_code(), Some(3));
    assert!(rt.output().contains("exit code 3"));
}

#[cfg(unix)]
#[test]
fn exec_runs_without_a_shell() {
    let mut rt = quiet_runtime();
    let cmd = rt.new_string("true");
    assert_eq!(os_call(&mut rt, "exec", &[cmd]), Ok(Value::from_f64(0.0)));
    let cmd = rt.new_string("false");
    assert_eq!(os_call(&mut rt, "exec", &[cmd]), Ok(Value::from_f64(1.0)));
}
