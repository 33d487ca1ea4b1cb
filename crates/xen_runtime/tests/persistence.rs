mod common;

use xen_runtime::persist::{self, PersistError};
use xen_runtime::{Chunk, MemberAccess, ObjectId, Runtime, RuntimeError, Value};

use common::{namespace_fn, quiet_runtime};

fn custom(_rt: &mut Runtime, _args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::NULL)
}

/// Script with one nested function `area(w, h)` and a mix of constants.
fn build_program(rt: &mut Runtime) -> ObjectId {
    let mut inner = Chunk::new();
    let label = rt.new_string("area");
    inner.add_constant(label);
    inner.write(1, 4);
    inner.write(2, 5);
    let area = rt.new_function(Some("area"), 2, inner);

    let sqrt = namespace_fn(rt, "math", "sqrt");
    let typeof_fn = rt.global("typeof").unwrap();
    let mut outer = Chunk::new();
    outer.add_constant(Value::object(area));
    outer.add_constant(Value::from_f64(-0.25));
    outer.add_constant(Value::TRUE);
    outer.add_constant(Value::NULL);
    outer.add_constant(sqrt);
    outer.add_constant(typeof_fn);
    for line in 1..=9 {
        outer.write(line as u8, line);
    }
    rt.new_function(None, 0, outer)
}

#[test]
fn nested_functions_and_natives_survive_a_round_trip() {
    let mut rt = quiet_runtime();
    let script = build_program(&mut rt);
    let bytes = persist::encode(&rt, script).unwrap();

    let mut fresh = quiet_runtime();
    let program = persist::decode(&mut fresh, &bytes).unwrap();
    assert_eq!(program.line_count, 9);
    assert_eq!(program.version, persist::VERSION);

    let top = fresh.function(program.function).unwrap().clone();
    assert!(top.name.is_none());
    assert_eq!(top.arity, 0);
    assert_eq!(top.chunk.code, (1..=9).collect::<Vec<u8>>());
    let constants = &top.chunk.constants;
    assert_eq!(constants.len(), 6);
    assert_eq!(constants[1], Value::from_f64(-0.25));
    assert_eq!(constants[2], Value::TRUE);
    assert_eq!(constants[3], Value::NULL);

    let sqrt = fresh.native(constants[4].as_object().unwrap()).unwrap();
    assert_eq!(sqrt.qualified_name(), "math.sqrt");
    assert_eq!(constants[4], namespace_fn(&mut fresh, "math", "sqrt"));
    assert_eq!(Some(constants[5]), fresh.global("typeof"));

    let area = fresh.function(constants[0].as_object().unwrap()).unwrap();
    assert_eq!(area.arity, 2);
    assert_eq!(area.chunk.code, [1, 2]);
    let name = area.name.and_then(|n| fresh.heap().str_content(n));
    assert_eq!(name, Some("area"));
    let label = area.chunk.constants[0];
    assert_eq!(label, fresh.new_string("area"));
}

#[test]
fn encoding_is_stable() {
    let mut rt = quiet_runtime();
    let script = build_program(&mut rt);
    let first = persist::encode(&rt, script).unwrap();

    let mut fresh = quiet_runtime();
    let program = persist::decode(&mut fresh, &first).unwrap();
    let second = persist::encode(&fresh, program.function).unwrap();
    // line numbers are not stored per byte, so the header line count drops to zero
    assert_eq!(first[..5], second[..5]);
    assert_eq!(first[9..], second[9..]);
}

#[test]
fn unknown_natives_fail_to_load() {
    let mut rt = quiet_runtime();
    let native = rt.new_native("custom", custom);
    let mut chunk = Chunk::new();
    chunk.add_constant(Value::object(native));
    let script = rt.new_function(None, 0, chunk);
    let bytes = persist::encode(&rt, script).unwrap();

    let mut fresh = quiet_runtime();
    match persist::decode(&mut fresh, &bytes) {
        Err(PersistError::UnresolvedNative(name)) => assert_eq!(name, "custom"),
        other => panic!("unexpected result: {other:?}"),
    }

    fresh.define_native("custom", custom);
    assert!(persist::decode(&mut fresh, &bytes).is_ok());
}

#[test]
fn nesting_depth_is_bounded() {
    let mut rt = quiet_runtime();
    let mut current = rt.new_function(Some("leaf"), 0, Chunk::new());
    for _ in 0..persist::MAX_DEPTH + 2 {
        let mut chunk = Chunk::new();
        chunk.add_constant(Value::object(current));
        current = rt.new_function(Some("wrap"), 0, chunk);
    }
    assert!(matches!(persist::encode(&rt, current), Err(PersistError::TooDeep)));
}

#[test]
fn bound_methods_cannot_be_persisted() {
    let mut rt = quiet_runtime();
    let s = rt.new_string("abc");
    let bound = rt.get_member(s, "upper", MemberAccess::External).unwrap();
    let mut chunk = Chunk::new();
    chunk.add_constant(bound);
    let script = rt.new_function(None, 0, chunk);
    assert!(matches!(
        persist::encode(&rt, script),
        Err(PersistError::Unserializable { index: 0, kind: "bound_method" })
    ));
}

#[test]
fn save_and_load_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.xenb");

    let mut rt = quiet_runtime();
    let script = build_program(&mut rt);
    persist::save(&rt, script, &path).unwrap();

    let mut fresh = quiet_runtime();
    let program = persist::load(&mut fresh, &path).unwrap();
    assert_eq!(fresh.function(program.function).unwrap().chunk.constants.len(), 6);

    let missing = dir.path().join("missing.xenb");
    assert!(matches!(persist::load(&mut fresh, &missing), Err(PersistError::Io(_))));
}
