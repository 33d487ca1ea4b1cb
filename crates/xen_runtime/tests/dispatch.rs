mod common;

use xen_runtime::{MemberAccess, ObjectId, RuntimeError, Value};

use common::{call, namespace_fn, quiet_runtime};

#[test]
fn properties_evaluate_on_access() {
    let mut rt = quiet_runtime();
    let s = rt.new_string("héllo");
    assert_eq!(rt.get_member(s, "len", MemberAccess::External), Ok(Value::from_f64(5.0)));
}

#[test]
fn methods_come_back_bound() {
    let mut rt = quiet_runtime();
    let s = rt.new_string("a,b,c");
    let split = rt.get_member(s, "split", MemberAccess::External).unwrap();
    assert_eq!(rt.type_name(split), "bound_method");
    let comma = rt.new_string(",");
    let parts = rt.call(split, &[comma]).unwrap();
    assert_eq!(rt.display(parts), "[a, b, c]");
}

#[test]
fn number_members() {
    let mut rt = quiet_runtime();
    let n = Value::from_f64(-2.5);
    assert_eq!(rt.invoke_method(n, "abs", &[]), Ok(Value::from_f64(2.5)));
    assert_eq!(rt.invoke_method(n, "floor", &[]), Ok(Value::from_f64(-3.0)));
    let text = rt.invoke_method(Value::from_f64(3.0), "to_string", &[]).unwrap();
    assert_eq!(rt.as_str(text), Some("3"));
}

#[test]
fn unknown_members_are_errors() {
    let mut rt = quiet_runtime();
    let s = rt.new_string("x");
    assert_eq!(
        rt.get_member(s, "nope", MemberAccess::External),
        Err(RuntimeError::UnknownMember {
            member: "nope".into(),
            ty: "string",
        })
    );
    assert!(rt.get_member(Value::NULL, "len", MemberAccess::External).is_err());
    assert_eq!(rt.call(Value::TRUE, &[]), Err(RuntimeError::NotCallable("bool")));
}

#[test]
fn namespaces_expose_their_members() {
    let mut rt = quiet_runtime();
    let pi = namespace_fn(&mut rt, "math", "PI");
    assert_eq!(pi, Value::from_f64(std::f64::consts::PI));
    assert_eq!(call(&mut rt, "math", "sqrt", &[Value::from_f64(9.0)]), Value::from_f64(3.0));
    assert_eq!(
        call(&mut rt, "math", "max", &[Value::from_f64(1.0), Value::from_f64(7.0), Value::from_f64(3.0)]),
        Value::from_f64(7.0)
    );
    let s = rt.new_string("  pad ");
    let trimmed = call(&mut rt, "string", "trim", &[s]);
    assert_eq!(rt.as_str(trimmed), Some("pad"));

    let math = rt.namespace("math").unwrap();
    assert_eq!(rt.display(math), "<namespace math>");
    assert!(rt.global("math").is_none());
}

#[test]
fn failures_are_reported_and_yield_null() {
    let mut rt = quiet_runtime();
    let println = namespace_fn(&mut rt, "io", "println");
    assert_eq!(rt.call_native_value(println, &[]), Value::NULL);
    let sqrt = namespace_fn(&mut rt, "math", "sqrt");
    let s = rt.new_string("4");
    assert_eq!(rt.call_native_value(sqrt, &[s]), Value::NULL);

    let diags = rt.take_diagnostics();
    assert_eq!(diags.len(), 2);
    assert!(diags[0].contains("required for println"), "{}", diags[0]);
    assert!(diags[1].contains("must be of type number"), "{}", diags[1]);
    assert!(rt.output().is_empty());
}

#[test]
fn conversions() {
    let mut rt = quiet_runtime();
    let number = rt.global("number").unwrap();
    let text = rt.new_string("12.5abc");
    assert_eq!(rt.call(number, &[text]), Ok(Value::from_f64(12.5)));
    assert_eq!(rt.call(number, &[Value::TRUE]), Ok(Value::from_f64(1.0)));

    let typeof_fn = rt.global("typeof").unwrap();
    let name = rt.call(typeof_fn, &[Value::NULL]).unwrap();
    assert_eq!(rt.as_str(name), Some("null"));

    let string = rt.global("string").unwrap();
    let s = rt.call(string, &[Value::from_f64(0.5)]).unwrap();
    assert_eq!(rt.as_str(s), Some("0.5"));
}

#[test]
fn stale_handles_report_instead_of_panicking() {
    let mut rt = quiet_runtime();
    let stale = Value::object(ObjectId(999_999));
    assert_eq!(rt.type_name(stale), "object");
    assert_eq!(rt.display(stale), "<invalid object>");
    assert!(rt.array(ObjectId(999_999)).is_none());
    assert!(rt.get_member(stale, "len", MemberAccess::External).is_err());
    assert!(rt.call(stale, &[]).is_err());
}
