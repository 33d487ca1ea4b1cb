mod common;

use xen_runtime::{Chunk, MemberAccess, Runtime, RuntimeError, Value};

use common::quiet_runtime;

fn set_ready(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = args[0].as_object().unwrap();
    rt.set_field(id, "ready", Value::TRUE);
    Ok(Value::NULL)
}

fn double_x(rt: &mut Runtime, args: &[Value]) -> Result<Value, RuntimeError> {
    let id = args[0].as_object().unwrap();
    let x = rt.get_field(id, "x").and_then(|v| v.as_number()).unwrap_or(0.0);
    Ok(Value::from_f64(x * 2.0))
}

#[test]
fn instances_start_from_property_defaults() {
    let mut rt = quiet_runtime();
    let point = rt.define_class("Point");
    assert_eq!(rt.add_property(point, "x", Value::from_f64(1.0), false), Ok(0));
    assert_eq!(rt.add_property(point, "y", Value::from_f64(2.0), false), Ok(1));
    let p = rt.instantiate(point).unwrap();
    assert_eq!(rt.get_field(p, "x"), Some(Value::from_f64(1.0)));
    assert_eq!(rt.get_field(p, "y"), Some(Value::from_f64(2.0)));
    assert_eq!(rt.find_property_index(point, "y"), Some(1));
    assert_eq!(rt.find_property_index(point, "z"), None);

    assert!(rt.set_field(p, "x", Value::from_f64(5.0)));
    assert!(!rt.set_field(p, "z", Value::NULL));
    assert_eq!(rt.get_field(p, "x"), Some(Value::from_f64(5.0)));
    let other = rt.instantiate(point).unwrap();
    assert_eq!(rt.get_field(other, "x"), Some(Value::from_f64(1.0)));
}

#[test]
fn null_defaults_are_present_fields() {
    let mut rt = quiet_runtime();
    let point = rt.define_class("Point");
    rt.add_property(point, "x", Value::from_f64(0.0), false).unwrap();
    rt.add_property(point, "y", Value::NULL, false).unwrap();
    let p = rt.instantiate(point).unwrap();
    assert_eq!(rt.get_field(p, "x"), Some(Value::from_f64(0.0)));
    assert_eq!(rt.get_field(p, "y"), Some(Value::NULL));
    assert_eq!(rt.get_field(p, "z"), None);
    assert_eq!(
        rt.get_member(Value::object(p), "y", MemberAccess::External),
        Ok(Value::NULL)
    );
    assert_eq!(rt.display(Value::object(p)), "<Point instance>");
}

#[test]
fn property_and_method_names_do_not_clash() {
    let mut rt = quiet_runtime();
    let class = rt.define_class("Widget");
    rt.add_property(class, "size", Value::NULL, false).unwrap();
    assert!(matches!(
        rt.add_property(class, "size", Value::NULL, false),
        Err(RuntimeError::DuplicateMember { .. })
    ));
    assert!(matches!(
        rt.add_native_method(class, "size", double_x, false),
        Err(RuntimeError::DuplicateMember { .. })
    ));
    rt.add_native_method(class, "grow", double_x, false).unwrap();
    assert!(matches!(
        rt.add_property(class, "grow", Value::NULL, false),
        Err(RuntimeError::DuplicateMember { .. })
    ));
}

#[test]
fn private_members_need_internal_access() {
    let mut rt = quiet_runtime();
    let class = rt.define_class("Account");
    rt.add_property(class, "balance", Value::from_f64(10.0), true).unwrap();
    rt.add_native_method(class, "audit", double_x, true).unwrap();
    assert!(rt.is_property_private(class, "balance"));
    let acct = Value::object(rt.instantiate(class).unwrap());

    assert!(matches!(
        rt.get_member(acct, "balance", MemberAccess::External),
        Err(RuntimeError::PrivateMember { .. })
    ));
    assert_eq!(
        rt.get_member(acct, "balance", MemberAccess::Internal),
        Ok(Value::from_f64(10.0))
    );
    assert!(matches!(
        rt.get_member(acct, "audit", MemberAccess::External),
        Err(RuntimeError::PrivateMember { .. })
    ));
    assert!(rt.get_member(acct, "audit", MemberAccess::Internal).is_ok());
}

#[test]
fn native_methods_bind_to_the_instance() {
    let mut rt = quiet_runtime();
    let class = rt.define_class("Vec1");
    rt.add_property(class, "x", Value::from_f64(21.0), false).unwrap();
    rt.add_native_method(class, "double", double_x, false).unwrap();
    let v = Value::object(rt.instantiate(class).unwrap());
    let bound = rt.get_member(v, "double", MemberAccess::External).unwrap();
    assert_eq!(rt.call(bound, &[]), Ok(Value::from_f64(42.0)));
    assert_eq!(rt.invoke_method(v, "double", &[]), Ok(Value::from_f64(42.0)));
}

#[test]
fn native_initializer_runs_on_instantiate() {
    let mut rt = quiet_runtime();
    let class = rt.define_class("Job");
    rt.add_property(class, "ready", Value::FALSE, false).unwrap();
    rt.set_native_initializer(class, set_ready).unwrap();
    let via_call = rt.call(Value::object(class), &[]).unwrap();
    assert_eq!(rt.get_field(via_call.as_object().unwrap(), "ready"), Some(Value::TRUE));
}

#[test]
fn script_methods_are_left_to_the_interpreter() {
    let mut rt = quiet_runtime();
    let class = rt.define_class("Greeter");
    let greet = rt.new_function(Some("greet"), 0, Chunk::new());
    rt.add_method(class, "greet", greet, false).unwrap();
    let g = Value::object(rt.instantiate(class).unwrap());
    let bound = rt.get_member(g, "greet", MemberAccess::External).unwrap();
    assert!(matches!(rt.call(bound, &[]), Err(RuntimeError::ScriptFunction(_))));
    assert_eq!(rt.display(bound), "<bound method greet>");
}
