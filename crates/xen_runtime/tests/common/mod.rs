#![allow(dead_code)]

use xen_runtime::{Runtime, RuntimeConfig, Value};

/// Runtime that keeps errors out of stderr; tests read the diagnostics.
pub fn quiet_runtime() -> Runtime {
    Runtime::with_config(RuntimeConfig {
        echo_errors: false,
        ..RuntimeConfig::default()
    })
}

pub fn namespace_fn(rt: &mut Runtime, ns: &str, name: &str) -> Value {
    let ns = rt.namespace(ns).unwrap();
    rt.get_member(ns, name, xen_runtime::MemberAccess::External).unwrap()
}

pub fn call(rt: &mut Runtime, ns: &str, name: &str, args: &[Value]) -> Value {
    let f = namespace_fn(rt, ns, name);
    rt.call(f, args).unwrap()
}
