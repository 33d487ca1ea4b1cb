//! Registration of the global natives and the standard namespaces.

use indexmap::IndexMap;

use crate::Runtime;
use crate::builtins;
use crate::core::Value;
use crate::core::object::NativeFn;
use crate::methods::{self, MethodEntry};

/// Globals installed by [`StdBuiltinProvider`].
pub const GLOBAL_NAMES: &[&str] = &["typeof", "number", "string", "bool", "array"];

/// Namespaces installed by [`StdBuiltinProvider`], with their members.
pub const NAMESPACE_NAMES: &[(&str, &[&str])] = &[
    (
        "math",
        &[
            "sqrt", "abs", "floor", "ceil", "round", "sin", "cos", "tan", "pow", "log", "log10", "exp", "min", "max",
            "random", "PI", "E", "TAU",
        ],
    ),
    ("io", &["println", "print", "input", "clear", "pause"]),
    (
        "string",
        &[
            "len",
            "upper",
            "lower",
            "trim",
            "contains",
            "starts_with",
            "ends_with",
            "substr",
            "find",
            "split",
            "replace",
        ],
    ),
    ("datetime", &["now", "clock"]),
    (
        "array",
        &["len", "push", "pop", "first", "last", "clear", "contains", "index_of", "reverse", "join"],
    ),
    ("os", &["readtxt", "readlines", "exit", "exec", "mkdir", "rmdir", "rm", "exists"]),
];

#[derive(Clone, Copy)]
enum Binding {
    Native(NativeFn),
    Number(f64),
}

pub struct BuiltinRegistry {
    globals: Vec<(&'static str, NativeFn)>,
    namespaces: IndexMap<&'static str, Vec<(&'static str, Binding)>>,
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        Self {
            globals: Vec::new(),
            namespaces: IndexMap::new(),
        }
    }

    pub fn register(&mut self, name: &'static str, fun: NativeFn) {
        self.globals.push((name, fun));
    }

    pub fn register_in(&mut self, namespace: &'static str, name: &'static str, fun: NativeFn) {
        self.namespaces
            .entry(namespace)
            .or_default()
            .push((name, Binding::Native(fun)));
    }

    pub fn register_constant(&mut self, namespace: &'static str, name: &'static str, value: f64) {
        self.namespaces
            .entry(namespace)
            .or_default()
            .push((name, Binding::Number(value)));
    }

    /// Installs every entry of a member table as free functions of `namespace`.
    pub fn register_table(&mut self, namespace: &'static str, table: &'static [MethodEntry]) {
        for entry in table {
            self.register_in(namespace, entry.name, entry.function);
        }
    }

    /// Global names followed by `namespace.member` for every namespace entry.
    pub fn names(&self) -> Vec<String> {
        let globals = self.globals.iter().map(|(n, _)| n.to_string());
        let members = self
            .namespaces
            .iter()
            .flat_map(|(ns, entries)| entries.iter().map(move |(n, _)| format!("{ns}.{n}")));
        globals.chain(members).collect()
    }

    pub fn install_into(self, rt: &mut Runtime) {
        for (name, fun) in self.globals {
            rt.define_native(name, fun);
        }
        for (ns_name, entries) in self.namespaces {
            let ns = rt.new_namespace(ns_name);
            for (name, binding) in entries {
                let value = match binding {
                    Binding::Native(fun) => Value::object(rt.new_namespace_native(ns_name, name, fun)),
                    Binding::Number(n) => Value::from_f64(n),
                };
                rt.namespace_set(ns, name, value);
            }
            rt.register_namespace(ns_name, Value::object(ns));
        }
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub trait BuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry);
}

pub struct StdBuiltinProvider;

impl BuiltinProvider for StdBuiltinProvider {
    fn install(&self, registry: &mut BuiltinRegistry) {
        registry.register("typeof", builtins::builtin_typeof);
        // type constructors
        registry.register("number", builtins::builtin_number);
        registry.register("string", builtins::builtin_string);
        registry.register("bool", builtins::builtin_bool);
        registry.register("array", builtins::builtin_array);

        registry.register_in("math", "sqrt", builtins::builtin_sqrt);
        registry.register_in("math", "abs", methods::number::num_abs);
        registry.register_in("math", "floor", methods::number::num_floor);
        registry.register_in("math", "ceil", methods::number::num_ceil);
        registry.register_in("math", "round", methods::number::num_round);
        registry.register_in("math", "sin", builtins::builtin_sin);
        registry.register_in("math", "cos", builtins::builtin_cos);
        registry.register_in("math", "tan", builtins::builtin_tan);
        registry.register_in("math", "pow", builtins::builtin_pow);
        registry.register_in("math", "log", builtins::builtin_log);
        registry.register_in("math", "log10", builtins::builtin_log10);
        registry.register_in("math", "exp", builtins::builtin_exp);
        registry.register_in("math", "min", builtins::builtin_min);
        registry.register_in("math", "max", builtins::builtin_max);
        registry.register_in("math", "random", builtins::builtin_random);
        registry.register_constant("math", "PI", std::f64::consts::PI);
        registry.register_constant("math", "E", std::f64::consts::E);
        registry.register_constant("math", "TAU", std::f64::consts::TAU);

        registry.register_in("io", "println", builtins::builtin_println);
        registry.register_in("io", "print", builtins::builtin_print);
        registry.register_in("io", "input", builtins::builtin_input);
        registry.register_in("io", "clear", builtins::builtin_clear);
        registry.register_in("io", "pause", builtins::builtin_pause);

        registry.register_table("string", methods::str::METHODS);

        registry.register_in("datetime", "now", builtins::builtin_now);
        registry.register_in("datetime", "clock", builtins::builtin_clock);

        registry.register_table("array", methods::array::METHODS);

        registry.register_in("os", "readtxt", builtins::builtin_readtxt);
        registry.register_in("os", "readlines", builtins::builtin_readlines);
        registry.register_in("os", "exit", builtins::builtin_exit);
        registry.register_in("os", "exec", builtins::builtin_exec);
        registry.register_in("os", "mkdir", builtins::builtin_mkdir);
        registry.register_in("os", "rmdir", builtins::builtin_rmdir);
        registry.register_in("os", "rm", builtins::builtin_rm);
        registry.register_in("os", "exists", builtins::builtin_exists);
    }
}
