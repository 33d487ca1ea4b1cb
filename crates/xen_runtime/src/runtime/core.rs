use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::builtins_registry::{BuiltinProvider, BuiltinRegistry, StdBuiltinProvider};
use crate::core::object::NativeFn;
use crate::core::{Heap, ObjectId, TeardownStats, Value};
use crate::errors::RuntimeError;
use crate::util::{Capabilities, Clock, FileSystem, LineReader, RngAlgorithm};

use super::config::RuntimeConfig;

/// Argument buffer for receiver-prefixed calls.
pub(crate) type ArgVec = SmallVec<[Value; 8]>;

/// One runtime instance: heap, interner, globals, namespace registry and the
/// injected capabilities. Independent runtimes share nothing.
pub struct Runtime {
    pub(crate) heap: Heap,
    pub(crate) globals: IndexMap<Box<str>, Value>,
    pub(crate) namespaces: IndexMap<Box<str>, Value>,
    caps: Capabilities,
    output: String,
    diagnostics: Vec<String>,
    config: RuntimeConfig,
    exit_code: Option<i32>,
    rng_state: u64,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self::with_provider(config, &StdBuiltinProvider)
    }

    /// Builds a runtime whose globals and namespaces come from `provider`.
    pub fn with_provider(config: RuntimeConfig, provider: &dyn BuiltinProvider) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1);
        let mut rt = Self {
            heap: Heap::with_capacity(config.heap_capacity, config.intern_capacity),
            globals: IndexMap::new(),
            namespaces: IndexMap::new(),
            caps: Capabilities::default(),
            output: String::new(),
            diagnostics: Vec::new(),
            config,
            exit_code: None,
            rng_state: seed,
        };
        let mut registry = BuiltinRegistry::new();
        provider.install(&mut registry);
        registry.install_into(&mut rt);
        tracing::debug!(
            target: "xen_runtime",
            globals = rt.globals.len(),
            namespaces = rt.namespaces.len(),
            objects = rt.heap.len(),
            "runtime bootstrapped"
        );
        rt
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn caps(&self) -> &Capabilities {
        &self.caps
    }

    pub fn set_clock(&mut self, clock: Box<dyn Clock>) {
        self.caps.clock = clock;
    }

    pub fn set_file_system(&mut self, fs: Box<dyn FileSystem>) {
        self.caps.fs = fs;
    }

    pub fn set_rng_algorithm(&mut self, rng: Box<dyn RngAlgorithm>) {
        self.caps.rng = rng;
    }

    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng_state = seed;
    }

    pub fn set_line_reader(&mut self, input: Box<dyn LineReader>) {
        self.caps.input = input;
    }

    pub fn add_allowed_root(&mut self, root: &str) {
        self.caps.allowed_roots.push(root.to_string());
    }

    pub fn clear_allowed_roots(&mut self) {
        self.caps.allowed_roots.clear();
    }

    pub(crate) fn caps_mut(&mut self) -> &mut Capabilities {
        &mut self.caps
    }

    /// Uniform number in `[0, 1)` from the configured generator.
    pub(crate) fn next_random(&mut self) -> f64 {
        let bits = self.caps.rng.next_u64(&mut self.rng_state);
        (bits >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub(crate) fn write_output(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Exit code requested by `os.exit`, if any.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub(crate) fn request_exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }

    /// Records a recoverable error. Execution continues.
    pub fn report(&mut self, err: &RuntimeError) {
        let message = err.to_string();
        tracing::warn!(target: "xen_runtime", error = %message, "runtime error");
        if self.config.echo_errors {
            eprintln!("runtime error: {message}");
        }
        self.diagnostics.push(message);
    }

    /// Calls `function`, reporting a failure and yielding `null` in its place.
    pub fn call_native(&mut self, function: NativeFn, args: &[Value]) -> Value {
        match function(self, args) {
            Ok(value) => value,
            Err(err) => {
                self.report(&err);
                Value::NULL
            }
        }
    }

    /// Like [`Runtime::call_native`] for any callable value.
    pub fn call_native_value(&mut self, callee: Value, args: &[Value]) -> Value {
        match self.call(callee, args) {
            Ok(value) => value,
            Err(err) => {
                self.report(&err);
                Value::NULL
            }
        }
    }

    pub(crate) fn with_receiver(receiver: Value, args: &[Value]) -> ArgVec {
        let mut full = ArgVec::with_capacity(args.len() + 1);
        full.push(receiver);
        full.extend_from_slice(args);
        full
    }

    pub fn intern_copy(&mut self, text: &str) -> ObjectId {
        self.heap.intern_copy(text)
    }

    pub fn intern_take(&mut self, text: String) -> ObjectId {
        self.heap.intern_take(text)
    }

    /// Interns `text` and wraps the handle as a value.
    pub fn new_string(&mut self, text: &str) -> Value {
        Value::object(self.heap.intern_copy(text))
    }

    pub(crate) fn string_value(&mut self, text: String) -> Value {
        Value::object(self.heap.intern_take(text))
    }

    /// Interned concatenation of two strings.
    pub fn concat(&mut self, left: Value, right: Value) -> Result<Value, RuntimeError> {
        let joined = {
            let string = |v: Value, param| {
                self.as_str(v).ok_or_else(|| RuntimeError::ArgumentType {
                    op: "concat",
                    param,
                    expected: "string",
                    actual: self.type_name(v),
                })
            };
            let (l, r) = (string(left, "left")?, string(right, "right")?);
            let mut joined = String::with_capacity(l.len() + r.len());
            joined.push_str(l);
            joined.push_str(r);
            joined
        };
        Ok(self.string_value(joined))
    }

    /// Text of `value` when it is a string object.
    pub fn as_str(&self, value: Value) -> Option<&str> {
        value.as_object().and_then(|id| self.heap.str_content(id))
    }

    /// Releases every heap object. Globals and namespaces go with it.
    pub fn teardown(self) -> TeardownStats {
        tracing::debug!(
            target: "xen_runtime",
            diagnostics = self.diagnostics.len(),
            "tearing down runtime"
        );
        self.heap.teardown()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
