//! Runtime configuration.

/// Runtime configuration options.
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Echo reported runtime errors to stderr in addition to collecting them.
    pub echo_errors: bool,
    /// Initial capacity of the heap registry.
    pub heap_capacity: usize,
    /// Initial capacity of the string interning table.
    pub intern_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            echo_errors: true,
            heap_capacity: 1024,
            intern_capacity: 256,
        }
    }
}
