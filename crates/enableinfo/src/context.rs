//! Evaluation context configuration

/// Configuration for parsing.
///
/// This is passed to the parser and controls nesting limits and token
/// tracing. Evaluation takes no context: every tree the parser returns is
/// already within `max_depth`. It holds no per-evaluation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Maximum depth of a parsed expression tree (stack overflow protection)
    pub max_depth: usize,

    /// Whether to trace every scanned token (for debugging)
    pub trace: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: 256,
            trace: false,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Enable or disable token tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
