//! Evaluation context configuration

/// Configuration for evaluation.
///
/// This is passed through all evaluation calls and controls the limits
/// that keep a runaway program from exhausting the native stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalContext {
    /// Maximum nesting depth of AST evaluation
    pub max_depth: usize,

    /// Maximum number of macro rewrites applied to a single node
    pub max_expansions: usize,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            max_expansions: 100,
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nesting depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the per-node macro rewrite limit.
    pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
        self.max_expansions = max_expansions;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = EvalContext::new();
        assert_eq!(ctx.max_depth, 1000);
        assert_eq!(ctx.max_expansions, 100);
    }

    #[test]
    fn test_builders() {
        let ctx = EvalContext::new().with_max_depth(8).with_max_expansions(2);
        assert_eq!(ctx.max_depth, 8);
        assert_eq!(ctx.max_expansions, 2);
    }
}
