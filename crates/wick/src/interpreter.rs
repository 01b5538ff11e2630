//! End-to-end pipeline: scan, parse, lower, evaluate
//!
//! ```text
//! source → [scan] → tokens → [parse] → syntax tree → [lower] → Ast → [eval] → Value
//! ```

use tracing::debug;

use crate::ast::Ast;
use crate::error::Result;
use crate::eval::Evaluate;
use crate::io::Stdio;
use crate::lower::lower;
use crate::parse::parse;
use crate::scan::scan;
use crate::{Environment, EvalContext, Value};

/// Scan, parse and lower `source` into a top-level block.
///
/// # Errors
///
/// Returns the first scan, parse or lowering error.
pub fn compile(source: &str) -> Result<Ast> {
    let tokens = scan(source)?;
    let tree = parse(&tokens)?;
    Ok(lower(&tree)?)
}

/// Compile `source` and evaluate it in `env` with default limits.
///
/// # Errors
///
/// Returns the first error from any stage.
pub fn run(source: &str, env: &mut Environment) -> Result<Value> {
    let ast = compile(source)?;
    Ok(ast.eval(env, &EvalContext::default())?)
}

/// An environment with the prelude loaded plus the limits to run it under.
///
/// # Example
///
/// ```
/// use wick::{Interpreter, Value};
///
/// let mut interp = Interpreter::new();
/// assert_eq!(interp.run("1 + 2 + 3").unwrap(), Value::Number(6.0));
///
/// // Bindings persist across runs
/// interp.run("x = 4").unwrap();
/// assert_eq!(interp.run("x * 2").unwrap(), Value::Number(8.0));
/// ```
#[derive(Debug)]
pub struct Interpreter {
    env: Environment,
    ctx: EvalContext,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter on the process's standard streams.
    pub fn new() -> Self {
        Self {
            env: Environment::with_prelude(),
            ctx: EvalContext::default(),
        }
    }

    /// Replace the standard streams (builder pattern).
    pub fn with_stdio(mut self, stdio: Stdio) -> Self {
        self.env = self.env.with_stdio(stdio);
        self
    }

    /// Replace the evaluation limits (builder pattern).
    pub fn with_context(mut self, ctx: EvalContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Compile and evaluate `source`.
    ///
    /// # Errors
    ///
    /// Returns the first error from any stage. Bindings made before the
    /// error stay in the environment.
    pub fn run(&mut self, source: &str) -> Result<Value> {
        let ast = compile(source)?;
        debug!(bytes = source.len(), "compiled");
        self.eval(&ast)
    }

    /// Evaluate an already lowered AST.
    ///
    /// # Errors
    ///
    /// Returns the evaluation error, if any.
    pub fn eval(&mut self, ast: &Ast) -> Result<Value> {
        Ok(ast.eval(&mut self.env, &self.ctx)?)
    }

    /// The environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The environment, mutably.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// The evaluation limits.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Context;
    use crate::error::WickError;

    #[test]
    fn test_compile_empty_source() {
        let ast = compile("").unwrap();
        assert!(matches!(ast, Ast::Block { ref stmts, .. } if stmts.is_empty()));
    }

    #[test]
    fn test_run_without_prelude() {
        let mut env = Environment::new();
        let err = run("1 + 2", &mut env).unwrap_err();
        assert!(matches!(err, WickError::Eval(_)));
    }

    #[test]
    fn test_bindings_persist() {
        let mut interp = Interpreter::new();
        interp.run("greeting = 'hi'").unwrap();
        assert_eq!(
            interp.env().lookup(Context::Symbol, "greeting"),
            Some(&Value::text("hi"))
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut interp = Interpreter::new().with_context(EvalContext::new().with_max_depth(4));
        let err = interp.run("((((((1))))))").unwrap_err();
        assert!(err.to_string().contains("exceeds maximum 4"));
        assert_eq!(interp.env().depth(), 0);
    }
}
