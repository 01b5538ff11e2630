//! Block evaluation

use crate::ast::Ast;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate statements in order inside a fresh accumulator frame.
///
/// The frame, and any macro pushed while it is innermost, is popped on
/// both normal and error exit. An empty block is `Undefined`.
pub fn eval_block(
    stmts: &[Ast],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut guard = env.block_guard();
    for stmt in stmts {
        let value = stmt.eval(&mut guard, ctx)?;
        guard.record_result(value);
    }
    Ok(guard.finish())
}
