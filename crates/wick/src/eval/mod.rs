//! AST evaluation

mod apply;
mod assign;
mod block;
mod field;
mod literal;
mod reference;

pub use apply::call_value;
pub use block::eval_block;
pub use field::{dispatch_member, field_or_method, FIELD_OR_METHOD};
pub use literal::unescape;
pub use reference::number_literal;

use crate::ast::Ast;
use crate::stack::ensure_sufficient_stack;
use crate::{Environment, EvalContext, EvalError, Value};

/// Trait for evaluating AST nodes to values.
///
/// This is the core abstraction for the tree-walking evaluator.
pub trait Evaluate {
    /// Evaluate this AST node in the given environment.
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Node Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Ast {
    fn eval(&self, env: &mut Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        env.enter(ctx.max_depth)?;

        let result = ensure_sufficient_stack(|| match self {
            Ast::Block { stmts, .. } => eval_block(stmts, env, ctx),
            Ast::Assign { targets, value } => assign::eval_assign(targets, value, env, ctx),
            Ast::Apply { operator, args } => apply::eval_apply(operator, args, env, ctx),
            Ast::Ref(r) => r.eval(env, ctx),
            Ast::Str(raw) => Ok(Value::text(unescape(raw))),
        });

        env.exit();
        result
    }
}
