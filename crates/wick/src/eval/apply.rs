//! Application evaluation

use crate::ast::Ast;
use crate::expansion::expand_invocation;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate `operator(args...)`.
///
/// A macro bound to the operator rewrites the node first and the rewrite is
/// evaluated instead. Otherwise the operator and then each argument are
/// evaluated left to right and the operator value is called.
#[tracing::instrument(level = "trace", skip_all, fields(arity = args.len()))]
pub(super) fn eval_apply(
    operator: &Ast,
    args: &[Ast],
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    if let Some(expanded) = expand_invocation(operator, args, env.macros(), ctx.max_expansions)? {
        return expanded.eval(env, ctx);
    }

    let func = operator.eval(env, ctx)?;

    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(arg.eval(env, ctx)?);
    }

    call_value(env, &func, &values)
}

/// Call a Value with already evaluated arguments.
///
/// Numbers are returned unchanged whatever the arguments. Any other value
/// that cannot take arguments is returned unchanged when applied to none,
/// so `x()` forces zero-argument builtins and leaves plain data alone.
///
/// # Errors
///
/// Returns `NotCallable` if a non-invocable value is given arguments.
/// Returns `ArityMismatch` if the argument count doesn't match.
pub fn call_value(env: &mut Environment, func: &Value, args: &[Value]) -> Result<Value, EvalError> {
    match func {
        Value::Number(_) => Ok(func.clone()),
        Value::Builtin(builtin) => builtin.call(env, args),
        Value::Method(method) => method.call(env, args),
        other if args.is_empty() => Ok(other.clone()),
        other => Err(EvalError::NotCallable {
            type_name: other.type_name().to_string(),
        }),
    }
}
