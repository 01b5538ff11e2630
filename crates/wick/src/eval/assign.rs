//! Assignment evaluation

use crate::ast::{Ast, Reference};
use crate::environment::BindingKey;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

/// Evaluate the right side once, then bind it.
///
/// A single target binds the whole value. Several targets destructure a
/// sequence by position; surplus elements are ignored. The assignment's
/// own value is the right-hand value.
///
/// # Errors
///
/// Returns `DestructureNotSequence` for several targets and a non-sequence
/// value, `DestructureOutOfRange` if the sequence is shorter than the
/// target list. Nothing is bound in either case.
pub(super) fn eval_assign(
    targets: &[Reference],
    value: &Ast,
    env: &mut Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let value = value.eval(env, ctx)?;

    if let [target] = targets {
        env.define(BindingKey::from(target), value.clone());
        return Ok(value);
    }

    let items = value
        .as_seq()
        .ok_or_else(|| EvalError::DestructureNotSequence {
            type_name: value.type_name().to_string(),
            targets: targets.len(),
        })?;
    if items.len() < targets.len() {
        return Err(EvalError::DestructureOutOfRange {
            len: items.len(),
            targets: targets.len(),
        });
    }

    for (target, item) in targets.iter().zip(items) {
        env.define(BindingKey::from(target), item.clone());
    }
    Ok(value)
}
