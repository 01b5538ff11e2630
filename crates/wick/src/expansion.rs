//! Macro expansion of application nodes
//!
//! Before an application is evaluated, its operator is looked up in the
//! macro table. A match rewrites the node, and the rewrite is repeated on
//! the result until its operator no longer names a macro.
//!
//! ```text
//! Apply(op, args) → [expand while op is a macro] → Apply' → Eval
//! ```
//!
//! The two built-in macros live here as well: the pipe (`x | f(y)` becomes
//! `f(y, x)`) and member access (`a.b` becomes `field-or-method(a(), "b")`).

use tracing::debug;

use crate::ast::{Ast, Context};
use crate::environment::BindingKey;
use crate::eval::FIELD_OR_METHOD;
use crate::macro_env::{MacroDefinition, MacroEnvironment};

/// Result type for expansion operations.
pub type ExpansionResult<T> = std::result::Result<T, ExpansionError>;

/// Errors that can occur during macro expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionError {
    /// The rewrite function rejected its arguments
    ExpansionFailed {
        /// Macro key, rendered
        macro_name: String,
        /// Error message
        message: String,
    },

    /// Too many consecutive rewrites of one node
    RecursionLimitExceeded {
        /// Rewrites attempted
        depth: usize,
        /// Maximum allowed rewrites
        max_depth: usize,
    },
}

impl std::fmt::Display for ExpansionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpansionError::ExpansionFailed {
                macro_name,
                message,
            } => {
                write!(f, "expansion of macro {} failed: {}", macro_name, message)
            }
            ExpansionError::RecursionLimitExceeded { depth, max_depth } => {
                write!(
                    f,
                    "macro expansion limit exceeded: depth {} > max {}",
                    depth, max_depth
                )
            }
        }
    }
}

impl std::error::Error for ExpansionError {}

/// The macro invoked by an operator expression, if any.
///
/// Only a bare reference can name a macro.
pub fn macro_for<'m>(operator: &Ast, macros: &'m MacroEnvironment) -> Option<&'m MacroDefinition> {
    match operator {
        Ast::Ref(r) => macros.get_macro(&BindingKey::from(r)).map(|def| &**def),
        _ => None,
    }
}

/// Expand the application `operator(args)` until its operator is no longer a macro.
///
/// Returns `Ok(None)` when `operator` does not name a macro, so the caller
/// can evaluate the original node without copying it.
///
/// # Errors
///
/// Returns an [`ExpansionError`] if a macro rejects its arguments or more
/// than `max_expansions` rewrites are needed.
pub fn expand_invocation(
    operator: &Ast,
    args: &[Ast],
    macros: &MacroEnvironment,
    max_expansions: usize,
) -> ExpansionResult<Option<Ast>> {
    let Some(first) = macro_for(operator, macros) else {
        return Ok(None);
    };

    let mut count = 0;
    let mut def = first;
    let mut pending = args.to_vec();
    loop {
        if count >= max_expansions {
            return Err(ExpansionError::RecursionLimitExceeded {
                depth: count + 1,
                max_depth: max_expansions,
            });
        }
        count += 1;
        debug!(macro_key = %def.key, count, "expanding");
        let expanded = def.expand(pending)?;

        let next = match &expanded {
            Ast::Apply { operator, args } => {
                macro_for(operator, macros).map(|next| (next, args.clone()))
            }
            _ => None,
        };
        match next {
            Some((next, args)) => {
                def = next;
                pending = args;
            }
            None => return Ok(Some(expanded)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Macros
// ═══════════════════════════════════════════════════════════════════════

/// `left | right(args...)` → `right(args..., left)`.
pub fn pipe_macro() -> MacroDefinition {
    MacroDefinition::new(BindingKey::new(Context::Inop1, "|"), |args| {
        let [left, right] = two_operands(args)?;
        match right {
            Ast::Apply { operator, mut args } => {
                args.push(left);
                Ok(Ast::Apply { operator, args })
            }
            _ => Err("right operand of '|' must be an application".to_string()),
        }
    })
}

/// `a.b` → `field-or-method(a(), "b")`; a non-reference right side is kept as is.
pub fn member_access_macro() -> MacroDefinition {
    MacroDefinition::new(BindingKey::new(Context::Inop2, "."), |args| {
        let [left, right] = two_operands(args)?;
        let member = match right {
            Ast::Ref(r) => Ast::quoted(&r.text),
            computed => computed,
        };
        Ok(Ast::apply(
            Ast::symbol(FIELD_OR_METHOD),
            vec![Ast::apply(left, vec![]), member],
        ))
    })
}

fn two_operands(args: Vec<Ast>) -> Result<[Ast; 2], String> {
    let got = args.len();
    <[Ast; 2]>::try_from(args).map_err(|_| format!("expected 2 operands, got {}", got))
}
