//! Field and method dispatch

use crate::value::{SEQ_TYPE, TEXT_TYPE};
use crate::{Environment, EvalError, Value};

/// Name of the symbol the member-access macro rewrites `a.b` into.
pub const FIELD_OR_METHOD: &str = "field-or-method";

/// Builtin behind [`FIELD_OR_METHOD`]: `field-or-method(receiver, name)`.
///
/// # Errors
///
/// Returns `TypeError` if the member name is not text, otherwise whatever
/// [`dispatch_member`] returns.
pub fn field_or_method(env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    let [receiver, member] = args else {
        return Err(EvalError::ArityMismatch {
            name: FIELD_OR_METHOD.to_string(),
            expected: 2,
            got: args.len(),
        });
    };
    let member = member.as_text().ok_or_else(|| {
        EvalError::type_error(format!(
            "member name must be text, got {}",
            member.type_name()
        ))
    })?;
    dispatch_member(env, receiver, member)
}

/// Resolve `receiver.member`.
///
/// Records answer with their own fields first. Everything else goes to the
/// method table for the receiver's type tag; a hit comes back bound to the
/// receiver, ready to be applied.
///
/// # Errors
///
/// Returns `UnknownMember` if neither a field nor a method matches.
#[tracing::instrument(level = "trace", skip(env, receiver), fields(type_name = receiver.type_name()))]
pub fn dispatch_member(
    env: &Environment,
    receiver: &Value,
    member: &str,
) -> Result<Value, EvalError> {
    let table = match receiver {
        Value::Text(_) => TEXT_TYPE,
        Value::Seq(_) => SEQ_TYPE,
        Value::Record(record) => {
            if let Some(field) = record.get(member) {
                return Ok(field.clone());
            }
            record.type_name.as_str()
        }
        other => other.type_name(),
    };

    match env.method(table, member) {
        Some(method) => Ok(Value::method(table, method.clone(), receiver.clone())),
        None => Err(EvalError::UnknownMember {
            type_name: table.to_string(),
            member: member.to_string(),
        }),
    }
}
