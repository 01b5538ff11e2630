//! Reference resolution

use crate::ast::{Context, Reference};
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for Reference {
    fn eval(&self, env: &mut Environment, _ctx: &EvalContext) -> Result<Value, EvalError> {
        if let Some(n) = number_literal(self) {
            return Ok(Value::Number(n));
        }

        env.lookup(self.context, &self.text)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedName {
                name: self.text.clone(),
                context: self.context,
            })
    }
}

/// The numeric value of a symbol that starts with a digit and parses as a number.
///
/// Numbers have no binding; `x1` is a name, `1` and `0.5` are numbers.
pub fn number_literal(r: &Reference) -> Option<f64> {
    if r.context != Context::Symbol || !r.text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    r.text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::BindingKey;

    fn reference(context: Context, text: &str) -> Reference {
        Reference::new(context, text)
    }

    #[test]
    fn test_numbers_need_no_binding() {
        let mut env = Environment::new();
        let ctx = EvalContext::new();
        assert_eq!(
            reference(Context::Symbol, "42").eval(&mut env, &ctx).unwrap(),
            Value::Number(42.0)
        );
        assert_eq!(
            reference(Context::Symbol, "0.25").eval(&mut env, &ctx).unwrap(),
            Value::Number(0.25)
        );
    }

    #[test]
    fn test_number_literal_rules() {
        assert_eq!(number_literal(&reference(Context::Symbol, "7")), Some(7.0));
        assert_eq!(number_literal(&reference(Context::Symbol, "x7")), None);
        assert_eq!(number_literal(&reference(Context::Symbol, "1_000")), None);
        assert_eq!(number_literal(&reference(Context::Inop1, "1")), None);
    }

    #[test]
    fn test_digit_led_name_is_looked_up() {
        let mut env = Environment::new();
        let ctx = EvalContext::new();
        env.define(BindingKey::symbol("2nd"), Value::text("second"));
        assert_eq!(
            reference(Context::Symbol, "2nd").eval(&mut env, &ctx).unwrap(),
            Value::text("second")
        );
    }

    #[test]
    fn test_undefined_name_reports_context() {
        let mut env = Environment::new();
        let ctx = EvalContext::new();
        let err = reference(Context::Postop, "!")
            .eval(&mut env, &ctx)
            .unwrap_err();
        assert_eq!(err.to_string(), "undefined name: '!' of type 'postop'");
    }
}
