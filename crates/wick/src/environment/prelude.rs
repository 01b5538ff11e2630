//! Standard prelude with built-in operators, functions, methods and macros

use super::Environment;
use crate::ast::Context;
use crate::error::EvalError;
use crate::eval::{call_value, field_or_method, FIELD_OR_METHOD};
use crate::expansion::{member_access_macro, pipe_macro};
use crate::value::{BuiltinFn, MethodFn, RecordValue, Value, NUMBER_TYPE, SEQ_TYPE, TEXT_TYPE};

/// Record type produced by `stdin()`.
pub const STDIN_TYPE: &str = "stdin";

/// Record type produced by `stdout()`.
pub const STDOUT_TYPE: &str = "stdout";

impl Environment {
    /// Create an environment with the standard prelude loaded.
    pub fn with_prelude() -> Self {
        let mut env = Self::new();
        env.load_prelude();
        env
    }

    /// Load the standard prelude into this environment.
    pub fn load_prelude(&mut self) {
        self.load_operators();
        self.load_functions();
        self.load_methods();

        self.push_macro(pipe_macro());
        self.push_macro(member_access_macro());
    }

    fn load_operators(&mut self) {
        // Tight and loose infix share one implementation
        for context in [Context::Inop1, Context::Inop2] {
            self.define_builtin(context, BuiltinFn::new("+", 2, builtin_add));
            self.define_builtin(context, BuiltinFn::new("-", 2, builtin_sub));
            self.define_builtin(context, BuiltinFn::new("*", 2, builtin_mul));
            self.define_builtin(context, BuiltinFn::new("/", 2, builtin_div));
            self.define_builtin(context, BuiltinFn::new("%", 2, builtin_rem));
        }

        self.define_builtin(Context::Preop, BuiltinFn::new("-", 1, builtin_neg));
        self.define_builtin(
            Context::Postop,
            BuiltinFn::new(",", -1, |_, args| Ok(Value::seq(args.to_vec()))),
        );
    }

    fn load_functions(&mut self) {
        // Streams
        self.define_builtin(
            Context::Symbol,
            BuiltinFn::new(STDIN_TYPE, 0, |_, _| {
                Ok(Value::record(RecordValue::new(STDIN_TYPE)))
            }),
        );
        self.define_builtin(
            Context::Symbol,
            BuiltinFn::new(STDOUT_TYPE, 0, |_, _| {
                Ok(Value::record(RecordValue::new(STDOUT_TYPE)))
            }),
        );

        // Coercion
        self.define_builtin(
            Context::Symbol,
            BuiltinFn::new("int", 1, |_, args| to_int("int", &args[0])),
        );
        self.define_builtin(
            Context::Symbol,
            BuiltinFn::new("floor", 1, |_, args| {
                Ok(Value::Number(number_arg("floor", &args[0])?.floor()))
            }),
        );
        self.define_builtin(Context::Symbol, BuiltinFn::new("debug", 1, builtin_debug));

        // Receiver-last forms for chaining with `|`
        self.define_builtin(
            Context::Symbol,
            BuiltinFn::new("split", 2, |_, args| split("split", &args[1], &args[0])),
        );
        self.define_builtin(
            Context::Symbol,
            BuiltinFn::new("map", 2, |env, args| map(env, "map", &args[1], &args[0])),
        );

        self.define_builtin(
            Context::Symbol,
            BuiltinFn::new(FIELD_OR_METHOD, 2, field_or_method),
        );
    }

    fn load_methods(&mut self) {
        self.define_method(
            STDIN_TYPE,
            MethodFn::new("read", 0, |env, _, _| {
                let input = env.stdio_mut().read_all().map_err(|source| EvalError::Io {
                    name: "stdin.read".to_string(),
                    source,
                })?;
                Ok(Value::text(input))
            }),
        );
        self.define_method(
            STDOUT_TYPE,
            MethodFn::new("write", 1, |env, _, args| {
                env.stdio_mut()
                    .write_output(&args[0].to_string())
                    .map_err(|source| EvalError::Io {
                        name: "stdout.write".to_string(),
                        source,
                    })?;
                Ok(Value::Undefined)
            }),
        );

        self.define_method(
            TEXT_TYPE,
            MethodFn::new("split", 1, |_, text, args| split("text.split", text, &args[0])),
        );
        self.define_method(
            TEXT_TYPE,
            MethodFn::new("trim", 0, |_, text, _| {
                Ok(Value::text(text_arg("text.trim", text)?.trim()))
            }),
        );
        self.define_method(
            TEXT_TYPE,
            MethodFn::new("len", 0, |_, text, _| {
                Ok(Value::Number(text_arg("text.len", text)?.chars().count() as f64))
            }),
        );

        self.define_method(
            SEQ_TYPE,
            MethodFn::new("map", 1, |env, seq, args| map(env, "seq.map", seq, &args[0])),
        );
        self.define_method(
            SEQ_TYPE,
            MethodFn::new("len", 0, |_, seq, _| {
                Ok(Value::Number(seq_arg("seq.len", seq)?.len() as f64))
            }),
        );
        self.define_method(SEQ_TYPE, MethodFn::new("get", 1, seq_get));
        self.define_method(
            SEQ_TYPE,
            MethodFn::new("join", 1, |_, seq, args| {
                let items = seq_arg("seq.join", seq)?;
                let sep = text_arg("seq.join", &args[0])?;
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                Ok(Value::text(parts.join(sep)))
            }),
        );

        self.define_method(
            NUMBER_TYPE,
            MethodFn::new("floor", 0, |_, n, _| {
                Ok(Value::Number(number_arg("number.floor", n)?.floor()))
            }),
        );
        self.define_method(
            NUMBER_TYPE,
            MethodFn::new("int", 0, |_, n, _| to_int("number.int", n)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Argument Helpers
// ═══════════════════════════════════════════════════════════════════════

fn number_arg(name: &str, value: &Value) -> Result<f64, EvalError> {
    value.as_number().ok_or_else(|| {
        EvalError::type_error(format!("{} expects a number, got {}", name, value.type_name()))
    })
}

fn text_arg<'v>(name: &str, value: &'v Value) -> Result<&'v str, EvalError> {
    value.as_text().ok_or_else(|| {
        EvalError::type_error(format!("{} expects text, got {}", name, value.type_name()))
    })
}

fn seq_arg<'v>(name: &str, value: &'v Value) -> Result<&'v [Value], EvalError> {
    value.as_seq().ok_or_else(|| {
        EvalError::type_error(format!("{} expects a seq, got {}", name, value.type_name()))
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Function Implementations
// ═══════════════════════════════════════════════════════════════════════

fn builtin_add(_env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    match (&args[0], &args[1]) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Text(a), Value::Text(b)) => Ok(Value::text(format!("{}{}", a, b))),
        (Value::Seq(a), Value::Seq(b)) => {
            Ok(Value::seq(a.iter().chain(b.iter()).cloned().collect()))
        }
        (a, b) => Err(EvalError::type_error(format!(
            "cannot add {} and {}",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn numbers(name: &str, args: &[Value]) -> Result<(f64, f64), EvalError> {
    Ok((number_arg(name, &args[0])?, number_arg(name, &args[1])?))
}

fn builtin_sub(_env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = numbers("-", args)?;
    Ok(Value::Number(a - b))
}

fn builtin_mul(_env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = numbers("*", args)?;
    Ok(Value::Number(a * b))
}

fn builtin_div(_env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = numbers("/", args)?;
    if b == 0.0 {
        return Err(EvalError::builtin("/", "division by zero"));
    }
    Ok(Value::Number(a / b))
}

fn builtin_rem(_env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = numbers("%", args)?;
    if b == 0.0 {
        return Err(EvalError::builtin("%", "division by zero"));
    }
    Ok(Value::Number(a % b))
}

fn builtin_neg(_env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(-number_arg("-", &args[0])?))
}

fn builtin_debug(env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
    let value = &args[0];
    tracing::debug!(value = ?value, "debug");
    env.stdio_mut()
        .write_diagnostic(&format!("[debug] {:?}", value))
        .map_err(|source| EvalError::Io {
            name: "debug".to_string(),
            source,
        })?;
    Ok(value.clone())
}

/// Numbers truncate toward zero; text is trimmed and parsed.
fn to_int(name: &str, value: &Value) -> Result<Value, EvalError> {
    match value {
        Value::Number(n) => Ok(Value::Number(n.trunc())),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(|n| Value::Number(n.trunc()))
            .map_err(|_| EvalError::builtin(name, format!("cannot convert {:?} to a number", s))),
        other => Err(EvalError::type_error(format!(
            "{} expects a number or text, got {}",
            name,
            other.type_name()
        ))),
    }
}

/// An empty separator splits on runs of whitespace.
fn split(name: &str, text: &Value, sep: &Value) -> Result<Value, EvalError> {
    let text = text_arg(name, text)?;
    let sep = text_arg(name, sep)?;
    let parts: Vec<Value> = if sep.is_empty() {
        text.split_whitespace().map(Value::text).collect()
    } else {
        text.split(sep).map(Value::text).collect()
    };
    Ok(Value::seq(parts))
}

fn map(env: &mut Environment, name: &str, seq: &Value, func: &Value) -> Result<Value, EvalError> {
    let items = seq_arg(name, seq)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(call_value(env, func, std::slice::from_ref(item))?);
    }
    Ok(Value::seq(out))
}

fn seq_get(_env: &mut Environment, seq: &Value, args: &[Value]) -> Result<Value, EvalError> {
    let items = seq_arg("seq.get", seq)?;
    let index = number_arg("seq.get", &args[0])?;
    if index.fract() != 0.0 || index < 0.0 || index >= items.len() as f64 {
        return Err(EvalError::builtin(
            "seq.get",
            format!("index {} out of range for length {}", index, items.len()),
        ));
    }
    Ok(items[index as usize].clone())
}
