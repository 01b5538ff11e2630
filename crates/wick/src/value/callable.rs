//! Invocable value types: builtins and bound methods

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::environment::Environment;
use crate::error::EvalError;

/// Type alias for builtin function pointers to reduce complexity
pub type BuiltinFnPtr =
    Arc<dyn Fn(&mut Environment, &[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// Type alias for method function pointers; the second parameter is the receiver.
pub type MethodFnPtr =
    Arc<dyn Fn(&mut Environment, &Value, &[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// A built-in native function.
///
/// These are Rust functions exposed to the evaluator.
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Create a new builtin
    pub fn new<F>(name: impl Into<String>, arity: i32, func: F) -> Self
    where
        F: Fn(&mut Environment, &[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    /// Check the argument count, then run the function.
    pub fn call(&self, env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
        check_arity(&self.name, self.arity, args.len())?;
        (self.func)(env, args)
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}

/// A method table entry. Arity excludes the receiver.
#[derive(Clone)]
pub struct MethodFn {
    /// Method name
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: MethodFnPtr,
}

impl MethodFn {
    /// Create a new method
    pub fn new<F>(name: impl Into<String>, arity: i32, func: F) -> Self
    where
        F: Fn(&mut Environment, &Value, &[Value]) -> Result<Value, EvalError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for MethodFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodFn({})", self.name)
    }
}

/// A method looked up on a receiver, waiting for its arguments.
#[derive(Debug, Clone)]
pub struct BoundMethod {
    /// Name of the method table the method came from
    pub type_name: String,

    /// The method
    pub method: MethodFn,

    /// The value the method was looked up on
    pub receiver: Value,
}

impl BoundMethod {
    /// Check the argument count, then run the method on its receiver.
    pub fn call(&self, env: &mut Environment, args: &[Value]) -> Result<Value, EvalError> {
        let name = format!("{}.{}", self.type_name, self.method.name);
        check_arity(&name, self.method.arity, args.len())?;
        (self.method.func)(env, &self.receiver, args)
    }
}

fn check_arity(name: &str, arity: i32, got: usize) -> Result<(), EvalError> {
    if arity >= 0 && got != arity as usize {
        return Err(EvalError::ArityMismatch {
            name: name.to_string(),
            expected: arity as usize,
            got,
        });
    }
    Ok(())
}
