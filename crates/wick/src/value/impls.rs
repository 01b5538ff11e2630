//! Value trait implementations: constructors, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(Arc::new(s.into()))
    }

    /// Create a sequence value
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Arc::new(items))
    }

    /// Create a record value
    pub fn record(r: RecordValue) -> Self {
        Value::Record(Arc::new(r))
    }

    /// Create a bound method value
    pub fn method(type_name: impl Into<String>, method: MethodFn, receiver: Value) -> Self {
        Value::Method(Arc::new(BoundMethod {
            type_name: type_name.into(),
            method,
            receiver,
        }))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// The runtime type tag used for dispatch and error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Number(_) => NUMBER_TYPE,
            Value::Text(_) => TEXT_TYPE,
            Value::Seq(_) => SEQ_TYPE,
            Value::Record(r) => &r.type_name,
            Value::Builtin(_) => "builtin",
            Value::Method(_) => "method",
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract text slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract sequence as slice
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Seq(a), Value::Seq(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,

            // Builtins are equal if same name (identity)
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,

            // Bound methods: same method on an equal receiver
            (Value::Method(a), Value::Method(b)) => {
                a.type_name == b.type_name
                    && a.method.name == b.method.name
                    && a.receiver == b.receiver
            }

            // Different types are never equal
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Trait Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::seq(items)
    }
}

impl From<RecordValue> for Value {
    fn from(r: RecordValue) -> Self {
        Value::record(r)
    }
}

impl From<BuiltinFn> for Value {
    fn from(b: BuiltinFn) -> Self {
        Value::Builtin(b)
    }
}
