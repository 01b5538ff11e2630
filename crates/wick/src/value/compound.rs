//! Compound value types: records

use indexmap::IndexMap;

use super::Value;

/// A record instance with named fields.
///
/// Uses IndexMap to preserve field order for predictable display.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    /// The record's type name, which is also its method table (e.g. "stdin")
    pub type_name: String,

    /// The record's fields in definition order
    pub fields: IndexMap<String, Value>,
}

impl RecordValue {
    /// Create a record with no fields
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field (builder pattern)
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
