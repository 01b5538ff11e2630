//! Method tables keyed by type tag, then method name

use std::fmt;

use indexmap::IndexMap;

use crate::value::MethodFn;

/// All method tables of an environment.
#[derive(Clone, Default)]
pub struct MethodTable {
    tables: IndexMap<String, IndexMap<String, MethodFn>>,
}

impl MethodTable {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `method` for `type_name`, replacing a method of the same name.
    pub fn define(&mut self, type_name: impl Into<String>, method: MethodFn) {
        self.tables
            .entry(type_name.into())
            .or_default()
            .insert(method.name.clone(), method);
    }

    /// Look up a method.
    pub fn get(&self, type_name: &str, name: &str) -> Option<&MethodFn> {
        self.tables.get(type_name)?.get(name)
    }

    /// Names of the methods registered for `type_name`, in definition order.
    pub fn names(&self, type_name: &str) -> Vec<&str> {
        self.tables
            .get(type_name)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Type tags that have a table.
    pub fn type_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.tables
                    .iter()
                    .map(|(ty, table)| (ty, table.keys().collect::<Vec<_>>())),
            )
            .finish()
    }
}
