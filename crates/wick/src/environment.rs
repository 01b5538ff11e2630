//! Runtime environment managing bindings, macros, method tables and streams

mod frame;
mod methods;
mod prelude;

pub use frame::{BlockFrame, BlockGuard, ResultStrategy};
pub use methods::MethodTable;

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use crate::ast::{Context, Reference};
use crate::error::EvalError;
use crate::io::Stdio;
use crate::macro_env::{MacroDefinition, MacroEnvironment};
use crate::value::{BuiltinFn, MethodFn, Value};

/// Key of every value binding and macro: a lexical context plus a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey {
    /// Lexical context
    pub context: Context,

    /// Identifier or operator text
    pub name: String,
}

impl BindingKey {
    /// Create a new key
    pub fn new(context: Context, name: impl Into<String>) -> Self {
        Self {
            context,
            name: name.into(),
        }
    }

    /// Create a key in the symbol context
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::new(Context::Symbol, name)
    }
}

impl From<&Reference> for BindingKey {
    fn from(r: &Reference) -> Self {
        Self::new(r.context, r.text.clone())
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.context, self.name)
    }
}

/// The runtime environment of one program run.
///
/// Owns everything evaluation mutates: value bindings (one flat table,
/// assignment overwrites), the stacked macro table, method tables keyed by
/// type tag, the block-result stack and the standard streams.
///
/// # Example
///
/// ```
/// use wick::{BindingKey, Environment, Value};
///
/// let mut env = Environment::new();
/// env.define(BindingKey::symbol("x"), Value::Number(1.0));
/// env.define(BindingKey::symbol("x"), Value::Number(2.0)); // Overwrites
///
/// assert_eq!(env.get(&BindingKey::symbol("x")), Some(&Value::Number(2.0)));
/// assert_eq!(env.len(), 1);
/// ```
pub struct Environment {
    /// Value bindings in definition order
    bindings: IndexMap<BindingKey, Value>,

    /// Macro stacks
    macros: MacroEnvironment,

    /// Method tables by type tag
    methods: MethodTable,

    /// Block-result stack, innermost last
    blocks: Vec<BlockFrame>,

    /// Current evaluation nesting depth
    depth: usize,

    /// Standard input, output and diagnostics
    stdio: Stdio,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("bindings", &self.bindings.len())
            .field("macros", &self.macros)
            .field("methods", &self.methods)
            .field("blocks", &self.blocks.len())
            .field("depth", &self.depth)
            .finish()
    }
}

impl Environment {
    /// Create an empty environment bound to the process's standard streams.
    pub fn new() -> Self {
        Self {
            bindings: IndexMap::new(),
            macros: MacroEnvironment::new(),
            methods: MethodTable::new(),
            blocks: Vec::new(),
            depth: 0,
            stdio: Stdio::inherit(),
        }
    }

    /// Replace the standard streams (builder pattern).
    pub fn with_stdio(mut self, stdio: Stdio) -> Self {
        self.stdio = stdio;
        self
    }

    /// The standard streams.
    pub fn stdio_mut(&mut self) -> &mut Stdio {
        &mut self.stdio
    }

    // ═══════════════════════════════════════════════════════════════════
    // Value Bindings
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `key` to `value`, overwriting any previous binding.
    pub fn define(&mut self, key: BindingKey, value: Value) {
        debug!(key = %key, type_name = value.type_name(), "bind");
        self.bindings.insert(key, value);
    }

    /// Register a built-in function under `context` and its own name.
    pub fn define_builtin(&mut self, context: Context, builtin: BuiltinFn) {
        let key = BindingKey::new(context, builtin.name.clone());
        self.bindings.insert(key, Value::Builtin(builtin));
    }

    /// Look up a binding.
    pub fn get(&self, key: &BindingKey) -> Option<&Value> {
        self.bindings.get(key)
    }

    /// Look up a binding by its parts.
    pub fn lookup(&self, context: Context, name: &str) -> Option<&Value> {
        self.get(&BindingKey::new(context, name))
    }

    /// Check if a binding exists.
    pub fn contains(&self, key: &BindingKey) -> bool {
        self.bindings.contains_key(key)
    }

    /// Iterate over all bindings in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&BindingKey, &Value)> {
        self.bindings.iter()
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the environment has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Macros
    // ═══════════════════════════════════════════════════════════════════

    /// Push a macro, shadowing any macro with the same key.
    ///
    /// Inside a block the push is recorded on the block's frame and undone
    /// when the block exits.
    pub fn push_macro(&mut self, def: MacroDefinition) {
        if let Some(frame) = self.blocks.last_mut() {
            frame.macros.push(def.key.clone());
        }
        debug!(key = %def.key, "push macro");
        self.macros.push_macro(def);
    }

    /// Pop the innermost macro registered under `key`.
    ///
    /// The push that made it innermost is forgotten by the block that
    /// recorded it, so that block's exit leaves the enclosing definition in
    /// place.
    pub fn pop_macro(&mut self, key: &BindingKey) -> bool {
        if self.macros.pop_macro(key).is_none() {
            return false;
        }
        debug!(key = %key, "pop macro");
        for frame in self.blocks.iter_mut().rev() {
            if let Some(i) = frame.macros.iter().rposition(|k| k == key) {
                frame.macros.remove(i);
                break;
            }
        }
        true
    }

    /// The macro table.
    pub fn macros(&self) -> &MacroEnvironment {
        &self.macros
    }

    // ═══════════════════════════════════════════════════════════════════
    // Method Tables
    // ═══════════════════════════════════════════════════════════════════

    /// Register a method in the table for `type_name`.
    pub fn define_method(&mut self, type_name: impl Into<String>, method: MethodFn) {
        self.methods.define(type_name, method);
    }

    /// Look up a method.
    pub fn method(&self, type_name: &str, name: &str) -> Option<&MethodFn> {
        self.methods.get(type_name, name)
    }

    /// The method tables.
    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    // ═══════════════════════════════════════════════════════════════════
    // Depth Tracking (Stack Overflow Protection)
    // ═══════════════════════════════════════════════════════════════════

    /// Enter one level of nesting. Returns error if `max` is exceeded.
    pub fn enter(&mut self, max: usize) -> Result<(), EvalError> {
        if self.depth >= max {
            return Err(EvalError::DepthExceeded {
                depth: self.depth + 1,
                max,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of nesting.
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Get current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
