//! Macro environment for syntax-rewriting macros
//!
//! Macros are keyed exactly like value bindings, by lexical context and
//! name, but each key holds a stack: a push shadows the current definition
//! and a pop restores it. Evaluation consults this table before evaluating
//! an application.
//!
//! ```text
//! ┌──────────────────────┐     ┌─────────────────┐
//! │  MacroEnvironment    │     │   Environment   │
//! │  (syntax rewriting)  │     │   (runtime)     │
//! ├──────────────────────┤     ├─────────────────┤
//! │ (context, name) →    │     │ (context, name) │
//! │   [def, def, ...]    │     │   → value       │
//! └──────────────────────┘     └─────────────────┘
//!           │                          │
//!           ↓                          ↓
//!   rewrite Apply node           Evaluation
//! ```

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::ast::Ast;
use crate::environment::BindingKey;
use crate::expansion::ExpansionError;

/// Type alias for macro rewrite functions.
///
/// A macro receives the unevaluated argument ASTs and returns the AST to
/// evaluate in place of the application.
pub type MacroFn = Arc<dyn Fn(Vec<Ast>) -> Result<Ast, String> + Send + Sync>;

/// A macro definition stored in the macro environment.
#[derive(Clone)]
pub struct MacroDefinition {
    /// The operator this macro is invoked through
    pub key: BindingKey,

    /// The rewrite function
    pub expander: MacroFn,
}

impl MacroDefinition {
    /// Create a new macro definition
    pub fn new<F>(key: BindingKey, expander: F) -> Self
    where
        F: Fn(Vec<Ast>) -> Result<Ast, String> + Send + Sync + 'static,
    {
        Self {
            key,
            expander: Arc::new(expander),
        }
    }

    /// Rewrite an invocation with the given argument ASTs.
    ///
    /// # Errors
    ///
    /// Returns [`ExpansionError::ExpansionFailed`] when the rewrite function
    /// rejects its arguments.
    pub fn expand(&self, args: Vec<Ast>) -> Result<Ast, ExpansionError> {
        (self.expander)(args).map_err(|message| ExpansionError::ExpansionFailed {
            macro_name: self.key.to_string(),
            message,
        })
    }
}

impl fmt::Debug for MacroDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacroDefinition {{ key: {} }}", self.key)
    }
}

/// Stacked macro table.
///
/// # Example
///
/// ```rust
/// use wick::{Ast, BindingKey, Context, MacroDefinition, MacroEnvironment};
///
/// let key = BindingKey::new(Context::Preop, "!");
/// let mut env = MacroEnvironment::new();
/// env.push_macro(MacroDefinition::new(key.clone(), |mut args| {
///     args.pop().ok_or_else(|| "missing operand".to_string())
/// }));
///
/// assert!(env.has_macro(&key));
/// env.pop_macro(&key);
/// assert!(!env.has_macro(&key));
/// ```
#[derive(Clone, Default)]
pub struct MacroEnvironment {
    /// Macro stacks, innermost definition last.
    /// Using IndexMap to preserve definition order
    macros: IndexMap<BindingKey, Vec<Arc<MacroDefinition>>>,
}

impl MacroEnvironment {
    /// Create a new empty macro environment.
    pub fn new() -> Self {
        Self {
            macros: IndexMap::new(),
        }
    }

    /// Push a macro, shadowing any definition with the same key.
    pub fn push_macro(&mut self, macro_def: MacroDefinition) {
        self.macros
            .entry(macro_def.key.clone())
            .or_default()
            .push(Arc::new(macro_def));
    }

    /// Pop the innermost definition for `key`, uncovering the one below.
    pub fn pop_macro(&mut self, key: &BindingKey) -> Option<Arc<MacroDefinition>> {
        let stack = self.macros.get_mut(key)?;
        let popped = stack.pop();
        if stack.is_empty() {
            self.macros.shift_remove(key);
        }
        popped
    }

    /// Look up the innermost definition for `key`.
    pub fn get_macro(&self, key: &BindingKey) -> Option<&Arc<MacroDefinition>> {
        self.macros.get(key)?.last()
    }

    /// Check if a macro is defined.
    pub fn has_macro(&self, key: &BindingKey) -> bool {
        self.get_macro(key).is_some()
    }

    /// Number of stacked definitions for `key`.
    pub fn depth(&self, key: &BindingKey) -> usize {
        self.macros.get(key).map_or(0, Vec::len)
    }

    /// Keys that have at least one definition, in first-definition order.
    pub fn macro_keys(&self) -> Vec<&BindingKey> {
        self.macros.keys().collect()
    }

    /// Get the number of keys with a definition.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Check if no macros are defined.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

impl fmt::Debug for MacroEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.macros.keys().map(ToString::to_string))
            .finish()
    }
}
