//! # Wick
//!
//! A small scripting notation with whitespace-sensitive operators, run by a
//! tree-walking evaluator.
//!
//! Operators carry no fixed meaning. The scanner classifies each one by the
//! whitespace around it (`a + b` is a loose infix, `a.b` a tight one, `-a` a
//! prefix) and the classification becomes part of the operator's name, so
//! every operator is just a binding or a macro in the environment.
//!
//! ## Architecture
//!
//! - **Scanner** (`scan`): source text to tokens
//! - **Parser** (`parse`): tokens to a concrete syntax tree
//! - **Lowering** (`lower`): syntax tree to the semantic [`Ast`]
//! - **Evaluator** (`eval`): [`Ast`] to [`Value`], rewriting macro
//!   invocations before evaluating them
//!
//! ## Example
//!
//! ```
//! use wick::{Interpreter, Value};
//!
//! let mut interp = Interpreter::new();
//! let value = interp.run("parts = 'a,b,c'.split(',')\nparts.len()").unwrap();
//! assert_eq!(value, Value::Number(3.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod expansion;
pub mod interpreter;
pub mod io;
pub mod lower;
pub mod macro_env;
pub mod parse;
pub mod scan;
mod stack;
pub mod syntax;
pub mod token;
pub mod value;

// Re-export main types
pub use ast::{Ast, BlockKind, Context, Reference};
pub use context::EvalContext;
pub use environment::{BindingKey, BlockGuard, Environment, MethodTable};
pub use error::{
    EvalError, LowerError, ParseError, QuoteStyle, Result, ScanError, ScanReport, WickError,
};
pub use eval::{call_value, eval_block, Evaluate};
pub use expansion::{ExpansionError, ExpansionResult};
pub use interpreter::{compile, run, Interpreter};
pub use io::{SharedBuffer, Stdio};
pub use lower::lower;
pub use macro_env::{MacroDefinition, MacroEnvironment, MacroFn};
pub use parse::parse;
pub use scan::scan;
pub use syntax::{Rule, SyntaxNode};
pub use token::{Token, TokenKind};
pub use value::{BoundMethod, BuiltinFn, BuiltinFnPtr, MethodFn, MethodFnPtr, RecordValue, Value};

/// Wick version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
