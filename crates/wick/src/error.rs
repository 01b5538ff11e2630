//! Error types for every pipeline stage

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::Context;
use crate::expansion::ExpansionError;
use crate::syntax::Rule;
use crate::token::TokenKind;

// ═══════════════════════════════════════════════════════════════════════
// Lexical Errors
// ═══════════════════════════════════════════════════════════════════════

/// Which quote character opened a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"..."`
    Double,
    /// `'...'`
    Single,
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStyle::Double => f.write_str("double"),
            QuoteStyle::Single => f.write_str("single"),
        }
    }
}

/// Error raised by the scanner. Scanning halts at the offending position.
///
/// The rendered messages are a stable format: positions are 0-based byte
/// offsets and lines are 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// A quoted literal ran into the end of input
    #[error("unexpected EOF in {quote} quoted string started at pos={position} (line={line})")]
    UnterminatedString {
        /// The opening quote
        quote: QuoteStyle,
        /// Offset of the opening quote
        position: usize,
        /// Line of the opening quote
        line: usize,
    },

    /// A character no token can start with
    #[error("unknown char: '{ch}' at pos={position} (line={line})")]
    UnknownChar {
        /// The offending character
        ch: char,
        /// Offset of the character
        position: usize,
        /// Line of the character
        line: usize,
    },
}

impl ScanError {
    /// Byte offset the error was reported at.
    pub fn position(&self) -> usize {
        match self {
            ScanError::UnterminatedString { position, .. }
            | ScanError::UnknownChar { position, .. } => *position,
        }
    }

    /// Line the error was reported at.
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnterminatedString { line, .. } | ScanError::UnknownChar { line, .. } => {
                *line
            }
        }
    }

    /// The structured `{error, position, line}` record for this error.
    pub fn report(&self) -> ScanReport {
        ScanReport {
            error: self.to_string(),
            position: self.position(),
            line: self.line(),
        }
    }
}

/// Serializable form of a [`ScanError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Rendered error message
    pub error: String,
    /// 0-based byte offset
    pub position: usize,
    /// 1-based line
    pub line: usize,
}

// ═══════════════════════════════════════════════════════════════════════
// Parse and Lowering Errors
// ═══════════════════════════════════════════════════════════════════════

/// Error raised by the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The statement list stopped before the end of the token stream
    #[error("unparsed input at {kind} '{text}' at pos={position} (line={line})")]
    TrailingInput {
        /// Kind of the first unconsumed token
        kind: TokenKind,
        /// Text of the first unconsumed token
        text: String,
        /// Offset of the first unconsumed token
        position: usize,
        /// Line of the first unconsumed token
        line: usize,
    },

    /// Blocks or operator chains nest deeper than the parser allows
    #[error("nesting deeper than {max} levels at pos={position} (line={line})")]
    TooDeep {
        /// The nesting limit
        max: usize,
        /// Offset of the token where the limit was reached
        position: usize,
        /// Line of the token where the limit was reached
        line: usize,
    },
}

/// Error raised while lowering a syntax tree to an AST.
///
/// These indicate a syntax shape the lowering pass has no case for.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LowerError {
    /// A node whose rule cannot appear where it was found
    #[error("unknown node type: {rule}")]
    UnexpectedNode {
        /// The offending rule
        rule: Rule,
    },

    /// A node with the wrong number of children for its rule
    #[error("malformed {rule} node with {children} children")]
    MalformedNode {
        /// The offending rule
        rule: Rule,
        /// How many children it had
        children: usize,
    },

    /// A leaf whose token kind cannot become an expression
    #[error("unknown token context: {kind}")]
    UnexpectedToken {
        /// The offending token kind
        kind: TokenKind,
    },

    /// The left side of `=` is not a reference or list of references
    #[error("invalid assignment target: {found}")]
    InvalidAssignTarget {
        /// Rendering of the offending target
        found: String,
    },
}

// ═══════════════════════════════════════════════════════════════════════
// Runtime Errors
// ═══════════════════════════════════════════════════════════════════════

/// Error raised during evaluation. The run aborts on the first one.
#[derive(Error, Debug)]
pub enum EvalError {
    /// No binding for a reference
    #[error("undefined name: '{name}' of type '{context}'")]
    UndefinedName {
        /// Reference text
        name: String,
        /// Lexical context it was looked up in
        context: Context,
    },

    /// Field/method dispatch found nothing
    #[error("no field or method '{member}' on type '{type_name}'")]
    UnknownMember {
        /// Runtime type of the receiver
        type_name: String,
        /// Requested member
        member: String,
    },

    /// Applying a value that cannot take arguments
    #[error("value of type '{type_name}' is not callable")]
    NotCallable {
        /// Runtime type of the operator value
        type_name: String,
    },

    /// Wrong number of arguments to a builtin or method
    #[error("'{name}' expects {expected} arguments, got {got}")]
    ArityMismatch {
        /// Callee name
        name: String,
        /// Declared arity
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Several assignment targets but the value is not a sequence
    #[error("cannot destructure value of type '{type_name}' into {targets} names")]
    DestructureNotSequence {
        /// Runtime type of the right-hand value
        type_name: String,
        /// Number of targets
        targets: usize,
    },

    /// More assignment targets than sequence elements
    #[error("cannot destructure {len} elements into {targets} names")]
    DestructureOutOfRange {
        /// Sequence length
        len: usize,
        /// Number of targets
        targets: usize,
    },

    /// An argument had the wrong runtime type
    #[error("type error: {message}")]
    TypeError {
        /// Description of the mismatch
        message: String,
    },

    /// A builtin rejected its input
    #[error("builtin '{name}' failed: {message}")]
    BuiltinError {
        /// Builtin name
        name: String,
        /// Failure description
        message: String,
    },

    /// Reading or writing a standard stream failed
    #[error("i/o error in '{name}': {source}")]
    Io {
        /// Builtin that performed the i/o
        name: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Macro rewriting failed
    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    /// Nesting went past `EvalContext::max_depth`
    #[error("nesting depth {depth} exceeds maximum {max}")]
    DepthExceeded {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },
}

impl EvalError {
    /// Shorthand for a [`EvalError::TypeError`].
    pub fn type_error(message: impl Into<String>) -> Self {
        EvalError::TypeError {
            message: message.into(),
        }
    }

    /// Shorthand for a [`EvalError::BuiltinError`].
    pub fn builtin(name: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::BuiltinError {
            name: name.into(),
            message: message.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Pipeline Error
// ═══════════════════════════════════════════════════════════════════════

/// Any error the pipeline can surface to its caller.
#[derive(Error, Debug)]
pub enum WickError {
    /// Lexical error
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    /// Unconsumed input
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Structural error
    #[error("lower error: {0}")]
    Lower(#[from] LowerError),

    /// Runtime error
    #[error("runtime error: {0}")]
    Eval(#[from] EvalError),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, WickError>;
