//! Semantic AST produced by lowering the concrete syntax tree

use std::fmt;

/// The identifier/operator class a reference belongs to.
///
/// Every binding and macro is keyed by a context plus a name, so `-` as a
/// prefix operator and `-` as an infix operator are different names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Context {
    /// Identifier or numeric literal
    Symbol,
    /// Assignment-level infix operator
    Inop0,
    /// Additive-level infix operator
    Inop1,
    /// Tight infix operator
    Inop2,
    /// Prefix operator
    Preop,
    /// Postfix operator
    Postop,
}

impl Context {
    /// The context's name as used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Context::Symbol => "symbol",
            Context::Inop0 => "inop0",
            Context::Inop1 => "inop1",
            Context::Inop2 => "inop2",
            Context::Preop => "preop",
            Context::Postop => "postop",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a block came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// The whole program
    Top,
    /// `{ ... }`
    Brace,
    /// `[ ... ]`
    Bracket,
    /// `( ... )`
    Paren,
}

impl BlockKind {
    /// The block kind's name as used in AST dumps.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Top => "topBlock",
            BlockKind::Brace => "braceBlock",
            BlockKind::Bracket => "bracketBlock",
            BlockKind::Paren => "parenBlock",
        }
    }
}

/// A reference to a variable or operator: a lexical context plus raw text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Lexical context the text is resolved in
    pub context: Context,

    /// The referenced text, e.g. `x`, `+`, `12`
    pub text: String,
}

impl Reference {
    /// Create a new reference
    pub fn new(context: Context, text: impl Into<String>) -> Self {
        Self {
            context,
            text: text.into(),
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.context, self.text)
    }
}

/// A semantic AST node.
///
/// Each node owns its children. Macro expansion builds new nodes rather
/// than mutating existing ones.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// A sequence of statements; evaluates to the last one
    Block {
        /// Origin of the block
        kind: BlockKind,
        /// Statements in source order
        stmts: Vec<Ast>,
    },

    /// `a = value` or `a, b = value`
    Assign {
        /// One or more target references
        targets: Vec<Reference>,
        /// Right-hand side
        value: Box<Ast>,
    },

    /// Operator applied to arguments
    Apply {
        /// The operator expression
        operator: Box<Ast>,
        /// Arguments in source order
        args: Vec<Ast>,
    },

    /// Variable or operator reference
    Ref(Reference),

    /// String literal, raw text including quotes
    Str(String),
}

impl Ast {
    /// Create a block node
    pub fn block(kind: BlockKind, stmts: Vec<Ast>) -> Self {
        Ast::Block { kind, stmts }
    }

    /// Create an apply node
    pub fn apply(operator: Ast, args: Vec<Ast>) -> Self {
        Ast::Apply {
            operator: Box::new(operator),
            args,
        }
    }

    /// Create a reference node
    pub fn reference(context: Context, text: impl Into<String>) -> Self {
        Ast::Ref(Reference::new(context, text))
    }

    /// Create a symbol reference node
    pub fn symbol(text: impl Into<String>) -> Self {
        Ast::reference(Context::Symbol, text)
    }

    /// Create a string literal node from raw text (quotes included)
    pub fn string(raw: impl Into<String>) -> Self {
        Ast::Str(raw.into())
    }

    /// Create a double-quoted string literal whose value is `text`.
    pub fn quoted(text: &str) -> Self {
        let mut raw = String::with_capacity(text.len() + 2);
        raw.push('"');
        for c in text.chars() {
            if c == '"' || c == '\\' {
                raw.push('\\');
            }
            raw.push(c);
        }
        raw.push('"');
        Ast::Str(raw)
    }

    /// Render the node as an indented tree.
    pub fn show(&self) -> String {
        let mut out = String::new();
        self.show_into(&mut out, 0);
        out
    }

    fn show_into(&self, out: &mut String, indent: usize) {
        let pad = " ".repeat(indent);
        match self {
            Ast::Block { kind, stmts } => {
                out.push_str(&format!("{}Block {} {{\n", pad, kind.name()));
                for stmt in stmts {
                    stmt.show_into(out, indent + 2);
                }
                out.push_str(&format!("{}}}\n", pad));
            }
            Ast::Assign { targets, value } => {
                out.push_str(&format!("{}Assign {{\n", pad));
                out.push_str(&format!("{}  targets:\n", pad));
                for target in targets {
                    out.push_str(&format!("{}    Ref {}\n", pad, target));
                }
                out.push_str(&format!("{}  value:\n", pad));
                value.show_into(out, indent + 4);
                out.push_str(&format!("{}}}\n", pad));
            }
            Ast::Apply { operator, args } => {
                out.push_str(&format!("{}Apply {{\n", pad));
                out.push_str(&format!("{}  operator:\n", pad));
                operator.show_into(out, indent + 4);
                out.push_str(&format!("{}  args:\n", pad));
                for arg in args {
                    arg.show_into(out, indent + 4);
                }
                out.push_str(&format!("{}}}\n", pad));
            }
            Ast::Ref(r) => out.push_str(&format!("{}Ref {}\n", pad, r)),
            Ast::Str(raw) => out.push_str(&format!("{}Str {}\n", pad, raw)),
        }
    }
}
