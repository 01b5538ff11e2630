//! Tokens produced by the scanner

use std::fmt;

use crate::ast::Context;

/// The kind of a scanned token.
///
/// Operator kinds are decided from whitespace adjacency at scan time,
/// so the same characters may produce different kinds in different places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Line-start marker
    Bol,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// Identifier or numeric literal
    Symbol,
    /// Double-quoted string, quotes retained
    DString,
    /// Single-quoted string, quotes retained
    SString,
    /// Assignment-level infix operator
    Inop0,
    /// Additive-level infix operator
    Inop1,
    /// Tight infix operator (`a.b`)
    Inop2,
    /// Prefix operator
    Preop,
    /// Postfix operator
    Postop,
}

impl TokenKind {
    /// The name of this kind as it appears in syntax dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Bol => "bol",
            TokenKind::OpenBrace => "openBrace",
            TokenKind::CloseBrace => "closeBrace",
            TokenKind::OpenBracket => "openBracket",
            TokenKind::CloseBracket => "closeBracket",
            TokenKind::OpenParen => "openParen",
            TokenKind::CloseParen => "closeParen",
            TokenKind::Symbol => "symbol",
            TokenKind::DString => "dstring",
            TokenKind::SString => "sstring",
            TokenKind::Inop0 => "inop0",
            TokenKind::Inop1 => "inop1",
            TokenKind::Inop2 => "inop2",
            TokenKind::Preop => "preop",
            TokenKind::Postop => "postop",
        }
    }

    /// The lexical context a reference to this token resolves in, if any.
    ///
    /// Quoted strings, brackets and line markers have no context.
    pub fn context(self) -> Option<Context> {
        match self {
            TokenKind::Symbol => Some(Context::Symbol),
            TokenKind::Inop0 => Some(Context::Inop0),
            TokenKind::Inop1 => Some(Context::Inop1),
            TokenKind::Inop2 => Some(Context::Inop2),
            TokenKind::Preop => Some(Context::Preop),
            TokenKind::Postop => Some(Context::Postop),
            _ => None,
        }
    }

    /// Check if this kind is a quoted string literal
    pub fn is_string(self) -> bool {
        matches!(self, TokenKind::DString | TokenKind::SString)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token.
///
/// Tokens compare equal only when every field matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is
    pub kind: TokenKind,

    /// Byte offset of the token's first character (0-based)
    pub pos: usize,

    /// Line the token is on (1-based)
    pub line: usize,

    /// Whitespace consumed before the token
    pub pre_space: String,

    /// The token's source text
    pub text: String,
}

impl Token {
    /// Create a new token
    pub fn new(
        kind: TokenKind,
        pos: usize,
        line: usize,
        pre_space: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            pos,
            line,
            pre_space: pre_space.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} '{}')", self.kind, self.pos, self.text)
    }
}
