//! Lexical scanner
//!
//! Turns source text into tokens in a single left-to-right pass. Operator
//! tokens are classified by the whitespace around them:
//!
//! ```text
//! a = b     inop0   (`=` followed by whitespace)
//! a + b     inop1   (followed by whitespace)
//! a.b       inop2   (attached on both sides)
//! -a        preop   (followed by an operand)
//! a, b      postop  (attached to the operand before, whitespace after)
//! ```

use tracing::trace;

use crate::error::{QuoteStyle, ScanError};
use crate::token::{Token, TokenKind};

const OPERATOR_CHARS: &[u8] = b"=!#$%&*+,./:;<>?@^`~-|";

/// Scan `text` into tokens.
///
/// The first token is always a line-start marker at offset 0.
///
/// # Errors
///
/// Returns a [`ScanError`] for an unterminated quoted literal or a character
/// no token can start with.
pub fn scan(text: &str) -> Result<Vec<Token>, ScanError> {
    let tokens = Scanner::new(text).run()?;
    trace!(tokens = tokens.len(), bytes = text.len(), "scanned");
    Ok(tokens)
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ScanError> {
        let src = self.src;
        self.tokens.push(Token::new(TokenKind::Bol, 0, 1, "", ""));

        while self.pos < self.bytes.len() {
            let start = self.pos;
            while self
                .bytes
                .get(self.pos)
                .is_some_and(|&b| matches!(b, b' ' | b'\t' | b'\r'))
            {
                self.pos += 1;
            }
            let pre_space = &src[start..self.pos];
            if self.pos >= self.bytes.len() {
                break;
            }

            let attaches_postop = match self.bytes[self.pos] {
                b'\n' => {
                    self.line += 1;
                    let pre = format!("{}\n", pre_space);
                    self.push(TokenKind::Bol, self.pos, pre, String::new());
                    self.pos += 1;
                    false
                }
                b'{' => self.bracket(TokenKind::OpenBrace, pre_space),
                b'}' => self.bracket(TokenKind::CloseBrace, pre_space),
                b'[' => self.bracket(TokenKind::OpenBracket, pre_space),
                b']' => self.bracket(TokenKind::CloseBracket, pre_space),
                b'(' => self.bracket(TokenKind::OpenParen, pre_space),
                b')' => self.bracket(TokenKind::CloseParen, pre_space),
                b if is_symbol_byte(b) => {
                    self.symbol(pre_space);
                    true
                }
                b'"' => {
                    self.quoted(QuoteStyle::Double, pre_space)?;
                    true
                }
                b'\'' => {
                    self.quoted(QuoteStyle::Single, pre_space)?;
                    true
                }
                b if is_operator_byte(b) => {
                    self.operator(pre_space);
                    false
                }
                _ => {
                    let ch = src[self.pos..].chars().next().unwrap_or('\0');
                    return Err(ScanError::UnknownChar {
                        ch,
                        position: self.pos,
                        line: self.line,
                    });
                }
            };

            let next_is_operator = self
                .bytes
                .get(self.pos)
                .is_some_and(|&b| is_operator_byte(b));
            if attaches_postop && next_is_operator {
                self.attached_operator();
            }
        }

        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, pos: usize, pre_space: impl Into<String>, text: String) {
        self.tokens.push(Token::new(kind, pos, self.line, pre_space, text));
    }

    /// Emit a one-character bracket. Closing brackets may take a postfix operator.
    fn bracket(&mut self, kind: TokenKind, pre_space: &str) -> bool {
        let text = self.src[self.pos..self.pos + 1].to_string();
        self.push(kind, self.pos, pre_space, text);
        self.pos += 1;
        matches!(
            kind,
            TokenKind::CloseBrace | TokenKind::CloseBracket | TokenKind::CloseParen
        )
    }

    fn symbol(&mut self, pre_space: &str) {
        let start = self.pos;
        let mut all_digits = true;
        let mut seen_dot = false;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if is_symbol_byte(b) {
                all_digits &= b.is_ascii_digit();
                self.pos += 1;
            } else if b == b'.'
                && all_digits
                && !seen_dot
                && self
                    .bytes
                    .get(self.pos + 1)
                    .is_some_and(|next| next.is_ascii_digit())
            {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = self.src[start..self.pos].to_string();
        self.push(TokenKind::Symbol, start, pre_space, text);
    }

    fn quoted(&mut self, quote: QuoteStyle, pre_space: &str) -> Result<(), ScanError> {
        let start = self.pos;
        let start_line = self.line;
        let (delim, kind) = match quote {
            QuoteStyle::Double => (b'"', TokenKind::DString),
            QuoteStyle::Single => (b'\'', TokenKind::SString),
        };
        let unterminated = ScanError::UnterminatedString {
            quote,
            position: start,
            line: start_line,
        };

        let mut lines = 0;
        let mut p = start + 1;
        loop {
            let Some(&b) = self.bytes.get(p) else {
                return Err(unterminated);
            };
            if b == b'\\' {
                let Some(escaped) = self.src[p + 1..].chars().next() else {
                    return Err(unterminated);
                };
                if escaped == '\n' {
                    lines += 1;
                }
                p += 1 + escaped.len_utf8();
                continue;
            }
            if b == b'\n' {
                lines += 1;
            }
            p += 1;
            if b == delim {
                break;
            }
        }

        let text = self.src[start..p].to_string();
        self.tokens
            .push(Token::new(kind, start, start_line, pre_space, text));
        self.line += lines;
        self.pos = p;
        Ok(())
    }

    /// An operator run that follows whitespace or starts the input.
    fn operator(&mut self, pre_space: &str) {
        let start = self.pos;
        let end = self.operator_end(start);
        let op = self.src[start..end].to_string();
        let kind = if self.is_white_or_end(end) {
            if op == "=" {
                TokenKind::Inop0
            } else {
                TokenKind::Inop1
            }
        } else {
            TokenKind::Preop
        };
        self.push(kind, start, pre_space, op);
        self.pos = end;
    }

    /// An operator run attached to the operand just scanned.
    fn attached_operator(&mut self) {
        let start = self.pos;
        let end = self.operator_end(start);
        let op = self.src[start..end].to_string();
        let kind = if self.is_white_or_end(end) {
            TokenKind::Postop
        } else {
            TokenKind::Inop2
        };
        self.push(kind, start, "", op);
        self.pos = end;
    }

    fn operator_end(&self, start: usize) -> usize {
        let mut end = start + 1;
        while end < self.bytes.len() && is_operator_byte(self.bytes[end]) {
            end += 1;
        }
        end
    }

    fn is_white_or_end(&self, pos: usize) -> bool {
        self.bytes
            .get(pos)
            .map_or(true, |&b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
    }
}

fn is_symbol_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_operator_byte(b: u8) -> bool {
    OPERATOR_CHARS.contains(&b)
}
