//! Precedence-cascade recursive-descent parser
//!
//! Grammar, loosest to tightest:
//!
//! ```text
//! stmts     := stmt*
//! stmt      := bol expr0?
//! expr0     := expr1 inop0 expr0       (right associative)
//! expr1     := exprApply inop1 expr1   (rotated to left associative)
//! exprApply := expr2 expr2*
//! expr2     := exprPre inop2 expr2     (rotated to left associative)
//! exprPre   := preop exprPost | exprPost
//! exprPost  := operand postop | operand
//! operand   := symbol | dstring | sstring | block
//! block     := open stmts close
//! ```
//!
//! A rule that does not match consumes nothing and yields `None`; that is the
//! only "failure" inside the grammar.
//!
//! Blocks and operator chains are the only rules that nest. Each level counts
//! against [`MAX_NESTING`], which bounds the depth of every tree built from
//! the result.

use tracing::trace;

use crate::error::ParseError;
use crate::stack::ensure_sufficient_stack;
use crate::syntax::{Rule, SyntaxNode};
use crate::token::{Token, TokenKind};

/// Deepest block or operator-chain nesting the parser accepts.
pub const MAX_NESTING: usize = 1000;

/// Parse a token stream into a concrete syntax tree rooted at a `stmts` node.
///
/// # Errors
///
/// Returns [`ParseError::TooDeep`] when nesting exceeds [`MAX_NESTING`], and
/// [`ParseError::TrailingInput`] when the statement list stops before the
/// last token.
pub fn parse(tokens: &[Token]) -> Result<SyntaxNode, ParseError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        too_deep: None,
    };
    let tree = parser.stmts(false);

    if let Some(at) = parser.too_deep {
        let (position, line) = tokens
            .get(at)
            .or(tokens.last())
            .map_or((0, 1), |t| (t.pos, t.line));
        return Err(ParseError::TooDeep {
            max: MAX_NESTING,
            position,
            line,
        });
    }

    if let Some(token) = parser.peek() {
        return Err(ParseError::TrailingInput {
            kind: token.kind,
            text: token.text.clone(),
            position: token.pos,
            line: token.line,
        });
    }

    trace!(statements = tree.children().len(), "parsed");
    Ok(tree)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
    /// Token index where the nesting limit was first hit
    too_deep: Option<usize>,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn expect(&mut self, kind: TokenKind) -> Option<SyntaxNode> {
        let token = self.peek().filter(|t| t.kind == kind)?;
        self.pos += 1;
        Some(SyntaxNode::Leaf(token.clone()))
    }

    /// Run one nesting level of the grammar.
    ///
    /// Past the limit the rule fails, and so does every nested rule after
    /// it, so the parse unwinds without building anything deeper.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.too_deep.is_some() {
            return None;
        }
        if self.depth >= MAX_NESTING {
            self.too_deep = Some(self.pos);
            return None;
        }
        self.depth += 1;
        let result = ensure_sufficient_stack(|| rule(self));
        self.depth -= 1;
        result
    }

    fn literal(&mut self) -> Option<SyntaxNode> {
        self.expect(TokenKind::Symbol)
            .or_else(|| self.expect(TokenKind::DString))
            .or_else(|| self.expect(TokenKind::SString))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════

    /// Inside a block the first statement may follow the opening bracket
    /// directly, without a line-start marker.
    fn stmts(&mut self, in_block: bool) -> SyntaxNode {
        let mut children = Vec::new();
        if in_block {
            if let Some(stmt) = self.implicit_stmt() {
                children.push(stmt);
            }
        }
        while let Some(stmt) = self.stmt() {
            children.push(stmt);
        }
        SyntaxNode::branch(Rule::Stmts, children)
    }

    fn stmt(&mut self) -> Option<SyntaxNode> {
        let bol = self.expect(TokenKind::Bol)?;
        let mut children = vec![bol];
        if let Some(expr) = self.expr0() {
            children.push(expr);
        }
        Some(SyntaxNode::branch(Rule::Stmt, children))
    }

    fn implicit_stmt(&mut self) -> Option<SyntaxNode> {
        let first = self.peek().filter(|t| t.kind != TokenKind::Bol)?;
        let marker = Token::new(TokenKind::Bol, first.pos, first.line, "", "");
        let expr = self.expr0()?;
        Some(SyntaxNode::branch(
            Rule::Stmt,
            vec![SyntaxNode::Leaf(marker), expr],
        ))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Expression Tiers
    // ═══════════════════════════════════════════════════════════════════

    fn expr0(&mut self) -> Option<SyntaxNode> {
        let left = self.expr1()?;
        let save = self.pos;
        if let Some(op) = self.expect(TokenKind::Inop0) {
            if let Some(right) = self.nested(Self::expr0) {
                return Some(SyntaxNode::branch(Rule::Infix0, vec![left, op, right]));
            }
            self.pos = save;
        }
        Some(left)
    }

    fn expr1(&mut self) -> Option<SyntaxNode> {
        let chain = self.infix1_chain()?;
        Some(rotate_left(chain, Rule::Infix1))
    }

    fn infix1_chain(&mut self) -> Option<SyntaxNode> {
        let left = self.expr_apply()?;
        let save = self.pos;
        if let Some(op) = self.expect(TokenKind::Inop1) {
            if let Some(right) = self.nested(Self::infix1_chain) {
                return Some(SyntaxNode::branch(Rule::Infix1, vec![left, op, right]));
            }
            self.pos = save;
        }
        Some(left)
    }

    fn expr_apply(&mut self) -> Option<SyntaxNode> {
        let callee = self.expr2()?;
        let mut args = Vec::new();
        while let Some(arg) = self.expr2() {
            args.push(arg);
        }
        if args.is_empty() {
            return Some(callee);
        }
        Some(SyntaxNode::branch(
            Rule::Apply,
            vec![callee, SyntaxNode::branch(Rule::Args, args)],
        ))
    }

    fn expr2(&mut self) -> Option<SyntaxNode> {
        let chain = self.infix2_chain()?;
        Some(rotate_left(chain, Rule::Infix2))
    }

    fn infix2_chain(&mut self) -> Option<SyntaxNode> {
        let left = self.expr_pre()?;
        let save = self.pos;
        if let Some(op) = self.expect(TokenKind::Inop2) {
            if let Some(right) = self.nested(Self::infix2_chain) {
                return Some(SyntaxNode::branch(Rule::Infix2, vec![left, op, right]));
            }
            self.pos = save;
        }
        Some(left)
    }

    fn expr_pre(&mut self) -> Option<SyntaxNode> {
        let save = self.pos;
        if let Some(op) = self.expect(TokenKind::Preop) {
            if let Some(operand) = self.expr_post() {
                return Some(SyntaxNode::branch(Rule::Prefix, vec![op, operand]));
            }
            self.pos = save;
            return None;
        }
        self.expr_post()
    }

    fn expr_post(&mut self) -> Option<SyntaxNode> {
        let operand = self.operand()?;
        match self.expect(TokenKind::Postop) {
            Some(op) => Some(SyntaxNode::branch(Rule::Postfix, vec![operand, op])),
            None => Some(operand),
        }
    }

    fn operand(&mut self) -> Option<SyntaxNode> {
        self.literal()
            .or_else(|| self.block(TokenKind::OpenBrace, TokenKind::CloseBrace, Rule::BraceBlock))
            .or_else(|| {
                self.block(
                    TokenKind::OpenBracket,
                    TokenKind::CloseBracket,
                    Rule::BracketBlock,
                )
            })
            .or_else(|| self.block(TokenKind::OpenParen, TokenKind::CloseParen, Rule::ParenBlock))
    }

    fn block(&mut self, open: TokenKind, close: TokenKind, rule: Rule) -> Option<SyntaxNode> {
        if self.peek()?.kind != open {
            return None;
        }
        self.nested(|p| p.delimited(open, close, rule))
    }

    fn delimited(&mut self, open: TokenKind, close: TokenKind, rule: Rule) -> Option<SyntaxNode> {
        let save = self.pos;
        let open = self.expect(open)?;
        let body = self.stmts(true);
        match self.expect(close) {
            Some(close) => Some(SyntaxNode::branch(rule, vec![open, body, close])),
            None => {
                self.pos = save;
                None
            }
        }
    }
}

/// Rotate a right-recursive chain `a ⊕ (b ⊕ c)` into `(a ⊕ b) ⊕ c`.
fn rotate_left(mut node: SyntaxNode, rule: Rule) -> SyntaxNode {
    loop {
        match split_infix(node, rule) {
            Ok((left, op, right)) => match split_infix(right, rule) {
                Ok((inner_left, inner_op, inner_right)) => {
                    let rotated = SyntaxNode::branch(rule, vec![left, op, inner_left]);
                    node = SyntaxNode::branch(rule, vec![rotated, inner_op, inner_right]);
                }
                Err(right) => return SyntaxNode::branch(rule, vec![left, op, right]),
            },
            Err(node) => return node,
        }
    }
}

fn split_infix(
    node: SyntaxNode,
    rule: Rule,
) -> Result<(SyntaxNode, SyntaxNode, SyntaxNode), SyntaxNode> {
    match node {
        SyntaxNode::Branch { rule: r, children } if r == rule => {
            match <[SyntaxNode; 3]>::try_from(children) {
                Ok([left, op, right]) => Ok((left, op, right)),
                Err(children) => Err(SyntaxNode::branch(r, children)),
            }
        }
        other => Err(other),
    }
}
