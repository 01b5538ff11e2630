//! Concrete syntax tree produced by the parser
//!
//! The tree carries no meaning yet: every node is either a branch tagged with
//! the grammar rule that produced it, or a leaf holding one token.

use std::fmt;

use crate::token::Token;

/// Grammar rule that produced a branch node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Zero or more statements
    Stmts,
    /// Line-start marker plus optional expression
    Stmt,
    /// `a = b`
    Infix0,
    /// `a + b`
    Infix1,
    /// `f x y`
    Apply,
    /// Arguments of an application
    Args,
    /// `a.b`
    Infix2,
    /// `-a`
    Prefix,
    /// `a,`
    Postfix,
    /// `{ ... }`
    BraceBlock,
    /// `[ ... ]`
    BracketBlock,
    /// `( ... )`
    ParenBlock,
}

impl Rule {
    /// The rule's name as used in syntax dumps.
    pub fn name(self) -> &'static str {
        match self {
            Rule::Stmts => "stmts",
            Rule::Stmt => "stmt",
            Rule::Infix0 => "infix0",
            Rule::Infix1 => "infix1",
            Rule::Apply => "apply",
            Rule::Args => "args",
            Rule::Infix2 => "infix2",
            Rule::Prefix => "prefix",
            Rule::Postfix => "postfix",
            Rule::BraceBlock => "braceBlock",
            Rule::BracketBlock => "bracketBlock",
            Rule::ParenBlock => "parenBlock",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the concrete syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    /// Interior node tagged by its grammar rule
    Branch {
        /// The producing rule
        rule: Rule,
        /// Children in source order
        children: Vec<SyntaxNode>,
    },

    /// A single token; its kind is the lexical context
    Leaf(Token),
}

impl SyntaxNode {
    /// Create a branch node
    pub fn branch(rule: Rule, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Branch { rule, children }
    }

    /// The rule of a branch, `None` for leaves.
    pub fn rule(&self) -> Option<Rule> {
        match self {
            SyntaxNode::Branch { rule, .. } => Some(*rule),
            SyntaxNode::Leaf(_) => None,
        }
    }

    /// Children of a branch; leaves have none.
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Branch { children, .. } => children,
            SyntaxNode::Leaf(_) => &[],
        }
    }

    /// The token of a leaf.
    pub fn token(&self) -> Option<&Token> {
        match self {
            SyntaxNode::Leaf(token) => Some(token),
            SyntaxNode::Branch { .. } => None,
        }
    }

    /// Render the tree with two-space indentation per level.
    pub fn show(&self) -> String {
        let mut out = String::new();
        self.show_into(&mut out, 0);
        out
    }

    fn show_into(&self, out: &mut String, indent: usize) {
        let pad = " ".repeat(indent);
        match self {
            SyntaxNode::Leaf(token) => {
                out.push_str(&format!("{}{}\n", pad, token));
            }
            SyntaxNode::Branch { rule, children } => {
                out.push_str(&format!("{}{} {{\n", pad, rule));
                for child in children {
                    child.show_into(out, indent + 2);
                }
                out.push_str(&format!("{}}}\n", pad));
            }
        }
    }
}
