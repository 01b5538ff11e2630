//! Lowering from the concrete syntax tree to the semantic AST
//!
//! A structural fold driven by rule tags. Comma lists get one extra
//! normalisation: `a, b, c` and `a,b` both become a single application of the
//! postfix `,` operator to every item, which is the shape assignment targets
//! and call arguments are read from.

use tracing::trace;

use crate::ast::{Ast, BlockKind, Context, Reference};
use crate::error::LowerError;
use crate::stack::ensure_sufficient_stack;
use crate::syntax::{Rule, SyntaxNode};
use crate::token::Token;

/// The operator that builds lists.
pub const LIST_OPERATOR: &str = ",";

/// Lower a `stmts` tree into a top-level block.
///
/// # Errors
///
/// Returns a [`LowerError`] for any syntax shape without a lowering case.
pub fn lower(tree: &SyntaxNode) -> Result<Ast, LowerError> {
    let ast = match tree {
        SyntaxNode::Branch {
            rule: Rule::Stmts, ..
        } => stmts(tree, BlockKind::Top)?,
        SyntaxNode::Branch { rule, .. } => return Err(LowerError::UnexpectedNode { rule: *rule }),
        SyntaxNode::Leaf(token) => return Err(LowerError::UnexpectedToken { kind: token.kind }),
    };
    trace!("lowered");
    Ok(ast)
}

/// Check if `ast` is a comma list built by the lowering pass.
pub fn is_list(ast: &Ast) -> bool {
    match ast {
        Ast::Apply { operator, .. } => matches!(
            operator.as_ref(),
            Ast::Ref(Reference { context: Context::Postop, text }) if text == LIST_OPERATOR
        ),
        _ => false,
    }
}

fn list(items: Vec<Ast>) -> Ast {
    Ast::apply(Ast::reference(Context::Postop, LIST_OPERATOR), items)
}

/// The items of a comma list, or the node itself as a single item.
fn list_items(ast: Ast) -> Vec<Ast> {
    if !is_list(&ast) {
        return vec![ast];
    }
    match ast {
        Ast::Apply { args, .. } => args,
        other => vec![other],
    }
}

fn stmts(node: &SyntaxNode, kind: BlockKind) -> Result<Ast, LowerError> {
    let mut out = Vec::new();
    for stmt in node.children() {
        match stmt {
            SyntaxNode::Branch {
                rule: Rule::Stmt,
                children,
            } => {
                // A marker with no expression is an empty line.
                if children.len() >= 2 {
                    out.push(expr(&children[1])?);
                }
            }
            SyntaxNode::Branch { rule, .. } => {
                return Err(LowerError::UnexpectedNode { rule: *rule })
            }
            SyntaxNode::Leaf(token) => return Err(LowerError::UnexpectedToken { kind: token.kind }),
        }
    }
    Ok(Ast::block(kind, out))
}

fn expr(node: &SyntaxNode) -> Result<Ast, LowerError> {
    ensure_sufficient_stack(|| expr_inner(node))
}

fn expr_inner(node: &SyntaxNode) -> Result<Ast, LowerError> {
    let (rule, children) = match node {
        SyntaxNode::Leaf(token) => return leaf(token),
        SyntaxNode::Branch { rule, children } => (*rule, children.as_slice()),
    };

    match rule {
        Rule::Infix0 => {
            let [left, _, right] = parts::<3>(rule, children)?;
            Ok(Ast::Assign {
                targets: assign_targets(expr(left)?)?,
                value: Box::new(expr(right)?),
            })
        }
        Rule::Infix1 | Rule::Infix2 => {
            let [left, op, right] = parts::<3>(rule, children)?;
            if op.token().is_some_and(|t| t.text == LIST_OPERATOR) {
                let mut items = list_items(expr(left)?);
                items.push(expr(right)?);
                return Ok(list(items));
            }
            Ok(Ast::apply(expr(op)?, vec![expr(left)?, expr(right)?]))
        }
        Rule::Apply => {
            let [callee, args] = parts::<2>(rule, children)?;
            application(callee, args)
        }
        Rule::Prefix => {
            let [op, operand] = parts::<2>(rule, children)?;
            Ok(Ast::apply(expr(op)?, vec![expr(operand)?]))
        }
        Rule::Postfix => {
            let [operand, op] = parts::<2>(rule, children)?;
            Ok(Ast::apply(expr(op)?, vec![expr(operand)?]))
        }
        Rule::BraceBlock => block(rule, children, BlockKind::Brace),
        Rule::BracketBlock => block(rule, children, BlockKind::Bracket),
        Rule::ParenBlock => block(rule, children, BlockKind::Paren),
        Rule::Stmts | Rule::Stmt | Rule::Args => Err(LowerError::UnexpectedNode { rule }),
    }
}

fn block(rule: Rule, children: &[SyntaxNode], kind: BlockKind) -> Result<Ast, LowerError> {
    let [_, body, _] = parts::<3>(rule, children)?;
    stmts(body, kind)
}

fn application(callee: &SyntaxNode, args: &SyntaxNode) -> Result<Ast, LowerError> {
    match args.rule() {
        Some(Rule::Args) => {}
        Some(rule) => return Err(LowerError::UnexpectedNode { rule }),
        None => {
            return Err(LowerError::MalformedNode {
                rule: Rule::Apply,
                children: 2,
            })
        }
    }

    let callee = expr(callee)?;

    // `a, b, c` scans as postfix commas followed by juxtaposition.
    if is_list(&callee) {
        let mut items = list_items(callee);
        for arg in args.children() {
            items.extend(list_items(expr(arg)?));
        }
        return Ok(list(items));
    }

    let mut out = Vec::new();
    for arg in args.children() {
        if arg.rule() == Some(Rule::ParenBlock) {
            out.extend(spread(expr(arg)?));
        } else {
            out.push(expr(arg)?);
        }
    }
    Ok(Ast::apply(callee, out))
}

/// Spread a parenthesised argument: `()` is no argument, `(x, y)` is two.
fn spread(block: Ast) -> Vec<Ast> {
    match block {
        Ast::Block { mut stmts, .. } if stmts.len() <= 1 => match stmts.pop() {
            Some(stmt) => list_items(stmt),
            None => Vec::new(),
        },
        other => vec![other],
    }
}

fn assign_targets(left: Ast) -> Result<Vec<Reference>, LowerError> {
    let items = match left {
        Ast::Ref(r) => return Ok(vec![r]),
        list @ Ast::Apply { .. } if is_list(&list) => list_items(list),
        other => {
            return Err(LowerError::InvalidAssignTarget {
                found: describe(&other),
            })
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Ast::Ref(r) => Ok(r),
            other => Err(LowerError::InvalidAssignTarget {
                found: describe(&other),
            }),
        })
        .collect()
}

fn describe(ast: &Ast) -> String {
    match ast {
        Ast::Block { kind, .. } => kind.name().to_string(),
        Ast::Assign { .. } => "assignment".to_string(),
        Ast::Apply { .. } => "application".to_string(),
        Ast::Ref(r) => r.to_string(),
        Ast::Str(raw) => format!("string {}", raw),
    }
}

fn leaf(token: &Token) -> Result<Ast, LowerError> {
    if let Some(context) = token.kind.context() {
        return Ok(Ast::reference(context, token.text.clone()));
    }
    if token.kind.is_string() {
        return Ok(Ast::string(token.text.clone()));
    }
    Err(LowerError::UnexpectedToken { kind: token.kind })
}

fn parts<const N: usize>(rule: Rule, children: &[SyntaxNode]) -> Result<&[SyntaxNode; N], LowerError> {
    children
        .try_into()
        .map_err(|_| LowerError::MalformedNode {
            rule,
            children: children.len(),
        })
}
