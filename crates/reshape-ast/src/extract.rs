//! Pull a single statement or expression out of a freshly parsed snippet.
//!
//! Replacement code arrives as a whole `Script`. A lone string literal such as
//! `"foo"` is parsed as a directive rather than a statement, so both helpers
//! turn the first directive back into a string literal node.

use crate::ast::{Node, NodeId, SyntaxTree};
use crate::error::RefactorError;

/// First statement of the script at `tree.root`.
///
/// A leading directive is rebuilt as an `ExpressionStatement` wrapping a
/// string literal; the new nodes are appended to the arena.
pub fn extract_statement(tree: &mut SyntaxTree) -> Result<NodeId, RefactorError> {
    let (directive, first) = script_parts(tree)?;
    if let Some(raw_value) = directive {
        let expression = tree.push(Node::LiteralStringExpression { value: raw_value });
        return Ok(tree.push(Node::ExpressionStatement { expression }));
    }
    first.ok_or(RefactorError::EmptyProgram)
}

/// Expression of the first statement of the script at `tree.root`.
///
/// A leading directive is rebuilt as a string literal. Otherwise the first
/// statement must be an `ExpressionStatement`.
pub fn extract_expression(tree: &mut SyntaxTree) -> Result<NodeId, RefactorError> {
    let (directive, first) = script_parts(tree)?;
    if let Some(raw_value) = directive {
        return Ok(tree.push(Node::LiteralStringExpression { value: raw_value }));
    }
    let first = first.ok_or(RefactorError::EmptyProgram)?;
    match &tree[first] {
        Node::ExpressionStatement { expression } => Ok(*expression),
        other => Err(RefactorError::Unsupported(format!(
            "Can't replace an expression with a node of type {}",
            other.type_name()
        ))),
    }
}

/// Raw value of the first directive, and the first statement.
fn script_parts(tree: &SyntaxTree) -> Result<(Option<String>, Option<NodeId>), RefactorError> {
    let root = tree
        .get(tree.root)
        .ok_or_else(|| RefactorError::precondition("tree has no root node"))?;
    let Node::Script { directives, statements } = root else {
        return Err(RefactorError::Unsupported(format!(
            "expected a Script, found {}",
            root.type_name()
        )));
    };
    let directive = match directives.first().and_then(|&d| tree.get(d)) {
        Some(Node::Directive { raw_value }) => Some(raw_value.clone()),
        Some(other) => {
            return Err(RefactorError::precondition(format!(
                "directive slot holds a {}",
                other.type_name()
            )))
        }
        None => None,
    };
    Ok((directive, statements.first().copied()))
}
