//! Node shape predicates.
//!
//! Pure dispatch on the node kind; nothing here mutates or caches.

use crate::ast::{Node, NodeId, SyntaxTree, UnaryOperator};
use crate::error::RefactorError;

impl Node {
    /// Statements and declarations (every kind whose name ends in
    /// `Statement` or `Declaration`).
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            Node::FunctionDeclaration { .. }
                | Node::VariableDeclaration { .. }
                | Node::VariableDeclarationStatement { .. }
                | Node::ExpressionStatement { .. }
                | Node::ReturnStatement { .. }
                | Node::IfStatement { .. }
                | Node::BlockStatement { .. }
                | Node::WhileStatement { .. }
                | Node::EmptyStatement
        )
    }

    pub fn is_member_expression(&self) -> bool {
        matches!(
            self,
            Node::StaticMemberExpression { .. } | Node::ComputedMemberExpression { .. }
        )
    }

    pub fn is_member_assignment(&self) -> bool {
        matches!(
            self,
            Node::StaticMemberAssignmentTarget { .. } | Node::ComputedMemberAssignmentTarget { .. }
        )
    }

    /// Nodes that own a `statements` list.
    pub fn has_statements(&self) -> bool {
        self.statements().is_some()
    }

    pub fn statements(&self) -> Option<&[NodeId]> {
        match self {
            Node::Script { statements, .. }
            | Node::FunctionBody { statements, .. }
            | Node::Block { statements } => Some(statements),
            _ => None,
        }
    }

    /// The `body` child of functions and loops.
    pub fn body(&self) -> Option<NodeId> {
        match self {
            Node::FunctionExpression { body, .. }
            | Node::ArrowExpression { body, .. }
            | Node::FunctionDeclaration { body, .. }
            | Node::WhileStatement { body, .. } => Some(*body),
            _ => None,
        }
    }

    /// Object of a member expression or member assignment target.
    pub fn member_object(&self) -> Option<NodeId> {
        match self {
            Node::StaticMemberExpression { object, .. }
            | Node::ComputedMemberExpression { object, .. }
            | Node::StaticMemberAssignmentTarget { object, .. }
            | Node::ComputedMemberAssignmentTarget { object, .. } => Some(*object),
            _ => None,
        }
    }
}

/// Literal-like nodes: the literal kinds, plus `-<number>`. An id outside
/// the tree is not a literal.
pub fn is_literal(tree: &SyntaxTree, id: NodeId) -> bool {
    match tree.get(id) {
        Some(
            Node::LiteralStringExpression { .. }
            | Node::LiteralNumericExpression { .. }
            | Node::LiteralBooleanExpression { .. }
            | Node::LiteralNullExpression
            | Node::LiteralInfinityExpression
            | Node::LiteralRegExpExpression { .. },
        ) => true,
        Some(Node::UnaryExpression {
            operator: UnaryOperator::Minus,
            operand,
        }) => matches!(tree.get(*operand), Some(Node::LiteralNumericExpression { .. })),
        _ => false,
    }
}

/// The node's `body` if it has one, otherwise the node itself. `None` when
/// `id` is not in the tree.
pub fn inner_body(tree: &SyntaxTree, id: NodeId) -> Option<NodeId> {
    tree.get(id).map(|node| node.body().unwrap_or(id))
}

/// Follow `object` links from a member chain down to its base identifier.
///
/// `a.b[c].d` resolves to the `a` node. An identifier resolves to itself. A
/// chain rooted in anything else (`this.x`, `f().x`) is an error, as is a
/// chain longer than the tree (a cycle in an unchecked tree).
pub fn root_identifier(tree: &SyntaxTree, id: NodeId) -> Result<NodeId, RefactorError> {
    let mut current = id;
    for _ in 0..=tree.len() {
        let node = tree.get(current).ok_or_else(|| {
            RefactorError::precondition(format!("node {current} is not in the tree"))
        })?;
        current = match node {
            Node::IdentifierExpression { .. } => return Ok(current),
            Node::StaticMemberExpression { object, .. }
            | Node::ComputedMemberExpression { object, .. } => *object,
            // Only the outermost node may be an assignment target.
            Node::StaticMemberAssignmentTarget { object, .. }
            | Node::ComputedMemberAssignmentTarget { object, .. }
                if current == id =>
            {
                *object
            }
            other => {
                return Err(RefactorError::UnsupportedShape(format!(
                    "Can not get the identifier associated with the passed expression: \
                     reached {}",
                    other.type_name()
                )));
            }
        };
    }
    Err(RefactorError::precondition(format!(
        "member chain starting at {id} does not terminate"
    )))
}
