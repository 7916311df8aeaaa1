//! Arena syntax tree.
//!
//! Every node lives in `SyntaxTree::nodes` and is addressed by a [`NodeId`].
//! Children are stored as ids, never as boxes, so the tree can be mutated in
//! place (names rewritten) while parent links and scope records keep pointing
//! at the same nodes.
//!
//! The serialized form uses the `type` discriminant and camelCase field names
//! of the Shift AST, which is what external parsers and scope analyzers hand us.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Index of a node in a [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A parsed program: node arena plus the id of its root.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub nodes: Vec<Node>,
    pub root: NodeId,
}

impl SyntaxTree {
    /// Create an empty tree. The root must be set once it has been pushed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node and return its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append a node and make it the root.
    pub fn push_root(&mut self, node: Node) -> NodeId {
        let id = self.push(node);
        self.root = id;
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Verify the arena forms a proper tree below `root`: every child id is in
    /// range, no node is reachable through two parents and every node in the
    /// arena is reachable from `root`.
    ///
    /// Trees produced by a parser satisfy this by construction. Trees read from
    /// disk should be checked once before any pass runs over them.
    pub fn check(&self) -> Result<(), TreeShapeError> {
        if self.root.index() >= self.nodes.len() {
            return Err(TreeShapeError::MissingNode(self.root));
        }
        let mut seen = vec![false; self.nodes.len()];
        seen[self.root.index()] = true;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            for child in self[id].children() {
                match seen.get_mut(child.index()) {
                    None => return Err(TreeShapeError::MissingNode(child)),
                    Some(true) => return Err(TreeShapeError::SharedNode(child)),
                    Some(slot) => *slot = true,
                }
                stack.push(child);
            }
        }
        match seen.iter().position(|reached| !reached) {
            Some(index) => Err(TreeShapeError::DetachedNode(NodeId::new(index as u32))),
            None => Ok(()),
        }
    }

    /// Convert the subtree at `id` into a plain JSON mapping with children
    /// expanded in place. This is the form the structural matcher compares.
    pub fn to_value(&self, id: NodeId) -> Value {
        let node = &self[id];
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from(node.type_name()));
        for (name, field) in node.fields() {
            let value = match field {
                Field::Node(child) => self.to_value(child),
                Field::OptNode(child) => child.map_or(Value::Null, |c| self.to_value(c)),
                Field::Nodes(children) => {
                    Value::Array(children.iter().map(|&c| self.to_value(c)).collect())
                }
                Field::OptNodes(children) => Value::Array(
                    children
                        .iter()
                        .map(|c| c.map_or(Value::Null, |c| self.to_value(c)))
                        .collect(),
                ),
                Field::Str(s) => Value::from(s),
                Field::Num(n) => Value::from(n),
                Field::Bool(b) => Value::Bool(b),
            };
            map.insert(name.to_string(), value);
        }
        Value::Object(map)
    }
}

impl Index<NodeId> for SyntaxTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for SyntaxTree {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }
}

/// Structural defects found by [`SyntaxTree::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeShapeError {
    #[error("node {0} is referenced but not present in the arena")]
    MissingNode(NodeId),
    #[error("node {0} is reachable from more than one parent")]
    SharedNode(NodeId),
    #[error("node {0} is not reachable from the root")]
    DetachedNode(NodeId),
}

// =============================================================================
// Nodes
// =============================================================================

/// A syntax node. Closed set of the kinds the refactoring primitives care about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Node {
    // === Programs ===
    Script {
        directives: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    Module {
        directives: Vec<NodeId>,
        items: Vec<NodeId>,
    },
    Directive {
        raw_value: String,
    },
    FunctionBody {
        directives: Vec<NodeId>,
        statements: Vec<NodeId>,
    },
    Block {
        statements: Vec<NodeId>,
    },
    FormalParameters {
        items: Vec<NodeId>,
        rest: Option<NodeId>,
    },

    // === Names ===
    BindingIdentifier {
        name: String,
    },
    AssignmentTargetIdentifier {
        name: String,
    },
    IdentifierExpression {
        name: String,
    },

    // === Member access ===
    StaticMemberExpression {
        object: NodeId,
        property: String,
    },
    ComputedMemberExpression {
        object: NodeId,
        expression: NodeId,
    },
    StaticMemberAssignmentTarget {
        object: NodeId,
        property: String,
    },
    ComputedMemberAssignmentTarget {
        object: NodeId,
        expression: NodeId,
    },

    // === Literals ===
    LiteralStringExpression {
        value: String,
    },
    LiteralNumericExpression {
        value: f64,
    },
    LiteralBooleanExpression {
        value: bool,
    },
    LiteralNullExpression,
    LiteralInfinityExpression,
    LiteralRegExpExpression {
        pattern: String,
        flags: String,
    },

    // === Expressions ===
    ThisExpression,
    UnaryExpression {
        operator: UnaryOperator,
        operand: NodeId,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: NodeId,
        right: NodeId,
    },
    AssignmentExpression {
        binding: NodeId,
        expression: NodeId,
    },
    CallExpression {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    ArrayExpression {
        elements: Vec<Option<NodeId>>,
    },
    ConditionalExpression {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    FunctionExpression {
        is_async: bool,
        is_generator: bool,
        name: Option<NodeId>,
        params: NodeId,
        body: NodeId,
    },
    ArrowExpression {
        is_async: bool,
        params: NodeId,
        body: NodeId,
    },

    // === Declarations ===
    FunctionDeclaration {
        is_async: bool,
        is_generator: bool,
        name: NodeId,
        params: NodeId,
        body: NodeId,
    },
    VariableDeclaration {
        kind: VariableDeclarationKind,
        declarators: Vec<NodeId>,
    },
    VariableDeclarator {
        binding: NodeId,
        init: Option<NodeId>,
    },

    // === Statements ===
    VariableDeclarationStatement {
        declaration: NodeId,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    ReturnStatement {
        expression: Option<NodeId>,
    },
    IfStatement {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    BlockStatement {
        block: NodeId,
    },
    WhileStatement {
        test: NodeId,
        body: NodeId,
    },
    EmptyStatement,
}

/// A named field of a node, as seen by generic traversals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Node(NodeId),
    OptNode(Option<NodeId>),
    Nodes(&'a [NodeId]),
    OptNodes(&'a [Option<NodeId>]),
    Str(&'a str),
    Num(f64),
    Bool(bool),
}

impl Node {
    /// The discriminant name, as written in the `type` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Script { .. } => "Script",
            Node::Module { .. } => "Module",
            Node::Directive { .. } => "Directive",
            Node::FunctionBody { .. } => "FunctionBody",
            Node::Block { .. } => "Block",
            Node::FormalParameters { .. } => "FormalParameters",
            Node::BindingIdentifier { .. } => "BindingIdentifier",
            Node::AssignmentTargetIdentifier { .. } => "AssignmentTargetIdentifier",
            Node::IdentifierExpression { .. } => "IdentifierExpression",
            Node::StaticMemberExpression { .. } => "StaticMemberExpression",
            Node::ComputedMemberExpression { .. } => "ComputedMemberExpression",
            Node::StaticMemberAssignmentTarget { .. } => "StaticMemberAssignmentTarget",
            Node::ComputedMemberAssignmentTarget { .. } => "ComputedMemberAssignmentTarget",
            Node::LiteralStringExpression { .. } => "LiteralStringExpression",
            Node::LiteralNumericExpression { .. } => "LiteralNumericExpression",
            Node::LiteralBooleanExpression { .. } => "LiteralBooleanExpression",
            Node::LiteralNullExpression => "LiteralNullExpression",
            Node::LiteralInfinityExpression => "LiteralInfinityExpression",
            Node::LiteralRegExpExpression { .. } => "LiteralRegExpExpression",
            Node::ThisExpression => "ThisExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::AssignmentExpression { .. } => "AssignmentExpression",
            Node::CallExpression { .. } => "CallExpression",
            Node::ArrayExpression { .. } => "ArrayExpression",
            Node::ConditionalExpression { .. } => "ConditionalExpression",
            Node::FunctionExpression { .. } => "FunctionExpression",
            Node::ArrowExpression { .. } => "ArrowExpression",
            Node::FunctionDeclaration { .. } => "FunctionDeclaration",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::VariableDeclarator { .. } => "VariableDeclarator",
            Node::VariableDeclarationStatement { .. } => "VariableDeclarationStatement",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::IfStatement { .. } => "IfStatement",
            Node::BlockStatement { .. } => "BlockStatement",
            Node::WhileStatement { .. } => "WhileStatement",
            Node::EmptyStatement => "EmptyStatement",
        }
    }

    /// Named fields in declaration order, excluding the discriminant.
    pub fn fields(&self) -> Vec<(&'static str, Field<'_>)> {
        use Field as F;
        match self {
            Node::Script { directives, statements }
            | Node::FunctionBody { directives, statements } => {
                vec![("directives", F::Nodes(directives)), ("statements", F::Nodes(statements))]
            }
            Node::Module { directives, items } => {
                vec![("directives", F::Nodes(directives)), ("items", F::Nodes(items))]
            }
            Node::Directive { raw_value } => vec![("rawValue", F::Str(raw_value))],
            Node::Block { statements } => vec![("statements", F::Nodes(statements))],
            Node::FormalParameters { items, rest } => {
                vec![("items", F::Nodes(items)), ("rest", F::OptNode(*rest))]
            }
            Node::BindingIdentifier { name }
            | Node::AssignmentTargetIdentifier { name }
            | Node::IdentifierExpression { name } => vec![("name", F::Str(name))],
            Node::StaticMemberExpression { object, property }
            | Node::StaticMemberAssignmentTarget { object, property } => {
                vec![("object", F::Node(*object)), ("property", F::Str(property))]
            }
            Node::ComputedMemberExpression { object, expression }
            | Node::ComputedMemberAssignmentTarget { object, expression } => {
                vec![("object", F::Node(*object)), ("expression", F::Node(*expression))]
            }
            Node::LiteralStringExpression { value } => vec![("value", F::Str(value))],
            Node::LiteralNumericExpression { value } => vec![("value", F::Num(*value))],
            Node::LiteralBooleanExpression { value } => vec![("value", F::Bool(*value))],
            Node::LiteralRegExpExpression { pattern, flags } => {
                vec![("pattern", F::Str(pattern)), ("flags", F::Str(flags))]
            }
            Node::LiteralNullExpression
            | Node::LiteralInfinityExpression
            | Node::ThisExpression
            | Node::EmptyStatement => Vec::new(),
            Node::UnaryExpression { operator, operand } => {
                vec![("operator", F::Str(operator.as_str())), ("operand", F::Node(*operand))]
            }
            Node::BinaryExpression { operator, left, right } => vec![
                ("left", F::Node(*left)),
                ("operator", F::Str(operator.as_str())),
                ("right", F::Node(*right)),
            ],
            Node::AssignmentExpression { binding, expression } => {
                vec![("binding", F::Node(*binding)), ("expression", F::Node(*expression))]
            }
            Node::CallExpression { callee, arguments } => {
                vec![("callee", F::Node(*callee)), ("arguments", F::Nodes(arguments))]
            }
            Node::ArrayExpression { elements } => vec![("elements", F::OptNodes(elements))],
            Node::ConditionalExpression { test, consequent, alternate } => vec![
                ("test", F::Node(*test)),
                ("consequent", F::Node(*consequent)),
                ("alternate", F::Node(*alternate)),
            ],
            Node::FunctionExpression { is_async, is_generator, name, params, body } => vec![
                ("isAsync", F::Bool(*is_async)),
                ("isGenerator", F::Bool(*is_generator)),
                ("name", F::OptNode(*name)),
                ("params", F::Node(*params)),
                ("body", F::Node(*body)),
            ],
            Node::ArrowExpression { is_async, params, body } => vec![
                ("isAsync", F::Bool(*is_async)),
                ("params", F::Node(*params)),
                ("body", F::Node(*body)),
            ],
            Node::FunctionDeclaration { is_async, is_generator, name, params, body } => vec![
                ("isAsync", F::Bool(*is_async)),
                ("isGenerator", F::Bool(*is_generator)),
                ("name", F::Node(*name)),
                ("params", F::Node(*params)),
                ("body", F::Node(*body)),
            ],
            Node::VariableDeclaration { kind, declarators } => {
                vec![("kind", F::Str(kind.as_str())), ("declarators", F::Nodes(declarators))]
            }
            Node::VariableDeclarator { binding, init } => {
                vec![("binding", F::Node(*binding)), ("init", F::OptNode(*init))]
            }
            Node::VariableDeclarationStatement { declaration } => {
                vec![("declaration", F::Node(*declaration))]
            }
            Node::ExpressionStatement { expression } => vec![("expression", F::Node(*expression))],
            Node::ReturnStatement { expression } => vec![("expression", F::OptNode(*expression))],
            Node::IfStatement { test, consequent, alternate } => vec![
                ("test", F::Node(*test)),
                ("consequent", F::Node(*consequent)),
                ("alternate", F::OptNode(*alternate)),
            ],
            Node::BlockStatement { block } => vec![("block", F::Node(*block))],
            Node::WhileStatement { test, body } => {
                vec![("test", F::Node(*test)), ("body", F::Node(*body))]
            }
        }
    }

    /// Child node ids in field order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for (_, field) in self.fields() {
            match field {
                Field::Node(id) => out.push(id),
                Field::OptNode(id) => out.extend(id),
                Field::Nodes(ids) => out.extend_from_slice(ids),
                Field::OptNodes(ids) => out.extend(ids.iter().flatten()),
                Field::Str(_) | Field::Num(_) | Field::Bool(_) => {}
            }
        }
        out
    }

    /// The identifier name carried by binding and reference nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::BindingIdentifier { name }
            | Node::AssignmentTargetIdentifier { name }
            | Node::IdentifierExpression { name } => Some(name),
            _ => None,
        }
    }

    pub fn name_mut(&mut self) -> Option<&mut String> {
        match self {
            Node::BindingIdentifier { name }
            | Node::AssignmentTargetIdentifier { name }
            | Node::IdentifierExpression { name } => Some(name),
            _ => None,
        }
    }
}

// =============================================================================
// Operators
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableDeclarationKind {
    #[serde(rename = "var")]
    Var,
    #[serde(rename = "let")]
    Let,
    #[serde(rename = "const")]
    Const,
}

impl VariableDeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    Not,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Typeof => "typeof",
            Self::Void => "void",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "===")]
    StrictEq,
    #[serde(rename = "!==")]
    StrictNotEq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "instanceof")]
    Instanceof,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "**")]
    Exp,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "??")]
    NullishCoalescing,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::In => "in",
            Self::Instanceof => "instanceof",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::Or => "||",
            Self::And => "&&",
            Self::NullishCoalescing => "??",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn member_chain() -> SyntaxTree {
        // a.b
        let mut tree = SyntaxTree::new();
        let a = tree.push(Node::IdentifierExpression { name: "a".into() });
        let ab = tree.push(Node::StaticMemberExpression { object: a, property: "b".into() });
        let stmt = tree.push(Node::ExpressionStatement { expression: ab });
        tree.push_root(Node::Script { directives: vec![], statements: vec![stmt] });
        tree
    }

    #[test]
    fn test_to_value_expands_children() {
        let tree = member_chain();
        let value = tree.to_value(tree.root);
        assert_eq!(
            value,
            json!({
                "type": "Script",
                "directives": [],
                "statements": [{
                    "type": "ExpressionStatement",
                    "expression": {
                        "type": "StaticMemberExpression",
                        "object": { "type": "IdentifierExpression", "name": "a" },
                        "property": "b"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_serde_uses_type_tag_and_camel_case() {
        let node = Node::FormalParameters { items: vec![NodeId::new(1)], rest: None };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value, json!({ "type": "FormalParameters", "items": [1], "rest": null }));

        let parsed: Node =
            serde_json::from_value(json!({ "type": "Directive", "rawValue": "use strict" })).unwrap();
        assert_eq!(parsed, Node::Directive { raw_value: "use strict".into() });
    }

    #[test]
    fn test_type_name_matches_serde_tag() {
        let nodes = [
            Node::LiteralNullExpression,
            Node::UnaryExpression { operator: UnaryOperator::Minus, operand: NodeId::new(0) },
            Node::VariableDeclaration { kind: VariableDeclarationKind::Let, declarators: vec![] },
            Node::EmptyStatement,
        ];
        for node in nodes {
            let value = serde_json::to_value(&node).unwrap();
            assert_eq!(value["type"], node.type_name());
        }
    }

    #[test]
    fn test_children_in_field_order() {
        let node = Node::IfStatement {
            test: NodeId::new(3),
            consequent: NodeId::new(1),
            alternate: Some(NodeId::new(2)),
        };
        assert_eq!(node.children(), vec![NodeId::new(3), NodeId::new(1), NodeId::new(2)]);

        let array = Node::ArrayExpression { elements: vec![Some(NodeId::new(5)), None, Some(NodeId::new(6))] };
        assert_eq!(array.children(), vec![NodeId::new(5), NodeId::new(6)]);
    }

    #[test]
    fn test_check_accepts_tree() {
        assert_eq!(member_chain().check(), Ok(()));
    }

    #[test]
    fn test_check_rejects_shared_and_missing_nodes() {
        let mut tree = SyntaxTree::new();
        let a = tree.push(Node::IdentifierExpression { name: "a".into() });
        tree.push_root(Node::BinaryExpression { operator: BinaryOperator::Add, left: a, right: a });
        assert_eq!(tree.check(), Err(TreeShapeError::SharedNode(a)));

        let mut tree = SyntaxTree::new();
        tree.push_root(Node::ExpressionStatement { expression: NodeId::new(9) });
        assert_eq!(tree.check(), Err(TreeShapeError::MissingNode(NodeId::new(9))));
    }

    #[test]
    fn test_check_rejects_detached_nodes() {
        // A self-referencing member expression outside the root's subtree.
        let mut tree = SyntaxTree::new();
        let member = tree.push(Node::StaticMemberExpression { object: NodeId::new(0), property: "x".into() });
        tree.push_root(Node::EmptyStatement);
        assert_eq!(tree.check(), Err(TreeShapeError::DetachedNode(member)));
    }

    #[test]
    fn test_name_mut_only_on_identifiers() {
        let mut ident = Node::BindingIdentifier { name: "x".into() };
        *ident.name_mut().unwrap() = "y".into();
        assert_eq!(ident.name(), Some("y"));
        assert!(Node::ThisExpression.name().is_none());
    }
}
