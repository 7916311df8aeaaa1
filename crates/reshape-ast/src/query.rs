//! Resolve "selector or node" inputs to node sets.
//!
//! Selector strings are handed to an external query engine through
//! [`SelectorResolver`]; node ids pass straight through.

use crate::ast::{NodeId, SyntaxTree};

/// External selector engine.
pub trait SelectorResolver {
    /// Nodes in `tree` matched by `selector`, in document order.
    fn query(&self, tree: &SyntaxTree, selector: &str) -> Vec<NodeId>;
}

/// What a refactoring operation can be pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOrNode {
    Selector(String),
    Selectors(Vec<String>),
    Nodes(Vec<NodeId>),
    Node(NodeId),
}

impl From<&str> for SelectorOrNode {
    fn from(selector: &str) -> Self {
        Self::Selector(selector.to_string())
    }
}

impl From<String> for SelectorOrNode {
    fn from(selector: String) -> Self {
        Self::Selector(selector)
    }
}

impl From<Vec<String>> for SelectorOrNode {
    fn from(selectors: Vec<String>) -> Self {
        Self::Selectors(selectors)
    }
}

impl From<NodeId> for SelectorOrNode {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<Vec<NodeId>> for SelectorOrNode {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self::Nodes(nodes)
    }
}

/// Resolve `input` against `tree`. Results of several selectors are
/// concatenated in selector order, without de-duplication.
pub fn find_nodes(
    tree: &SyntaxTree,
    resolver: &impl SelectorResolver,
    input: impl Into<SelectorOrNode>,
) -> Vec<NodeId> {
    match input.into() {
        SelectorOrNode::Selector(selector) => resolver.query(tree, &selector),
        SelectorOrNode::Selectors(selectors) => selectors
            .iter()
            .flat_map(|s| resolver.query(tree, s))
            .collect(),
        SelectorOrNode::Nodes(nodes) => nodes,
        SelectorOrNode::Node(node) => vec![node],
    }
}
