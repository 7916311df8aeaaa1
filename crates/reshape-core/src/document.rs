//! On-disk input: a syntax tree and its scope tree in one JSON file.

use crate::config::Config;
use crate::error::Error;
use reshape_ast::{rename_with_options, Counter, ParentIndex, RenameReport, ScopeTree, SyntaxTree};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// A parsed program together with the scope analysis for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub tree: SyntaxTree,
    pub scopes: ScopeTree,
}

impl Document {
    /// Read and validate a document.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: Self = serde_json::from_str(&text).map_err(|source| Error::InputParse {
            path: path.to_path_buf(),
            source,
        })?;
        doc.tree.check().map_err(|source| Error::InputShape {
            path: path.to_path_buf(),
            source,
        })?;
        doc.scopes.check()?;
        Ok(doc)
    }

    /// Rename every variable in place using the config's options and counter
    /// start.
    pub fn rename(&mut self, config: &Config) -> Result<RenameReport, Error> {
        let parents = ParentIndex::build(&self.tree);
        let mut ids = Counter::starting_at(config.first_id);
        let report = rename_with_options(
            &self.scopes,
            self.scopes.root,
            &mut self.tree,
            &parents,
            &mut ids,
            &config.rename,
        )?;
        info!(renamed = report.renamed, unresolved = report.unresolved, "renamed document");
        Ok(report)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reshape_ast::{DeclarationKind, Node, ScopeKind};

    fn sample() -> Document {
        // (function (a) { return a; })
        let mut tree = SyntaxTree::new();
        let a = tree.push(Node::BindingIdentifier { name: "a".into() });
        let params = tree.push(Node::FormalParameters { items: vec![a], rest: None });
        let a_ref = tree.push(Node::IdentifierExpression { name: "a".into() });
        let ret = tree.push(Node::ReturnStatement { expression: Some(a_ref) });
        let body = tree.push(Node::FunctionBody { directives: vec![], statements: vec![ret] });
        let func = tree.push(Node::FunctionExpression {
            is_async: false,
            is_generator: false,
            name: None,
            params,
            body,
        });
        let stmt = tree.push(Node::ExpressionStatement { expression: func });
        tree.push_root(Node::Script { directives: vec![], statements: vec![stmt] });

        let mut scopes = ScopeTree::new(ScopeKind::Global);
        let root = scopes.root;
        let f = scopes.add_scope(root, ScopeKind::Function);
        scopes.declare(f, "a", a, DeclarationKind::Parameter);
        scopes.reference(f, "a", a_ref, reshape_ast::Access::Read);
        Document { tree, scopes }
    }

    #[test]
    fn test_round_trip_through_file_and_rename() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, sample().to_json().unwrap()).unwrap();

        let mut doc = Document::load(&path).unwrap();
        assert_eq!(doc, sample());

        let report = doc.rename(&Config::default().with_first_id(40)).unwrap();
        assert_eq!(report.renamed, 1);
        assert_eq!(doc.tree[reshape_ast::NodeId::new(0)].name(), Some("$arg0_40"));
        assert_eq!(doc.tree[reshape_ast::NodeId::new(2)].name(), Some("$arg0_40"));
    }

    #[test]
    fn test_load_rejects_shared_nodes() {
        let mut doc = sample();
        // Point the return statement at the parameter binding too.
        doc.tree.nodes[3] = Node::ReturnStatement { expression: Some(reshape_ast::NodeId::new(0)) };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, doc.to_json().unwrap()).unwrap();

        assert!(matches!(Document::load(&path), Err(Error::InputShape { .. })));
    }

    #[test]
    fn test_load_rejects_cyclic_scope_tree() {
        let mut doc = sample();
        // Function scope lists the global scope as its child.
        doc.scopes.scopes[1].children.push(doc.scopes.root);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, doc.to_json().unwrap()).unwrap();

        assert!(matches!(
            Document::load(&path),
            Err(Error::Refactor(reshape_ast::RefactorError::Precondition(_)))
        ));
    }

    #[test]
    fn test_load_rejects_detached_nodes() {
        let mut doc = sample();
        let stray = doc.tree.push(Node::StaticMemberExpression {
            object: reshape_ast::NodeId::new(8),
            property: "x".into(),
        });
        assert_eq!(stray.index(), 8);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, doc.to_json().unwrap()).unwrap();

        assert!(matches!(
            Document::load(&path),
            Err(Error::InputShape { source: reshape_ast::TreeShapeError::DetachedNode(_), .. })
        ));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"tree": {"nodes": [{"type": "Nope"}], "root": 0}}"#).unwrap();
        assert!(matches!(Document::load(&path), Err(Error::InputParse { .. })));
    }
}
