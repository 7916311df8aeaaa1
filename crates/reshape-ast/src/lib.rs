//! reshape-ast: tree primitives for source-to-source refactoring.
//!
//! Parsing, selector queries and printing happen elsewhere. This crate works on
//! an already-parsed program and its scope tree.
//!
//! # Pieces
//!
//! 1. **Arena syntax tree** ([`SyntaxTree`], [`Node`])
//!    - Nodes addressed by [`NodeId`], children stored as ids
//!    - Serialized with Shift-style `type` tags
//!
//! 2. **Parent index** ([`ParentIndex`])
//!    - `parent[i] = j`, built by one walk
//!
//! 3. **Scope renaming** ([`rename_all`], [`rename_scope`])
//!    - Fresh `$$<id>` names, `$arg<pos>_<id>` for parameters
//!    - Global/script scopes exempt, unresolved names untouched
//!
//! 4. **Partial matching** ([`matches`])
//!    - Only fields present in the pattern are checked
//!
//! # Example
//!
//! ```ignore
//! use reshape_ast::{rename_all, Counter};
//!
//! let mut ids = Counter::new();
//! let report = rename_all(&scopes, &mut tree, &mut ids)?;
//! ```

mod ast;
mod classify;
mod error;
mod extract;
mod ids;
mod matcher;
mod parent;
mod query;
mod rename;
mod scope;

pub use ast::*;
pub use classify::{inner_body, is_literal, root_identifier};
pub use error::RefactorError;
pub use extract::{extract_expression, extract_statement};
pub use ids::{Counter, IdentifierSource};
pub use matcher::{matches, matches_node};
pub use parent::ParentIndex;
pub use query::{find_nodes, SelectorOrNode, SelectorResolver};
pub use rename::{rename_all, rename_scope, rename_with_options, RenameOptions, RenameReport};
pub use scope::{
    Access, Declaration, DeclarationKind, Reference, Scope, ScopeId, ScopeKind, ScopeTree, Variable,
};

/// Log a value at debug level and hand it back. Handy inside iterator chains.
pub fn inspect<T: std::fmt::Debug>(value: T) -> T {
    tracing::debug!(?value, "inspect");
    value
}
