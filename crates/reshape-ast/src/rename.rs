//! Deterministic scope-aware renaming.
//!
//! Every variable declared in a non-exempt scope gets a fresh name built from
//! an [`IdentifierSource`]:
//! - ordinary bindings become `$$<id>`
//! - parameter bindings become `$arg<position>_<id>`, where `position` is the
//!   0-based index of the binding in its `FormalParameters`
//!
//! Ids are unique for the whole pass, so no cross-scope collision check is
//! needed. Variables without declarations are unresolved globals and are left
//! alone, references included. Exempt scopes (by default the global and script
//! scopes) are not renamed but their children still are.
//!
//! Names are rewritten in place on the syntax tree. A malformed tree/scope
//! pairing stops the pass with an error; bindings renamed before that point
//! keep their new names.

use crate::ast::{Node, NodeId, SyntaxTree};
use crate::error::RefactorError;
use crate::ids::IdentifierSource;
use crate::parent::ParentIndex;
use crate::scope::{ScopeId, ScopeKind, ScopeTree, Variable};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Options for scope renaming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameOptions {
    /// Scope kinds whose own variables keep their names.
    pub exempt: Vec<ScopeKind>,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            exempt: vec![ScopeKind::Global, ScopeKind::Script],
        }
    }
}

impl RenameOptions {
    pub fn is_exempt(&self, kind: ScopeKind) -> bool {
        self.exempt.contains(&kind)
    }
}

/// Counts gathered during a renaming pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RenameReport {
    /// Variables that received a fresh name.
    pub renamed: usize,
    /// Variables left untouched because nothing declares them.
    pub unresolved: usize,
    /// Scopes whose own variables were exempt.
    pub exempt_scopes: usize,
}

/// Rename every variable reachable from the scope tree's root.
pub fn rename_all(
    scopes: &ScopeTree,
    tree: &mut SyntaxTree,
    ids: &mut impl IdentifierSource,
) -> Result<RenameReport, RefactorError> {
    let parents = ParentIndex::build(tree);
    rename_scope(scopes, scopes.root, tree, &parents, ids)
}

/// Rename `scope` and everything below it with the default options.
pub fn rename_scope(
    scopes: &ScopeTree,
    scope: ScopeId,
    tree: &mut SyntaxTree,
    parents: &ParentIndex,
    ids: &mut impl IdentifierSource,
) -> Result<RenameReport, RefactorError> {
    rename_with_options(scopes, scope, tree, parents, ids, &RenameOptions::default())
}

/// Rename `scope` and everything below it.
pub fn rename_with_options(
    scopes: &ScopeTree,
    scope: ScopeId,
    tree: &mut SyntaxTree,
    parents: &ParentIndex,
    ids: &mut impl IdentifierSource,
    options: &RenameOptions,
) -> Result<RenameReport, RefactorError> {
    let mut report = RenameReport::default();
    let mut stack = vec![scope];

    while let Some(id) = stack.pop() {
        let current = scopes
            .get(id)
            .ok_or_else(|| RefactorError::precondition(format!("scope {} does not exist", id.index())))?;

        if options.is_exempt(current.kind) {
            report.exempt_scopes += 1;
        } else {
            for variable in &current.variables {
                if variable.declarations.is_empty() {
                    trace!(name = %variable.name, "skipping unresolved variable");
                    report.unresolved += 1;
                    continue;
                }
                let next = ids.next_id();
                let new_name = fresh_name(variable, next, tree, parents)?;
                debug!(from = %variable.name, to = %new_name, scope = id.index(), "renaming variable");
                apply_name(variable, &new_name, tree)?;
                report.renamed += 1;
            }
        }

        // Pre-order, children left to right.
        stack.extend(current.children.iter().rev().copied());
    }

    debug!(
        renamed = report.renamed,
        unresolved = report.unresolved,
        exempt_scopes = report.exempt_scopes,
        "scope renaming finished"
    );
    Ok(report)
}

fn fresh_name(
    variable: &Variable,
    id: u64,
    tree: &SyntaxTree,
    parents: &ParentIndex,
) -> Result<String, RefactorError> {
    match variable.parameter_declaration() {
        Some(param) => {
            let position = parameter_position(param.node, tree, parents)?;
            Ok(format!("$arg{position}_{id}"))
        }
        None => Ok(format!("$${id}")),
    }
}

/// 0-based position of a parameter binding in its enclosing parameter list.
/// A rest binding is not one of the list's items and is rejected.
fn parameter_position(
    binding: NodeId,
    tree: &SyntaxTree,
    parents: &ParentIndex,
) -> Result<usize, RefactorError> {
    let parent = parents.get(binding).ok_or_else(|| {
        RefactorError::precondition(format!("parameter binding {binding} has no parent"))
    })?;
    match tree.get(parent) {
        Some(Node::FormalParameters { items, rest }) => {
            items.iter().position(|&item| item == binding).ok_or_else(|| {
                let role = if *rest == Some(binding) { "the rest binding" } else { "not listed" };
                RefactorError::precondition(format!(
                    "parameter binding {binding} is {role} in its parameters {parent}"
                ))
            })
        }
        Some(other) => Err(RefactorError::precondition(format!(
            "parameter binding {binding} has parent {parent} of type {}, expected FormalParameters",
            other.type_name()
        ))),
        None => Err(RefactorError::precondition(format!(
            "parent {parent} of parameter binding {binding} is missing"
        ))),
    }
}

fn apply_name(variable: &Variable, new_name: &str, tree: &mut SyntaxTree) -> Result<(), RefactorError> {
    let sites = variable
        .declarations
        .iter()
        .map(|d| d.node)
        .chain(variable.references.iter().map(|r| r.node));
    for node in sites {
        let slot = tree.get_mut(node).and_then(Node::name_mut).ok_or_else(|| {
            RefactorError::precondition(format!(
                "site {node} of variable `{}` is not an identifier node",
                variable.name
            ))
        })?;
        new_name.clone_into(slot);
    }
    Ok(())
}
