//! Lexical scope tree.
//!
//! Produced by an external scope analyzer; mirrors the nesting of binding
//! constructs in the syntax tree. Declarations and references point at the
//! name-carrying nodes of the [`SyntaxTree`](crate::SyntaxTree) by id, so a
//! rename written through either side is visible to both.

use crate::ast::NodeId;
use serde::{Deserialize, Serialize};

/// Index of a scope in a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    Global,
    Script,
    Module,
    Function,
    FunctionName,
    ArrowFunction,
    Parameters,
    ParameterExpression,
    Block,
    Catch,
    With,
    ClassName,
    Eval,
}

/// How a binding was introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
    FunctionDeclaration,
    FunctionExpressionName,
    ClassDeclaration,
    ClassName,
    Parameter,
    CatchParameter,
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Access {
    #[default]
    Read,
    Write,
    ReadWrite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub node: NodeId,
    pub kind: DeclarationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub node: NodeId,
    #[serde(default)]
    pub access: Access,
}

/// A named binding local to a scope.
///
/// A variable with no declarations stands for an unresolved (implicitly
/// global) name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declarations: Vec::new(),
            references: Vec::new(),
        }
    }

    /// First declaration introduced as a function parameter, if any.
    pub fn parameter_declaration(&self) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|d| d.kind == DeclarationKind::Parameter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub kind: ScopeKind,
    #[serde(default)]
    pub children: Vec<ScopeId>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            variables: Vec::new(),
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// Arena of scopes with a single root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeTree {
    pub scopes: Vec<Scope>,
    pub root: ScopeId,
}

impl ScopeTree {
    /// Create a tree holding only a root scope of the given kind.
    pub fn new(root_kind: ScopeKind) -> Self {
        Self {
            scopes: vec![Scope::new(root_kind)],
            root: ScopeId::new(0),
        }
    }

    /// Add a child scope under `parent`.
    pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        let id = ScopeId::new(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind));
        self.scopes[parent.index()].children.push(id);
        id
    }

    /// Record a declaration of `name` in `scope`, creating the variable on
    /// first sight. Returns the variable's position in the scope.
    pub fn declare(&mut self, scope: ScopeId, name: &str, node: NodeId, kind: DeclarationKind) -> usize {
        let slot = self.variable_slot(scope, name);
        self.scopes[scope.index()].variables[slot]
            .declarations
            .push(Declaration { node, kind });
        slot
    }

    /// Record a reference to `name` in `scope`, creating the variable on first
    /// sight (with no declarations, if nothing declares it).
    pub fn reference(&mut self, scope: ScopeId, name: &str, node: NodeId, access: Access) -> usize {
        let slot = self.variable_slot(scope, name);
        self.scopes[scope.index()].variables[slot]
            .references
            .push(Reference { node, access });
        slot
    }

    fn variable_slot(&mut self, scope: ScopeId, name: &str) -> usize {
        let variables = &mut self.scopes[scope.index()].variables;
        match variables.iter().position(|v| v.name == name) {
            Some(slot) => slot,
            None => {
                variables.push(Variable::new(name));
                variables.len() - 1
            }
        }
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    /// Scope ids in pre-order, starting at the root.
    pub fn preorder(&self) -> Vec<ScopeId> {
        let mut out = Vec::with_capacity(self.scopes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(scope) = self.get(id) else { continue };
            out.push(id);
            stack.extend(scope.children.iter().rev().copied());
        }
        out
    }

    /// Check that the scopes below the root form a tree: every child link
    /// points inside the arena and no scope is reached twice.
    pub fn check(&self) -> Result<(), crate::RefactorError> {
        if self.get(self.root).is_none() {
            return Err(crate::RefactorError::precondition("scope tree has no root scope"));
        }
        let mut seen = vec![false; self.scopes.len()];
        seen[self.root.index()] = true;
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            for &child in &self[id].children {
                match seen.get_mut(child.index()) {
                    None => {
                        return Err(crate::RefactorError::precondition(format!(
                            "scope {} lists missing child scope {}",
                            id.index(),
                            child.index()
                        )));
                    }
                    Some(true) => {
                        return Err(crate::RefactorError::precondition(format!(
                            "scope {} is reached more than once (listed again under scope {})",
                            child.index(),
                            id.index()
                        )));
                    }
                    Some(slot) => *slot = true,
                }
                stack.push(child);
            }
        }
        Ok(())
    }
}

impl std::ops::Index<ScopeId> for ScopeTree {
    type Output = Scope;

    fn index(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }
}
