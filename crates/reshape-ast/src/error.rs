use crate::ast::TreeShapeError;
use thiserror::Error;

/// Errors raised by the refactoring primitives.
///
/// None of these are transient: each one means the input tree, scope tree or
/// requested operation does not fit together, and the caller has to fix the
/// input rather than retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefactorError {
    /// The syntax tree and the scope tree disagree, e.g. a parameter
    /// declaration whose parent is not a parameter list containing it.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// A node has a shape the operation cannot handle.
    #[error("{0}")]
    UnsupportedShape(String),

    /// A requested replacement cannot be built from the given program.
    #[error("{0}")]
    Unsupported(String),

    /// The program has no statements or directives to extract.
    #[error("program is empty")]
    EmptyProgram,

    #[error("malformed tree: {0}")]
    Shape(#[from] TreeShapeError),
}

impl RefactorError {
    #[must_use]
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}
