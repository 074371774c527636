//! Error types for document surface operations.
//!
//! None of these reach the user: toolbar and clipboard operations log them
//! and degrade to "nothing changed".

/// Failure reported by a [`DocumentSurface`](crate::DocumentSurface).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// There is no selection (or no range in it) to act on.
    #[error("no active selection")]
    NoSelection,

    /// A node the operation expected to be in the document has no parent.
    #[error("node is not attached to the document")]
    Detached,

    /// A boundary offset lies outside its node.
    #[error("boundary offset out of range")]
    InvalidBoundary,

    /// The underlying DOM rejected the operation.
    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl From<&str> for SurfaceError {
    fn from(s: &str) -> Self {
        SurfaceError::Dom(s.to_string())
    }
}

impl From<String> for SurfaceError {
    fn from(s: String) -> Self {
        SurfaceError::Dom(s)
    }
}
