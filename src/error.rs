//! Errors reported by [`AvlTree`](crate::AvlTree) operations.

use thiserror::Error;

/// Why an operation on an [`AvlTree`](crate::AvlTree) failed. A failed
/// operation never changes the tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlError {
    /// The caller passed an argument outside of the accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No stored element matches the requested one.
    #[error("element not found in tree")]
    NotFound,
}

/// Shorthand for results of tree operations.
pub type Result<T> = std::result::Result<T, AvlError>;
