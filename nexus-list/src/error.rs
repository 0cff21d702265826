// nexus-list/src/error.rs

//! Error type for list and cursor operations.

use thiserror::Error;

/// Failure of a list or cursor operation.
///
/// Every variant is a violated precondition: retrying the same call on the
/// same list state fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// `front`, `back` or a `pop` was called on a list with no elements.
    #[error("{operation} called on empty list")]
    EmptyContainer {
        /// Name of the operation that found the list empty.
        operation: &'static str,
    },

    /// A cursor positioned on the end marker was dereferenced.
    #[error("cannot dereference the end position")]
    InvalidPosition,

    /// A cursor positioned on the end marker was asked to remove its element.
    #[error("cannot remove the end position")]
    InvalidRemovalTarget,

    /// The link chain is corrupted: a link expected to hold an element did
    /// not, or the prev/next pointers disagree.
    #[error("list invariant violated: {detail}")]
    InternalInvariantViolation {
        /// Which invariant failed.
        detail: &'static str,
    },
}

impl ListError {
    pub(crate) const fn empty(operation: &'static str) -> Self {
        Self::EmptyContainer { operation }
    }

    pub(crate) const fn corrupted(detail: &'static str) -> Self {
        Self::InternalInvariantViolation { detail }
    }
}
