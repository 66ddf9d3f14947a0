//! Error types for the diff crate.

use residual_types::NodeError;

/// Errors that can occur before a residual diff runs.
///
/// The comparison itself is total; every failure happens while turning an
/// input document into a node tree.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The desired document could not be turned into a node tree.
    #[error("invalid desired document: {0}")]
    InvalidDesired(#[source] NodeError),

    /// The observed document could not be turned into a node tree.
    #[error("invalid observed document: {0}")]
    InvalidObserved(#[source] NodeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
