use thiserror::Error;

use crate::format::DocumentFormat;
use crate::path::NodePath;

/// Errors produced while turning a foreign document into a [`Node`](crate::Node).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    /// The value at `path` is none of mapping, sequence, or scalar.
    #[error("invalid node kind at {path}: {kind}")]
    InvalidNodeKind { path: NodePath, kind: String },

    /// Two keys of one mapping normalize to the same string.
    #[error("duplicate key {key:?} at {path} after key normalization")]
    DuplicateKey { path: NodePath, key: String },

    #[error("{format} parse error: {message}")]
    Parse {
        format: DocumentFormat,
        message: String,
    },
}

/// Convenience alias for node construction results.
pub type NodeResult<T> = Result<T, NodeError>;
