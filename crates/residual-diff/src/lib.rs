//! Residual content diff.
//!
//! Given a desired configuration tree and an observed tree fetched from the
//! system that owns the resource, compute the part of the desired tree that
//! is not yet present. The observed tree may carry extra keys; sequences
//! must match in length, and sequences of mappings match regardless of order.
//!
//! # Key Types
//!
//! - [`content_diff`] -- Residual of a desired node against an observed node
//! - [`sequence_satisfied`] -- Order-independent sequence match used inside it
//! - [`Residual`] -- The unsatisfied part of the desired tree
//! - [`diff_documents`] -- Parse JSON/YAML documents, then diff

pub mod content_diff;
pub mod document;
pub mod error;
pub mod residual;

pub use content_diff::{content_diff, sequence_satisfied};
pub use document::diff_documents;
pub use error::{DiffError, DiffResult};
pub use residual::Residual;
