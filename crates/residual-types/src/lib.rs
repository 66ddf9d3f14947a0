//! Foundation types for residual.
//!
//! This crate provides the structural data model that the comparator in
//! `residual-diff` works on, together with the boundary where foreign
//! documents become nodes. Every other residual crate depends on
//! `residual-types`.
//!
//! # Key Types
//!
//! - [`Node`] — A mapping, sequence, or scalar configuration value
//! - [`NodeKind`] — The variant name of a [`Node`], used in errors and logs
//! - [`NodePath`] — Location of a value inside a tree (`spec.ports[0].name`)
//! - [`DocumentFormat`] — JSON or YAML input, with format detection
//! - [`NodeError`] — Boundary failures: malformed values, duplicate keys, syntax errors
//!
//! Mapping keys are normalized to strings once, when a [`Node`] is built, so
//! comparisons never have to reconcile key representations.

pub mod convert;
pub mod error;
pub mod format;
pub mod node;
pub mod path;

pub use error::{NodeError, NodeResult};
pub use format::{parse_document, DocumentFormat};
pub use node::{Mapping, Node, NodeKind};
pub use path::{NodePath, PathSegment};
