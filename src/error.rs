//! Error types for metric-vdom.
//!
//! Errors never abort a rewrite pass: the driver isolates them per match and
//! per node. They surface from the converter and from `Document` operations
//! called with a path that does not resolve.

use std::num::ParseFloatError;

use thiserror::Error;

use crate::node::NodePath;

/// Errors that can occur while converting quantities or mutating a document.
#[derive(Debug, Error)]
pub enum RewriteError {
    /// A unit token reached the converter without a matching rule
    #[error("no conversion rule for unit `{0}`")]
    UnknownUnit(String),

    /// The numeric part of a match could not be parsed
    #[error("invalid number `{text}`: {source}")]
    InvalidNumber {
        /// The matched digits
        text: String,
        /// Underlying parse failure
        source: ParseFloatError,
    },

    /// No node exists at the given path
    #[error("no node at path {0}")]
    NodeNotFound(NodePath),

    /// The node at the given path cannot hold children
    #[error("node at path {0} is not an element")]
    NotAnElement(NodePath),

    /// A child index was past the end of the child list
    #[error("child index {index} out of bounds for {len} children at path {parent}")]
    IndexOutOfBounds {
        /// Parent element path
        parent: NodePath,
        /// Requested index
        index: usize,
        /// Number of children the parent has
        len: usize,
    },
}

/// Result type alias for rewrite operations.
pub type RewriteResult<T> = Result<T, RewriteError>;

impl RewriteError {
    /// Create an unknown-unit error.
    pub fn unknown_unit(token: impl Into<String>) -> Self {
        Self::UnknownUnit(token.into())
    }

    /// Create an invalid-number error from the matched text.
    pub fn invalid_number(text: impl Into<String>, source: ParseFloatError) -> Self {
        Self::InvalidNumber {
            text: text.into(),
            source,
        }
    }
}
