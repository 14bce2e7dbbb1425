//! Prelude module for common imports.
//!
//! ```ignore
//! use metric_vdom::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Comment, Document, Element, Node, NodePath, Text};

// Mutation
pub use crate::mutation::{MutationKind, MutationObserver, MutationRecord, ObserveOptions};

// Units
pub use crate::units::{Conversion, UnitMatch, convert, find_units, has_measurement_keyword, visible_context};

// Rewriter
pub use crate::transform::{RewriteConfig, RewriteStats, UnitRewriter};

// Live
pub use crate::live::LiveRewriter;

// Render
pub use crate::render::{RenderConfig, render_document, render_node};

// Error
pub use crate::error::{RewriteError, RewriteResult};
