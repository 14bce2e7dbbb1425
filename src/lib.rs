//! metric-vdom - US customary to metric rewriting over a live document tree
//!
//! ## Core Concepts
//!
//! **Unit rewriting**: text nodes are scanned for quantities like `12 inches`
//! or `98.6 °F`. A quantity is replaced by its metric equivalent only when
//! the surrounding sibling text contains a measurement keyword such as
//! "width" or "weight"; otherwise it is left exactly as written.
//!
//! **Live documents**: the document reports child insertions to registered
//! observers. `LiveRewriter` uses them to rewrite content added after the
//! initial pass, and nothing else.
//!
//! ## Modules
//! - `node`: Document/Element/Node/Text/Comment types and `NodePath`
//! - `mutation`: mutation observers and records
//! - `units`: unit pattern, keyword context and conversion table
//! - `transform`: the `UnitRewriter` pass
//! - `live`: initial pass plus incremental passes on insertion
//! - `render`: HTML output
//!
//! ## Usage
//!
//! ```ignore
//! use metric_vdom::prelude::*;
//!
//! let mut doc = Document::new(
//!     Element::new("body").child(Element::new("p").text("Weight: 5 lbs")),
//! );
//! let mut live = LiveRewriter::attach(&mut doc, RewriteConfig::default());
//! // "Weight: 2.27 kg"
//!
//! doc.append_child(&NodePath::root(), Element::new("p").text("Length 12 in"))?;
//! live.deliver(&mut doc);
//! // "Length 30.48 cm"
//! ```

#[macro_use]
mod macros;

/// Node types: Document, Element, Node, Text, Comment
pub mod node;

/// Mutation observers
pub mod mutation;

/// Unit detection and conversion
pub mod units;

/// Document passes: UnitRewriter
pub mod transform;

/// Live rewriting driven by mutation records
pub mod live;

/// HTML rendering
pub mod render;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Comment, Document, Element, Node, NodePath, Text};

// Mutation
pub use mutation::{MutationKind, MutationObserver, MutationRecord, ObserveOptions};

// Rewriter
pub use transform::{RewriteConfig, RewriteStats, UnitRewriter};

// Live
pub use live::LiveRewriter;

// Error types
pub use error::{RewriteError, RewriteResult};
