//! Document passes.
//!
//! `UnitRewriter` walks a subtree and rewrites US customary quantities as
//! metric, in place.
//!
//! # Example
//!
//! ```ignore
//! use metric_vdom::transform::UnitRewriter;
//!
//! let mut rewriter = UnitRewriter::new();
//! rewriter.rewrite_document(&mut doc);
//! ```

mod rewriter;

pub use rewriter::{RewriteConfig, RewriteStats, UnitRewriter};
