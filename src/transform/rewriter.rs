//! UnitRewriter: in-place US customary → metric rewrite of text nodes
//!
//! Walks a subtree in document order. Every text node with visible content
//! is scanned for unit matches; each match is converted only when the text
//! around the node contains a measurement keyword. Everything else is left
//! exactly as written.
//!
//! # Read, compute, write
//!
//! A text node's full content is read and the substituted string is built in
//! memory before the node is written, once. The context window for every
//! match is computed from the siblings as they were before the write.

use std::borrow::Cow;

use tracing::{debug, trace, warn};

use crate::error::{RewriteError, RewriteResult};
use crate::node::{Document, Element, Node, NodePath};
use crate::units::{
    Conversion, DEFAULT_CONTEXT_BUDGET, UnitMatch, convert, has_measurement_keyword, replace_units,
    visible_context,
};

// =============================================================================
// RewriteConfig
// =============================================================================

/// Configuration for unit rewriting.
///
/// The keyword and unit tables are fixed; only the context window and
/// diagnostics are tunable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Chars of sibling text gathered before a node; twice this in total.
    pub context_budget: usize,
    /// Emit a debug event with the context string for every match attempt.
    pub log_context: bool,
}

impl RewriteConfig {
    /// Default config (budget 50, context logging on).
    pub const DEFAULT: Self = Self {
        context_budget: DEFAULT_CONTEXT_BUDGET,
        log_context: true,
    };

    /// Default budget without per-match context events.
    pub const QUIET: Self = Self {
        context_budget: DEFAULT_CONTEXT_BUDGET,
        log_context: false,
    };

    /// Create a config with a custom context budget.
    pub fn new(context_budget: usize) -> Self {
        Self {
            context_budget,
            ..Self::DEFAULT
        }
    }

    /// Turn per-match context events on or off.
    pub fn with_log_context(mut self, log_context: bool) -> Self {
        self.log_context = log_context;
        self
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// RewriteStats
// =============================================================================

/// Counters accumulated across passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// Text nodes with visible content that were scanned
    pub text_nodes_visited: usize,
    /// Text nodes whose content was replaced
    pub text_nodes_changed: usize,
    /// Unit matches found
    pub matches_found: usize,
    /// Matches replaced by their metric equivalent
    pub matches_converted: usize,
    /// Matches left verbatim for lack of a nearby keyword
    pub matches_suppressed: usize,
    /// Matches left verbatim because conversion failed
    pub matches_failed: usize,
}

// =============================================================================
// UnitRewriter
// =============================================================================

/// Rewrites unit quantities in text nodes.
///
/// # Usage
///
/// ```ignore
/// let mut rewriter = UnitRewriter::new();
/// rewriter.rewrite_document(&mut doc);
/// assert_eq!(rewriter.stats().matches_converted, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UnitRewriter {
    config: RewriteConfig,
    stats: RewriteStats,
}

impl UnitRewriter {
    /// Create a rewriter with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a rewriter with a custom config.
    pub fn with_config(config: RewriteConfig) -> Self {
        Self {
            config,
            stats: RewriteStats::default(),
        }
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    pub fn stats(&self) -> &RewriteStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = RewriteStats::default();
    }

    /// Rewrite everything under the document's `<body>`.
    ///
    /// A document without a body is left untouched.
    pub fn rewrite_document(&mut self, doc: &mut Document) {
        let Some(body) = doc.body_path() else {
            debug!("document has no body, skipping initial pass");
            return;
        };
        trace!(%body, "rewriting document body");
        self.rewrite_path(doc, &body);
    }

    /// Rewrite the subtree rooted at `path`.
    ///
    /// Returns `false` (and changes nothing) when no node exists there.
    pub fn rewrite_path(&mut self, doc: &mut Document, path: &NodePath) -> bool {
        match path.split_last() {
            None => {
                self.rewrite_element(&mut doc.root);
                true
            }
            Some((parent, index)) => match doc.children_mut(&parent) {
                Some(children) if index < children.len() => {
                    self.rewrite_at(children, index);
                    true
                }
                _ => false,
            },
        }
    }

    /// Rewrite every descendant of `elem`. The element itself has no text.
    pub fn rewrite_element(&mut self, elem: &mut Element) {
        for index in 0..elem.children.len() {
            self.rewrite_at(&mut elem.children, index);
        }
    }

    /// Rewrite the subtree rooted at `siblings[index]`.
    ///
    /// The siblings supply the context window for a text node.
    pub fn rewrite_at(&mut self, siblings: &mut [Node], index: usize) {
        let visible = match siblings.get_mut(index) {
            Some(Node::Element(elem)) => {
                self.rewrite_element(elem);
                return;
            }
            Some(Node::Text(text)) => !text.is_whitespace(),
            Some(Node::Comment(_)) | None => false,
        };
        if !visible {
            return;
        }

        self.stats.text_nodes_visited += 1;
        if let Some(replaced) = self.substitute(siblings, index)
            && let Some(text) = siblings[index].as_text_mut()
        {
            text.content = replaced;
            self.stats.text_nodes_changed += 1;
        }
    }

    /// Compute the rewritten content of the text node at `siblings[index]`.
    ///
    /// `None` when nothing was converted.
    fn substitute(&mut self, siblings: &[Node], index: usize) -> Option<String> {
        let text = siblings.get(index)?.as_text()?;
        match replace_units(&text.content, |m| self.replace_match(m, siblings, index)) {
            Cow::Borrowed(_) => None,
            Cow::Owned(replaced) => Some(replaced),
        }
    }

    /// Replacement for one match, or `None` to keep it verbatim.
    fn replace_match(&mut self, m: &UnitMatch<'_>, siblings: &[Node], index: usize) -> Option<String> {
        self.stats.matches_found += 1;

        let context = visible_context(siblings, index, self.config.context_budget);
        if self.config.log_context {
            debug!(%context, matched = m.matched, "visible context");
        }

        if !has_measurement_keyword(&context) {
            self.stats.matches_suppressed += 1;
            return None;
        }

        match Self::convert_match(m) {
            Ok(conversion) => {
                self.stats.matches_converted += 1;
                Some(conversion.to_string())
            }
            Err(err) => {
                warn!(%err, matched = m.matched, "leaving quantity unchanged");
                self.stats.matches_failed += 1;
                None
            }
        }
    }

    fn convert_match(m: &UnitMatch<'_>) -> RewriteResult<Conversion> {
        let value: f64 = m
            .number
            .parse()
            .map_err(|source| RewriteError::invalid_number(m.number, source))?;
        convert(value, m.unit)
    }
}
