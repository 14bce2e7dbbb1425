//! Live rewriting: an initial pass plus incremental passes over inserted
//! content.
//!
//! `LiveRewriter::attach` rewrites the document body once and subscribes to
//! child-list changes below it. Each delivered batch rewrites only the nodes
//! the batch reports as added inside the body; nothing that was already in
//! the tree is scanned again, and nothing outside the body is touched.
//!
//! The rewriter writes text through the tree directly, which is not an
//! observed mutation, so its own writes never come back as records.

use tracing::trace;

use crate::mutation::{MutationKind, MutationObserver, MutationRecord, ObserveOptions};
use crate::node::{Document, NodePath};
use crate::transform::{RewriteConfig, RewriteStats, UnitRewriter};

/// Keeps a document's quantities metric as content is added.
///
/// # Usage
///
/// ```ignore
/// let mut live = LiveRewriter::attach(&mut doc, RewriteConfig::default());
/// doc.append_child(&body, Element::new("p").text("Weight 5 lbs"))?;
/// live.deliver(&mut doc);
/// ```
#[derive(Debug)]
pub struct LiveRewriter {
    rewriter: UnitRewriter,
    observer: MutationObserver,
}

impl LiveRewriter {
    /// Run the initial pass over `doc` and subscribe to changes in its body.
    ///
    /// A document without a body gets no initial pass. It is observed from
    /// the root instead, so a body added later is picked up; records outside
    /// the body are dropped at delivery.
    pub fn attach(doc: &mut Document, config: RewriteConfig) -> Self {
        let mut rewriter = UnitRewriter::with_config(config);
        rewriter.rewrite_document(doc);

        let observer = MutationObserver::new();
        let target = doc.body_path().unwrap_or_else(NodePath::root);
        doc.observe(&observer, target, ObserveOptions::CHILD_LIST_SUBTREE);

        Self { rewriter, observer }
    }

    /// The observer receiving this document's records.
    pub fn observer(&self) -> &MutationObserver {
        &self.observer
    }

    /// Counters accumulated since attaching.
    pub fn stats(&self) -> &RewriteStats {
        self.rewriter.stats()
    }

    /// Deliver the pending batch, returning the number of records handled.
    pub fn deliver(&mut self, doc: &mut Document) -> usize {
        let records = self.observer.take_records();
        self.handle_records(doc, &records);
        records.len()
    }

    /// Rewrite every node inside the body added by `ChildList` records in
    /// `records`.
    pub fn handle_records(&mut self, doc: &mut Document, records: &[MutationRecord]) {
        let Some(body) = doc.body_path() else {
            trace!(records = records.len(), "document has no body, dropping batch");
            return;
        };
        for record in records.iter().filter(|r| r.kind == MutationKind::ChildList) {
            for added in &record.added {
                if !body.is_ancestor_or_self(added) {
                    trace!(%added, "added node outside the body");
                    continue;
                }
                if !self.rewriter.rewrite_path(doc, added) {
                    trace!(%added, "added node no longer in the tree");
                }
            }
        }
    }
}
