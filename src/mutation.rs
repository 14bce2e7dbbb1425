//! Mutation notification for documents.
//!
//! A `MutationObserver` is registered on a `Document` with a target path and
//! `ObserveOptions`. The document's mutating operations append
//! `MutationRecord`s to every interested observer's queue; the observer
//! drains them in batches with `take_records`.
//!
//! Nodes in queued records are named by `NodePath`. Paths still waiting in a
//! queue are rebased on every later insertion or removal, so a batch always
//! names the nodes as they sit in the tree at delivery time. Added nodes
//! removed again before delivery are dropped from their record.

use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::node::NodePath;

type RecordQueue = Arc<Mutex<Vec<MutationRecord>>>;

// =============================================================================
// Records
// =============================================================================

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Children were inserted into or removed from `target`
    ChildList,
    /// The content of the text node at `target` was replaced
    CharacterData,
}

/// One change reported to an observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Kind of change
    pub kind: MutationKind,
    /// Parent element for `ChildList`, text node for `CharacterData`
    pub target: NodePath,
    /// Paths of inserted nodes
    pub added: SmallVec<[NodePath; 2]>,
    /// Number of removed nodes
    pub removed: usize,
    /// Previous text for `CharacterData`
    pub old_value: Option<String>,
}

impl MutationRecord {
    /// Record for a single inserted child.
    pub fn child_added(parent: NodePath, index: usize) -> Self {
        let added = parent.child(index);
        Self {
            kind: MutationKind::ChildList,
            target: parent,
            added: smallvec::smallvec![added],
            removed: 0,
            old_value: None,
        }
    }

    /// Record for a single removed child.
    pub fn child_removed(parent: NodePath) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target: parent,
            added: SmallVec::new(),
            removed: 1,
            old_value: None,
        }
    }

    /// Record for replaced text content.
    pub fn character_data(target: NodePath, old_value: String) -> Self {
        Self {
            kind: MutationKind::CharacterData,
            target,
            added: SmallVec::new(),
            removed: 0,
            old_value: Some(old_value),
        }
    }

    fn rebase_insert(&mut self, parent: &NodePath, index: usize) {
        self.target.rebase_insert(parent, index);
        for path in &mut self.added {
            path.rebase_insert(parent, index);
        }
    }

    /// Returns `false` if the record's target went away with the removal.
    fn rebase_remove(&mut self, parent: &NodePath, index: usize) -> bool {
        if !self.target.rebase_remove(parent, index) {
            return false;
        }
        self.added.retain(|path| path.rebase_remove(parent, index));
        true
    }
}

// =============================================================================
// Options
// =============================================================================

/// Which changes an observer wants to hear about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObserveOptions {
    /// Report child insertions and removals
    pub child_list: bool,
    /// Report text content replacement
    pub character_data: bool,
    /// Report changes anywhere below the target, not only on it
    pub subtree: bool,
}

impl ObserveOptions {
    /// Child-list changes on the target and all of its descendants.
    pub const CHILD_LIST_SUBTREE: Self = Self {
        child_list: true,
        character_data: false,
        subtree: true,
    };

    /// Every supported change on the target and all of its descendants.
    pub const ALL_SUBTREE: Self = Self {
        child_list: true,
        character_data: true,
        subtree: true,
    };

    fn wants(&self, kind: MutationKind) -> bool {
        match kind {
            MutationKind::ChildList => self.child_list,
            MutationKind::CharacterData => self.character_data,
        }
    }
}

// =============================================================================
// Observer
// =============================================================================

/// Handle that receives mutation records from the documents it observes.
#[derive(Debug, Clone, Default)]
pub struct MutationObserver {
    queue: RecordQueue,
}

impl MutationObserver {
    /// Create an observer with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all pending records, oldest first.
    pub fn take_records(&self) -> Vec<MutationRecord> {
        std::mem::take(&mut *self.queue.lock())
    }

    /// Number of records waiting for delivery.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    pub(crate) fn queue(&self) -> RecordQueue {
        Arc::clone(&self.queue)
    }
}

// =============================================================================
// Registry (document side)
// =============================================================================

#[derive(Debug)]
struct Registration {
    target: NodePath,
    options: ObserveOptions,
    queue: RecordQueue,
}

impl Registration {
    fn interested(&self, record: &MutationRecord) -> bool {
        if !self.options.wants(record.kind) {
            return false;
        }
        if self.options.subtree {
            self.target.is_ancestor_or_self(&record.target)
        } else {
            self.target == record.target
        }
    }
}

/// Observers registered on one document.
#[derive(Debug, Default)]
pub(crate) struct ObserverRegistry {
    registrations: Vec<Registration>,
}

impl ObserverRegistry {
    pub(crate) fn register(&mut self, observer: &MutationObserver, target: NodePath, options: ObserveOptions) {
        let queue = observer.queue();
        // Re-observing the same target replaces the earlier options
        if let Some(existing) = self
            .registrations
            .iter_mut()
            .find(|r| Arc::ptr_eq(&r.queue, &queue) && r.target == target)
        {
            existing.options = options;
            return;
        }
        self.registrations.push(Registration { target, options, queue });
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Shift queued paths and targets for an insertion at `parent/index`,
    /// then queue `record`.
    pub(crate) fn notify_insert(&mut self, parent: &NodePath, index: usize, record: MutationRecord) {
        for registration in &mut self.registrations {
            registration.target.rebase_insert(parent, index);
            for pending in registration.queue.lock().iter_mut() {
                pending.rebase_insert(parent, index);
            }
        }
        self.notify(record);
    }

    /// Shift or drop queued paths and targets for a removal at
    /// `parent/index`, then queue `record`.
    pub(crate) fn notify_remove(&mut self, parent: &NodePath, index: usize, record: MutationRecord) {
        // A registration whose target was removed can no longer be addressed
        self.registrations
            .retain_mut(|registration| registration.target.rebase_remove(parent, index));
        for registration in &self.registrations {
            registration
                .queue
                .lock()
                .retain_mut(|pending| pending.rebase_remove(parent, index));
        }
        self.notify(record);
    }

    /// Queue `record` for every interested registration.
    pub(crate) fn notify(&self, record: MutationRecord) {
        let mut delivered_to: SmallVec<[&RecordQueue; 4]> = SmallVec::new();
        for registration in &self.registrations {
            // One observer registered on nested targets gets the record once
            if !registration.interested(&record)
                || delivered_to.iter().any(|q| Arc::ptr_eq(*q, &registration.queue))
            {
                continue;
            }
            registration.queue.lock().push(record.clone());
            delivered_to.push(&registration.queue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(indices: &[usize]) -> NodePath {
        NodePath::from_indices(indices.iter().copied())
    }

    #[test]
    fn test_subtree_registration_receives_descendant_records() {
        let observer = MutationObserver::new();
        let mut registry = ObserverRegistry::default();
        registry.register(&observer, path(&[1]), ObserveOptions::CHILD_LIST_SUBTREE);

        registry.notify_insert(&path(&[1, 0]), 2, MutationRecord::child_added(path(&[1, 0]), 2));
        registry.notify_insert(&path(&[0]), 0, MutationRecord::child_added(path(&[0]), 0));

        let records = observer.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].added.as_slice(), &[path(&[1, 0, 2])]);
        assert_eq!(observer.pending(), 0);
    }

    #[test]
    fn test_kind_filter() {
        let observer = MutationObserver::new();
        let mut registry = ObserverRegistry::default();
        registry.register(&observer, NodePath::root(), ObserveOptions::CHILD_LIST_SUBTREE);

        registry.notify(MutationRecord::character_data(path(&[0, 0]), "old".into()));
        assert_eq!(observer.pending(), 0);
    }

    #[test]
    fn test_non_subtree_only_sees_target() {
        let observer = MutationObserver::new();
        let mut registry = ObserverRegistry::default();
        let options = ObserveOptions {
            child_list: true,
            ..Default::default()
        };
        registry.register(&observer, path(&[1]), options);

        registry.notify_insert(&path(&[1, 0]), 0, MutationRecord::child_added(path(&[1, 0]), 0));
        registry.notify_insert(&path(&[1]), 0, MutationRecord::child_added(path(&[1]), 0));

        let records = observer.take_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, path(&[1]));
    }

    #[test]
    fn test_pending_paths_follow_later_insertions() {
        let observer = MutationObserver::new();
        let mut registry = ObserverRegistry::default();
        registry.register(&observer, NodePath::root(), ObserveOptions::CHILD_LIST_SUBTREE);

        registry.notify_insert(&path(&[1]), 0, MutationRecord::child_added(path(&[1]), 0));
        // Insert before it: the first record's node moves to index 1
        registry.notify_insert(&path(&[1]), 0, MutationRecord::child_added(path(&[1]), 0));

        let records = observer.take_records();
        assert_eq!(records[0].added.as_slice(), &[path(&[1, 1])]);
        assert_eq!(records[1].added.as_slice(), &[path(&[1, 0])]);
    }

    #[test]
    fn test_removed_nodes_drop_out_of_pending_records() {
        let observer = MutationObserver::new();
        let mut registry = ObserverRegistry::default();
        registry.register(&observer, NodePath::root(), ObserveOptions::CHILD_LIST_SUBTREE);

        registry.notify_insert(&path(&[1]), 3, MutationRecord::child_added(path(&[1]), 3));
        registry.notify_remove(&path(&[1]), 3, MutationRecord::child_removed(path(&[1])));

        let records = observer.take_records();
        assert_eq!(records.len(), 2);
        assert!(records[0].added.is_empty());
        assert_eq!(records[1].removed, 1);
    }

    #[test]
    fn test_nested_registrations_deliver_once() {
        let observer = MutationObserver::new();
        let mut registry = ObserverRegistry::default();
        registry.register(&observer, NodePath::root(), ObserveOptions::CHILD_LIST_SUBTREE);
        registry.register(&observer, path(&[1]), ObserveOptions::CHILD_LIST_SUBTREE);

        registry.notify_insert(&path(&[1]), 0, MutationRecord::child_added(path(&[1]), 0));
        assert_eq!(observer.pending(), 1);
    }

    #[test]
    fn test_observer_is_send_sync() {
        static_assertions::assert_impl_all!(MutationObserver: Send, Sync);
    }
}
