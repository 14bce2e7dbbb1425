//! Document type
//!
//! The root container for a tree, with path-based navigation and the
//! mutating operations that feed registered mutation observers.

use crate::error::{RewriteError, RewriteResult};
use crate::mutation::{MutationObserver, MutationRecord, ObserveOptions, ObserverRegistry};

use super::{Children, Element, Node, NodePath};

// =============================================================================
// Document
// =============================================================================

/// Root document container
///
/// Structural changes made through `insert_child`, `append_child`,
/// `remove_child` and `set_text` are reported to observers. Direct access
/// through `root`, `element_mut` or `children_mut` is not observed.
#[derive(Debug)]
pub struct Document {
    /// Root element (typically <html> or a body wrapper)
    pub root: Element,
    observers: ObserverRegistry,
}

impl Clone for Document {
    /// Clones the tree only; observers stay with the original.
    fn clone(&self) -> Self {
        Self::new(self.root.clone())
    }
}

impl Document {
    /// Create a new document with a root element
    pub fn new(root: Element) -> Self {
        Self {
            root,
            observers: ObserverRegistry::default(),
        }
    }

    /// Path of the `<body>` element.
    ///
    /// The root itself when it is a body, otherwise its first `body` child.
    pub fn body_path(&self) -> Option<NodePath> {
        if self.root.tag.eq_ignore_ascii_case("body") {
            return Some(NodePath::root());
        }
        self.root
            .children
            .iter()
            .position(|n| n.as_element().is_some_and(|e| e.tag.eq_ignore_ascii_case("body")))
            .map(|index| NodePath::root().child(index))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Node at a non-root path.
    ///
    /// The root element is not wrapped in a `Node`; use `root` or `element`.
    pub fn node(&self, path: &NodePath) -> Option<&Node> {
        let (parent, index) = path.split_last()?;
        self.children(&parent)?.get(index)
    }

    /// Mutable node at a non-root path.
    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (parent, index) = path.split_last()?;
        self.children_mut(&parent)?.get_mut(index)
    }

    /// Element at a path (including the root).
    pub fn element(&self, path: &NodePath) -> Option<&Element> {
        let mut elem = &self.root;
        for &index in path.indices() {
            elem = elem.children.get(index)?.as_element()?;
        }
        Some(elem)
    }

    /// Mutable element at a path (including the root).
    pub fn element_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut elem = &mut self.root;
        for &index in path.indices() {
            elem = elem.children.get_mut(index)?.as_element_mut()?;
        }
        Some(elem)
    }

    /// Children of the element at `parent`.
    pub fn children(&self, parent: &NodePath) -> Option<&Children> {
        self.element(parent).map(|e| &e.children)
    }

    /// Mutable children of the element at `parent`.
    pub fn children_mut(&mut self, parent: &NodePath) -> Option<&mut Children> {
        self.element_mut(parent).map(|e| &mut e.children)
    }

    /// Content of the text node at `path`.
    pub fn text(&self, path: &NodePath) -> Option<&str> {
        self.node(path)?.as_text().map(|t| t.content.as_str())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Observed mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Register `observer` for changes at or below `target`.
    pub fn observe(&mut self, observer: &MutationObserver, target: NodePath, options: ObserveOptions) {
        self.observers.register(observer, target, options);
    }

    /// Check if any observer is registered.
    pub fn is_observed(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Insert `node` as the `index`-th child of the element at `parent`.
    ///
    /// Returns the path of the inserted node.
    pub fn insert_child(
        &mut self,
        parent: &NodePath,
        index: usize,
        node: impl Into<Node>,
    ) -> RewriteResult<NodePath> {
        let children = self.existing_children_mut(parent)?;
        if index > children.len() {
            return Err(RewriteError::IndexOutOfBounds {
                parent: parent.clone(),
                index,
                len: children.len(),
            });
        }
        children.insert(index, node.into());

        let record = MutationRecord::child_added(parent.clone(), index);
        self.observers.notify_insert(parent, index, record);
        Ok(parent.child(index))
    }

    /// Append `node` to the children of the element at `parent`.
    pub fn append_child(&mut self, parent: &NodePath, node: impl Into<Node>) -> RewriteResult<NodePath> {
        let index = self.existing_children_mut(parent)?.len();
        self.insert_child(parent, index, node)
    }

    /// Remove and return the `index`-th child of the element at `parent`.
    pub fn remove_child(&mut self, parent: &NodePath, index: usize) -> RewriteResult<Node> {
        let children = self.existing_children_mut(parent)?;
        if index >= children.len() {
            return Err(RewriteError::IndexOutOfBounds {
                parent: parent.clone(),
                index,
                len: children.len(),
            });
        }
        let removed = children.remove(index);

        let record = MutationRecord::child_removed(parent.clone());
        self.observers.notify_remove(parent, index, record);
        Ok(removed)
    }

    /// Replace the content of the text node at `path`, returning the old text.
    pub fn set_text(&mut self, path: &NodePath, content: impl Into<String>) -> RewriteResult<String> {
        let text = self
            .node_mut(path)
            .ok_or_else(|| RewriteError::NodeNotFound(path.clone()))?
            .as_text_mut()
            .ok_or_else(|| RewriteError::NodeNotFound(path.clone()))?;
        let old = text.replace(content);

        self.observers
            .notify(MutationRecord::character_data(path.clone(), old.clone()));
        Ok(old)
    }

    fn existing_children_mut(&mut self, parent: &NodePath) -> RewriteResult<&mut Children> {
        // Distinguish a missing node from a leaf so callers get a useful error
        let is_leaf = !parent.is_root() && self.node(parent).is_some_and(|n| !n.is_element());
        if is_leaf {
            return Err(RewriteError::NotAnElement(parent.clone()));
        }
        self.children_mut(parent)
            .ok_or_else(|| RewriteError::NodeNotFound(parent.clone()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query API
    // ─────────────────────────────────────────────────────────────────────────

    /// Count total elements in document
    pub fn element_count(&self) -> usize {
        Self::count(&self.root).0
    }

    /// Count total text nodes in document
    pub fn text_count(&self) -> usize {
        Self::count(&self.root).1
    }

    fn count(elem: &Element) -> (usize, usize) {
        let mut counts = (1, 0); // this element
        for child in &elem.children {
            match child {
                Node::Element(e) => {
                    let (elements, texts) = Self::count(e);
                    counts.0 += elements;
                    counts.1 += texts;
                }
                Node::Text(_) => counts.1 += 1,
                Node::Comment(_) => {}
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationKind;

    fn path(indices: &[usize]) -> NodePath {
        NodePath::from_indices(indices.iter().copied())
    }

    fn sample() -> Document {
        Document::new(
            Element::new("html")
                .child(Element::new("head"))
                .child(Element::new("body").child(Element::new("p").text("Weight: 5 lbs"))),
        )
    }

    #[test]
    fn test_body_path() {
        assert_eq!(sample().body_path(), Some(path(&[1])));
        assert_eq!(Document::new(Element::new("body")).body_path(), Some(NodePath::root()));
        assert_eq!(Document::new(Element::new("html")).body_path(), None);
    }

    #[test]
    fn test_navigation() {
        let doc = sample();
        assert_eq!(doc.text(&path(&[1, 0, 0])), Some("Weight: 5 lbs"));
        assert_eq!(doc.element(&path(&[1, 0])).map(|e| e.tag.as_str()), Some("p"));
        assert!(doc.node(&NodePath::root()).is_none());
        assert!(doc.element(&path(&[1, 0, 0])).is_none());
        assert!(doc.node(&path(&[7])).is_none());
        assert_eq!(doc.element_count(), 4);
        assert_eq!(doc.text_count(), 1);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut doc = sample();
        let body = path(&[1]);
        let added = doc.append_child(&body, Element::new("div")).unwrap();
        assert_eq!(added, path(&[1, 1]));

        let removed = doc.remove_child(&body, 0).unwrap();
        assert_eq!(removed.as_element().map(|e| e.tag.as_str()), Some("p"));
        assert_eq!(doc.element(&path(&[1, 0])).map(|e| e.tag.as_str()), Some("div"));
    }

    #[test]
    fn test_mutation_errors() {
        let mut doc = sample();
        assert!(matches!(
            doc.insert_child(&path(&[1]), 5, Node::text_node("x")),
            Err(RewriteError::IndexOutOfBounds { index: 5, len: 1, .. })
        ));
        assert!(matches!(
            doc.append_child(&path(&[1, 0, 0]), Node::text_node("x")),
            Err(RewriteError::NotAnElement(_))
        ));
        assert!(matches!(
            doc.append_child(&path(&[9]), Node::text_node("x")),
            Err(RewriteError::NodeNotFound(_))
        ));
        assert!(matches!(
            doc.set_text(&path(&[1, 0]), "x"),
            Err(RewriteError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_observed_mutations() {
        let mut doc = sample();
        let observer = MutationObserver::new();
        doc.observe(&observer, NodePath::root(), ObserveOptions::ALL_SUBTREE);
        assert!(doc.is_observed());

        doc.append_child(&path(&[1]), Element::new("div")).unwrap();
        let old = doc.set_text(&path(&[1, 0, 0]), "Weight: 2.27 kg").unwrap();
        assert_eq!(old, "Weight: 5 lbs");

        let records = observer.take_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, MutationKind::ChildList);
        assert_eq!(records[0].added.as_slice(), &[path(&[1, 1])]);
        assert_eq!(records[1].kind, MutationKind::CharacterData);
        assert_eq!(records[1].old_value.as_deref(), Some("Weight: 5 lbs"));
    }

    #[test]
    fn test_clone_drops_observers() {
        let mut doc = sample();
        let observer = MutationObserver::new();
        doc.observe(&observer, NodePath::root(), ObserveOptions::CHILD_LIST_SUBTREE);

        let mut copy = doc.clone();
        assert!(!copy.is_observed());
        copy.append_child(&path(&[1]), Element::new("div")).unwrap();
        assert_eq!(observer.pending(), 0);
    }
}
