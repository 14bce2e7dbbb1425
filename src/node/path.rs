//! Child-index paths naming nodes inside a document.
//!
//! A path is the sequence of child indices walked from the document's root
//! element. The empty path names the root itself.
//!
//! Paths held across mutations go stale when siblings shift. The rebase
//! methods keep a pending path pointing at the same node after an insertion
//! or removal elsewhere in the tree.

use std::fmt;

use smallvec::SmallVec;

/// Path from the root element to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(SmallVec<[usize; 8]>);

impl NodePath {
    /// The root element's path.
    pub fn root() -> Self {
        Self(SmallVec::new())
    }

    /// Build a path from child indices.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }

    /// Child indices from the root.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Check if this is the root path.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of steps from the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of the `index`-th child of this node.
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.clone();
        path.0.push(index);
        path
    }

    /// Split into parent path and index within the parent.
    ///
    /// Returns `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, usize)> {
        let (&last, parent) = self.0.split_last()?;
        Some((Self(SmallVec::from_slice(parent)), last))
    }

    /// Check if `self` names `other` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, other: &NodePath) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Adjust after a node was inserted at `parent/index`.
    ///
    /// Paths through a later sibling shift right by one.
    pub fn rebase_insert(&mut self, parent: &NodePath, index: usize) {
        let depth = parent.depth();
        if self.depth() > depth && self.0.starts_with(&parent.0) && self.0[depth] >= index {
            self.0[depth] += 1;
        }
    }

    /// Adjust after the node at `parent/index` was removed.
    ///
    /// Returns `false` when this path named the removed node or one of its
    /// descendants; such a path no longer names anything.
    pub fn rebase_remove(&mut self, parent: &NodePath, index: usize) -> bool {
        let depth = parent.depth();
        if self.depth() <= depth || !self.0.starts_with(&parent.0) {
            return true;
        }
        match self.0[depth].cmp(&index) {
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => false,
            std::cmp::Ordering::Greater => {
                self.0[depth] -= 1;
                true
            }
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(indices: &[usize]) -> NodePath {
        NodePath::from_indices(indices.iter().copied())
    }

    #[test]
    fn test_split_and_child() {
        let p = path(&[1, 2]);
        let (parent, index) = p.split_last().unwrap();
        assert_eq!(parent, path(&[1]));
        assert_eq!(index, 2);
        assert_eq!(parent.child(index), p);
        assert!(NodePath::root().split_last().is_none());
    }

    #[test]
    fn test_ancestor() {
        assert!(NodePath::root().is_ancestor_or_self(&path(&[0, 1])));
        assert!(path(&[0]).is_ancestor_or_self(&path(&[0, 1])));
        assert!(path(&[0, 1]).is_ancestor_or_self(&path(&[0, 1])));
        assert!(!path(&[1]).is_ancestor_or_self(&path(&[0, 1])));
    }

    #[test]
    fn test_rebase_insert() {
        let mut later = path(&[1, 3, 0]);
        later.rebase_insert(&path(&[1]), 2);
        assert_eq!(later, path(&[1, 4, 0]));

        let mut earlier = path(&[1, 1]);
        earlier.rebase_insert(&path(&[1]), 2);
        assert_eq!(earlier, path(&[1, 1]));

        // Inserting at the parent level does not touch the parent itself
        let mut parent = path(&[1]);
        parent.rebase_insert(&path(&[1]), 0);
        assert_eq!(parent, path(&[1]));

        let mut other_branch = path(&[0, 5]);
        other_branch.rebase_insert(&path(&[1]), 0);
        assert_eq!(other_branch, path(&[0, 5]));
    }

    #[test]
    fn test_rebase_remove() {
        let mut later = path(&[1, 3]);
        assert!(later.rebase_remove(&path(&[1]), 1));
        assert_eq!(later, path(&[1, 2]));

        let mut inside = path(&[1, 1, 4]);
        assert!(!inside.rebase_remove(&path(&[1]), 1));

        let mut earlier = path(&[1, 0]);
        assert!(earlier.rebase_remove(&path(&[1]), 1));
        assert_eq!(earlier, path(&[1, 0]));
    }

    #[test]
    fn test_display() {
        assert_eq!(NodePath::root().to_string(), "/");
        assert_eq!(path(&[0, 2]).to_string(), "/0/2");
    }
}
