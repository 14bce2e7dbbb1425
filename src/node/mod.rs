//! Document tree types.
//!
//! `Document`, `Element`, `Node`, `Text` and `Comment`, plus `NodePath` for
//! naming a node from outside the tree.
//!
//! Only elements have a child collection. Text and comments are leaves; the
//! rewrite driver never tries to descend into them.

mod document;
mod element;
mod path;
mod text;

pub use document::Document;
pub use element::{Attrs, Element};
pub use path::NodePath;
pub use text::{Comment, Text};

use smallvec::SmallVec;

/// Node in a document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Box<Element>),
    Text(Text),
    Comment(Comment),
}

impl Node {
    // Generates for each variant (element -> Element, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    crate::impl_enum_accessors!(element, text, comment);

    /// Shorthand for a text node.
    pub fn text_node(content: impl Into<String>) -> Self {
        Node::Text(Text::new(content))
    }

    /// Shorthand for a comment node.
    pub fn comment_node(content: impl Into<String>) -> Self {
        Node::Comment(Comment::new(content))
    }

    /// Child collection, if this kind of node has one.
    pub fn children(&self) -> Option<&Children> {
        self.as_element().map(|e| &e.children)
    }

    /// Mutable child collection, if this kind of node has one.
    pub fn children_mut(&mut self) -> Option<&mut Children> {
        self.as_element_mut().map(|e| &mut e.children)
    }
}

impl From<Element> for Node {
    fn from(elem: Element) -> Self {
        Node::Element(Box::new(elem))
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Node::Comment(comment)
    }
}

/// Type alias for children collection.
pub type Children = SmallVec<[Node; 8]>;
