//! Element type - tagged container nodes
//!
//! The building block of the document tree. Elements own their children;
//! sibling navigation happens through the parent's child slice.

use compact_str::CompactString;

use super::{Children, Comment, Node, Text};

/// Element attributes as key-value pairs, in source order
pub type Attrs = Vec<(CompactString, String)>;

// =============================================================================
// Element
// =============================================================================

/// HTML element with attributes and children
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    /// Tag name
    pub tag: CompactString,
    /// Element attributes
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Children::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder API
    // ─────────────────────────────────────────────────────────────────────────

    /// Add an attribute (builder)
    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element (builder)
    pub fn child(mut self, elem: Element) -> Self {
        self.push_elem(elem);
        self
    }

    /// Append a text child (builder)
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.push_text(content);
        self
    }

    /// Append a comment child (builder)
    pub fn comment(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::Comment(Comment::new(content)));
        self
    }

    /// Append a child element
    pub fn push_elem(&mut self, elem: Element) {
        self.children.push(Node::Element(Box::new(elem)));
    }

    /// Append a text child
    pub fn push_text(&mut self, content: impl Into<String>) {
        self.children.push(Node::Text(Text::new(content)));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set attribute value (update if exists, add if not)
    pub fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            attr.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Children
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types)
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// First direct child element
    pub fn first_child(&self) -> Option<&Element> {
        self.children.iter().find_map(Node::as_element)
    }

    /// Iterate over child element references
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Get text content of this element (concatenated from all text nodes)
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, buf: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => buf.push_str(&t.content),
                Node::Element(e) => e.collect_text(buf),
                Node::Comment(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::new("div");
        assert_eq!(elem.tag.as_str(), "div");
        assert!(elem.is_empty());
        assert_eq!(elem.len(), 0);
    }

    #[test]
    fn test_element_builder() {
        let elem = Element::new("div")
            .attr("class", "chart")
            .child(Element::new("span").text("Width:"))
            .text(" 3 ft")
            .comment("ignored");

        assert_eq!(elem.get_attr("class"), Some("chart"));
        assert_eq!(elem.len(), 3);
        assert_eq!(elem.first_child().map(|e| e.tag.as_str()), Some("span"));
        assert_eq!(elem.text_content(), "Width: 3 ft");
    }

    #[test]
    fn test_set_attr_updates_in_place() {
        let mut elem = Element::new("td").attr("class", "a");
        elem.set_attr("class", "b");
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.get_attr("class"), Some("b"));
        assert_eq!(elem.get_attr("id"), None);
    }
}
