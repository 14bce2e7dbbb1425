//! HTML Rendering for documents
//!
//! Serializes a document, or any subtree, to an HTML string. Used to look at
//! the result of a rewrite pass.

use crate::node::{Attrs, Document, Element, Node};

// =============================================================================
// RenderConfig
// =============================================================================

/// Configuration for HTML rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Drop whitespace-only text nodes.
    pub minify: bool,
    /// Emit comment nodes.
    pub comments: bool,
}

impl RenderConfig {
    /// Faithful output: all text and comments.
    pub const FULL: Self = Self {
        minify: false,
        comments: true,
    };

    /// Compact output: no whitespace-only text, no comments.
    pub const COMPACT: Self = Self {
        minify: true,
        comments: false,
    };
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::FULL
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render a document to HTML string.
pub fn render_document(doc: &Document, config: &RenderConfig) -> String {
    let mut output = String::new();
    render_element(&doc.root, config, &mut output);
    output
}

/// Render a single node (and its subtree) to HTML string.
pub fn render_node(node: &Node, config: &RenderConfig) -> String {
    let mut output = String::new();
    render_into(node, config, &mut output);
    output
}

fn render_element(elem: &Element, config: &RenderConfig, output: &mut String) {
    output.push('<');
    output.push_str(&elem.tag);
    render_attrs(&elem.attrs, output);

    if is_void_element(&elem.tag) {
        output.push_str(" />");
        return;
    }

    output.push('>');
    for child in &elem.children {
        render_into(child, config, output);
    }
    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
}

fn render_into(node: &Node, config: &RenderConfig, output: &mut String) {
    match node {
        Node::Element(elem) => render_element(elem, config, output),
        Node::Text(text) => {
            if !(config.minify && text.is_whitespace()) {
                output.push_str(&escape_html(&text.content));
            }
        }
        Node::Comment(comment) => {
            if config.comments {
                output.push_str("<!--");
                output.push_str(&comment.content);
                output.push_str("-->");
            }
        }
    }
}

fn render_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        output.push_str(&escape_attr(value));
        output.push('"');
    }
}

/// Escape HTML special characters in text.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape attribute value special characters.
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '<' => result.push_str("&lt;"),
            _ => result.push(c),
        }
    }
    result
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::UnitRewriter;

    fn sample() -> Document {
        Document::new(
            Element::new("body")
                .child(
                    Element::new("p")
                        .attr("title", "5\" & up")
                        .text("Diameter < 5\""),
                )
                .child(Element::new("br"))
                .text("\n  ")
                .comment(" size chart "),
        )
    }

    #[test]
    fn test_render_full() {
        let html = render_document(&sample(), &RenderConfig::default());
        assert_eq!(
            html,
            "<body><p title=\"5&quot; &amp; up\">Diameter &lt; 5\"</p><br />\n  <!-- size chart --></body>"
        );
    }

    #[test]
    fn test_render_compact() {
        let html = render_document(&sample(), &RenderConfig::COMPACT);
        assert_eq!(
            html,
            "<body><p title=\"5&quot; &amp; up\">Diameter &lt; 5\"</p><br /></body>"
        );
    }

    #[test]
    fn test_render_after_rewrite() {
        let mut doc = sample();
        UnitRewriter::new().rewrite_document(&mut doc);
        let html = render_document(&doc, &RenderConfig::COMPACT);
        assert!(html.contains(">Diameter &lt; 12.70 cm</p>"));
        // Attributes are not text nodes
        assert!(html.contains("title=\"5&quot; &amp; up\""));
    }

    #[test]
    fn test_render_node() {
        let node = Node::from(Element::new("em").text("3 ft"));
        assert_eq!(render_node(&node, &RenderConfig::FULL), "<em>3 ft</em>");
        assert_eq!(render_node(&Node::text_node("a&b"), &RenderConfig::FULL), "a&amp;b");
    }
}
