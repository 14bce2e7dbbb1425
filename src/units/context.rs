//! Match context: the text around a node and the keyword gate applied to it.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::node::Node;

/// Default character budget for the context window.
pub const DEFAULT_CONTEXT_BUDGET: usize = 50;

/// Words that license a conversion when they appear near a match.
pub const MEASUREMENT_KEYWORDS: [&str; 19] = [
    "size",
    "sized",
    "dimension",
    "dimensions",
    "width",
    "height",
    "length",
    "weight",
    "mass",
    "cube",
    "volume",
    "diameter",
    "radius",
    "depth",
    "thick",
    "thickness",
    "distance",
    "measurement",
    "measurements",
];

static KEYWORD_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| MEASUREMENT_KEYWORDS.iter().copied().collect());

/// Build the visible text around `siblings[index]`.
///
/// Walks preceding siblings backward while the context is shorter than
/// `budget` chars, then takes the node's own text, then walks following
/// siblings while the context is shorter than `2 * budget`. Only non-empty
/// trimmed text nodes contribute; other nodes are stepped over. Pieces are
/// joined with single spaces.
///
/// Every piece is measured together with the space that joins it, so a
/// preceding sibling counts one char longer than its text while the
/// backward walk decides whether to continue.
///
/// Returns an empty string when `index` is out of range.
pub fn visible_context(siblings: &[Node], index: usize, budget: usize) -> String {
    let Some(node) = siblings.get(index) else {
        return String::new();
    };

    let mut before: SmallVec<[&str; 8]> = SmallVec::new();
    let mut len = 0;
    for sibling in siblings[..index].iter().rev() {
        if len >= budget {
            break;
        }
        if let Some(piece) = visible_text(sibling) {
            len += piece.chars().count() + 1;
            before.push(piece);
        }
    }

    let mut pieces: SmallVec<[&str; 16]> = before.into_iter().rev().collect();
    if let Some(own) = visible_text(node) {
        len += own.chars().count();
        pieces.push(own);
    }

    for sibling in &siblings[index + 1..] {
        if len >= budget * 2 {
            break;
        }
        if let Some(piece) = visible_text(sibling) {
            len += 1 + piece.chars().count();
            pieces.push(piece);
        }
    }

    pieces.join(" ")
}

fn visible_text(node: &Node) -> Option<&str> {
    node.as_text().map(|t| t.trimmed()).filter(|s| !s.is_empty())
}

/// Check if `context` contains a measurement keyword as a whole word.
///
/// Words are runs of alphanumerics and `_`, using Unicode classes: a keyword
/// glued to a non-ASCII letter (`widthé`) is part of a longer word and does
/// not count.
pub fn has_measurement_keyword(context: &str) -> bool {
    context
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .any(|word| KEYWORD_SET.contains(word.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Element, Node};

    fn texts(items: &[&str]) -> Vec<Node> {
        items.iter().map(|s| Node::text_node(*s)).collect()
    }

    #[test]
    fn test_context_joins_trimmed_siblings() {
        let siblings = texts(&["  Width: ", "3 ft", " wide  "]);
        assert_eq!(visible_context(&siblings, 1, 50), "Width: 3 ft wide");
    }

    #[test]
    fn test_context_skips_non_text() {
        let siblings = vec![
            Node::text_node("Height"),
            Node::from(Element::new("br")),
            Node::comment_node("weight"),
            Node::text_node("   "),
            Node::text_node("6 ft"),
        ];
        assert_eq!(visible_context(&siblings, 4, 50), "Height 6 ft");
    }

    #[test]
    fn test_context_does_not_descend() {
        let siblings = vec![
            Node::from(Element::new("label").text("Length")),
            Node::text_node("6 ft"),
        ];
        assert_eq!(visible_context(&siblings, 1, 50), "6 ft");
    }

    #[test]
    fn test_context_budget_stops_backward_walk() {
        let siblings = texts(&["far away", "0123456789", "5 ft"]);
        // "0123456789" alone reaches the budget of 10
        assert_eq!(visible_context(&siblings, 2, 10), "0123456789 5 ft");
    }

    #[test]
    fn test_context_budget_counts_trailing_space() {
        // "abcdefghi" plus its joining space fills the budget of 10, so the
        // keyword two siblings back is never reached
        let siblings = texts(&["weight", "abcdefghi", "5 ft"]);
        let context = visible_context(&siblings, 2, 10);
        assert_eq!(context, "abcdefghi 5 ft");
        assert!(!has_measurement_keyword(&context));

        // One char shorter leaves room for the keyword
        let siblings = texts(&["weight", "abcdefgh", "5 ft"]);
        assert_eq!(visible_context(&siblings, 2, 10), "weight abcdefgh 5 ft");
    }

    #[test]
    fn test_context_default_budget_boundary() {
        let filler = "x".repeat(49);
        let siblings = texts(&["Weight", filler.as_str(), "5 lbs"]);
        let context = visible_context(&siblings, 2, DEFAULT_CONTEXT_BUDGET);
        assert_eq!(context, format!("{filler} 5 lbs"));
        assert!(!has_measurement_keyword(&context));
    }

    #[test]
    fn test_context_budget_stops_forward_walk() {
        let siblings = texts(&["5 ft", "abcdefghij", "abcdefghij", "tail"]);
        // Forward walk stops once the context reaches twice the budget
        assert_eq!(visible_context(&siblings, 0, 10), "5 ft abcdefghij abcdefghij");
    }

    #[test]
    fn test_context_out_of_range() {
        assert_eq!(visible_context(&[], 0, 50), "");
    }

    #[test]
    fn test_keyword_whole_word() {
        assert!(has_measurement_keyword("Width: 3 ft"));
        assert!(has_measurement_keyword("total WEIGHT 5 lbs"));
        assert!(has_measurement_keyword("(radius) 2 in"));
        assert!(!has_measurement_keyword("diameter_3"));
        assert!(!has_measurement_keyword("widths of 3 ft"));
        assert!(!has_measurement_keyword("3 feet wide"));
        assert!(!has_measurement_keyword("heightened by 10 miles"));
        assert!(!has_measurement_keyword("widthé 3 ft"));
        assert!(!has_measurement_keyword(""));
    }
}
