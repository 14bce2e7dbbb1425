//! Leaf node types
//!
//! Text content nodes and comments. Neither kind has children.

// =============================================================================
// Text
// =============================================================================

/// Text content node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text {
    /// Text content
    pub content: String,
}

impl Text {
    /// Create a new text node
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Check if text content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get text length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if text is only whitespace
    pub fn is_whitespace(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Get trimmed content
    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    /// Replace the content, returning the old value
    pub fn replace(&mut self, content: impl Into<String>) -> String {
        std::mem::replace(&mut self.content, content.into())
    }
}

// =============================================================================
// Comment
// =============================================================================

/// Comment node. Not visible text; never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comment {
    /// Comment body without the `<!--` `-->` delimiters
    pub content: String,
}

impl Comment {
    /// Create a new comment node
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
