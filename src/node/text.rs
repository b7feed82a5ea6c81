use super::{Located, NodeSource};
use crate::SourceLocation;

/// A span of character data inside the template tree.
///
/// The value is kept exactly as written: whitespace is not trimmed and entities are not decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    location: SourceLocation,
    value: String,
}
impl TextNode {
    /// Create a new text node at the current position of `source`.
    pub fn new(source: &impl NodeSource, value: impl Into<String>) -> Self {
        Self {
            location: source.location(),
            value: value.into(),
        }
    }

    /// Returns the text of the node.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the node holds only whitespace, or nothing.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.value.trim().is_empty()
    }
}
impl Located for TextNode {
    fn location(&self) -> &SourceLocation {
        &self.location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsePosition;

    #[test]
    fn test_value_is_untouched() {
        let position = ParsePosition::new("page.html", 2);
        let text = TextNode::new(&position, "  a &amp; b\n");

        assert_eq!(text.value(), "  a &amp; b\n");
        assert!(!text.is_whitespace());
        assert!(TextNode::new(&position, " \n\t").is_whitespace());
        assert_eq!(text.source_line(), 2);
    }
}
