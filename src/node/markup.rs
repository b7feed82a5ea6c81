//! Leaf nodes holding markup that templates pass through untouched.
use super::{Located, NodeSource};
use crate::SourceLocation;

/// A comment, processing instruction or CDATA section, kept verbatim including its delimiters:
/// `<!-- comment -->`, `<?php echo 1 ?>`, `<![CDATA[...]]>`
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    location: SourceLocation,
    value: String,
}
impl CommentNode {
    /// Create a new comment node at the current position of `source`.
    pub fn new(source: &impl NodeSource, value: impl Into<String>) -> Self {
        Self {
            location: source.location(),
            value: value.into(),
        }
    }

    /// Returns the markup of the node.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
impl Located for CommentNode {
    fn location(&self) -> &SourceLocation {
        &self.location
    }
}

/// A document type declaration, kept verbatim:
/// `<!DOCTYPE html PUBLIC "..." "...">`
#[derive(Debug, Clone, PartialEq)]
pub struct DoctypeNode {
    location: SourceLocation,
    value: String,
}
impl DoctypeNode {
    /// Create a new doctype node at the current position of `source`.
    pub fn new(source: &impl NodeSource, value: impl Into<String>) -> Self {
        Self {
            location: source.location(),
            value: value.into(),
        }
    }

    /// Returns the markup of the declaration.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
impl Located for DoctypeNode {
    fn location(&self) -> &SourceLocation {
        &self.location
    }
}

/// The XML declaration, kept verbatim:
/// `<?xml version="1.0" encoding="utf-8"?>`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDeclarationNode {
    location: SourceLocation,
    value: String,
}
impl XmlDeclarationNode {
    /// Create a new declaration node at the current position of `source`.
    pub fn new(source: &impl NodeSource, value: impl Into<String>) -> Self {
        Self {
            location: source.location(),
            value: value.into(),
        }
    }

    /// Returns the markup of the declaration.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}
impl Located for XmlDeclarationNode {
    fn location(&self) -> &SourceLocation {
        &self.location
    }
}
