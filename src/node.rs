//! The types of nodes that can appear in a template tree.
use crate::{SourceLocation, XmlnsState};
use std::sync::Arc;

mod attributes;
pub use attributes::*;

mod tree;
pub use tree::*;

mod element;
pub use element::*;

mod text;
pub use text::*;

mod markup;
pub use markup::*;

/// A node in the template tree. Can be any of:
/// - `Element` - a tag with attributes and children
/// - `Text` - character data
/// - `Comment` - a comment, processing instruction or CDATA section, kept verbatim
/// - `Doctype` - a DOCTYPE declaration
/// - `XmlDeclaration` - the `<?xml ...?>` declaration
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A tag node.
    Element(ElementNode),

    /// A text node.
    Text(TextNode),

    /// A comment or other markup passed through as-is.
    Comment(CommentNode),

    /// A DOCTYPE node.
    Doctype(DoctypeNode),

    /// An XML declaration node.
    XmlDeclaration(XmlDeclarationNode),
}
impl Node {
    /// Returns the element, if this is an element node.
    #[must_use]
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the text node, if this is a text node.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if this is an element node.
    #[must_use]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// Returns a short name for the kind of node, for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Element(_) => "element",
            Self::Text(_) => "text",
            Self::Comment(_) => "comment",
            Self::Doctype(_) => "doctype",
            Self::XmlDeclaration(_) => "xml declaration",
        }
    }

    /// Returns the children of the node; leaf nodes have none.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element(element) => element.children(),
            _ => &[],
        }
    }

    /// Iterate over this node and every node below it, depth first, in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}
impl Located for Node {
    fn location(&self) -> &SourceLocation {
        match self {
            Self::Element(node) => node.location(),
            Self::Text(node) => node.location(),
            Self::Comment(node) => node.location(),
            Self::Doctype(node) => node.location(),
            Self::XmlDeclaration(node) => node.location(),
        }
    }
}
impl From<ElementNode> for Node {
    fn from(node: ElementNode) -> Self {
        Self::Element(node)
    }
}
impl From<TextNode> for Node {
    fn from(node: TextNode) -> Self {
        Self::Text(node)
    }
}
impl From<CommentNode> for Node {
    fn from(node: CommentNode) -> Self {
        Self::Comment(node)
    }
}
impl From<DoctypeNode> for Node {
    fn from(node: DoctypeNode) -> Self {
        Self::Doctype(node)
    }
}
impl From<XmlDeclarationNode> for Node {
    fn from(node: XmlDeclarationNode) -> Self {
        Self::XmlDeclaration(node)
    }
}

/// Anything that remembers where in a template it was parsed from.
pub trait Located {
    /// Returns the location captured when the node was built.
    fn location(&self) -> &SourceLocation;

    /// Returns the 1-based line the node starts on.
    fn source_line(&self) -> usize {
        self.location().line()
    }

    /// Returns the name of the template file the node was parsed from.
    fn source_file(&self) -> &str {
        self.location().file()
    }
}

/// The parser state a node is built from.
///
/// Node constructors read the current location from it, and elements also capture the namespace
/// aliases in scope at that point.
pub trait NodeSource {
    /// Returns the location of the markup currently being parsed.
    fn location(&self) -> SourceLocation;

    /// Returns the namespace aliases in scope at the current position.
    fn xmlns_state(&self) -> &XmlnsState;
}

/// A plain [`NodeSource`]: a file, a line and an alias scope.
#[derive(Debug, Clone)]
pub struct ParsePosition {
    file: Arc<str>,
    line: usize,
    xmlns: XmlnsState,
}
impl ParsePosition {
    /// Create a position at `line` of `file`, with no namespace aliases in scope.
    #[must_use]
    pub fn new(file: impl Into<Arc<str>>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
            xmlns: XmlnsState::new(),
        }
    }

    /// Replace the alias scope.
    #[must_use]
    pub fn with_xmlns(mut self, xmlns: XmlnsState) -> Self {
        self.xmlns = xmlns;
        self
    }

    /// Move to another line of the same file.
    pub fn set_line(&mut self, line: usize) {
        self.line = line;
    }

    /// Replace the alias scope in place.
    pub fn set_xmlns(&mut self, xmlns: XmlnsState) {
        self.xmlns = xmlns;
    }

    /// Returns the current line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }
}
impl NodeSource for ParsePosition {
    /// # Panics
    /// Panics if the current line is 0.
    fn location(&self) -> SourceLocation {
        SourceLocation::new(Arc::clone(&self.file), self.line)
    }

    fn xmlns_state(&self) -> &XmlnsState {
        &self.xmlns
    }
}

/// Depth-first iterator over a subtree. See [`Node::descendants`] and [`NodeTree::descendants`].
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}
impl<'a> Descendants<'a> {
    pub(crate) fn of_children(children: &'a [Node]) -> Self {
        Self {
            stack: children.iter().rev().collect(),
        }
    }
}
impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
