use super::{Descendants, Located, Node, NodeSource};
use crate::SourceLocation;

/// A node container: a location and an ordered list of children.
///
/// The parser returns the document root as a `NodeTree`, and every [`ElementNode`](super::ElementNode)
/// keeps its children in one. Children can be appended while the tree is built; afterwards they are
/// only reachable through the read-only [`NodeTree::children`] view.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTree {
    location: SourceLocation,
    children: Vec<Node>,
}
impl NodeTree {
    /// Create an empty container at the current position of `source`.
    pub fn new(source: &impl NodeSource) -> Self {
        Self {
            location: source.location(),
            children: vec![],
        }
    }

    /// Append a child. Any kind of node is accepted.
    pub fn add_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Get the children, in the order they were added.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over every node in the tree, depth first, in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::of_children(&self.children)
    }
}
impl Located for NodeTree {
    fn location(&self) -> &SourceLocation {
        &self.location
    }
}
