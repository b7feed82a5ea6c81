use super::{Attribute, Attributes, Located, Node, NodeSource, NodeTree};
use crate::{SourceLocation, XmlnsState};

const BLOCK_SUFFIX: &str = ":block";

/// A tag in the template tree, with a name, raw attributes, children and the namespace aliases that
/// were in scope where it was parsed:
/// `<name attr="value">...</name>`
///
/// This is the node template compilation cares about; template statements are attributes on
/// elements, looked up by canonical name with [`ElementNode::get_attribute`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    name: String,
    attributes: Attributes,
    tree: NodeTree,
    xmlns: XmlnsState,
}
impl ElementNode {
    /// Create a new element at the current position of `source`, capturing its alias scope.
    pub fn new(source: &impl NodeSource, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            tree: NodeTree::new(source),
            xmlns: source.xmlns_state().clone(),
        }
    }

    /// Get the name of the element, as written.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the raw attributes of the element.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Set a raw attribute, returning the value it replaced.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(name, value)
    }

    /// Get the namespace aliases captured when the element was created.
    #[must_use]
    pub fn xmlns_state(&self) -> &XmlnsState {
        &self.xmlns
    }

    /// Append a child.
    pub fn add_child(&mut self, node: impl Into<Node>) {
        self.tree.add_child(node);
    }

    /// Get the children of the element.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        self.tree.children()
    }

    /// Returns true if the element carries the template attribute with this canonical name.
    ///
    /// See [`ElementNode::get_attribute`] for how names are matched.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.find_attribute(name).is_some()
    }

    /// Get the value of a template attribute by canonical name, such as `tal:content`.
    ///
    /// Each raw attribute name is unaliased through the element's namespace scope before comparing.
    /// On a `prefix:block` element, unprefixed attributes are also tried as `prefix:name`, so
    /// `<tal:block content="x">` answers to `tal:content`.
    ///
    /// The first matching attribute in source order wins.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.find_attribute(name).map(Attribute::value)
    }

    /// Returns true if the element has something to print between its tags.
    ///
    /// A single empty text child does not count. Only direct children are inspected.
    #[must_use]
    pub fn has_real_content(&self) -> bool {
        match self.children() {
            [] => false,
            [Node::Text(text)] => !text.value().is_empty(),
            _ => true,
        }
    }

    fn find_attribute(&self, name: &str) -> Option<&Attribute> {
        let prefix = self.node_prefix();

        self.attributes.iter().find(|attribute| {
            let key = attribute.name();
            if self.xmlns.unalias(key) == name {
                return true;
            }

            prefix.is_some_and(|prefix| self.xmlns.unalias(&format!("{prefix}:{key}")) == name)
        })
    }

    /// `prefix` of a `prefix:block` element.
    fn node_prefix(&self) -> Option<&str> {
        self.name
            .strip_suffix(BLOCK_SUFFIX)
            .filter(|prefix| !prefix.is_empty())
    }
}
impl Located for ElementNode {
    fn location(&self) -> &SourceLocation {
        self.tree.location()
    }
}
