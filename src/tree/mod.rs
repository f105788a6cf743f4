pub mod html;

pub use html::HtmlTree;

use crate::error::TreeError;

/// Read-only access to a DOM-like document
///
/// Implementors expose element nodes through a cheap `Copy` handle. The
/// extraction code never mutates the tree, it only queries nodes, reads
/// their text and walks to parents and next siblings.
pub trait DocumentTree {
    /// Handle to a single element node
    type Node: Copy;

    /// URL of the page the tree was captured from
    fn url(&self) -> &str;

    /// All element nodes in document order
    fn elements(&self) -> Result<Vec<Self::Node>, TreeError>;

    /// Lowercase tag name of the node
    fn tag_name(&self, node: Self::Node) -> &str;

    /// Raw `class` attribute
    fn class_name(&self, node: Self::Node) -> Option<&str> {
        self.attr(node, "class")
    }

    /// Raw `id` attribute
    fn id_attr(&self, node: Self::Node) -> Option<&str> {
        self.attr(node, "id")
    }

    /// Value of an arbitrary attribute
    fn attr(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Concatenated text of the node and all its descendants
    fn text_content(&self, node: Self::Node) -> Result<String, TreeError>;

    /// Layout-aware text, when the backing tree can render one
    fn rendered_text(&self, _node: Self::Node) -> Result<Option<String>, TreeError> {
        Ok(None)
    }

    /// Parent element, if any
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next element sibling, skipping text and comment nodes
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Serialized markup of the whole document
    fn serialize(&self) -> Result<String, TreeError>;

    /// Nodes matching `pattern`, in document order, each at most once
    fn query(&self, pattern: &NodePattern) -> Result<Vec<Self::Node>, TreeError> {
        let nodes = self
            .elements()?
            .into_iter()
            .filter(|node| pattern.matches(self, *node))
            .collect();
        Ok(nodes)
    }

    /// Rendered text when it is available and non-empty, raw text otherwise
    fn preferred_text(&self, node: Self::Node) -> Result<String, TreeError> {
        match self.rendered_text(node)? {
            Some(text) if !text.is_empty() => Ok(text),
            _ => self.text_content(node),
        }
    }
}

/// Predicate over element nodes, modelled on simple CSS selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePattern {
    /// `tag`
    Tag(String),
    /// `.class`
    HasClass(String),
    /// `[class*="..."]`
    ClassContains(String),
    /// `[id*="..."]`
    IdContains(String),
    /// `[name="value"]`
    AttrEquals { name: String, value: String },
    /// Union of patterns (`a, b, c`)
    AnyOf(Vec<NodePattern>),
}

impl NodePattern {
    pub fn tag(name: &str) -> Self {
        NodePattern::Tag(name.to_string())
    }

    pub fn has_class(name: &str) -> Self {
        NodePattern::HasClass(name.to_string())
    }

    pub fn class_contains(needle: &str) -> Self {
        NodePattern::ClassContains(needle.to_string())
    }

    pub fn id_contains(needle: &str) -> Self {
        NodePattern::IdContains(needle.to_string())
    }

    pub fn attr_equals(name: &str, value: &str) -> Self {
        NodePattern::AttrEquals {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Whether `node` satisfies this pattern
    ///
    /// Substring patterns with an empty needle never match, as with CSS
    /// attribute selectors.
    pub fn matches<T: DocumentTree + ?Sized>(&self, tree: &T, node: T::Node) -> bool {
        match self {
            NodePattern::Tag(name) => tree.tag_name(node).eq_ignore_ascii_case(name),
            NodePattern::HasClass(name) => tree
                .class_name(node)
                .is_some_and(|classes| classes.split_whitespace().any(|c| c == name)),
            NodePattern::ClassContains(needle) => contains_non_empty(tree.class_name(node), needle),
            NodePattern::IdContains(needle) => contains_non_empty(tree.id_attr(node), needle),
            NodePattern::AttrEquals { name, value } => {
                tree.attr(node, name).is_some_and(|v| v == value)
            }
            NodePattern::AnyOf(patterns) => patterns.iter().any(|p| p.matches(tree, node)),
        }
    }
}

fn contains_non_empty(haystack: Option<&str>, needle: &str) -> bool {
    !needle.is_empty() && haystack.is_some_and(|h| h.contains(needle))
}
