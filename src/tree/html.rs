use crate::error::TreeError;
use crate::tree::DocumentTree;
use ego_tree::NodeId;
use scraper::{ElementRef, Html};

/// Document tree backed by a parsed HTML document
pub struct HtmlTree {
    url: String,
    html: Html,
}

impl HtmlTree {
    /// Parses a full HTML document captured from `url`
    pub fn parse(url: &str, html: &str) -> Self {
        Self::new(url, Html::parse_document(html))
    }

    pub fn new(url: &str, html: Html) -> Self {
        Self {
            url: url.to_string(),
            html,
        }
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }
}

impl DocumentTree for HtmlTree {
    type Node = NodeId;

    fn url(&self) -> &str {
        &self.url
    }

    fn elements(&self) -> Result<Vec<NodeId>, TreeError> {
        let nodes = self
            .html
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(|el| el.id())
            .collect::<Vec<_>>();
        ::log::trace!("HTML tree holds {} elements", nodes.len());
        Ok(nodes)
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.element(node).map_or("", |el| el.value().name())
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|el| el.value().attr(name))
    }

    fn text_content(&self, node: NodeId) -> Result<String, TreeError> {
        self.element(node)
            .map(|el| el.text().collect::<String>())
            .ok_or_else(|| TreeError::TextRead(format!("{:?} is not an element", node)))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?
            .parent()
            .and_then(ElementRef::wrap)
            .map(|el| el.id())
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?
            .next_siblings()
            .find_map(ElementRef::wrap)
            .map(|el| el.id())
    }

    fn serialize(&self) -> Result<String, TreeError> {
        Ok(self.html.root_element().html())
    }
}
