//! In-memory document host.
//!
//! A small, flat model of a page: positioned elements with optional ids,
//! anchors with `href`s, a scroll offset and a viewport. Works anywhere,
//! which makes it the host for native tests and headless evaluation.

use crate::document::{HostError, SpyDocument};
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

/// Handle to an element inside an [`InMemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    id: Option<String>,
    parent: Option<NodeId>,
    anchor: bool,
    href: Option<String>,
    top: f64,
    height: f64,
}

/// An in-memory document.
///
/// Geometry is static except for the scroll offset, which can be moved with
/// [`InMemoryDocument::scroll_to`] through a shared reference.
#[derive(Debug)]
pub struct InMemoryDocument {
    nodes: Vec<Node>,
    classes: RefCell<Vec<BTreeSet<String>>>,
    scroll_y: Cell<f64>,
    viewport_height: f64,
}

impl InMemoryDocument {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            nodes: Vec::new(),
            classes: RefCell::new(Vec::new()),
            scroll_y: Cell::new(0.0),
            viewport_height,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.classes.borrow_mut().push(BTreeSet::new());
        NodeId(self.nodes.len() - 1)
    }

    /// Add a plain element with an id, e.g. a navigation container.
    pub fn add_container(&mut self, id: &str) -> NodeId {
        self.push(Node {
            id: Some(id.to_string()),
            parent: None,
            anchor: false,
            href: None,
            top: 0.0,
            height: 0.0,
        })
    }

    /// Add a nested, unnamed element under `parent` (e.g. a `<li>`).
    pub fn add_child(&mut self, parent: NodeId) -> NodeId {
        self.push(Node {
            id: None,
            parent: Some(parent),
            anchor: false,
            href: None,
            top: 0.0,
            height: 0.0,
        })
    }

    /// Add an anchor under `parent`, optionally without an `href`.
    pub fn add_anchor(&mut self, parent: NodeId, href: Option<&str>) -> NodeId {
        self.push(Node {
            id: None,
            parent: Some(parent),
            anchor: true,
            href: href.map(str::to_string),
            top: 0.0,
            height: 0.0,
        })
    }

    /// Add an anchor pointing at `#target` under `parent`.
    pub fn add_link(&mut self, parent: NodeId, target: &str) -> NodeId {
        let href = format!("#{target}");
        self.add_anchor(parent, Some(&href))
    }

    /// Add a section element at a document offset.
    pub fn add_section(&mut self, id: &str, top: f64, height: f64) -> NodeId {
        self.push(Node {
            id: Some(id.to_string()),
            parent: None,
            anchor: false,
            href: None,
            top,
            height,
        })
    }

    /// Move the page's vertical scroll offset.
    pub fn scroll_to(&self, y: f64) {
        self.scroll_y.set(y);
    }

    /// All elements currently carrying `class`, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.classes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, set)| set.contains(class))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// First anchor whose `href` is exactly `href`.
    pub fn anchor_with_href(&self, href: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.anchor && n.href.as_deref() == Some(href))
            .map(NodeId)
    }

    fn node(&self, element: &NodeId) -> Result<&Node, HostError> {
        self.nodes
            .get(element.0)
            .ok_or_else(|| HostError::UnknownElement(format!("node #{}", element.0)))
    }

    fn is_descendant_of(&self, node: &Node, ancestor: NodeId) -> bool {
        let mut cursor = node.parent;
        while let Some(parent) = cursor {
            if parent == ancestor {
                return true;
            }
            cursor = self.nodes.get(parent.0).and_then(|p| p.parent);
        }
        false
    }
}

impl SpyDocument for InMemoryDocument {
    type Element = NodeId;

    fn links_in(&self, container_id: &str) -> Vec<NodeId> {
        let Some(container) = self.element_by_id(container_id) else {
            return Vec::new();
        };
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.anchor && self.is_descendant_of(n, container))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn href(&self, element: &NodeId) -> Option<String> {
        self.nodes.get(element.0).and_then(|n| n.href.clone())
    }

    fn document_top(&self, element: &NodeId) -> Result<f64, HostError> {
        Ok(self.node(element)?.top)
    }

    fn viewport_top(&self, element: &NodeId) -> Result<f64, HostError> {
        Ok(self.node(element)?.top - self.scroll_y.get())
    }

    fn height(&self, element: &NodeId) -> Result<f64, HostError> {
        Ok(self.node(element)?.height)
    }

    fn scroll_y(&self) -> Result<f64, HostError> {
        Ok(self.scroll_y.get())
    }

    fn viewport_height(&self) -> Result<f64, HostError> {
        Ok(self.viewport_height)
    }

    fn set_class(&self, element: &NodeId, class: &str, on: bool) -> Result<(), HostError> {
        let mut classes = self.classes.borrow_mut();
        let set = classes
            .get_mut(element.0)
            .ok_or_else(|| HostError::UnknownElement(format!("node #{}", element.0)))?;
        if on {
            set.insert(class.to_string());
        } else {
            set.remove(class);
        }
        Ok(())
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.classes
            .borrow()
            .get(element.0)
            .is_some_and(|set| set.contains(class))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_in_collects_nested_anchors_in_order() {
        let mut doc = InMemoryDocument::new(800.0);
        let toc = doc.add_container("toc");
        let item = doc.add_child(toc);
        let first = doc.add_link(item, "a");
        let second = doc.add_link(toc, "b");
        let outside = doc.add_container("footer");
        doc.add_link(outside, "c");

        assert_eq!(doc.links_in("toc"), vec![first, second]);
    }

    #[test]
    fn test_links_in_missing_container_is_empty() {
        let mut doc = InMemoryDocument::new(800.0);
        let nav = doc.add_container("nav");
        doc.add_link(nav, "a");

        assert!(doc.links_in("toc").is_empty());
    }

    #[test]
    fn test_viewport_top_follows_scroll() {
        let mut doc = InMemoryDocument::new(800.0);
        let section = doc.add_section("intro", 1200.0, 40.0);

        assert_eq!(doc.viewport_top(&section).unwrap(), 1200.0);
        doc.scroll_to(1000.0);
        assert_eq!(doc.viewport_top(&section).unwrap(), 200.0);
        assert_eq!(doc.document_top(&section).unwrap(), 1200.0);
    }

    #[test]
    fn test_set_class_toggles() {
        let mut doc = InMemoryDocument::new(800.0);
        let toc = doc.add_container("toc");
        let link = doc.add_link(toc, "a");

        doc.set_class(&link, "active", true).unwrap();
        assert!(doc.has_class(&link, "active"));
        assert_eq!(doc.elements_with_class("active"), vec![link]);

        doc.set_class(&link, "active", false).unwrap();
        assert!(!doc.has_class(&link, "active"));
    }

    #[test]
    fn test_unknown_element_is_reported() {
        let doc = InMemoryDocument::new(800.0);
        let result = doc.set_class(&NodeId(7), "active", true);
        assert!(matches!(result, Err(HostError::UnknownElement(_))));
        assert!(doc.height(&NodeId(7)).is_err());
    }

    #[test]
    fn test_anchor_with_href_returns_first_match() {
        let mut doc = InMemoryDocument::new(800.0);
        let toc = doc.add_container("toc");
        let first = doc.add_link(toc, "a");
        doc.add_link(toc, "a");

        assert_eq!(doc.anchor_with_href("#a"), Some(first));
        assert_eq!(doc.anchor_with_href("#b"), None);
    }
}
