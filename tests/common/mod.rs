pub mod fixtures;

use tocspy::{InMemoryDocument, NodeId, SpyDocument};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Elements carrying the default `active` class.
pub fn active_links(doc: &InMemoryDocument) -> Vec<NodeId> {
    doc.elements_with_class("active")
}

/// The TOC anchor pointing at `#section_id`.
pub fn link_for(doc: &InMemoryDocument, section_id: &str) -> NodeId {
    doc.anchor_with_href(&format!("#{section_id}"))
        .unwrap_or_else(|| panic!("fixture has no link for {section_id}"))
}

/// Assert exactly one link is marked and it points at `section_id`.
pub fn assert_only_active(doc: &InMemoryDocument, section_id: &str) {
    let link = link_for(doc, section_id);
    assert_eq!(
        active_links(doc),
        vec![link],
        "expected only the {section_id} link to be active"
    );
    assert!(doc.has_class(&link, "active"));
}
