//! Resolution of watched sections and TOC links against a document.

use std::collections::HashSet;
use tocspy_traits::SpyDocument;

/// A watched section that exists in the document.
#[derive(Debug, Clone)]
pub struct Section<E> {
    pub id: String,
    pub element: E,
}

/// The configured section ids that resolved to elements, in configured order.
#[derive(Debug, Clone)]
pub struct SectionSet<E> {
    sections: Vec<Section<E>>,
}

impl<E: Clone> SectionSet<E> {
    /// Resolve `ids` against the document, skipping ids with no element.
    ///
    /// Duplicate ids are resolved once, at their first position.
    pub fn resolve<D>(document: &D, ids: &[String]) -> Self
    where
        D: SpyDocument<Element = E>,
    {
        let mut seen = HashSet::new();
        let mut sections = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id.as_str()) {
                log::debug!("Section id '{}' listed more than once, ignoring repeat", id);
                continue;
            }
            match document.element_by_id(id) {
                Some(element) => sections.push(Section {
                    id: id.clone(),
                    element,
                }),
                None => log::debug!("Section '{}' not present in document", id),
            }
        }
        Self { sections }
    }

    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section<E>> {
        self.sections.iter()
    }

    pub fn first(&self) -> Option<&Section<E>> {
        self.sections.first()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    /// Position of a section in watch order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

impl<'a, E> IntoIterator for &'a SectionSet<E> {
    type Item = &'a Section<E>;
    type IntoIter = std::slice::Iter<'a, Section<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// An anchor inside the TOC container.
#[derive(Debug, Clone)]
pub struct TocLink<E> {
    pub href: Option<String>,
    pub element: E,
}

impl<E> TocLink<E> {
    /// Whether this link points at the in-page fragment `#section_id`.
    pub fn targets(&self, section_id: &str) -> bool {
        self.href
            .as_deref()
            .and_then(|href| href.strip_prefix('#'))
            .is_some_and(|fragment| fragment == section_id)
    }
}

/// All anchors inside the TOC container, in document order.
#[derive(Debug, Clone)]
pub struct TocLinks<E> {
    links: Vec<TocLink<E>>,
}

impl<E: Clone> TocLinks<E> {
    pub fn collect<D>(document: &D, container_id: &str) -> Self
    where
        D: SpyDocument<Element = E>,
    {
        let links = document
            .links_in(container_id)
            .into_iter()
            .map(|element| TocLink {
                href: document.href(&element),
                element,
            })
            .collect();
        Self { links }
    }

    pub fn empty() -> Self {
        Self { links: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TocLink<E>> {
        self.links.iter()
    }

    /// The first link targeting `section_id`.
    pub fn find(&self, section_id: &str) -> Option<&TocLink<E>> {
        self.links.iter().find(|link| link.targets(section_id))
    }
}
