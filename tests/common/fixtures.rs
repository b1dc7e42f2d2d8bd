use tocspy::{DEFAULT_SECTION_IDS, InMemoryDocument};

pub const VIEWPORT_HEIGHT: f64 = 1000.0;
pub const SECTION_HEIGHT: f64 = 40.0;

/// Document top of a default section, by its position in the default list.
pub fn section_top(section_id: &str) -> f64 {
    let index = DEFAULT_SECTION_IDS
        .iter()
        .position(|id| *id == section_id)
        .unwrap_or_else(|| panic!("{section_id} is not a default section"));
    500.0 + index as f64 * 1000.0
}

/// A resume page: a `#toc` with a link for every default section, and the
/// `present` sections laid out 1000px apart starting at 500px.
pub fn resume_page(present: &[&str]) -> InMemoryDocument {
    let mut doc = InMemoryDocument::new(VIEWPORT_HEIGHT);
    let toc = doc.add_container("toc");
    let list = doc.add_child(toc);
    for id in DEFAULT_SECTION_IDS {
        let item = doc.add_child(list);
        doc.add_link(item, id);
    }
    for id in DEFAULT_SECTION_IDS.iter().filter(|id| present.contains(*id)) {
        doc.add_section(id, section_top(id), SECTION_HEIGHT);
    }
    doc
}

/// A resume page with every default section present.
pub fn full_resume_page() -> InMemoryDocument {
    resume_page(&DEFAULT_SECTION_IDS)
}
