mod common;

use common::fixtures::{full_resume_page, resume_page, section_top};
use common::{TestResult, active_links, assert_only_active, link_for};
use serde_json::json;
use tocspy::{
    DisabledReason, InMemoryDocument, IntersectionEntry, ScrollSpy, SpyConfig, SpyDocument,
    SpyError, SpyState,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn active_spy(doc: InMemoryDocument) -> ScrollSpy<InMemoryDocument> {
    let mut spy = ScrollSpy::with_defaults(doc);
    assert_eq!(spy.initialize(), SpyState::Active);
    spy
}

#[test]
fn test_at_most_one_link_active_while_scrolling() -> TestResult {
    init_logging();
    let mut spy = active_spy(full_resume_page());
    spy.apply_initial_active()?;

    let mut y = 0.0;
    while y <= 8500.0 {
        spy.document().scroll_to(y);
        spy.evaluate()?;

        let active = active_links(spy.document());
        assert!(active.len() <= 1, "{} links active at scroll {}", active.len(), y);
        if let Some(section) = spy.active_section() {
            assert_eq!(active, vec![link_for(spy.document(), section)]);
        }
        y += 50.0;
    }
    Ok(())
}

#[test]
fn test_only_present_sections_are_tracked() {
    init_logging();
    let present = ["experience-title", "skills-title", "publications-title"];
    let spy = active_spy(resume_page(&present));

    assert_eq!(spy.sections().ids(), present.to_vec());
}

#[test]
fn test_no_known_sections_disables_spy() {
    init_logging();
    let mut spy = ScrollSpy::with_defaults(resume_page(&[]));

    assert_eq!(
        spy.initialize(),
        SpyState::Disabled(DisabledReason::NoSections)
    );
    assert!(matches!(spy.evaluate(), Err(SpyError::NotActive)));
    assert!(matches!(spy.apply_initial_active(), Err(SpyError::NotActive)));
    assert!(active_links(spy.document()).is_empty());
}

#[test]
fn test_missing_toc_disables_spy() {
    init_logging();
    let mut doc = InMemoryDocument::new(1000.0);
    doc.add_section("summary-title", 500.0, 40.0);

    let spy = tocspy::start(doc, SpyConfig::default()).unwrap();

    assert_eq!(spy.state(), SpyState::Disabled(DisabledReason::NoTocLinks));
    assert_eq!(spy.active_section(), None);
}

#[test]
fn test_section_in_band_becomes_active() -> TestResult {
    init_logging();
    let mut spy = active_spy(full_resume_page());
    spy.sync_active("summary-title")?;
    assert_only_active(spy.document(), "summary-title");

    // experience-title at viewport top 150: inside [100, 340] for a 1000px viewport.
    spy.document().scroll_to(section_top("experience-title") - 150.0);
    assert!(spy.evaluate()?);

    assert_eq!(spy.active_section(), Some("experience-title"));
    assert_only_active(spy.document(), "experience-title");
    Ok(())
}

#[test]
fn test_section_above_band_does_not_activate() -> TestResult {
    init_logging();
    let mut spy = active_spy(full_resume_page());

    // Every section is either above the band or below it.
    spy.document().scroll_to(section_top("experience-title") - 50.0);
    assert!(!spy.evaluate()?);
    assert_eq!(spy.active_section(), None);
    assert!(active_links(spy.document()).is_empty());
    Ok(())
}

#[test]
fn test_prescrolled_page_marks_section_at_reference_offset() -> TestResult {
    init_logging();
    let doc = full_resume_page();
    doc.scroll_to(section_top("education-title") - 100.0);

    let spy = tocspy::start(doc, SpyConfig::default())?;

    assert_eq!(spy.active_section(), Some("education-title"));
    assert_only_active(spy.document(), "education-title");
    Ok(())
}

#[test]
fn test_top_of_page_marks_first_present_section() -> TestResult {
    init_logging();
    let spy = tocspy::start(
        resume_page(&["skills-title", "projects-title"]),
        SpyConfig::default(),
    )?;

    assert_eq!(spy.active_section(), Some("skills-title"));
    assert_only_active(spy.document(), "skills-title");
    Ok(())
}

#[test]
fn test_marking_is_idempotent() -> TestResult {
    init_logging();
    let mut spy = active_spy(full_resume_page());

    spy.sync_active("certs-title")?;
    let once = active_links(spy.document());
    spy.sync_active("certs-title")?;
    let twice = active_links(spy.document());

    assert_eq!(once, twice);
    assert_only_active(spy.document(), "certs-title");
    Ok(())
}

#[test]
fn test_batch_with_two_sections_marks_top_most() -> TestResult {
    init_logging();
    let mut spy = active_spy(full_resume_page());

    let batch = [
        IntersectionEntry {
            section_id: "languages-title".to_string(),
            is_intersecting: true,
            viewport_top: 320.0,
        },
        IntersectionEntry {
            section_id: "skills-title".to_string(),
            is_intersecting: true,
            viewport_top: 110.0,
        },
        IntersectionEntry {
            section_id: "certs-title".to_string(),
            is_intersecting: false,
            viewport_top: -900.0,
        },
    ];
    assert!(spy.handle_intersections(&batch)?);

    assert_only_active(spy.document(), "skills-title");
    Ok(())
}

#[test]
fn test_json_config_with_custom_sections() -> TestResult {
    init_logging();
    let mut doc = InMemoryDocument::new(800.0);
    let nav = doc.add_container("contents");
    doc.add_link(nav, "intro");
    doc.add_link(nav, "usage");
    doc.add_section("intro", 0.0, 30.0);
    doc.add_section("usage", 1200.0, 30.0);

    let config = SpyConfig::from_json(
        &json!({
            "tocContainerId": "contents",
            "sectionIds": ["intro", "usage", "faq"],
            "activeClass": "current",
            "rootMargin": { "top": "0px", "bottom": "50%" },
            "initialOffsetPx": 0
        })
        .to_string(),
    )?;

    let mut spy = tocspy::start(doc, config)?;
    assert_eq!(spy.active_section(), Some("intro"));
    assert_eq!(spy.band().root_margin(), "-0px 0px -50% 0px");

    // usage at viewport top 200, inside the [0, 400] band.
    spy.document().scroll_to(1000.0);
    spy.evaluate()?;

    assert_eq!(spy.active_section(), Some("usage"));
    let current = spy.document().elements_with_class("current");
    assert_eq!(current.len(), 1);
    assert_eq!(spy.document().href(&current[0]).as_deref(), Some("#usage"));
    Ok(())
}

#[test]
fn test_current_section_without_link_clears_previous_marker() -> TestResult {
    init_logging();
    let mut doc = InMemoryDocument::new(1000.0);
    let toc = doc.add_container("toc");
    let summary_link = doc.add_link(toc, "summary-title");
    doc.add_section("summary-title", 0.0, 40.0);
    doc.add_section("skills-title", 1000.0, 40.0);

    let mut spy = active_spy(doc);
    spy.sync_active("summary-title")?;
    assert!(spy.document().has_class(&summary_link, "active"));

    let marked = spy.handle_intersections(&[IntersectionEntry {
        section_id: "skills-title".to_string(),
        is_intersecting: true,
        viewport_top: 150.0,
    }])?;

    assert!(!marked);
    assert_eq!(spy.active_section(), None);
    assert!(!spy.document().has_class(&summary_link, "active"));
    assert!(active_links(spy.document()).is_empty());
    Ok(())
}
