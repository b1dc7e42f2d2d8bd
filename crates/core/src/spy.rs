//! The scroll spy state machine.
//!
//! `ScrollSpy` owns its host document and keeps the current section as an
//! explicit value. The `active` class on TOC links is a projection of that
//! value, rewritten on every sync by clearing all links and marking one.

use crate::band::TriggerBand;
use crate::config::SpyConfig;
use crate::error::SpyError;
use crate::sections::{Section, SectionSet, TocLinks};
use tocspy_traits::SpyDocument;

/// Why a spy stopped during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledReason {
    /// The TOC container is missing or holds no anchors.
    NoTocLinks,
    /// None of the configured section ids exist in the document.
    NoSections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpyState {
    Uninitialized,
    Disabled(DisabledReason),
    Active,
}

/// One visibility change delivered by the host's observer.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub section_id: String,
    pub is_intersecting: bool,
    /// Top of the section's bounding box in viewport coordinates.
    pub viewport_top: f64,
}

pub struct ScrollSpy<D: SpyDocument> {
    document: D,
    config: SpyConfig,
    band: TriggerBand,
    state: SpyState,
    links: TocLinks<D::Element>,
    sections: SectionSet<D::Element>,
    active: Option<String>,
}

impl<D: SpyDocument> std::fmt::Debug for ScrollSpy<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("host", &self.document.name())
            .field("state", &self.state)
            .field("sections", &self.sections.ids())
            .field("links", &self.links.len())
            .field("active", &self.active)
            .finish()
    }
}

impl<D: SpyDocument> ScrollSpy<D> {
    /// Create an uninitialized spy. The config is validated here.
    pub fn new(document: D, config: SpyConfig) -> Result<Self, SpyError> {
        config.validate()?;
        Ok(Self::build(document, config))
    }

    pub fn with_defaults(document: D) -> Self {
        Self::build(document, SpyConfig::default())
    }

    fn build(document: D, config: SpyConfig) -> Self {
        let band = TriggerBand::from(config.root_margin);
        Self {
            document,
            config,
            band,
            state: SpyState::Uninitialized,
            links: TocLinks::empty(),
            sections: SectionSet::empty(),
            active: None,
        }
    }

    /// Resolve TOC links and sections. Runs once; later calls return the settled state.
    pub fn initialize(&mut self) -> SpyState {
        if self.state != SpyState::Uninitialized {
            return self.state;
        }

        let links = TocLinks::collect(&self.document, &self.config.toc_container_id);
        if links.is_empty() {
            log::info!(
                "No links inside #{}, scroll spy disabled",
                self.config.toc_container_id
            );
            self.state = SpyState::Disabled(DisabledReason::NoTocLinks);
            return self.state;
        }

        let sections = SectionSet::resolve(&self.document, &self.config.section_ids);
        if sections.is_empty() {
            log::info!("No watched sections present, scroll spy disabled");
            self.state = SpyState::Disabled(DisabledReason::NoSections);
            return self.state;
        }

        log::info!(
            "Scroll spy active on {} host: {} links, {} of {} sections",
            self.document.name(),
            links.len(),
            sections.len(),
            self.config.section_ids.len()
        );
        self.links = links;
        self.sections = sections;
        self.state = SpyState::Active;
        self.state
    }

    pub fn state(&self) -> SpyState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SpyState::Active
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    pub fn band(&self) -> &TriggerBand {
        &self.band
    }

    pub fn sections(&self) -> &SectionSet<D::Element> {
        &self.sections
    }

    pub fn links(&self) -> &TocLinks<D::Element> {
        &self.links
    }

    /// Id of the section whose link is currently marked.
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn ensure_active(&self) -> Result<(), SpyError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(SpyError::NotActive)
        }
    }

    /// Apply one observer batch.
    ///
    /// Among the intersecting entries for watched sections, the top-most one
    /// wins; equal tops fall back to watch order. Returns whether a link was marked.
    pub fn handle_intersections(&mut self, entries: &[IntersectionEntry]) -> Result<bool, SpyError> {
        self.ensure_active()?;

        let winner = entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .filter_map(|entry| {
                self.sections
                    .position(&entry.section_id)
                    .map(|position| (entry, position))
            })
            .min_by(|(a, a_pos), (b, b_pos)| {
                a.viewport_top
                    .total_cmp(&b.viewport_top)
                    .then(a_pos.cmp(b_pos))
            })
            .map(|(entry, _)| entry.section_id.clone());

        match winner {
            Some(section_id) => self.sync_active(&section_id),
            None => Ok(false),
        }
    }

    /// Compute a batch from current geometry and apply it.
    ///
    /// Used by hosts without a native intersection observer, e.g. on every scroll.
    pub fn evaluate(&mut self) -> Result<bool, SpyError> {
        self.ensure_active()?;
        let entries = self.current_entries()?;
        self.handle_intersections(&entries)
    }

    /// Intersection state of every watched section against the trigger band.
    pub fn current_entries(&self) -> Result<Vec<IntersectionEntry>, SpyError> {
        let bounds = self.band.bounds(self.document.viewport_height()?);
        self.sections
            .iter()
            .map(|section| {
                let top = self.document.viewport_top(&section.element)?;
                let height = self.document.height(&section.element)?;
                Ok(IntersectionEntry {
                    section_id: section.id.clone(),
                    is_intersecting: bounds.intersects(top, height),
                    viewport_top: top,
                })
            })
            .collect()
    }

    /// The section to mark before any observer delivery.
    ///
    /// The last section whose document top is at or above the scroll offset
    /// plus `initial_offset_px`, or the first section when none is.
    pub fn initial_section(&self) -> Result<Option<&Section<D::Element>>, SpyError> {
        let reference = self.document.scroll_y()? + self.config.initial_offset_px;
        let mut current = self.sections.first();
        for section in &self.sections {
            if self.document.document_top(&section.element)? <= reference {
                current = Some(section);
            }
        }
        Ok(current)
    }

    /// Mark the link of [`initial_section`](Self::initial_section).
    pub fn apply_initial_active(&mut self) -> Result<bool, SpyError> {
        self.ensure_active()?;
        let Some(section_id) = self.initial_section()?.map(|s| s.id.clone()) else {
            return Ok(false);
        };
        log::debug!("Initial section: {}", section_id);
        self.sync_active(&section_id)
    }

    /// Clear the active class from every TOC link, then set it on the link for `section_id`.
    ///
    /// A section without a link leaves no link marked. Returns whether a link was marked.
    pub fn sync_active(&mut self, section_id: &str) -> Result<bool, SpyError> {
        self.ensure_active()?;

        let class = self.config.active_class.as_str();
        for link in self.links.iter() {
            self.document.set_class(&link.element, class, false)?;
        }

        let Some(target) = self.links.find(section_id) else {
            log::debug!("No TOC link targets #{}, no link marked", section_id);
            self.active = None;
            return Ok(false);
        };
        self.document.set_class(&target.element, class, true)?;

        if self.active.as_deref() != Some(section_id) {
            log::debug!("Active section: {}", section_id);
        }
        self.active = Some(section_id.to_string());
        Ok(true)
    }
}
