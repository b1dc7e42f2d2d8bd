//! Scroll spy configuration.
//!
//! Every field has a default matching the stock page layout, so an empty JSON
//! object (or no config at all) gives the standard behavior.

use crate::error::SpyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Section ids watched by default, in document order.
pub const DEFAULT_SECTION_IDS: [&str; 8] = [
    "summary-title",
    "experience-title",
    "education-title",
    "certs-title",
    "skills-title",
    "languages-title",
    "projects-title",
    "publications-title",
];

/// An inward inset of the trigger band, in pixels or percent of the viewport height.
///
/// Serialized as a CSS-like length string: `"100px"` or `"66%"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BandInset {
    Px(f64),
    Percent(f64),
}

impl BandInset {
    /// Resolve the inset to pixels against a viewport extent.
    pub fn resolve(&self, extent: f64) -> f64 {
        match self {
            BandInset::Px(px) => *px,
            BandInset::Percent(pct) => extent * pct / 100.0,
        }
    }

    fn validate(&self, edge: &str) -> Result<(), SpyError> {
        let value = match self {
            BandInset::Px(v) | BandInset::Percent(v) => *v,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(SpyError::Config(format!(
                "{edge} inset must be a non-negative finite length, got {self}"
            )));
        }
        if let BandInset::Percent(pct) = self {
            if *pct > 100.0 {
                return Err(SpyError::Config(format!(
                    "{edge} inset percentage must be within 0..=100, got {self}"
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for BandInset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandInset::Px(px) => write!(f, "{px}px"),
            BandInset::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

impl FromStr for BandInset {
    type Err = SpyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (number, ctor): (&str, fn(f64) -> BandInset) = if let Some(n) = s.strip_suffix("px") {
            (n, BandInset::Px)
        } else if let Some(n) = s.strip_suffix('%') {
            (n, BandInset::Percent)
        } else {
            return Err(SpyError::Config(format!(
                "Invalid inset '{s}': expected a 'px' or '%' length"
            )));
        };
        number
            .trim()
            .parse::<f64>()
            .map(ctor)
            .map_err(|e| SpyError::Config(format!("Invalid inset '{s}': {e}")))
    }
}

impl TryFrom<String> for BandInset {
    type Error = SpyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BandInset> for String {
    fn from(inset: BandInset) -> Self {
        inset.to_string()
    }
}

/// Top and bottom insets that carve the trigger band out of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RootMarginConfig {
    pub top: BandInset,
    pub bottom: BandInset,
}

impl Default for RootMarginConfig {
    fn default() -> Self {
        Self {
            top: BandInset::Px(100.0),
            bottom: BandInset::Percent(66.0),
        }
    }
}

/// Configuration for a [`ScrollSpy`](crate::ScrollSpy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpyConfig {
    /// Id of the navigation container holding the TOC anchors.
    pub toc_container_id: String,
    /// Section ids to watch, in document order.
    pub section_ids: Vec<String>,
    /// Class toggled on the active TOC anchor.
    pub active_class: String,
    pub root_margin: RootMarginConfig,
    /// Added to the scroll offset when picking the initial section.
    pub initial_offset_px: f64,
    /// Delay before the initial section is marked.
    pub initial_delay_ms: u32,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            toc_container_id: "toc".to_string(),
            section_ids: DEFAULT_SECTION_IDS.iter().map(|s| s.to_string()).collect(),
            active_class: "active".to_string(),
            root_margin: RootMarginConfig::default(),
            initial_offset_px: 150.0,
            initial_delay_ms: 100,
        }
    }
}

impl SpyConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SpyError> {
        let config: SpyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SpyError> {
        if self.toc_container_id.trim().is_empty() {
            return Err(SpyError::Config("tocContainerId must not be empty".into()));
        }
        if self.active_class.trim().is_empty() || self.active_class.contains(char::is_whitespace)
        {
            return Err(SpyError::Config(format!(
                "activeClass must be a single class name, got '{}'",
                self.active_class
            )));
        }
        if self.section_ids.is_empty() {
            return Err(SpyError::Config("sectionIds must not be empty".into()));
        }
        if let Some(blank) = self.section_ids.iter().find(|id| id.trim().is_empty()) {
            return Err(SpyError::Config(format!(
                "sectionIds must not contain blank ids, got '{blank}'"
            )));
        }
        if !self.initial_offset_px.is_finite() {
            return Err(SpyError::Config(format!(
                "initialOffsetPx must be finite, got {}",
                self.initial_offset_px
            )));
        }
        self.root_margin.top.validate("top")?;
        self.root_margin.bottom.validate("bottom")?;
        Ok(())
    }
}
