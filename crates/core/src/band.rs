//! Trigger band geometry.
//!
//! The trigger band is the strip of the viewport in which a section counts as
//! current. It is expressed to the browser as an IntersectionObserver root
//! margin and evaluated natively through [`BandBounds`].

use crate::config::{BandInset, RootMarginConfig};

/// The viewport strip between a top inset and a bottom inset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerBand {
    top: BandInset,
    bottom: BandInset,
}

/// A trigger band resolved against a concrete viewport, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandBounds {
    pub top: f64,
    pub bottom: f64,
}

impl TriggerBand {
    pub fn new(top: BandInset, bottom: BandInset) -> Self {
        Self { top, bottom }
    }

    /// CSS root margin shrinking the viewport to the band, e.g. `-100px 0px -66% 0px`.
    pub fn root_margin(&self) -> String {
        format!("-{} 0px -{} 0px", self.top, self.bottom)
    }

    pub fn bounds(&self, viewport_height: f64) -> BandBounds {
        BandBounds {
            top: self.top.resolve(viewport_height),
            bottom: viewport_height - self.bottom.resolve(viewport_height),
        }
    }
}

impl Default for TriggerBand {
    fn default() -> Self {
        RootMarginConfig::default().into()
    }
}

impl From<RootMarginConfig> for TriggerBand {
    fn from(margin: RootMarginConfig) -> Self {
        Self::new(margin.top, margin.bottom)
    }
}

impl BandBounds {
    /// Whether the band has no extent (insets overlap on a short viewport).
    pub fn is_empty(&self) -> bool {
        self.bottom < self.top
    }

    /// Threshold-0 intersection test for a box starting at `top` with `height`.
    ///
    /// Edge-adjacent boxes count as intersecting, as they do for IntersectionObserver.
    pub fn intersects(&self, top: f64, height: f64) -> bool {
        if self.is_empty() {
            return false;
        }
        let bottom = top + height.max(0.0);
        top <= self.bottom && bottom >= self.top
    }
}
