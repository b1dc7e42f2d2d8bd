//! # tocspy
//!
//! Marks the table-of-contents link of the section currently being read.
//!
//! This crate bundles the platform-agnostic pieces:
//! - [`traits`]: the `SpyDocument` host seam and the `InMemoryDocument` host
//! - [`core`]: configuration, trigger band geometry and the `ScrollSpy` state machine
//!
//! Browsers use the `tocspy-wasm` crate, which implements `SpyDocument` over
//! the DOM. Everything else, including headless evaluation of a page model,
//! works from here.

pub use tocspy_core as core;
pub use tocspy_traits as traits;

pub use tocspy_core::{
    BandBounds, BandInset, DEFAULT_SECTION_IDS, DisabledReason, IntersectionEntry,
    RootMarginConfig, ScrollSpy, SpyConfig, SpyError, SpyState, TriggerBand,
};
pub use tocspy_traits::{HostError, InMemoryDocument, NodeId, SpyDocument};

/// Initialize a spy and, when it activates, mark its initial section.
///
/// This is the startup sequence without the host's delay; hosts with an
/// event loop schedule [`ScrollSpy::apply_initial_active`] themselves.
pub fn start<D: SpyDocument>(document: D, config: SpyConfig) -> Result<ScrollSpy<D>, SpyError> {
    let mut spy = ScrollSpy::new(document, config)?;
    match spy.initialize() {
        SpyState::Active => {
            spy.apply_initial_active()?;
        }
        state => log::debug!("Spy not started: {:?}", state),
    }
    Ok(spy)
}
