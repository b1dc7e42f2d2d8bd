//! # tocspy-core
//!
//! Platform-agnostic scroll spy for a table-of-contents panel.
//!
//! This crate decides which TOC link should be marked as the reader scrolls:
//! - **config**: `SpyConfig`, section ids, trigger band insets, delays
//! - **band**: trigger band geometry and its CSS root margin
//! - **sections**: resolution of watched sections and TOC anchors
//! - **spy**: the `ScrollSpy` state machine
//! - **error**: error types
//!
//! ## Design Principle
//!
//! The core never touches a real DOM. Every host interaction goes through
//! [`tocspy_traits::SpyDocument`], so the same logic runs in a browser
//! (through the wasm crate) and against an `InMemoryDocument` in tests.

pub use tocspy_traits as traits;

pub mod band;
pub mod config;
pub mod error;
pub mod sections;
pub mod spy;

pub use band::{BandBounds, TriggerBand};
pub use config::{BandInset, DEFAULT_SECTION_IDS, RootMarginConfig, SpyConfig};
pub use error::SpyError;
pub use sections::{Section, SectionSet, TocLink, TocLinks};
pub use spy::{DisabledReason, IntersectionEntry, ScrollSpy, SpyState};
