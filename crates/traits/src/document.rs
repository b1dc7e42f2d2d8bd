//! SpyDocument trait for abstracting the host page.
//!
//! The scroll spy only needs a handful of DOM operations: finding elements,
//! reading geometry and toggling a class. This trait lets the core run against
//! a real browser document or a pure in-memory model without knowing which.

use std::fmt::Debug;
use thiserror::Error;

/// Error type for host document operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("No window object available")]
    MissingWindow,

    #[error("No document object available")]
    MissingDocument,

    #[error("Host call '{operation}' failed: {message}")]
    Js { operation: String, message: String },

    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

impl HostError {
    /// Create a host call failure for the named operation.
    pub fn js(operation: impl Into<String>, message: impl Into<String>) -> Self {
        HostError::Js {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// A document the scroll spy can observe and decorate.
///
/// Methods take `&self` because the host DOM is shared and interior-mutable;
/// class toggles are visible to every holder of the document.
///
/// # Implementations
///
/// - `InMemoryDocument`: pure Rust model (always available)
/// - `BrowserDocument`: `web-sys` backed, in the wasm crate
pub trait SpyDocument: Debug {
    /// Handle to one element of the document.
    type Element: Clone + Debug;

    /// Anchor elements inside the container with the given id, in document order.
    ///
    /// Returns an empty list when the container does not exist.
    fn links_in(&self, container_id: &str) -> Vec<Self::Element>;

    /// Look up an element by its `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Raw `href` attribute of an element, if present.
    fn href(&self, element: &Self::Element) -> Option<String>;

    /// Top edge of the element relative to the document origin.
    fn document_top(&self, element: &Self::Element) -> Result<f64, HostError>;

    /// Top edge of the element relative to the viewport.
    fn viewport_top(&self, element: &Self::Element) -> Result<f64, HostError>;

    /// Rendered height of the element.
    fn height(&self, element: &Self::Element) -> Result<f64, HostError>;

    /// Current vertical scroll offset of the page.
    fn scroll_y(&self) -> Result<f64, HostError>;

    /// Height of the viewport.
    fn viewport_height(&self) -> Result<f64, HostError>;

    /// Add (`on == true`) or remove a class on the element.
    fn set_class(&self, element: &Self::Element, class: &str, on: bool) -> Result<(), HostError>;

    /// Whether the element currently carries the class.
    fn has_class(&self, element: &Self::Element, class: &str) -> bool;

    /// Returns a human-readable name for this host (for logging/debugging).
    fn name(&self) -> &'static str;
}
