//! `SpyDocument` implementation over the browser DOM.

use crate::error::describe;
use tocspy_traits::{HostError, SpyDocument};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

/// The live page, seen through `web-sys`.
#[derive(Debug, Clone)]
pub struct BrowserDocument {
    window: Window,
    document: Document,
}

impl BrowserDocument {
    /// Bind to the global `window` and its `document`.
    pub fn from_window() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::MissingWindow)?;
        let document = window.document().ok_or(HostError::MissingDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl SpyDocument for BrowserDocument {
    type Element = Element;

    fn links_in(&self, container_id: &str) -> Vec<Element> {
        let Some(container) = self.document.get_element_by_id(container_id) else {
            return Vec::new();
        };
        let nodes = match container.query_selector_all("a") {
            Ok(nodes) => nodes,
            Err(e) => {
                log::warn!("Could not list links in #{}: {}", container_id, describe(&e));
                return Vec::new();
            }
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn href(&self, element: &Element) -> Option<String> {
        element.get_attribute("href")
    }

    fn document_top(&self, element: &Element) -> Result<f64, HostError> {
        Ok(element.get_bounding_client_rect().top() + self.scroll_y()?)
    }

    fn viewport_top(&self, element: &Element) -> Result<f64, HostError> {
        Ok(element.get_bounding_client_rect().top())
    }

    fn height(&self, element: &Element) -> Result<f64, HostError> {
        Ok(element.get_bounding_client_rect().height())
    }

    fn scroll_y(&self) -> Result<f64, HostError> {
        self.window
            .scroll_y()
            .map_err(|e| HostError::js("scrollY", describe(&e)))
    }

    fn viewport_height(&self) -> Result<f64, HostError> {
        self.window
            .inner_height()
            .map_err(|e| HostError::js("innerHeight", describe(&e)))?
            .as_f64()
            .ok_or_else(|| HostError::js("innerHeight", "value is not a number"))
    }

    fn set_class(&self, element: &Element, class: &str, on: bool) -> Result<(), HostError> {
        let classes = element.class_list();
        let result = if on {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        result.map_err(|e| HostError::js("classList", describe(&e)))
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}
