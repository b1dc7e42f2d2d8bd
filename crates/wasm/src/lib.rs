//! WebAssembly bindings for the tocspy scroll spy.
//!
//! This crate runs [`tocspy_core::ScrollSpy`] inside a browser page: as the
//! reader scrolls, the TOC link for the current section gets the `active`
//! class.
//!
//! # Architecture
//!
//! The decision logic lives in `tocspy-core` and never touches the DOM. This
//! crate supplies the browser side of the seam:
//!
//! - [`document`] - `BrowserDocument`, the `SpyDocument` implementation over `web-sys`
//! - [`install`] - `DOMContentLoaded`, `IntersectionObserver` and `setTimeout` wiring
//! - [`error`] - Error types with JavaScript interop
//!
//! Callbacks are serialized on the page's single thread, so the spy is shared
//! between them as `Rc<RefCell<_>>`. Nothing is ever torn down.
//!
//! # Features
//!
//! - `auto-start` (default): install with the default configuration when the module loads
//! - `console-logging`: route `log` output to the browser console
//!
//! # Example
//!
//! With `auto-start` disabled:
//!
//! ```javascript
//! import init, { installScrollSpy } from '@tocspy/wasm';
//!
//! await init();
//!
//! installScrollSpy({
//!   tocContainerId: 'toc',
//!   sectionIds: ['summary-title', 'experience-title'],
//!   rootMargin: { top: '100px', bottom: '66%' },
//! });
//! ```

pub mod document;
pub mod error;
pub mod install;

pub use document::BrowserDocument;
pub use error::{ErrorCode, WasmError};
pub use install::{Installation, WatchMode, install, install_when_ready};

use tocspy_core::SpyConfig;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up panic hooks and, with the `auto-start` feature, installs the spy.
/// It is called automatically when using wasm-pack's generated JavaScript.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Debug).ok();
    }

    #[cfg(feature = "auto-start")]
    {
        if let Err(e) = install_when_ready(SpyConfig::default()) {
            log::warn!("Scroll spy not started: {}", e);
        }
    }
}

/// Install a scroll spy with the given configuration.
///
/// `config` may be `undefined` or a partial object; missing fields take their
/// defaults. Throws an `Error` with a `code` property on invalid configuration,
/// and with `ALREADY_INSTALLED` when a spy already runs on the page. With the
/// default `auto-start` feature the module installs one itself, so build
/// without it to configure the spy from JavaScript.
#[wasm_bindgen(js_name = installScrollSpy)]
pub fn install_scroll_spy(config: JsValue) -> Result<(), JsValue> {
    let config: SpyConfig = if config.is_undefined() || config.is_null() {
        SpyConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(WasmError::from)?
    };
    install_when_ready(config)?;
    Ok(())
}

/// The default configuration as a plain object.
#[wasm_bindgen(js_name = defaultConfig)]
pub fn default_config() -> Result<JsValue, JsValue> {
    let value = serde_wasm_bindgen::to_value(&SpyConfig::default()).map_err(WasmError::from)?;
    Ok(value)
}

/// Get the version of the tocspy-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
