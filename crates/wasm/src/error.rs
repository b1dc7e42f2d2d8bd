//! Error handling for WASM bindings.
//!
//! Converts scroll spy errors into JavaScript-friendly errors.

use tocspy_core::SpyError;
use tocspy_traits::HostError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid configuration value
    Config,
    /// Configuration object could not be deserialized
    Json,
    /// A DOM call failed or the page has no window/document
    Host,
    /// Operation on a spy that never became active
    NotActive,
    /// A spy is already installed on this page
    AlreadyInstalled,
}

/// A JavaScript-friendly error type.
///
/// Converted into a JS `Error` with a `code` property at the boundary.
#[derive(Debug)]
pub struct WasmError {
    code: ErrorCode,
    message: String,
}

impl WasmError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Wrap a failed DOM call.
    pub fn host(operation: &str, value: JsValue) -> Self {
        HostError::js(operation, describe(&value)).into()
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for WasmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl From<SpyError> for WasmError {
    fn from(err: SpyError) -> Self {
        let code = match &err {
            SpyError::Config(_) => ErrorCode::Config,
            SpyError::Json(_) => ErrorCode::Json,
            SpyError::Host(_) => ErrorCode::Host,
            SpyError::NotActive => ErrorCode::NotActive,
        };
        Self::new(code, err.to_string())
    }
}

impl From<HostError> for WasmError {
    fn from(err: HostError) -> Self {
        Self::new(ErrorCode::Host, err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for WasmError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::new(ErrorCode::Json, err.to_string())
    }
}

impl From<WasmError> for JsValue {
    fn from(err: WasmError) -> Self {
        let js_error = js_sys::Error::new(&err.message);

        let code_str = match err.code {
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Json => "JSON_ERROR",
            ErrorCode::Host => "HOST_ERROR",
            ErrorCode::NotActive => "NOT_ACTIVE",
            ErrorCode::AlreadyInstalled => "ALREADY_INSTALLED",
        };

        js_sys::Reflect::set(&js_error, &"code".into(), &JsValue::from_str(code_str)).ok();

        js_error.into()
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
