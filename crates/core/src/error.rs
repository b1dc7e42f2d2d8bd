//! Error types for scroll spy operations.

use thiserror::Error;
use tocspy_traits::HostError;

#[derive(Error, Debug)]
pub enum SpyError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Host document error: {0}")]
    Host(#[from] HostError),
    #[error("Scroll spy is not active")]
    NotActive,
}
