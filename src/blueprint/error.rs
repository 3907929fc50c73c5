//! Blueprint loading errors.

use thiserror::Error;

/// Errors that can occur while reading a blueprint.
#[derive(Debug, Error)]
pub enum BlueprintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
