use thiserror::Error;

use crate::notify::DeliveryError;

#[derive(Debug, Error)]
pub enum BlastError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("no outcomes configured: distribution is empty or has zero total weight")]
    NoOutcomesConfigured,

    #[error("Failed to fetch pending calls: {0}")]
    SourceFetch(String),

    #[error("Failed to persist call {uuid}: {message}")]
    Persistence { uuid: String, message: String },

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
