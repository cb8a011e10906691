use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the bills backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Message used when the backend gives no body for a failed status.
    pub fn for_status(status: u16) -> Self {
        Self::new(format!("Erreur {status}"))
    }
}
