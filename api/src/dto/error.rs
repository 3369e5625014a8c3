//! Error response body shared by all failing endpoints.

use serde::{Deserialize, Serialize};

/// `{status, message}` body carried by every failure response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status code
    pub status: u16,
    /// Enumerated, human-readable failure message
    pub message: String,
}

impl ErrorBody {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
