//! Engine Errors
//!
//! Error type crossing the engine/backend boundary.

use serde::{Deserialize, Serialize};

const GENERIC_MESSAGE: &str = "An error occurred. Please try again.";

/// Error reported by the persistence backend.
///
/// Carries the server's field-level messages when the response body had
/// any, otherwise a single generic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendError {
    pub messages: Vec<String>,
}

impl BackendError {
    pub fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    pub fn generic() -> Self {
        Self { messages: vec![GENERIC_MESSAGE.to_string()] }
    }

    /// All messages joined for a blocking alert
    pub fn message(&self) -> String {
        if self.messages.is_empty() {
            GENERIC_MESSAGE.to_string()
        } else {
            self.messages.join("\n")
        }
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BackendError {}
