//! Error types for the Taskpilot client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Taskpilot client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Failures are never fatal:
/// every workflow that returns one of these is expected to be retryable
/// afterwards.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TaskpilotError {
    /// Structurally invalid input (e.g. a priority outside 1-4)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport failure (network unreachable, request could not complete)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The backend answered with a non-2xx status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend answered 2xx but the payload had an unexpected shape
    #[error("Malformed response: expected {expected} - {message}")]
    MalformedResponse {
        expected: &'static str,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TaskpilotError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates an Api error from a status code and response body
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(expected: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            expected,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is an Api error
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a MalformedResponse error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Check if retrying the same operation could reasonably succeed.
    ///
    /// Transport failures and server-side errors are transient; validation
    /// and configuration errors are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<reqwest::Error> for TaskpilotError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TaskpilotError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse {
            expected: "JSON",
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TaskpilotError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for TaskpilotError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, TaskpilotError>`.
pub type Result<T> = std::result::Result<T, TaskpilotError>;
