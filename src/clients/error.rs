//! Error types for the catalog API client.

use thiserror::Error;

/// Message surfaced when a failure carries no message of its own.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Errors that can occur while talking to the catalog service.
///
/// Transport and HTTP failures come from below the envelope; `Application` is the
/// canonical failure signal, raised when the envelope status is not `SUCCESS`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response whose body was not a readable envelope.
    #[error("HTTP {status}")]
    Http { status: u16 },

    /// 2xx response whose body was not a readable envelope.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The envelope status was not `SUCCESS`.
    #[error("Catalog error: {}", message.as_deref().unwrap_or(GENERIC_FAILURE))]
    Application { message: Option<String> },

    /// A successful envelope arrived without the data it should carry.
    #[error("Response carried no data")]
    MissingData,
}

impl ApiError {
    /// Text to show the user: the service's own message when it sent one, else a
    /// generic fallback.
    pub fn user_message(&self) -> String {
        self.message_or(GENERIC_FAILURE)
    }

    /// The service's own message when it sent one, else `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Application { message: Some(message) } if !message.trim().is_empty() => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_envelope_message() {
        let err = ApiError::Application { message: Some("Product not found with id: 9".into()) };
        assert_eq!(err.user_message(), "Product not found with id: 9");

        let err = ApiError::Application { message: None };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
        assert_eq!(ApiError::Http { status: 502 }.user_message(), GENERIC_FAILURE);
    }
}
