//! The `{status, code, data, message}` wrapper every catalog response uses.

use serde::{Deserialize, Serialize};

/// Outcome flag carried by every envelope. Anything other than `SUCCESS` is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    /// HTTP-like status echoed by the service. Informational only.
    #[serde(default)]
    pub code: Option<u16>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            code: Some(200),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>, code: u16) -> Self {
        Self {
            status: ResponseStatus::Error,
            code: Some(code),
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_not_success() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"status": "PENDING", "data": 1}"#).unwrap();
        assert_eq!(envelope.status, ResponseStatus::Unknown);
        assert!(!envelope.is_success());
    }

    #[test]
    fn test_null_data_decodes_as_none() {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"status": "SUCCESS", "code": 204, "data": null}"#).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.code, Some(204));
        assert_eq!(envelope.data, None);
    }
}
