//! Client error types
//!
//! Errors surfaced by any `EventService` implementation.

use thiserror::Error;

/// Errors that can occur when talking to the events API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Connection refused, DNS failure, reset, etc.
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timeout")]
    Timeout,

    /// Non-success status; `message` is the server's or the operation fallback
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Body did not have the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// 401 without a server message
    #[error("Please log in to continue")]
    Unauthenticated,
}

impl ClientError {
    /// Text shown to the user by a view
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Unauthenticated => Some(401),
            _ => None,
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Result type for service calls
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        let err = ClientError::Api {
            status: 409,
            message: "Already registered".to_string(),
        };
        assert_eq!(err.user_message(), "Already registered");
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn test_transport_error_display() {
        let err = ClientError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
