//! Errors raised while talking to the notification hub

use brio_common::{config_error, external_service_error, validation_error, BrioError};
use thiserror::Error;

/// Longest upstream body excerpt kept in errors and responses
pub const MAX_UPSTREAM_TEXT: usize = 500;

/// Errors that can occur when signing or dispatching hub requests
#[derive(Error, Debug)]
pub enum NotificationError {
    /// Missing or malformed connection string, hub name or key
    #[error("Notification hub configuration error: {0}")]
    ConfigError(String),

    /// The caller's request is incomplete
    #[error("Invalid request: {0}")]
    ValidationError(String),

    /// The hub could not be reached (timeout, DNS, connection reset)
    #[error("Notification hub unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The hub answered with a non-2xx status
    #[error("Notification hub answered {status} {reason}: {text}")]
    Upstream {
        status: u16,
        reason: String,
        text: String,
    },
}

impl From<NotificationError> for BrioError {
    fn from(err: NotificationError) -> Self {
        match err {
            NotificationError::ConfigError(msg) => config_error(msg),
            NotificationError::ValidationError(msg) => validation_error(msg),
            NotificationError::Transport(e) if e.is_timeout() => {
                BrioError::TimeoutError(e.to_string())
            }
            other => external_service_error("notification-hub", other),
        }
    }
}

/// First `MAX_UPSTREAM_TEXT` characters of an upstream body
pub fn excerpt(text: &str) -> String {
    text.chars().take(MAX_UPSTREAM_TEXT).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use brio_common::HttpStatusCode;

    #[test]
    fn test_conversion_to_brio_error() {
        let err: BrioError = NotificationError::ConfigError("missing hub".to_string()).into();
        assert_eq!(err.status_code(), 500);

        let err: BrioError = NotificationError::ValidationError("envio_id".to_string()).into();
        assert_eq!(err.status_code(), 400);

        let err: BrioError = NotificationError::Upstream {
            status: 401,
            reason: "Unauthorized".to_string(),
            text: String::new(),
        }
        .into();
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn test_excerpt_counts_characters() {
        let long = "ñ".repeat(600);
        assert_eq!(excerpt(&long).chars().count(), 500);
        assert_eq!(excerpt("short"), "short");
    }
}
