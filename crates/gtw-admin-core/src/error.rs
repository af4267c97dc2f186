//! Error types for the GTW admin console

use gtw_admin_types::TypesError;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Shown when a login is rejected without a server message
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Invalid username or password. Please check your credentials and try again.";

/// Main error type for the console
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed base URL or request path
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// CSV export failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message
        message: String,
    },

    /// Input rejected before any request was sent
    #[error("Validation error: {field} - {message}")]
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// The candidate user does not hold the admin role
    #[error("Access denied. Admin privileges required.")]
    NotAuthorized,

    /// The backend rejected the bearer token; the stored session was cleared
    #[error("Session expired: {message}")]
    SessionExpired {
        /// Message sent by the backend, if any
        message: String,
    },

    /// Non-success response from the backend
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message sent by the backend, or the status reason
        message: String,
    },
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<TypesError> for Error {
    fn from(err: TypesError) -> Self {
        Self::Validation {
            field: err.field().unwrap_or("input").to_string(),
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Build a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::SessionExpired { .. } => Some(401),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the stored session was dropped because of this error
    #[must_use]
    pub const fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired { .. })
    }

    /// Text shown to the admin for a failed sign-in
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api {
                status: 401 | 403,
                message,
            }
            | Self::SessionExpired { message } => {
                if message.trim().is_empty() {
                    INVALID_CREDENTIALS_MESSAGE.to_string()
                } else {
                    message.clone()
                }
            }
            Self::Api { status: 404, .. } => "User not found. Please check your username.".to_string(),
            Self::Api { status: 500, .. } => "Server error. Please try again later.".to_string(),
            Self::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Http(_) => "Login failed. Please try again.".to_string(),
            Self::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::error::Error as StdError;

    fn api(status: u16, message: &str) -> Error {
        Error::Api {
            status,
            message: message.to_string(),
        }
    }

    #[rstest]
    #[case(api(401, ""), INVALID_CREDENTIALS_MESSAGE)]
    #[case(api(401, "Wrong password"), "Wrong password")]
    #[case(api(403, "Not an admin"), "Not an admin")]
    #[case(api(404, "nope"), "User not found. Please check your username.")]
    #[case(api(500, "boom"), "Server error. Please try again later.")]
    #[case(api(422, "Email taken"), "Email taken")]
    fn test_user_message(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.user_message(), expected);
    }

    #[test]
    fn test_session_expired_reports_401() {
        let error = Error::SessionExpired {
            message: "jwt expired".to_string(),
        };
        assert!(error.is_session_expired());
        assert_eq!(error.status(), Some(401));
        assert_eq!(error.to_string(), "Session expired: jwt expired");
    }

    #[test]
    fn test_types_error_becomes_validation() {
        let error = Error::from(TypesError::MissingField { field: "slug" });
        match error {
            Error::Validation { field, message } => {
                assert_eq!(field, "slug");
                assert_eq!(message, "slug is required");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_io_error_keeps_source() {
        let error = Error::from(std::io::Error::other("disk full"));
        assert!(error.source().is_some());
        assert!(error.to_string().starts_with("I/O error"));
    }

    #[test]
    fn test_not_authorized_display() {
        assert_eq!(
            Error::NotAuthorized.to_string(),
            "Access denied. Admin privileges required."
        );
    }
}
