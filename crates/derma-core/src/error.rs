// ── Core error types ──
//
// User-facing errors from derma-core. Consumers never see raw HTTP or JSON
// failures; the `From<derma_api::Error>` impl translates them into
// domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the clinic backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- please log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotAuthenticated,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{resource} '{identifier}' not found")]
    NotFound { resource: String, identifier: String },

    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Token storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Shorthand for a validation error on `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The session is no longer usable and the user must log in again.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::NotAuthenticated)
    }

    /// Caught locally, before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<derma_api::Error> for CoreError {
    fn from(err: derma_api::Error) -> Self {
        match err {
            derma_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            derma_api::Error::SessionExpired => CoreError::SessionExpired,
            derma_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            derma_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid URL: {e}"),
            },
            derma_api::Error::Tls(message) => CoreError::Config { message },
            derma_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            derma_api::Error::Deserialization { message, .. } => CoreError::Api {
                message: format!("unexpected response: {message}"),
                status: None,
            },
            derma_api::Error::UnsupportedAttachment { resource } => CoreError::Validation {
                field: "img".into(),
                reason: format!("{resource} records do not take an image"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expired_maps_through() {
        let err = CoreError::from(derma_api::Error::SessionExpired);
        assert!(err.is_auth_expired());
    }

    #[test]
    fn api_status_is_kept() {
        let err = CoreError::from(derma_api::Error::Api {
            status: 503,
            message: "maintenance".into(),
        });
        assert!(matches!(
            err,
            CoreError::Api {
                status: Some(503),
                ..
            }
        ));
        assert_eq!(err.to_string(), "API error: maintenance");
    }

    #[test]
    fn login_rejection_is_not_expiry() {
        let err = CoreError::from(derma_api::Error::Authentication {
            message: "bad password".into(),
        });
        assert!(!err.is_auth_expired());
    }
}
