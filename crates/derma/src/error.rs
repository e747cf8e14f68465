//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with help text.

use miette::Diagnostic;
use thiserror::Error;

use derma_config::ConfigError;
use derma_core::{CoreError, Resource};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the backend at {url}")]
    #[diagnostic(
        code(derma::connection_failed),
        help(
            "Check that the API is running and reachable.\n\
             Reason: {reason}\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(derma::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(derma::auth_failed),
        help("Check the admin username and password for profile '{profile}'.")
    )]
    AuthFailed { message: String, profile: String },

    #[error("Not logged in to profile '{profile}'")]
    #[diagnostic(
        code(derma::not_logged_in),
        help("Run: derma admin login --profile {profile}")
    )]
    NotLoggedIn { profile: String },

    #[error("No admin credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(derma::no_credentials),
        help(
            "Pass --username/--password, set DERMA_ADMIN_PASSWORD,\n\
             or store a password with: derma config set-password"
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource} '{identifier}' not found")]
    #[diagnostic(
        code(derma::not_found),
        help("Run: derma admin list {list_arg} to see existing records")
    )]
    NotFound {
        resource: String,
        identifier: String,
        list_arg: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({status}): {message}")]
    #[diagnostic(code(derma::api_error))]
    ApiError { status: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(derma::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(derma::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: derma config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No backend configured")]
    #[diagnostic(
        code(derma::no_config),
        help(
            "Create a profile with: derma config init\n\
             or pass --api-url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(derma::config))]
    Config { message: String },

    #[error("Local storage error: {message}")]
    #[diagnostic(code(derma::storage))]
    Storage { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(derma::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Prompt failed: {0}")]
    #[diagnostic(code(derma::prompt))]
    Prompt(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(derma::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(derma::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotLoggedIn { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile to errors that mention it.
    pub fn for_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { message, .. } => Self::AuthFailed {
                message,
                profile: name.into(),
            },
            Self::NotLoggedIn { .. } => Self::NotLoggedIn {
                profile: name.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed {
                message,
                profile: "default".into(),
            },
            CoreError::SessionExpired | CoreError::NotAuthenticated => Self::NotLoggedIn {
                profile: "default".into(),
            },
            CoreError::NotFound {
                resource,
                identifier,
            } => Self::NotFound {
                list_arg: list_arg(&resource),
                resource,
                identifier,
            },
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::Api { message, status } => Self::ApiError {
                status: status.map_or_else(|| "-".into(), |s| s.to_string()),
                message,
            },
            CoreError::Storage { message } => Self::Storage { message },
            CoreError::Config { message } => Self::Config { message },
        }
    }
}

/// Core errors name a record by its singular noun ("FAQ"); point the help
/// text at the collection's command-line spelling instead.
fn list_arg(noun: &str) -> String {
    Resource::ALL
        .into_iter()
        .find(|r| r.singular() == noun)
        .map_or_else(|| noun.to_owned(), |r| r.to_string())
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(none)".into(),
            },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(CliError::from(CoreError::Timeout).exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CoreError::NotAuthenticated).exit_code(),
            exit_code::AUTH
        );
        assert_eq!(
            CliError::from(CoreError::validation("rating", "must be 1-5")).exit_code(),
            exit_code::USAGE
        );
        assert_eq!(
            CliError::from(CoreError::ConnectionFailed {
                url: "http://x".into(),
                reason: "refused".into(),
            })
            .exit_code(),
            exit_code::CONNECTION
        );
        assert_eq!(
            CliError::from(CoreError::Api {
                message: "boom".into(),
                status: Some(500),
            })
            .exit_code(),
            exit_code::GENERAL
        );
    }

    #[test]
    fn not_found_points_at_the_cli_spelling() {
        let err = CliError::from(CoreError::NotFound {
            resource: "before/after case".into(),
            identifier: "42".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(err, CliError::NotFound { ref list_arg, .. } if list_arg == "before-after"));
    }

    #[test]
    fn profile_is_attached_to_auth_errors() {
        let err = CliError::from(CoreError::SessionExpired).for_profile("staging");
        assert!(matches!(err, CliError::NotLoggedIn { ref profile } if profile == "staging"));
    }
}
