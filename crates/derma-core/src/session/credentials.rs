// Two-step admin credential change.
//
// Step one proves the operator knows the current credentials and yields a
// `VerifiedCredentials`. Step two takes that value by move, so new
// credentials can only be submitted after a successful re-check.

use secrecy::{ExposeSecret, SecretString};

use crate::error::CoreError;

/// Shortest accepted admin password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Proof that the current credentials were re-checked against the backend.
///
/// Only `AdminSession::verify_current_credentials` can build one.
#[derive(Debug)]
pub struct VerifiedCredentials {
    username: String,
}

impl VerifiedCredentials {
    pub(crate) fn new(username: String) -> Self {
        Self { username }
    }

    /// The username that was verified.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Local checks on replacement credentials. No network involved.
pub fn validate_new_credentials(username: &str, password: &SecretString) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::validation("username", "new username is required"));
    }
    let password = password.expose_secret();
    if password.is_empty() {
        return Err(CoreError::validation("password", "new password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::validation(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_username() {
        let err = validate_new_credentials(" ", &SecretString::from("secret1")).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "username"));
    }

    #[test]
    fn enforces_minimum_length() {
        assert!(validate_new_credentials("admin", &SecretString::from("")).is_err());
        assert!(validate_new_credentials("admin", &SecretString::from("12345")).is_err());
        assert!(validate_new_credentials("admin", &SecretString::from("123456")).is_ok());
    }
}
