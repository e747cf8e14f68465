// Admin authentication endpoints.
//
// POST /api/admin/login   {username, password} -> {token}
// GET  /api/admin/verify  bearer -> 2xx | 401
// PUT  /api/admin/update  bearer, {username, password}

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::{ContentClient, decode, error_message};
use crate::error::Error;
use crate::models::LoginResponse;

impl ContentClient {
    /// Exchange username/password for a bearer token.
    ///
    /// A non-2xx response, or a 2xx body without a token, is reported as
    /// [`Error::Authentication`]. The token is returned, not stored.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<SecretString, Error> {
        let url = self.url("admin/login")?;
        debug!("logging in at {url}");

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        let resp = self.post_json(url, &body, None).await?;
        let status = resp.status();
        if !status.is_success() {
            let message = error_message(status, resp).await;
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {message}"),
            });
        }

        let text = resp.text().await?;
        let parsed: LoginResponse = decode(&text)?;
        match parsed.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!("login successful");
                Ok(SecretString::from(token))
            }
            None => Err(Error::Authentication {
                message: parsed
                    .message
                    .unwrap_or_else(|| "login response did not include a token".into()),
            }),
        }
    }

    /// Check that `token` is still accepted. A rejected token yields
    /// [`Error::SessionExpired`].
    pub async fn verify(&self, token: &SecretString) -> Result<(), Error> {
        let url = self.url("admin/verify")?;
        self.get_empty(url, Some(token)).await
    }

    /// Replace the admin username and password, authenticated with `token`.
    pub async fn update_credentials(
        &self,
        token: &SecretString,
        username: &str,
        password: &SecretString,
    ) -> Result<(), Error> {
        let url = self.url("admin/update")?;
        debug!("updating admin credentials at {url}");

        let body = json!({
            "username": username,
            "password": password.expose_secret(),
        });

        self.put_json(url, &body, Some(token)).await
    }
}
