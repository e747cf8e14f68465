// ── Admin session ──
//
// Owns the bearer token for the admin surface. The token lives in memory
// and in a durable `TokenStore`; a 401 from any authenticated call tears
// both down. Every failure is also kept as `last_error` so a front end can
// show it next to the form that caused it.

mod credentials;
mod token_store;

use std::sync::Arc;

use derma_api::{ContentClient, RawRecord, Resource};
use futures_util::future::try_join_all;
use secrecy::SecretString;
use tracing::{info, warn};

pub use credentials::{MIN_PASSWORD_LEN, VerifiedCredentials, validate_new_credentials};
pub use token_store::{ADMIN_TOKEN_KEY, MemoryTokenStore, TokenStore};

use crate::error::CoreError;
use crate::form::FormDraft;

/// Authenticated access to the six content collections.
///
/// Mutating methods take `&mut self`: the session is the single writer of
/// the token, and readers observe it through `is_authenticated()`.
pub struct AdminSession {
    client: ContentClient,
    store: Arc<dyn TokenStore>,
    token: Option<SecretString>,
    authenticated: bool,
    last_error: Option<String>,
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("base_url", &self.client.base_url().as_str())
            .field("authenticated", &self.authenticated)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl AdminSession {
    /// A logged-out session. Call [`restore`](Self::restore) to pick up a
    /// token persisted by an earlier run.
    pub fn new(client: ContentClient, store: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            store,
            token: None,
            authenticated: false,
            last_error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Message from the most recent failed operation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Verify a stored token, if any.
    ///
    /// `Ok(true)` means the stored token was accepted. `Ok(false)` means
    /// there was nothing to restore, or the backend rejected the token (it
    /// is then removed from the store). Other failures leave the session
    /// logged out but keep the stored token for a later attempt.
    pub async fn restore(&mut self) -> Result<bool, CoreError> {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => return self.settle(Err(e)),
        };
        let Some(token) = stored else {
            self.authenticated = false;
            return Ok(false);
        };

        match self.client.verify(&token).await.map_err(CoreError::from) {
            Ok(()) => {
                info!("restored admin session");
                self.token = Some(token);
                self.authenticated = true;
                self.last_error = None;
                Ok(true)
            }
            Err(CoreError::SessionExpired) => {
                info!("stored admin token rejected, clearing it");
                self.expire();
                self.last_error = Some(CoreError::SessionExpired.to_string());
                Ok(false)
            }
            Err(e) => {
                warn!(error = %e, "could not verify stored admin token");
                self.token = None;
                self.authenticated = false;
                self.settle(Err(e))
            }
        }
    }

    /// Log in and persist the token. A failed login leaves any prior
    /// session untouched.
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<(), CoreError> {
        if username.trim().is_empty() {
            return self.settle(Err(CoreError::validation("username", "username is required")));
        }
        let token = match self.client.login(username, password).await {
            Ok(token) => token,
            Err(e) => return self.settle(Err(e.into())),
        };

        if let Err(e) = self.store.save(&token) {
            warn!(error = %e, "admin token will not survive a restart");
        }
        self.token = Some(token);
        self.authenticated = true;
        self.last_error = None;
        info!(username, "admin logged in");
        Ok(())
    }

    /// Drop the token from memory and from the store.
    pub fn logout(&mut self) -> Result<(), CoreError> {
        self.token = None;
        self.authenticated = false;
        let result = self.store.clear();
        info!("admin logged out");
        self.settle(result)
    }

    // ── Collections ──────────────────────────────────────────────────

    /// Every record of `resource`. An empty list is a normal result here.
    pub async fn list(&mut self, resource: Resource) -> Result<Vec<RawRecord>, CoreError> {
        let result: Result<_, CoreError> = async {
            let token = self.bearer()?;
            Ok(self.client.list_raw(resource, &token).await?)
        }
        .await;
        self.settle(result)
    }

    /// Fetch all six collections at once. One failure fails the whole
    /// overview; a 401 from any of them logs out.
    pub async fn overview(&mut self) -> Result<Vec<(Resource, Vec<RawRecord>)>, CoreError> {
        let result: Result<_, CoreError> = async {
            let token = self.bearer()?;
            let client = &self.client;
            let token = &token;
            let collections = try_join_all(Resource::ALL.into_iter().map(|resource| async move {
                let records = client.list_raw(resource, token).await?;
                Ok::<_, derma_api::Error>((resource, records))
            }))
            .await?;
            Ok(collections)
        }
        .await;
        self.settle(result)
    }

    /// Create a record from a draft. The draft is validated before anything
    /// is sent.
    pub async fn create(&mut self, draft: FormDraft) -> Result<(), CoreError> {
        let resource = draft.resource();
        let result: Result<_, CoreError> = async {
            let payload = draft.into_payload()?;
            let token = self.bearer()?;
            self.client.create(resource, payload, &token).await?;
            info!(%resource, "record created");
            Ok(())
        }
        .await;
        self.settle(result)
    }

    /// Replace record `id` with a draft.
    pub async fn update(&mut self, id: &str, draft: FormDraft) -> Result<(), CoreError> {
        let resource = draft.resource();
        let result: Result<_, CoreError> = async {
            let payload = draft.into_payload()?;
            let token = self.bearer()?;
            self.client
                .update(resource, id, payload, &token)
                .await
                .map_err(|e| not_found_as(e, resource, id))?;
            info!(%resource, id, "record updated");
            Ok(())
        }
        .await;
        self.settle(result)
    }

    pub async fn delete(&mut self, resource: Resource, id: &str) -> Result<(), CoreError> {
        let result: Result<_, CoreError> = async {
            let token = self.bearer()?;
            self.client
                .delete_record(resource, id, &token)
                .await
                .map_err(|e| not_found_as(e, resource, id))?;
            info!(%resource, id, "record deleted");
            Ok(())
        }
        .await;
        self.settle(result)
    }

    // ── Credentials ──────────────────────────────────────────────────

    /// Step one: re-check the current credentials through the login
    /// endpoint. The token it returns is discarded.
    pub async fn verify_current_credentials(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> Result<VerifiedCredentials, CoreError> {
        let result: Result<_, CoreError> = async {
            self.bearer()?;
            match self.client.login(username, password).await {
                Ok(_discarded) => Ok(VerifiedCredentials::new(username.to_owned())),
                Err(derma_api::Error::Authentication { .. }) => {
                    Err(CoreError::AuthenticationFailed {
                        message: "current credentials are incorrect".into(),
                    })
                }
                Err(e) => Err(e.into()),
            }
        }
        .await;
        self.settle(result)
    }

    /// Step two: validate and submit new credentials with the existing
    /// token. On success the session is ended so the operator logs in again.
    pub async fn apply_new_credentials(
        &mut self,
        verified: VerifiedCredentials,
        new_username: &str,
        new_password: &SecretString,
    ) -> Result<(), CoreError> {
        let new_username = new_username.trim();
        let result: Result<_, CoreError> = async {
            validate_new_credentials(new_username, new_password)?;
            let token = self.bearer()?;
            self.client
                .update_credentials(&token, new_username, new_password)
                .await?;
            Ok(())
        }
        .await;
        self.settle(result)?;

        info!(
            previous = verified.username(),
            username = new_username,
            "admin credentials updated"
        );
        self.logout()
    }

    /// Both credential steps in sequence.
    pub async fn update_credentials(
        &mut self,
        current_username: &str,
        current_password: &SecretString,
        new_username: &str,
        new_password: &SecretString,
    ) -> Result<(), CoreError> {
        let verified = self
            .verify_current_credentials(current_username, current_password)
            .await?;
        self.apply_new_credentials(verified, new_username, new_password)
            .await
    }

    // ── Internals ────────────────────────────────────────────────────

    fn bearer(&self) -> Result<SecretString, CoreError> {
        match &self.token {
            Some(token) if self.authenticated => Ok(token.clone()),
            _ => Err(CoreError::NotAuthenticated),
        }
    }

    /// Record the outcome. A rejected token ends the session.
    fn settle<T>(&mut self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => {
                if matches!(e, CoreError::SessionExpired) {
                    self.expire();
                }
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn expire(&mut self) {
        warn!("admin session expired");
        self.token = None;
        self.authenticated = false;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "could not clear stored admin token");
        }
    }
}

fn not_found_as(err: derma_api::Error, resource: Resource, id: &str) -> CoreError {
    if err.is_not_found() {
        CoreError::NotFound {
            resource: resource.singular().to_owned(),
            identifier: id.to_owned(),
        }
    } else {
        err.into()
    }
}
