// HTTP client for the clinic content backend.
//
// Base path: {api_url}/api/
// Auth: `Authorization: Bearer <token>` on admin calls only

use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::ErrorResponse;
use crate::resource::Resource;
use crate::transport::TransportConfig;

/// Async client for the content backend.
///
/// Holds no credentials. Admin calls receive the bearer token per call so
/// that the session owner decides when a token is valid.
#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ContentClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `api_url` (e.g. `https://api.example.com`).
    pub fn new(api_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(api_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(api_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(api_url)?;
        Ok(Self { http, base_url })
    }

    /// Normalise to `{origin}{path}/api/`, accepting URLs that already end
    /// in `/api` or `/api/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    /// The normalised API base URL (always ends in `/api/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a relative path (e.g. `"admin/login"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    /// `{base}/{resource}` or `{base}/{resource}/{id}` with the id
    /// percent-encoded as a single path segment.
    pub(crate) fn resource_url(&self, resource: Resource, id: Option<&str>) -> Result<Url, Error> {
        let mut url = self.url(resource.path_segment())?;
        if let Some(id) = id {
            url.path_segments_mut()
                .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
                .push(id);
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    fn authorize(builder: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&SecretString>,
    ) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = Self::authorize(self.http.get(url), token).send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn get_empty(
        &self,
        url: Url,
        token: Option<&SecretString>,
    ) -> Result<(), Error> {
        debug!("GET {url}");

        let resp = Self::authorize(self.http.get(url), token).send().await?;
        handle_empty(resp).await
    }

    pub(crate) async fn post_json<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        token: Option<&SecretString>,
    ) -> Result<Response, Error> {
        debug!("POST {url}");

        let resp = Self::authorize(self.http.post(url).json(body), token)
            .send()
            .await?;
        Ok(resp)
    }

    pub(crate) async fn put_json<B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
        token: Option<&SecretString>,
    ) -> Result<(), Error> {
        debug!("PUT {url}");

        let resp = Self::authorize(self.http.put(url).json(body), token)
            .send()
            .await?;
        handle_empty(resp).await
    }

    pub(crate) async fn post_multipart(
        &self,
        url: Url,
        form: Form,
        token: Option<&SecretString>,
    ) -> Result<(), Error> {
        debug!("POST {url} (multipart)");

        let resp = Self::authorize(self.http.post(url).multipart(form), token)
            .send()
            .await?;
        handle_empty(resp).await
    }

    pub(crate) async fn put_multipart(
        &self,
        url: Url,
        form: Form,
        token: Option<&SecretString>,
    ) -> Result<(), Error> {
        debug!("PUT {url} (multipart)");

        let resp = Self::authorize(self.http.put(url).multipart(form), token)
            .send()
            .await?;
        handle_empty(resp).await
    }

    pub(crate) async fn delete(&self, url: Url, token: Option<&SecretString>) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = Self::authorize(self.http.delete(url), token).send().await?;
        handle_empty(resp).await
    }
}

// ── Response handling ────────────────────────────────────────────────

pub(crate) async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        decode(&body)
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn handle_empty(resp: Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| {
        let preview: String = body.chars().take(200).collect();
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

/// Turn a non-2xx response into an [`Error`]. A 401 always means the
/// bearer token is no longer accepted.
pub(crate) async fn parse_error(status: StatusCode, resp: Response) -> Error {
    if status == StatusCode::UNAUTHORIZED {
        return Error::SessionExpired;
    }

    Error::Api {
        status: status.as_u16(),
        message: error_message(status, resp).await,
    }
}

/// Best human-readable message from an error body.
pub(crate) async fn error_message(status: StatusCode, resp: Response) -> String {
    let raw = resp.text().await.unwrap_or_default();

    if let Ok(ErrorResponse { message, error }) = serde_json::from_str::<ErrorResponse>(&raw) {
        if let Some(msg) = message.or(error) {
            return msg;
        }
    }

    if raw.is_empty() {
        status.to_string()
    } else {
        raw.chars().take(200).collect()
    }
}
