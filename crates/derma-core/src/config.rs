// ── Site configuration ──
//
// Everything needed to talk to one clinic backend. Built by derma-config
// from a TOML profile (plus CLI overrides) and consumed by `Site`.

use std::path::PathBuf;
use std::time::Duration;

use derma_api::{TlsMode, TransportConfig};
use url::Url;

/// Default client-side wait for public collection loads.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(2000);

/// Default timeout for admin requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How TLS certificates are verified.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    #[default]
    SystemDefaults,
    CustomCa(PathBuf),
    DangerAcceptInvalid,
}

/// What the public loader does with a successful but empty response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPolicy {
    /// Treat `[]` like a failure and show the static fallback content.
    #[default]
    Fallback,
    /// Show the empty collection as-is.
    ShowEmpty,
}

/// Connection and loading settings for one backend.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Backend origin, e.g. `https://api.example.com` (the `/api/` suffix
    /// is added by the client).
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout for admin calls.
    pub timeout: Duration,
    /// Client-side wait for public loads before falling back.
    pub load_timeout: Duration,
    pub empty_policy: EmptyPolicy,
}

impl SiteConfig {
    /// Defaults for everything but the URL.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            empty_policy: EmptyPolicy::default(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
