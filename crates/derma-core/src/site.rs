// ── Site facade ──
//
// Builds one HTTP client from a `SiteConfig` and shares it between the
// public loader and any admin sessions.

use std::sync::Arc;

use derma_api::ContentClient;
use tracing::debug;

use crate::config::SiteConfig;
use crate::error::CoreError;
use crate::loader::CollectionLoader;
use crate::session::{AdminSession, TokenStore};

#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    client: ContentClient,
}

impl Site {
    pub fn new(config: SiteConfig) -> Result<Self, CoreError> {
        let client = ContentClient::new(config.api_url.as_str(), &config.transport())?;
        debug!(base_url = %client.base_url(), "site client ready");
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Public collection loader using the configured wait and empty policy.
    pub fn loader(&self) -> CollectionLoader {
        CollectionLoader::new(
            self.client.clone(),
            self.config.load_timeout,
            self.config.empty_policy,
        )
    }

    /// A logged-out admin session persisting its token in `store`.
    pub fn admin(&self, store: Arc<dyn TokenStore>) -> AdminSession {
        AdminSession::new(self.client.clone(), store)
    }
}
