// ── Remote collection loader ──
//
// Public reads never fail to the caller. Any failure (transport, status,
// decode, timeout, and by default an empty array) substitutes the static
// fallback and reports what happened through `LoadOutcome`.

use std::fmt;
use std::time::Duration;

use derma_api::{ContentClient, Record};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::EmptyPolicy;

/// What the backend actually returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Non-empty live data.
    Live,
    /// The backend answered with an empty collection.
    Empty,
    /// The request failed or timed out.
    Failed(String),
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => f.write_str("live"),
            Self::Empty => f.write_str("empty"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Result of one load. `data` is always displayable.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub data: Vec<T>,
    pub used_fallback: bool,
    pub outcome: LoadOutcome,
}

/// Fetches public collections with a bounded wait.
#[derive(Debug, Clone)]
pub struct CollectionLoader {
    client: ContentClient,
    timeout: Duration,
    empty_policy: EmptyPolicy,
}

impl CollectionLoader {
    pub fn new(client: ContentClient, timeout: Duration, empty_policy: EmptyPolicy) -> Self {
        Self {
            client,
            timeout,
            empty_policy,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Load `T`'s collection with the configured timeout.
    pub async fn load<T: Record>(&self, fallback: Vec<T>) -> Loaded<T> {
        self.load_within(fallback, self.timeout).await
    }

    /// Load with an explicit timeout. The request is dropped (aborted) when
    /// the timeout elapses.
    pub async fn load_within<T: Record>(&self, fallback: Vec<T>, timeout: Duration) -> Loaded<T> {
        let resource = T::RESOURCE;
        debug!(%resource, ?timeout, "loading collection");

        let outcome = match tokio::time::timeout(timeout, self.client.list::<T>()).await {
            Ok(Ok(data)) if !data.is_empty() => {
                debug!(%resource, count = data.len(), "collection loaded");
                return Loaded {
                    data,
                    used_fallback: false,
                    outcome: LoadOutcome::Live,
                };
            }
            Ok(Ok(data)) => {
                if self.empty_policy == EmptyPolicy::ShowEmpty {
                    return Loaded {
                        data,
                        used_fallback: false,
                        outcome: LoadOutcome::Empty,
                    };
                }
                LoadOutcome::Empty
            }
            Ok(Err(e)) => LoadOutcome::Failed(e.to_string()),
            Err(_) => LoadOutcome::Failed(format!("timed out after {}ms", timeout.as_millis())),
        };

        warn!(%resource, %outcome, "using fallback content");
        Loaded {
            data: fallback,
            used_fallback: true,
            outcome,
        }
    }

    /// Load unless `cancel` fires first. A cancelled load delivers nothing,
    /// so a view that has gone away never receives stale data.
    pub async fn load_until<T: Record>(
        &self,
        fallback: Vec<T>,
        cancel: &CancellationToken,
    ) -> Option<Loaded<T>> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(resource = %T::RESOURCE, "load discarded, view disposed");
                None
            }
            loaded = self.load(fallback) => {
                if cancel.is_cancelled() { None } else { Some(loaded) }
            }
        }
    }
}
