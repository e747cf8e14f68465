//! Background loading of the public collections.
//!
//! Each collection loads in its own task and reports back as an
//! [`Action::Loaded`]. A reload or shutdown cancels the in-flight batch so
//! late responses are discarded instead of landing in the UI.

use derma_core::{CollectionLoader, LoadOutcome, Loaded, Record, fallback};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::action::{Action, Collection};

/// Reason reported for every collection when no backend is configured.
pub const OFFLINE_REASON: &str = "no backend configured";

pub struct LoaderBridge {
    loader: Option<CollectionLoader>,
    tx: UnboundedSender<Action>,
    cancel: CancellationToken,
}

impl LoaderBridge {
    /// `loader` is `None` in offline mode: built-in content only.
    pub fn new(loader: Option<CollectionLoader>, tx: UnboundedSender<Action>) -> Self {
        Self {
            loader,
            tx,
            cancel: CancellationToken::new(),
        }
    }

    pub fn is_offline(&self) -> bool {
        self.loader.is_none()
    }

    /// Start loading every collection. Cancels any batch still running.
    pub fn spawn_all(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();

        self.spawn(fallback::doctors(), Collection::Doctors);
        self.spawn(fallback::videos(), Collection::Videos);
        self.spawn(fallback::testimonials(), Collection::Testimonials);
        self.spawn(fallback::faqs(), Collection::Faqs);
        self.spawn(fallback::services(), Collection::Services);
        self.spawn(fallback::before_after(), Collection::BeforeAfter);
    }

    fn spawn<T: Record>(&self, fallback: Vec<T>, wrap: fn(Loaded<T>) -> Collection) {
        let tx = self.tx.clone();

        let Some(loader) = self.loader.clone() else {
            let loaded = Loaded {
                data: fallback,
                used_fallback: true,
                outcome: LoadOutcome::Failed(OFFLINE_REASON.into()),
            };
            let _ = tx.send(Action::Loaded(wrap(loaded)));
            return;
        };

        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            match loader.load_until(fallback, &cancel).await {
                Some(loaded) => {
                    let _ = tx.send(Action::Loaded(wrap(loaded)));
                }
                None => debug!(resource = %T::RESOURCE, "load cancelled"),
            }
        });
    }

    /// Discard whatever is still in flight.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for LoaderBridge {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn offline_mode_delivers_every_fallback_collection() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut bridge = LoaderBridge::new(None, tx);
        assert!(bridge.is_offline());
        bridge.spawn_all();

        let mut seen = 0;
        while let Ok(action) = rx.try_recv() {
            let Action::Loaded(collection) = action else {
                panic!("unexpected action {action:?}");
            };
            if let Collection::Faqs(loaded) = &collection {
                assert_eq!(loaded.data.len(), 5);
                assert!(loaded.used_fallback);
                assert_eq!(loaded.outcome, LoadOutcome::Failed(OFFLINE_REASON.into()));
            }
            seen += 1;
        }
        assert_eq!(seen, 6);
    }
}
