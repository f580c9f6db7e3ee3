use std::sync::Arc;

use crate::app::Result;
use crate::domain::Release;
use crate::fetcher::Fetcher;

/// Lifecycle of the release list. Starts in `Loading` and settles exactly
/// once into `Loaded` or `Failed`.
#[derive(Debug, Clone)]
pub enum FeedState {
    Loading,
    Loaded(Vec<Arc<Release>>),
    Failed(String),
}

#[derive(Debug)]
pub struct ReleaseStore {
    state: FeedState,
}

impl ReleaseStore {
    pub fn new() -> Self {
        Self {
            state: FeedState::Loading,
        }
    }

    /// Fetch the feed once and settle the store with the outcome.
    pub async fn load(fetcher: &(dyn Fetcher + Send + Sync), url: &str) -> Self {
        let mut store = Self::new();
        store.complete(fetcher.fetch_releases(url).await);
        store
    }

    /// Settle the store with a fetch outcome. Only the first call has any
    /// effect; returns whether this call changed the state.
    pub fn complete(&mut self, result: Result<Vec<Release>>) -> bool {
        if !self.is_loading() {
            tracing::warn!("Release feed already settled, ignoring another completion");
            return false;
        }

        self.state = match result {
            Ok(releases) => {
                tracing::info!("Release store loaded with {} releases", releases.len());
                FeedState::Loaded(releases.into_iter().map(Arc::new).collect())
            }
            Err(e) => {
                tracing::error!("Failed to load release feed: {}", e);
                FeedState::Failed(e.to_string())
            }
        };
        true
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading)
    }

    /// The loaded releases; empty while loading or after a failure.
    pub fn releases(&self) -> &[Arc<Release>] {
        match &self.state {
            FeedState::Loaded(releases) => releases.as_slice(),
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FeedState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

impl Default for ReleaseStore {
    fn default() -> Self {
        Self::new()
    }
}
