pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::Release;

/// Source of the release feed.
#[async_trait]
pub trait Fetcher {
    /// Fetch and decode the whole feed. Any failure, including a body that
    /// doesn't match the release schema, is an error; there is no partial
    /// result.
    async fn fetch_releases(&self, url: &str) -> Result<Vec<Release>>;
}
