use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::app::error::{MirrorError, Result};
use crate::app::theme::ThemeContext;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::store::{PreferenceStore, ReleaseStore, SqlitePreferenceStore};

pub struct AppContext {
    pub config: Arc<Config>,
    pub feed_url: Url,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub prefs: Arc<dyn PreferenceStore + Send + Sync>,
}

impl AppContext {
    /// `feed_url` overrides the URL from the config file.
    pub fn new(config: Config, feed_url: Option<&str>) -> Result<Self> {
        let prefs: Arc<dyn PreferenceStore + Send + Sync> =
            Arc::new(SqlitePreferenceStore::new(Self::default_prefs_path()?)?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_timeout(
            Duration::from_secs(config.feed.timeout_secs),
        )?);

        Self::with_parts(config, feed_url, fetcher, prefs)
    }

    /// In-memory preferences, for tests and throwaway sessions.
    pub fn in_memory(config: Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let prefs: Arc<dyn PreferenceStore + Send + Sync> =
            Arc::new(SqlitePreferenceStore::in_memory()?);
        Self::with_parts(config, None, fetcher, prefs)
    }

    fn with_parts(
        config: Config,
        feed_url: Option<&str>,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        prefs: Arc<dyn PreferenceStore + Send + Sync>,
    ) -> Result<Self> {
        let feed_url = Url::parse(feed_url.unwrap_or(&config.feed.url))?;
        if !matches!(feed_url.scheme(), "http" | "https") {
            return Err(MirrorError::Config(format!(
                "Feed URL must be http or https: {}",
                feed_url
            )));
        }

        Ok(Self {
            config: Arc::new(config),
            feed_url,
            fetcher,
            prefs,
        })
    }

    pub fn theme(&self) -> Result<ThemeContext> {
        ThemeContext::load(self.prefs.clone())
    }

    /// Fetch the feed into a settled store. Never retries.
    pub async fn load_releases(&self) -> ReleaseStore {
        ReleaseStore::load(self.fetcher.as_ref(), self.feed_url.as_str()).await
    }

    fn default_prefs_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| MirrorError::Config("Could not find data directory".into()))?;
        let app_dir = data_dir.join("canary-mirror");
        std::fs::create_dir_all(&app_dir)?;
        Ok(app_dir.join("preferences.db"))
    }
}
