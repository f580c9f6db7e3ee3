use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;

use crate::app::Result;
use crate::domain::Release;
use crate::fetcher::Fetcher;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("canary-mirror/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_releases(&self, url: &str) -> Result<Vec<Release>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        tracing::debug!("Fetching release feed from {}", url);
        let response = self.client.get(url).headers(headers).send().await?;
        response.error_for_status_ref()?;

        let body = response.bytes().await?;
        let releases: Vec<Release> = serde_json::from_slice(&body)?;

        tracing::info!("Fetched {} releases from {}", releases.len(), url);
        Ok(releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MirrorError;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn serve(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/canary_releases.json"))
            .and(header("accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_string(body)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;
        server
    }

    fn feed_url(server: &MockServer) -> String {
        format!("{}/canary_releases.json", server.uri())
    }

    #[tokio::test]
    async fn test_fetch_decodes_release_array() {
        let body = r#"[
            {
                "tag_name": "c0ffee1",
                "published_at": "2024-06-01T08:00:00Z",
                "url": "https://example.com/c0ffee1",
                "changelog": {"title": "Fix shader cache"},
                "assets": [{"name": "xenia_canary.zip", "url": "https://example.com/xenia_canary.zip"}]
            }
        ]"#;
        let server = serve(200, body).await;

        let fetcher = HttpFetcher::new().unwrap();
        let releases = fetcher.fetch_releases(&feed_url(&server)).await.unwrap();

        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].tag_name, "c0ffee1");
        assert_eq!(releases[0].display_title(), "Fix shader cache");
        assert_eq!(releases[0].assets.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_http_error() {
        let server = serve(500, "oops").await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch_releases(&feed_url(&server)).await.unwrap_err();

        assert!(matches!(err, MirrorError::Http(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_non_array_body_is_decode_error() {
        let server = serve(200, "{}").await;

        let fetcher = HttpFetcher::new().unwrap();
        let err = fetcher.fetch_releases(&feed_url(&server)).await.unwrap_err();

        assert!(matches!(err, MirrorError::Decode(_)), "got {:?}", err);
    }
}
