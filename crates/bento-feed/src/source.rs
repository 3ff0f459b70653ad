//! Fetching channel feeds.

use std::time::Duration;

use async_trait::async_trait;
use bento_types::block::VideoSummary;
use bento_types::config::FeedConfig;
use bento_types::error::{BentoError, Result};

use crate::parse::parse_feed;

/// Something that can GET a feed document.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch `url` and return the response body as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`FeedSource`] backed by `reqwest`.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bento/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BentoError::Feed(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BentoError::Feed(format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(BentoError::Feed(format!("GET {url}: status {status}")));
        }
        resp.text()
            .await
            .map_err(|e| BentoError::Feed(format!("GET {url}: reading body: {e}")))
    }
}

/// URL to fetch for a channel: the feed URL, wrapped in the proxy when one
/// is configured.
pub fn feed_request_url(config: &FeedConfig, channel_id: &str) -> String {
    let feed = format!("{}{channel_id}", config.feed_url);
    if config.proxy_url.is_empty() {
        feed
    } else {
        format!("{}{}", config.proxy_url, urlencoding::encode(&feed))
    }
}

/// Fetch and parse a feed. Every failure collapses into an empty list.
pub async fn fetch_videos(source: &dyn FeedSource, url: &str, limit: usize) -> Vec<VideoSummary> {
    match source.fetch(url).await {
        Ok(body) => {
            let videos = parse_feed(&body, limit);
            if videos.is_empty() {
                log::debug!("feed {url} contained no usable entries");
            }
            videos
        },
        Err(e) => {
            log::warn!("feed fetch failed: {e}");
            Vec::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<String>);

    #[async_trait]
    impl FeedSource for Fixed {
        async fn fetch(&self, _url: &str) -> Result<String> {
            match &self.0 {
                Ok(body) => Ok(body.clone()),
                Err(e) => Err(BentoError::Feed(e.to_string())),
            }
        }
    }

    #[test]
    fn request_url_wraps_feed_in_proxy() {
        let cfg = FeedConfig::default();
        assert_eq!(
            feed_request_url(&cfg, "UC123"),
            "https://api.allorigins.win/raw?url=https%3A%2F%2Fwww.youtube.com%2Ffeeds%2Fvideos.xml%3Fchannel_id%3DUC123"
        );
    }

    #[test]
    fn request_url_without_proxy_is_direct() {
        let cfg = FeedConfig {
            proxy_url: String::new(),
            ..FeedConfig::default()
        };
        assert_eq!(
            feed_request_url(&cfg, "UC123"),
            "https://www.youtube.com/feeds/videos.xml?channel_id=UC123"
        );
    }

    #[tokio::test]
    async fn fetch_videos_parses_body() {
        let source = Fixed(Ok("<entry><yt:videoId>a</yt:videoId><title>A</title></entry>".into()));
        let videos = fetch_videos(&source, "http://feed", 4).await;
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "A");
    }

    #[tokio::test]
    async fn fetch_failure_is_empty() {
        let source = Fixed(Err(BentoError::Feed("offline".into())));
        assert!(fetch_videos(&source, "http://feed", 4).await.is_empty());
    }

    mod http {
        use super::*;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        const FEED: &str = r#"<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015">
            <entry><yt:videoId>v1</yt:videoId><title>First</title></entry>
            <entry><yt:videoId>v2</yt:videoId><title>Second</title></entry>
        </feed>"#;

        fn direct(server: &MockServer) -> FeedConfig {
            FeedConfig {
                feed_url: format!("{}/feeds/videos.xml?channel_id=", server.uri()),
                proxy_url: String::new(),
                ..FeedConfig::default()
            }
        }

        fn source() -> HttpFeedSource {
            HttpFeedSource::new(Duration::from_secs(5)).unwrap()
        }

        #[tokio::test]
        async fn ok_response_is_parsed() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/feeds/videos.xml"))
                .and(query_param("channel_id", "UC1"))
                .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
                .expect(1)
                .mount(&server)
                .await;

            let url = feed_request_url(&direct(&server), "UC1");
            let videos = fetch_videos(&source(), &url, 4).await;
            let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
            assert_eq!(ids, ["v1", "v2"]);
            assert_eq!(videos[1].title, "Second");
        }

        #[tokio::test]
        async fn error_status_is_an_error_and_no_videos() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(503).set_body_string(FEED))
                .mount(&server)
                .await;

            let url = feed_request_url(&direct(&server), "UC1");
            let err = source().fetch(&url).await.unwrap_err();
            assert!(err.to_string().contains("503"), "{err}");
            assert!(fetch_videos(&source(), &url, 4).await.is_empty());
        }

        #[tokio::test]
        async fn unreachable_host_is_no_videos() {
            // A port nothing listens on once the listener is dropped.
            let addr = std::net::TcpListener::bind("127.0.0.1:0")
                .unwrap()
                .local_addr()
                .unwrap();
            let url = format!("http://{addr}/feeds/videos.xml?channel_id=UC1");

            let err = source().fetch(&url).await.unwrap_err();
            assert!(err.to_string().starts_with("feed error: GET"), "{err}");
            assert!(fetch_videos(&source(), &url, 4).await.is_empty());
        }
    }
}
