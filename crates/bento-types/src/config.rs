//! Page configuration loaded from `bento.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BentoError, Result};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "bento.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BentoConfig {
    /// Path of the JSON block dataset.
    pub dataset: PathBuf,
    /// Path the rendered HTML page is written to.
    pub output: PathBuf,
    /// Document title.
    pub title: String,
    pub feed: FeedConfig,
    pub analytics: AnalyticsConfig,
}

impl Default for BentoConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from("blocks.json"),
            output: PathBuf::from("index.html"),
            title: "Bento".to_string(),
            feed: FeedConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

/// Video feed ingestion settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enabled: bool,
    /// Prefix of the fetch proxy; the URL-encoded feed URL is appended.
    pub proxy_url: String,
    /// Channel feed URL; the channel id is appended.
    pub feed_url: String,
    /// Maximum number of entries kept per channel.
    pub max_videos: usize,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// How long a batch render waits for in-flight fetches, in seconds.
    pub settle_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            proxy_url: "https://api.allorigins.win/raw?url=".to_string(),
            feed_url: "https://www.youtube.com/feeds/videos.xml?channel_id=".to_string(),
            max_videos: 4,
            timeout_secs: 10,
            settle_secs: 15,
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }
}

/// Analytics collaborator settings. No endpoint means analytics is off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub endpoint: Option<String>,
}

impl AnalyticsConfig {
    pub fn is_enabled(&self) -> bool {
        self.endpoint.as_deref().is_some_and(|e| !e.trim().is_empty())
    }
}

impl BentoConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`.
    ///
    /// When `explicit` is false a missing file yields the defaults; an
    /// explicitly requested file must exist.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && !explicit => {
                log::debug!("{} not found, using default config", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(BentoError::Config(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.feed.max_videos == 0 {
            return Err(BentoError::Config("feed.max_videos must be at least 1".into()));
        }
        if self.feed.enabled && self.feed.feed_url.is_empty() {
            return Err(BentoError::Config("feed.feed_url is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = BentoConfig::from_toml("").unwrap();
        assert_eq!(cfg, BentoConfig::default());
        assert_eq!(cfg.feed.max_videos, 4);
        assert!(cfg.feed.enabled);
        assert!(!cfg.analytics.is_enabled());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = BentoConfig::from_toml(
            r#"
dataset = "profile/blocks.json"

[feed]
timeout_secs = 3

[analytics]
endpoint = "https://stats.example.com/track"
"#,
        )
        .unwrap();
        assert_eq!(cfg.dataset, PathBuf::from("profile/blocks.json"));
        assert_eq!(cfg.output, PathBuf::from("index.html"));
        assert_eq!(cfg.feed.timeout(), Duration::from_secs(3));
        assert_eq!(cfg.feed.proxy_url, "https://api.allorigins.win/raw?url=");
        assert!(cfg.analytics.is_enabled());
    }

    #[test]
    fn blank_endpoint_disables_analytics() {
        let cfg = BentoConfig::from_toml("[analytics]\nendpoint = \"  \"\n").unwrap();
        assert!(!cfg.analytics.is_enabled());
    }

    #[test]
    fn zero_max_videos_rejected() {
        let err = BentoConfig::from_toml("[feed]\nmax_videos = 0\n").unwrap_err();
        assert!(matches!(err, BentoError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = BentoConfig::from_toml("dataset = [").unwrap_err();
        assert!(matches!(err, BentoError::TomlParse(_)));
    }

    #[test]
    fn missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = BentoConfig::load(&dir.path().join(DEFAULT_CONFIG_FILE), false).unwrap();
        assert_eq!(cfg, BentoConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BentoConfig::load(&dir.path().join("custom.toml"), true).unwrap_err();
        assert!(matches!(err, BentoError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "title = \"Jane\"\n").unwrap();
        let cfg = BentoConfig::load(&path, true).unwrap();
        assert_eq!(cfg.title, "Jane");
    }
}
