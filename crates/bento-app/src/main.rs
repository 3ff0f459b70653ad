//! bento entry point.
//!
//! Loads `bento.toml` and the block dataset, ingests channel feeds for
//! video tiles, and writes the page as a single static HTML file.
//!
//! Usage: `bento [CONFIG]`. The config path falls back to the
//! `BENTO_CONFIG` environment variable, then `bento.toml`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use bento_feed::{FeedStore, HttpFeedSource};
use bento_render::render_page;
use bento_types::Dataset;
use bento_types::config::{BentoConfig, DEFAULT_CONFIG_FILE};

/// Config path and whether the user asked for it explicitly.
fn config_path() -> (PathBuf, bool) {
    match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("BENTO_CONFIG").ok())
    {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (path, explicit) = config_path();
    let config = BentoConfig::load(&path, explicit)
        .with_context(|| format!("loading config {}", path.display()))?;
    log::info!("Rendering \"{}\"", config.title);

    let dataset = Dataset::load(&config.dataset)?;

    let source = HttpFeedSource::new(config.feed.timeout())?;
    let mut feeds = FeedStore::new(Arc::new(source), config.feed.clone());
    feeds.sync(&dataset);
    if feeds.pending() > 0 {
        log::info!("Waiting for {} channel feed(s)", feeds.pending());
        feeds.settle(config.feed.settle_timeout()).await;
    }

    if config.analytics.is_enabled() {
        log::info!("Analytics endpoint configured; events are emitted by interactive hosts only");
    }

    let html = render_page(&config.title, &dataset, &feeds);
    std::fs::write(&config.output, &html)
        .with_context(|| format!("writing {}", config.output.display()))?;
    log::info!(
        "Wrote {} ({} blocks, {} bytes)",
        config.output.display(),
        dataset.len(),
        html.len()
    );
    Ok(())
}
