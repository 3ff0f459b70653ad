//! Per-block feed state and ingestion scheduling.
//!
//! [`FeedStore`] is the explicit keyed store behind channel-backed tiles:
//! block id -> [`FeedState`]. It is owned by a single thread. Fetches run
//! as Tokio tasks and report back over a channel; the store applies their
//! outcomes in [`FeedStore::poll`] or [`FeedStore::settle`], so tasks
//! never touch block state directly.
//!
//! Scheduling rules:
//! - a block with pre-seeded videos never fetches;
//! - each distinct channel id is fetched at most once for the lifetime of
//!   the store, and the result is shared by every block on that channel;
//! - a block is only (re)scheduled when its channel id changes;
//! - when the last block waiting on a channel leaves the dataset, that
//!   channel's task is cancelled.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bento_types::block::{BlockKind, Channel, VideoSummary};
use bento_types::config::FeedConfig;
use bento_types::Dataset;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::source::{FeedSource, feed_request_url, fetch_videos};

/// Ephemeral feed state of one block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub videos: Vec<VideoSummary>,
    pub loading: bool,
}

/// Result of one channel fetch. Empty `videos` means failure.
#[derive(Debug)]
struct FeedOutcome {
    channel_id: String,
    videos: Vec<VideoSummary>,
}

/// An in-flight channel fetch and the blocks waiting on it.
struct ChannelTask {
    subscribers: Vec<String>,
    cancel: CancellationToken,
}

/// What a block's current state was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Origin {
    Preseeded(Vec<VideoSummary>),
    Channel(String),
}

/// Keyed store of per-block feed state.
pub struct FeedStore {
    source: Arc<dyn FeedSource>,
    config: FeedConfig,
    states: HashMap<String, FeedState>,
    origins: HashMap<String, Origin>,
    in_flight: HashMap<String, ChannelTask>,
    /// Finished channels and their videos (empty on failure).
    finished: HashMap<String, Vec<VideoSummary>>,
    tx: mpsc::UnboundedSender<FeedOutcome>,
    rx: mpsc::UnboundedReceiver<FeedOutcome>,
}

impl FeedStore {
    pub fn new(source: Arc<dyn FeedSource>, config: FeedConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            config,
            states: HashMap::new(),
            origins: HashMap::new(),
            in_flight: HashMap::new(),
            finished: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Feed state of a block, if it is channel-backed.
    pub fn state(&self, block_id: &str) -> Option<&FeedState> {
        self.states.get(block_id)
    }

    /// Number of channel fetches still running.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Bring the store in line with `dataset`.
    ///
    /// Must be called from within a Tokio runtime for fetches to start;
    /// without one, channels are marked finished with no videos.
    pub fn sync(&mut self, dataset: &Dataset) {
        let wanted: HashMap<&str, &Channel> = dataset
            .blocks()
            .iter()
            .filter_map(|b| match &b.kind {
                BlockKind::Social(social) => social.channel.as_ref().map(|c| (b.id.as_str(), c)),
                _ => None,
            })
            .collect();

        let gone: Vec<String> = self
            .states
            .keys()
            .filter(|id| !wanted.contains_key(id.as_str()))
            .cloned()
            .collect();
        for id in gone {
            log::debug!("block `{id}` left the dataset, dropping feed state");
            self.forget(&id);
        }

        for block in dataset.blocks() {
            if let Some(channel) = wanted.get(block.id.as_str()) {
                self.sync_block(&block.id, channel);
            }
        }
    }

    fn sync_block(&mut self, block_id: &str, channel: &Channel) {
        let origin = if channel.preseeded.is_empty() {
            Origin::Channel(channel.id.clone())
        } else {
            Origin::Preseeded(channel.preseeded.clone())
        };
        if self.origins.get(block_id) == Some(&origin) {
            return;
        }
        self.forget(block_id);

        let state = match &origin {
            Origin::Preseeded(videos) => FeedState {
                videos: videos.clone(),
                loading: false,
            },
            Origin::Channel(channel_id) => self.subscribe(block_id, channel_id),
        };
        self.states.insert(block_id.to_string(), state);
        self.origins.insert(block_id.to_string(), origin);
    }

    /// Attach a block to its channel, starting a fetch if needed.
    fn subscribe(&mut self, block_id: &str, channel_id: &str) -> FeedState {
        if let Some(videos) = self.finished.get(channel_id) {
            return FeedState {
                videos: videos.clone(),
                loading: false,
            };
        }
        if let Some(task) = self.in_flight.get_mut(channel_id) {
            task.subscribers.push(block_id.to_string());
            return FeedState {
                videos: Vec::new(),
                loading: true,
            };
        }
        if !self.config.enabled {
            return FeedState::default();
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("no async runtime, feed for channel `{channel_id}` not fetched");
            self.finished.insert(channel_id.to_string(), Vec::new());
            return FeedState::default();
        };

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let url = feed_request_url(&self.config, channel_id);
        let limit = self.config.max_videos;
        let id = channel_id.to_string();
        log::debug!("fetching feed for channel `{channel_id}` ({url})");
        runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    log::debug!("feed fetch for channel `{id}` cancelled");
                }
                videos = fetch_videos(source.as_ref(), &url, limit) => {
                    let _ = tx.send(FeedOutcome { channel_id: id, videos });
                }
            }
        });

        self.in_flight.insert(
            channel_id.to_string(),
            ChannelTask {
                subscribers: vec![block_id.to_string()],
                cancel,
            },
        );
        FeedState {
            videos: Vec::new(),
            loading: true,
        }
    }

    /// Drop a block's state and detach it from any in-flight fetch.
    fn forget(&mut self, block_id: &str) {
        self.states.remove(block_id);
        let Some(Origin::Channel(channel_id)) = self.origins.remove(block_id) else {
            return;
        };
        let Some(task) = self.in_flight.get_mut(&channel_id) else {
            return;
        };
        task.subscribers.retain(|s| s != block_id);
        if task.subscribers.is_empty() {
            if let Some(task) = self.in_flight.remove(&channel_id) {
                log::debug!("no blocks left on channel `{channel_id}`, cancelling fetch");
                task.cancel.cancel();
            }
        }
    }

    fn apply(&mut self, outcome: FeedOutcome) {
        let FeedOutcome { channel_id, videos } = outcome;
        let Some(task) = self.in_flight.remove(&channel_id) else {
            return;
        };
        if videos.is_empty() {
            log::warn!(
                "channel `{channel_id}`: no videos, blocks {:?} stay empty",
                task.subscribers
            );
        } else {
            log::info!(
                "channel `{channel_id}`: {} videos for {} block(s)",
                videos.len(),
                task.subscribers.len()
            );
        }
        for block_id in &task.subscribers {
            if let Some(state) = self.states.get_mut(block_id) {
                if !videos.is_empty() {
                    state.videos = videos.clone();
                }
                state.loading = false;
            }
        }
        self.finished.insert(channel_id, videos);
    }

    /// Apply every outcome that has already arrived. Returns how many.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Wait up to `timeout` for all in-flight fetches to finish.
    ///
    /// Returns `true` if nothing is left pending. Blocks still waiting when
    /// the timeout expires keep `loading = true`.
    pub async fn settle(&mut self, timeout: Duration) -> bool {
        self.poll();
        let deadline = tokio::time::Instant::now() + timeout;
        while !self.in_flight.is_empty() {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(outcome)) => self.apply(outcome),
                Ok(None) => break,
                Err(_) => {
                    log::warn!(
                        "{} feed fetch(es) still pending after {timeout:?}",
                        self.in_flight.len()
                    );
                    break;
                },
            }
        }
        self.in_flight.is_empty()
    }
}

impl Drop for FeedStore {
    fn drop(&mut self) {
        for task in self.in_flight.values() {
            task.cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use bento_types::error::{BentoError, Result};
    use tokio::sync::oneshot;

    const BODY: &str = "<feed>\
        <entry><yt:videoId>a</yt:videoId><title>A</title></entry>\
        <entry><yt:videoId>b</yt:videoId><title>B</title></entry>\
        </feed>";

    /// Serves `BODY`, counting requests.
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FeedSource for Counting {
        async fn fetch(&self, _url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(BODY.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl FeedSource for Failing {
        async fn fetch(&self, url: &str) -> Result<String> {
            Err(BentoError::Feed(format!("GET {url}: connection refused")))
        }
    }

    /// Never completes; drops its sender when the fetch future is dropped.
    struct Hanging {
        guard: Mutex<Option<oneshot::Sender<()>>>,
    }

    #[async_trait]
    impl FeedSource for Hanging {
        async fn fetch(&self, _url: &str) -> Result<String> {
            let _guard = self.guard.lock().unwrap().take();
            std::future::pending::<()>().await;
            Ok(String::new())
        }
    }

    fn dataset(json: &str) -> Dataset {
        Dataset::from_json(json).unwrap()
    }

    const TWO_ON_ONE_CHANNEL: &str = r#"[
        {"id":"yt1","type":"SOCIAL","channelId":"UC1","youtubeMode":"grid","colSpan":4,"rowSpan":4},
        {"id":"yt2","type":"SOCIAL","channelId":"UC1","colSpan":2,"rowSpan":2},
        {"id":"gh","type":"SOCIAL","socialPlatform":"github","socialHandle":"foo","colSpan":2,"rowSpan":2}
    ]"#;

    #[tokio::test]
    async fn one_fetch_per_channel_fans_out() {
        let source = Arc::new(Counting::default());
        let mut store = FeedStore::new(Arc::<Counting>::clone(&source), FeedConfig::default());
        store.sync(&dataset(TWO_ON_ONE_CHANNEL));

        assert!(store.state("yt1").unwrap().loading);
        assert!(store.state("yt2").unwrap().loading);
        assert!(store.state("gh").is_none());
        assert_eq!(store.pending(), 1);

        assert!(store.settle(Duration::from_secs(5)).await);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        for id in ["yt1", "yt2"] {
            let state = store.state(id).unwrap();
            assert!(!state.loading);
            assert_eq!(state.videos.len(), 2);
            assert_eq!(state.videos[0].id, "a");
        }
    }

    #[tokio::test]
    async fn resync_with_same_inputs_does_not_refetch() {
        let source = Arc::new(Counting::default());
        let mut store = FeedStore::new(Arc::<Counting>::clone(&source), FeedConfig::default());
        let ds = dataset(TWO_ON_ONE_CHANNEL);
        store.sync(&ds);
        store.settle(Duration::from_secs(5)).await;
        store.sync(&ds);
        store.sync(&ds);
        assert_eq!(store.pending(), 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.state("yt2").unwrap().videos.len(), 2);
    }

    #[tokio::test]
    async fn preseeded_videos_skip_fetch() {
        let source = Arc::new(Counting::default());
        let mut store = FeedStore::new(Arc::<Counting>::clone(&source), FeedConfig::default());
        store.sync(&dataset(
            r#"[{"id":"yt","type":"SOCIAL","channelId":"UC1","colSpan":2,"rowSpan":2,
                "youtubeVideos":[{"id":"p","title":"Pinned","thumbnail":"t.jpg"}]}]"#,
        ));
        let state = store.state("yt").unwrap();
        assert!(!state.loading);
        assert_eq!(state.videos[0].id, "p");
        assert_eq!(store.pending(), 0);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_clears_loading_and_keeps_no_videos() {
        let mut store = FeedStore::new(Arc::new(Failing), FeedConfig::default());
        store.sync(&dataset(
            r#"[{"id":"yt","type":"SOCIAL","channelId":"UC1","colSpan":2,"rowSpan":2}]"#,
        ));
        assert_eq!(
            store.state("yt"),
            Some(&FeedState {
                videos: vec![],
                loading: true
            })
        );
        assert!(store.settle(Duration::from_secs(5)).await);
        assert_eq!(store.state("yt"), Some(&FeedState::default()));
    }

    #[tokio::test]
    async fn failed_channel_is_not_retried() {
        let mut store = FeedStore::new(Arc::new(Failing), FeedConfig::default());
        let ds = dataset(r#"[{"id":"a","type":"SOCIAL","channelId":"UC1","colSpan":1,"rowSpan":1}]"#);
        store.sync(&ds);
        store.settle(Duration::from_secs(5)).await;
        let ds = dataset(r#"[{"id":"b","type":"SOCIAL","channelId":"UC1","colSpan":1,"rowSpan":1}]"#);
        store.sync(&ds);
        assert_eq!(store.pending(), 0);
        assert_eq!(store.state("b"), Some(&FeedState::default()));
    }

    #[tokio::test]
    async fn removing_last_subscriber_cancels_fetch() {
        let (tx, rx) = oneshot::channel();
        let source = Arc::new(Hanging {
            guard: Mutex::new(Some(tx)),
        });
        let mut store = FeedStore::new(source, FeedConfig::default());
        store.sync(&dataset(
            r#"[{"id":"yt","type":"SOCIAL","channelId":"UC1","colSpan":2,"rowSpan":2}]"#,
        ));
        tokio::task::yield_now().await;
        assert_eq!(store.pending(), 1);

        store.sync(&dataset("[]"));
        assert_eq!(store.pending(), 0);
        assert!(store.state("yt").is_none());

        let dropped = tokio::time::timeout(Duration::from_secs(5), rx).await;
        assert!(matches!(dropped, Ok(Err(_))), "fetch future was not dropped");
    }

    #[tokio::test]
    async fn changing_channel_resubscribes() {
        let source = Arc::new(Counting::default());
        let mut store = FeedStore::new(Arc::<Counting>::clone(&source), FeedConfig::default());
        store.sync(&dataset(r#"[{"id":"yt","type":"SOCIAL","channelId":"UC1","colSpan":1,"rowSpan":1}]"#));
        store.settle(Duration::from_secs(5)).await;
        store.sync(&dataset(r#"[{"id":"yt","type":"SOCIAL","channelId":"UC2","colSpan":1,"rowSpan":1}]"#));
        assert!(store.state("yt").unwrap().loading);
        store.settle(Duration::from_secs(5)).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_feed_never_fetches() {
        let source = Arc::new(Counting::default());
        let config = FeedConfig {
            enabled: false,
            ..FeedConfig::default()
        };
        let mut store = FeedStore::new(Arc::<Counting>::clone(&source), config);
        store.sync(&dataset(r#"[{"id":"yt","type":"SOCIAL","channelId":"UC1","colSpan":1,"rowSpan":1}]"#));
        assert_eq!(store.state("yt"), Some(&FeedState::default()));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sync_without_runtime_degrades() {
        let mut store = FeedStore::new(Arc::new(Counting::default()), FeedConfig::default());
        store.sync(&dataset(r#"[{"id":"yt","type":"SOCIAL","channelId":"UC1","colSpan":1,"rowSpan":1}]"#));
        assert_eq!(store.state("yt"), Some(&FeedState::default()));
        assert_eq!(store.pending(), 0);
    }
}
