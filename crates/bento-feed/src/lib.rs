//! Video feed ingestion.
//!
//! A SOCIAL block with a channel id and no pre-seeded videos gets its
//! latest videos from the channel's public feed, fetched through a proxy.
//! Ingestion is best-effort: any failure simply leaves the block with no
//! videos.
//!
//! - [`parse`] turns feed XML into [`VideoSummary`] records.
//! - [`source`] performs the HTTP GET behind the [`FeedSource`] trait.
//! - [`store`] keeps per-block state and schedules at most one fetch per
//!   channel.
//! - [`youtube`] holds the URL templates derived from ids.

pub mod parse;
pub mod source;
pub mod store;
pub mod youtube;

pub use bento_types::block::VideoSummary;
pub use source::{FeedSource, HttpFeedSource, feed_request_url, fetch_videos};
pub use store::{FeedState, FeedStore};
