//! bento-render: from blocks to a page.
//!
//! - [`compose`] dispatches each block to a [`Tile`] description.
//! - [`click`] resolves tile destinations and issues navigations.
//! - [`html`] writes the static two-breakpoint page.
//! - [`session`] drives tilt and clicks for interactive hosts.
//! - [`analytics`] defines the event payload and sinks.
//! - [`utility`] turns dataset color classes into CSS rules.

pub mod analytics;
pub mod click;
pub mod compose;
pub mod html;
pub mod session;
pub mod utility;

pub use analytics::{AnalyticsEvent, AnalyticsSink, DisabledSink, PageContext, sink_for};
pub use click::{Navigator, OpenRequest, RecordingNavigator, resolve_click};
pub use compose::{FeedLookup, Tile, TileBody, compose};
pub use html::render_page;
pub use session::PageSession;
