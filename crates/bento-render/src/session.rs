//! Interactive page session.
//!
//! A [`PageSession`] drives a rendered page in a host that delivers
//! pointer events: it owns the tilt state of every tile, resolves clicks
//! to navigations, and reports page views and clicks to analytics.

use std::collections::HashMap;

use bento_feed::youtube::watch_url;
use bento_types::Dataset;
use bento_ui::{TiltEffect, TiltStyle};

use crate::analytics::{AnalyticsEvent, AnalyticsSink, PageContext};
use crate::click::{Navigator, navigate, resolve_click};
use crate::compose::tilts;

struct TileState {
    tilt: TiltEffect,
    click: Option<String>,
}

pub struct PageSession<N, A> {
    tiles: HashMap<String, TileState>,
    context: PageContext,
    navigator: N,
    analytics: A,
}

impl<N: Navigator, A: AnalyticsSink> PageSession<N, A> {
    /// Start a session for `dataset`. Records a page view.
    pub fn new(dataset: &Dataset, context: PageContext, navigator: N, analytics: A) -> Self {
        let tiles = dataset
            .blocks()
            .iter()
            .map(|b| {
                let state = TileState {
                    tilt: TiltEffect::new(tilts(b)),
                    click: resolve_click(b),
                };
                (b.id.clone(), state)
            })
            .collect();
        let mut session = Self {
            tiles,
            context,
            navigator,
            analytics,
        };
        if session.analytics.is_enabled() {
            let event = AnalyticsEvent::page_view(&session.context);
            session.analytics.record(event);
        }
        session
    }

    /// Pointer moved over a tile. `None` for unknown or non-tilting tiles.
    pub fn pointer_move(
        &mut self,
        block_id: &str,
        width: f32,
        height: f32,
        x: f32,
        y: f32,
    ) -> Option<TiltStyle> {
        self.tiles
            .get_mut(block_id)?
            .tilt
            .pointer_move(width, height, x, y)
            .copied()
    }

    /// Pointer left a tile.
    pub fn pointer_leave(&mut self, block_id: &str) -> Option<TiltStyle> {
        self.tiles.get_mut(block_id)?.tilt.pointer_leave().copied()
    }

    /// Current tilt frame of a tile.
    pub fn tilt(&self, block_id: &str) -> Option<&TiltStyle> {
        self.tiles.get(block_id)?.tilt.style()
    }

    /// Click on a tile. Returns whether a navigation was issued.
    pub fn click(&mut self, block_id: &str) -> bool {
        let Some(url) = self.tiles.get(block_id).and_then(|t| t.click.clone()) else {
            log::debug!("click on `{block_id}` has no destination");
            return false;
        };
        self.open(block_id, &url)
    }

    /// Click on a video thumbnail inside a gallery tile.
    ///
    /// Opens the video only; the tile's own click destination is not
    /// consulted.
    pub fn video_click(&mut self, block_id: &str, video_id: &str) -> bool {
        if video_id.is_empty() {
            return false;
        }
        self.open(block_id, &watch_url(video_id))
    }

    fn open(&mut self, block_id: &str, url: &str) -> bool {
        if !navigate(&mut self.navigator, url) {
            return false;
        }
        if self.analytics.is_enabled() {
            let event = AnalyticsEvent::click(&self.context, block_id, url);
            self.analytics.record(event);
        }
        true
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn analytics(&self) -> &A {
        &self.analytics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_types::config::AnalyticsConfig;

    use crate::analytics::{DisabledSink, EventKind, MemorySink, sink_for};
    use crate::click::{OpenRequest, RecordingNavigator};

    const PAGE: &str = r#"[
        {"id":"link","type":"LINK","content":"https://a.com","colSpan":2,"rowSpan":2},
        {"id":"gallery","type":"SOCIAL","channelId":"UC1","youtubeMode":"grid","colSpan":4,"rowSpan":4},
        {"id":"spacer","type":"SPACER","colSpan":1,"rowSpan":1},
        {"id":"note","type":"TEXT","content":"just words","colSpan":2,"rowSpan":2}
    ]"#;

    fn ctx() -> PageContext {
        PageContext {
            page_url: "https://me.page/?utm_source=tw".into(),
            referrer: None,
            language: "en".into(),
            screen_w: 390,
            screen_h: 844,
        }
    }

    fn session() -> PageSession<RecordingNavigator, MemorySink> {
        let ds = Dataset::from_json(PAGE).unwrap();
        PageSession::new(&ds, ctx(), RecordingNavigator::default(), MemorySink::default())
    }

    #[test]
    fn records_page_view_on_start() {
        let s = session();
        assert_eq!(s.analytics().events.len(), 1);
        assert_eq!(s.analytics().events[0].event, EventKind::PageView);
    }

    #[test]
    fn click_navigates_and_tracks() {
        let mut s = session();
        assert!(s.click("link"));
        assert_eq!(s.navigator().opened, vec![OpenRequest { url: "https://a.com".into() }]);
        let last = s.analytics().events.last().unwrap();
        assert_eq!(last.event, EventKind::Click);
        assert_eq!(last.block_id.as_deref(), Some("link"));
    }

    #[test]
    fn inert_clicks_do_nothing() {
        let mut s = session();
        assert!(!s.click("note"));
        assert!(!s.click("spacer"));
        assert!(!s.click("missing"));
        assert!(s.navigator().opened.is_empty());
        assert_eq!(s.analytics().events.len(), 1);
    }

    #[test]
    fn video_click_opens_video_not_channel() {
        let mut s = session();
        assert!(s.video_click("gallery", "abc"));
        assert_eq!(
            s.navigator().opened,
            vec![OpenRequest {
                url: "https://youtube.com/watch?v=abc".into()
            }]
        );
    }

    #[test]
    fn tilt_only_on_tilting_tiles() {
        let mut s = session();
        let frame = s.pointer_move("link", 200.0, 100.0, 100.0, 50.0).unwrap();
        assert_eq!(frame.rotate_x, 0.0);
        assert_eq!(frame.rotate_y, 0.0);
        assert!(s.pointer_move("gallery", 200.0, 100.0, 0.0, 0.0).is_none());
        assert!(s.pointer_move("spacer", 200.0, 100.0, 0.0, 0.0).is_none());
        let rest = s.pointer_leave("link").unwrap();
        assert_eq!(rest, TiltStyle::rest());
        assert_eq!(s.tilt("link"), Some(&TiltStyle::rest()));
    }

    #[test]
    fn disabled_analytics_records_nothing() {
        let ds = Dataset::from_json(PAGE).unwrap();
        let mut s = PageSession::new(&ds, ctx(), RecordingNavigator::default(), DisabledSink);
        assert!(s.click("link"));
        assert_eq!(s.navigator().opened.len(), 1);
    }

    #[test]
    fn configured_sink_plugs_into_session() {
        let ds = Dataset::from_json(PAGE).unwrap();

        let off = sink_for(&AnalyticsConfig::default());
        let mut s = PageSession::new(&ds, ctx(), RecordingNavigator::default(), off);
        assert!(!s.analytics().is_enabled());
        assert!(s.click("link"));

        let on = sink_for(&AnalyticsConfig {
            endpoint: Some("https://collect.example/track".into()),
        });
        let mut s = PageSession::new(&ds, ctx(), RecordingNavigator::default(), on);
        assert!(s.analytics().is_enabled());
        assert!(s.click("link"));
        assert_eq!(s.navigator().opened.len(), 1);
    }
}
