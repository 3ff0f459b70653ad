//! Click resolution and outbound navigation.
//!
//! A tile's destination is resolved in order:
//! 1. SOCIAL with a platform and handle that the registry resolves;
//! 2. the canonical channel URL when the block has a channel id;
//! 3. the literal `content` field.
//!
//! Icon tiles only ever use the registry. Whatever comes out, navigation
//! happens only for absolute `http://` / `https://` targets.

use bento_feed::youtube::channel_url;
use bento_social::registry::profile_url;
use bento_types::block::SocialLink;
use bento_types::{Block, BlockKind};

/// Registry key used when an icon tile has no platform.
const FALLBACK_PLATFORM: &str = "custom";

/// Destination of an icon tile. `None` makes the tile inert.
pub fn icon_destination(link: &SocialLink) -> Option<String> {
    let platform = link.platform.as_deref().unwrap_or(FALLBACK_PLATFORM);
    profile_url(platform, link.handle.as_deref()?)
}

/// Unfiltered click destination of a block.
pub fn destination(block: &Block) -> Option<String> {
    match &block.kind {
        BlockKind::Spacer => None,
        BlockKind::SocialIcon(link) => icon_destination(link),
        kind => {
            if let BlockKind::Social(social) = kind {
                if let (Some(platform), Some(handle)) =
                    (social.link.platform.as_deref(), social.link.handle.as_deref())
                {
                    match profile_url(platform, handle) {
                        Some(url) => return Some(url),
                        None => log::debug!(
                            "block `{}`: unknown platform `{platform}`",
                            block.id
                        ),
                    }
                }
            }
            if let Some(channel) = block.channel() {
                return Some(channel_url(&channel.id));
            }
            block.content().map(str::to_string)
        },
    }
}

/// True for an absolute `http://` or `https://` URL with something after
/// the scheme.
pub fn is_navigable(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'))
    })
}

/// Destination a click on `block` navigates to, if any.
pub fn resolve_click(block: &Block) -> Option<String> {
    destination(block).filter(|url| is_navigable(url))
}

/// A request to open a URL in a new browsing context with neither opener
/// nor referrer exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub url: String,
}

impl OpenRequest {
    /// Browsing context target.
    pub const TARGET: &'static str = "_blank";
    /// Window features passed to the host.
    pub const FEATURES: &'static str = "noopener,noreferrer";
    /// `rel` attribute for anchors.
    pub const REL: &'static str = "noopener noreferrer";
}

/// Host capability that opens outbound links.
pub trait Navigator {
    fn open(&mut self, request: OpenRequest);
}

/// Navigator that records requests instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub opened: Vec<OpenRequest>,
}

impl Navigator for RecordingNavigator {
    fn open(&mut self, request: OpenRequest) {
        self.opened.push(request);
    }
}

/// Open `url` through `navigator` if it is navigable. Returns whether a
/// navigation was issued.
pub fn navigate(navigator: &mut dyn Navigator, url: &str) -> bool {
    if !is_navigable(url) {
        log::debug!("ignoring non-http destination `{url}`");
        return false;
    }
    navigator.open(OpenRequest {
        url: url.to_string(),
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_types::Dataset;

    fn block(json: &str) -> Block {
        Dataset::from_json(&format!("[{json}]")).unwrap().blocks()[0].clone()
    }

    #[test]
    fn link_uses_content() {
        let b = block(r#"{"id":"a","type":"LINK","content":"https://a.com"}"#);
        assert_eq!(resolve_click(&b).as_deref(), Some("https://a.com"));
    }

    #[test]
    fn social_platform_wins_over_content_and_channel() {
        let b = block(
            r#"{"id":"a","type":"SOCIAL","socialPlatform":"github","socialHandle":"foo",
                "channelId":"UC1","content":"https://elsewhere.com"}"#,
        );
        assert_eq!(resolve_click(&b).as_deref(), Some("https://github.com/foo"));
    }

    #[test]
    fn channel_wins_over_content() {
        let b = block(r#"{"id":"a","type":"SOCIAL","channelId":"UC1","content":"https://x.com"}"#);
        assert_eq!(
            resolve_click(&b).as_deref(),
            Some("https://youtube.com/channel/UC1")
        );
    }

    #[test]
    fn unknown_platform_falls_through() {
        let b = block(
            r#"{"id":"a","type":"SOCIAL","socialPlatform":"myspace","socialHandle":"tom",
                "content":"https://myspace.com/tom"}"#,
        );
        assert_eq!(resolve_click(&b).as_deref(), Some("https://myspace.com/tom"));
    }

    #[test]
    fn platform_without_handle_uses_content() {
        let b = block(
            r#"{"id":"a","type":"SOCIAL","socialPlatform":"github","content":"https://c.com"}"#,
        );
        assert_eq!(resolve_click(&b).as_deref(), Some("https://c.com"));
    }

    #[test]
    fn non_http_destinations_are_ignored() {
        for content in ["", "mailto:a@b.c", "javascript:alert(1)", "ftp://x", "/local", "https://"] {
            let b = block(&format!(
                r#"{{"id":"a","type":"LINK","content":{}}}"#,
                serde_json::to_string(content).unwrap()
            ));
            assert_eq!(resolve_click(&b), None, "{content:?}");
        }
    }

    #[test]
    fn text_content_is_not_a_destination() {
        let b = block(r#"{"id":"a","type":"TEXT","content":"Hello there"}"#);
        assert_eq!(destination(&b).as_deref(), Some("Hello there"));
        assert_eq!(resolve_click(&b), None);
    }

    #[test]
    fn spacer_is_inert() {
        let b = block(r#"{"id":"a","type":"SPACER","content":"https://a.com"}"#);
        assert_eq!(resolve_click(&b), None);
    }

    #[test]
    fn icon_defaults_to_custom_platform() {
        let link = SocialLink {
            platform: None,
            handle: Some("https://cal.com/me".into()),
        };
        assert_eq!(icon_destination(&link).as_deref(), Some("https://cal.com/me"));
    }

    #[test]
    fn icon_without_handle_or_known_platform_is_inert() {
        let no_handle = SocialLink {
            platform: Some("github".into()),
            handle: None,
        };
        assert_eq!(icon_destination(&no_handle), None);
        let unknown = SocialLink {
            platform: Some("myspace".into()),
            handle: Some("tom".into()),
        };
        assert_eq!(icon_destination(&unknown), None);
    }

    #[test]
    fn navigate_records_only_http() {
        let mut nav = RecordingNavigator::default();
        assert!(!navigate(&mut nav, "mailto:x@y.z"));
        assert!(navigate(&mut nav, "http://a.com"));
        assert_eq!(nav.opened, vec![OpenRequest { url: "http://a.com".into() }]);
    }
}
