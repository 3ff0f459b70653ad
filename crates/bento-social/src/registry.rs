//! Static registry of social platforms.
//!
//! Each row pairs a platform key with its icon, brand color, and the rule
//! that turns a handle into an absolute profile URL. The table is a plain
//! `static` slice; lookups never allocate.

use bento_types::color::Color;
use bento_ui::Icon;

/// How a handle becomes a destination URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRule {
    /// `prefix + handle`.
    Prefix(&'static str),
    /// `prefix + handle + suffix`, for handle-as-subdomain platforms.
    Wrap(&'static str, &'static str),
    /// The handle is already the URL (invite links, instance URLs,
    /// arbitrary custom links).
    Verbatim,
    /// Pass through a handle that already carries a scheme, otherwise
    /// prefix `https://`.
    Website,
}

impl UrlRule {
    /// Apply the rule to a handle.
    pub fn apply(self, handle: &str) -> String {
        match self {
            UrlRule::Prefix(prefix) => format!("{prefix}{handle}"),
            UrlRule::Wrap(prefix, suffix) => format!("{prefix}{handle}{suffix}"),
            UrlRule::Verbatim => handle.to_string(),
            UrlRule::Website => {
                if has_scheme(handle) {
                    handle.to_string()
                } else {
                    format!("https://{handle}")
                }
            },
        }
    }
}

/// `scheme:` prefix in the RFC 3986 alphabet. A dotted prefix or a
/// numeric tail (`example.com:8080`, `localhost:3000`) is a host, not a
/// scheme.
fn has_scheme(handle: &str) -> bool {
    let Some((scheme, rest)) = handle.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
        && !rest.starts_with(|c: char| c.is_ascii_digit())
}

/// One registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformEntry {
    pub key: &'static str,
    pub icon: Icon,
    pub brand_color: Color,
    pub url: UrlRule,
}

impl PlatformEntry {
    /// Absolute destination URL for `handle`.
    pub fn build_url(&self, handle: &str) -> String {
        self.url.apply(handle)
    }
}

const fn entry(key: &'static str, icon: Icon, rgb: u32, url: UrlRule) -> PlatformEntry {
    PlatformEntry {
        key,
        icon,
        brand_color: Color::from_hex(rgb),
        url,
    }
}

use UrlRule::{Prefix, Verbatim, Website, Wrap};

/// Every known platform.
pub static PLATFORMS: &[PlatformEntry] = &[
    entry("x", Icon::X, 0x000000, Prefix("https://x.com/")),
    entry("instagram", Icon::Instagram, 0xE4405F, Prefix("https://instagram.com/")),
    entry("tiktok", Icon::TikTok, 0x000000, Prefix("https://tiktok.com/@")),
    entry("youtube", Icon::YouTube, 0xFF0000, Prefix("https://youtube.com/@")),
    entry("github", Icon::GitHub, 0x181717, Prefix("https://github.com/")),
    entry("gitlab", Icon::GitLab, 0xFC6D26, Prefix("https://gitlab.com/")),
    entry("linkedin", Icon::LinkedIn, 0x0A66C2, Prefix("https://linkedin.com/in/")),
    entry("facebook", Icon::Facebook, 0x1877F2, Prefix("https://facebook.com/")),
    entry("twitch", Icon::Twitch, 0x9146FF, Prefix("https://twitch.tv/")),
    entry("dribbble", Icon::Dribbble, 0xEA4C89, Prefix("https://dribbble.com/")),
    entry("medium", Icon::Medium, 0x000000, Prefix("https://medium.com/@")),
    entry("devto", Icon::DevTo, 0x0A0A0A, Prefix("https://dev.to/")),
    entry("reddit", Icon::Reddit, 0xFF4500, Prefix("https://reddit.com/user/")),
    entry("pinterest", Icon::Pinterest, 0xBD081C, Prefix("https://pinterest.com/")),
    entry("threads", Icon::Threads, 0x000000, Prefix("https://threads.net/@")),
    entry("bluesky", Icon::Bluesky, 0x0085FF, Prefix("https://bsky.app/profile/")),
    entry("mastodon", Icon::Mastodon, 0x6364FF, Verbatim),
    entry("substack", Icon::Substack, 0xFF6719, Wrap("https://", ".substack.com")),
    entry("patreon", Icon::Patreon, 0xFF424D, Prefix("https://patreon.com/")),
    entry("kofi", Icon::KoFi, 0xFF5E5B, Prefix("https://ko-fi.com/")),
    entry("buymeacoffee", Icon::BuyMeACoffee, 0xFFDD00, Prefix("https://buymeacoffee.com/")),
    entry("snapchat", Icon::Snapchat, 0xFFFC00, Prefix("https://snapchat.com/add/")),
    entry("discord", Icon::Discord, 0x5865F2, Verbatim),
    entry("telegram", Icon::Telegram, 0x26A5E4, Prefix("https://t.me/")),
    entry("whatsapp", Icon::WhatsApp, 0x25D366, Prefix("https://wa.me/")),
    entry("website", Icon::Globe, 0x6B7280, Website),
    entry("custom", Icon::Link, 0x6B7280, Verbatim),
];

/// Look up a platform by key. Unknown keys resolve to nothing.
pub fn resolve(key: &str) -> Option<&'static PlatformEntry> {
    PLATFORMS.iter().find(|p| p.key == key)
}

/// Resolve `key` and build the URL for a non-empty `handle`.
pub fn profile_url(key: &str, handle: &str) -> Option<String> {
    if handle.is_empty() {
        return None;
    }
    resolve(key).map(|p| p.build_url(handle))
}
