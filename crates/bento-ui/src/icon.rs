//! Icon identities.
//!
//! Tiles refer to icons by identity only; the page stylesheet (or a host
//! toolkit) maps each identity to artwork via its CSS class.

/// Well-known icon identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    // Brands
    X,
    Instagram,
    TikTok,
    YouTube,
    GitHub,
    GitLab,
    LinkedIn,
    Facebook,
    Twitch,
    Dribbble,
    Medium,
    DevTo,
    Reddit,
    Pinterest,
    Threads,
    Bluesky,
    Mastodon,
    Substack,
    Patreon,
    KoFi,
    BuyMeACoffee,
    Snapchat,
    Discord,
    Telegram,
    WhatsApp,
    // Generic
    Globe,
    Link,
    // Media
    Play,
    Spinner,
}

impl Icon {
    /// Every identity, in declaration order.
    pub const ALL: [Icon; 29] = [
        Icon::X,
        Icon::Instagram,
        Icon::TikTok,
        Icon::YouTube,
        Icon::GitHub,
        Icon::GitLab,
        Icon::LinkedIn,
        Icon::Facebook,
        Icon::Twitch,
        Icon::Dribbble,
        Icon::Medium,
        Icon::DevTo,
        Icon::Reddit,
        Icon::Pinterest,
        Icon::Threads,
        Icon::Bluesky,
        Icon::Mastodon,
        Icon::Substack,
        Icon::Patreon,
        Icon::KoFi,
        Icon::BuyMeACoffee,
        Icon::Snapchat,
        Icon::Discord,
        Icon::Telegram,
        Icon::WhatsApp,
        Icon::Globe,
        Icon::Link,
        Icon::Play,
        Icon::Spinner,
    ];

    /// Stable kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            Icon::X => "x",
            Icon::Instagram => "instagram",
            Icon::TikTok => "tiktok",
            Icon::YouTube => "youtube",
            Icon::GitHub => "github",
            Icon::GitLab => "gitlab",
            Icon::LinkedIn => "linkedin",
            Icon::Facebook => "facebook",
            Icon::Twitch => "twitch",
            Icon::Dribbble => "dribbble",
            Icon::Medium => "medium",
            Icon::DevTo => "devto",
            Icon::Reddit => "reddit",
            Icon::Pinterest => "pinterest",
            Icon::Threads => "threads",
            Icon::Bluesky => "bluesky",
            Icon::Mastodon => "mastodon",
            Icon::Substack => "substack",
            Icon::Patreon => "patreon",
            Icon::KoFi => "kofi",
            Icon::BuyMeACoffee => "buymeacoffee",
            Icon::Snapchat => "snapchat",
            Icon::Discord => "discord",
            Icon::Telegram => "telegram",
            Icon::WhatsApp => "whatsapp",
            Icon::Globe => "globe",
            Icon::Link => "link",
            Icon::Play => "play",
            Icon::Spinner => "spinner",
        }
    }

    /// Self-contained glyph drawn by the page stylesheet: a brand
    /// monogram or a symbol. Empty for the spinner, which is drawn as a
    /// rotating ring.
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::X => "\u{1D54F}",
            Icon::Instagram => "IG",
            Icon::TikTok => "TT",
            Icon::YouTube => "\u{25B6}",
            Icon::GitHub => "GH",
            Icon::GitLab => "GL",
            Icon::LinkedIn => "in",
            Icon::Facebook => "f",
            Icon::Twitch => "TV",
            Icon::Dribbble => "Dr",
            Icon::Medium => "M",
            Icon::DevTo => "DEV",
            Icon::Reddit => "r/",
            Icon::Pinterest => "P",
            Icon::Threads => "@",
            Icon::Bluesky => "\u{1F98B}",
            Icon::Mastodon => "Ma",
            Icon::Substack => "S",
            Icon::Patreon => "Pa",
            Icon::KoFi => "Ko",
            Icon::BuyMeACoffee => "\u{2615}",
            Icon::Snapchat => "\u{1F47B}",
            Icon::Discord => "Dc",
            Icon::Telegram => "\u{2708}",
            Icon::WhatsApp => "WA",
            Icon::Globe => "\u{1F310}",
            Icon::Link => "\u{1F517}",
            Icon::Play => "\u{25B6}",
            Icon::Spinner => "",
        }
    }

    /// CSS class carrying the artwork, e.g. `icon-github`.
    pub fn css_class(self) -> String {
        format!("icon-{}", self.name())
    }
}
