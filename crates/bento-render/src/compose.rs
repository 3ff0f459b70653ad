//! Block compositor.
//!
//! [`compose`] turns one block, its placement and its feed state into a
//! [`Tile`]: a backend-neutral description of what to draw and how the
//! tile reacts to input. The dispatch is a single exhaustive match over
//! [`BlockKind`], refined by the channel presentation for SOCIAL blocks.

use std::collections::HashMap;

use bento_feed::youtube::{poster_url, watch_url};
use bento_feed::{FeedState, FeedStore};
use bento_social::{format_follower_count, resolve};
use bento_types::block::{Card, Channel, Image, MediaPosition, SocialBlock, VideoSummary};
use bento_types::color::Color;
use bento_types::{Block, BlockKind, Dataset};
use bento_ui::grid::GridPlacement;
use bento_ui::{BorderRadius, Icon, Placement, mobile_layout};

use crate::click::{icon_destination, is_navigable, resolve_click};

/// Videos shown in the gallery layout.
pub const GALLERY_SIZE: usize = 4;

/// Header of a gallery tile without a channel title.
pub const DEFAULT_CHANNEL_TITLE: &str = "YouTube";

/// Map query used when a MAP block has no content.
pub const DEFAULT_MAP_QUERY: &str = "Paris";

/// Sandbox flags of the map embed.
pub const MAP_SANDBOX: &str = "allow-scripts allow-same-origin";

const DEFAULT_SURFACE: &str = "bg-white";
const DEFAULT_TEXT: &str = "text-gray-900";
const BRAND_TEXT: &str = "text-brand";
const WHITE_TEXT: &str = "text-white";

/// Read access to per-block feed state.
pub trait FeedLookup {
    fn feed(&self, block_id: &str) -> Option<&FeedState>;
}

impl FeedLookup for FeedStore {
    fn feed(&self, block_id: &str) -> Option<&FeedState> {
        self.state(block_id)
    }
}

impl FeedLookup for HashMap<String, FeedState> {
    fn feed(&self, block_id: &str) -> Option<&FeedState> {
        self.get(block_id)
    }
}

/// No ingestion at all: channel tiles fall back to pre-seeded videos.
impl FeedLookup for () {
    fn feed(&self, _block_id: &str) -> Option<&FeedState> {
        None
    }
}

/// Tile background.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Utility class such as `bg-gray-900`.
    Class(String),
    /// Raw CSS `background` value.
    Custom(String),
    /// Cover image at a focal point.
    Cover { url: String, position: MediaPosition },
}

/// Media element type, by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// `mp4`, `webm`, `ogg` and `mov` (any case) are video; the rest image.
    pub fn from_url(url: &str) -> Self {
        match url.rsplit_once('.') {
            Some((_, ext))
                if ["mp4", "webm", "ogg", "mov"]
                    .iter()
                    .any(|v| ext.eq_ignore_ascii_case(v)) =>
            {
                MediaKind::Video
            },
            _ => MediaKind::Image,
        }
    }
}

/// Title and optional subtext drawn over media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    pub subtext: Option<String>,
}

/// One thumbnail of the gallery layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLink {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub href: String,
}

impl From<&VideoSummary> for VideoLink {
    fn from(v: &VideoSummary) -> Self {
        Self {
            id: v.id.clone(),
            title: v.title.clone(),
            thumbnail: v.thumbnail.clone(),
            href: watch_url(&v.id),
        }
    }
}

/// How a card's platform badge is tinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTint {
    Brand(Color),
    Translucent,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub icon: Icon,
    pub tint: BadgeTint,
}

/// Variant-specific content of a tile.
#[derive(Debug, Clone, PartialEq)]
pub enum TileBody {
    Spacer,
    SocialIcon {
        icon: Option<Icon>,
        color: Option<Color>,
    },
    VideoGrid {
        header: String,
        loading: bool,
        videos: Vec<VideoLink>,
    },
    VideoHero {
        poster: String,
        caption: Option<String>,
    },
    Media {
        kind: MediaKind,
        url: String,
        position: MediaPosition,
        alt: String,
        caption: Option<Caption>,
    },
    Map {
        embed_url: String,
        caption: Option<String>,
    },
    Text {
        title: Option<String>,
        subtext: Option<String>,
        body: Option<String>,
    },
    Card {
        badge: Option<Badge>,
        title: Option<String>,
        subtext: Option<String>,
        followers: Option<String>,
        /// Text sits over a cover image.
        on_image: bool,
    },
}

/// Composed tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: String,
    pub type_name: &'static str,
    pub placement: Placement,
    pub radius: BorderRadius,
    pub background: Option<Background>,
    pub text_class: Option<String>,
    pub body: TileBody,
    /// Navigable click destination. `None` means the tile is inert.
    pub click: Option<String>,
    /// Whether the tile follows the pointer with a tilt.
    pub tilt: bool,
    /// Whether a bottom-up legibility gradient sits under the text.
    pub scrim: bool,
}

/// Templated embed URL of a map query.
pub fn map_embed_url(query: Option<&str>) -> String {
    let query = query.unwrap_or(DEFAULT_MAP_QUERY);
    format!(
        "https://maps.google.com/maps?q={}&t=&z=13&ie=UTF8&iwloc=&output=embed",
        urlencoding::encode(query)
    )
}

/// True when the block is a channel tile in the gallery layout.
fn is_gallery(block: &Block) -> bool {
    block.channel().is_some_and(|c| c.mode.is_gallery())
}

/// Whether the block's tile tilts under the pointer.
pub fn tilts(block: &Block) -> bool {
    !matches!(block.kind, BlockKind::Spacer | BlockKind::SocialIcon(_)) && !is_gallery(block)
}

/// Videos known for a channel: fetched if any, else pre-seeded.
fn channel_videos<'a>(channel: &'a Channel, feed: Option<&'a FeedState>) -> &'a [VideoSummary] {
    match feed {
        Some(state) if !state.videos.is_empty() => &state.videos,
        _ => &channel.preseeded,
    }
}

fn surface_class(block: &Block) -> Background {
    match &block.surface.custom_background {
        Some(custom) => Background::Custom(custom.clone()),
        None => Background::Class(
            block
                .surface
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_SURFACE.to_string()),
        ),
    }
}

fn badge(block: &Block, social: &SocialBlock) -> Option<Badge> {
    let entry = resolve(social.link.platform.as_deref()?)?;
    let tint = match block.surface.text_color.as_deref() {
        Some(BRAND_TEXT) => BadgeTint::Brand(entry.brand_color),
        Some(WHITE_TEXT) => BadgeTint::Translucent,
        _ => BadgeTint::Neutral,
    };
    Some(Badge {
        icon: entry.icon,
        tint,
    })
}

fn card_body(card: &Card, on_image: bool) -> TileBody {
    TileBody::Card {
        badge: None,
        title: card.title.clone(),
        subtext: card.subtext.clone(),
        followers: None,
        on_image,
    }
}

/// Compose the tile for `block` at `placement`.
pub fn compose(block: &Block, placement: Placement, feed: Option<&FeedState>) -> Tile {
    let mut tile = Tile {
        id: block.id.clone(),
        type_name: block.type_name(),
        placement,
        radius: BorderRadius::for_span(block.span),
        background: None,
        text_class: None,
        body: TileBody::Spacer,
        click: None,
        tilt: tilts(block),
        scrim: false,
    };

    match &block.kind {
        BlockKind::Spacer => return tile,
        BlockKind::SocialIcon(link) => {
            let entry = resolve(link.platform.as_deref().unwrap_or("custom"));
            tile.background = Some(surface_class(block));
            tile.body = TileBody::SocialIcon {
                icon: entry.map(|e| e.icon),
                color: entry.map(|e| e.brand_color),
            };
            tile.click = icon_destination(link).filter(|url| is_navigable(url));
            return tile;
        },
        _ => {},
    }

    tile.click = resolve_click(block);

    if let Some(channel) = block.channel().filter(|c| c.mode.is_gallery()) {
        let loading = feed.is_some_and(|f| f.loading);
        tile.background = Some(surface_class(block));
        tile.body = TileBody::VideoGrid {
            header: channel
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_CHANNEL_TITLE.to_string()),
            loading,
            videos: channel_videos(channel, feed)
                .iter()
                .take(GALLERY_SIZE)
                .map(VideoLink::from)
                .collect(),
        };
        return tile;
    }

    let hero_id = block.channel().and_then(|channel| {
        channel
            .video_id
            .clone()
            .or_else(|| channel_videos(channel, feed).first().map(|v| v.id.clone()))
    });
    let link_image = match &block.kind {
        BlockKind::Link {
            image: Some(image), ..
        } => Some(image),
        _ => None,
    };

    tile.background = Some(match (&hero_id, link_image) {
        (Some(id), _) => Background::Cover {
            url: poster_url(id),
            position: MediaPosition::default(),
        },
        (None, Some(Image { url, position })) => Background::Cover {
            url: url.clone(),
            position: *position,
        },
        (None, None) => surface_class(block),
    });
    tile.text_class = Some(
        block
            .surface
            .text_color
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT.to_string()),
    );
    tile.scrim = (hero_id.is_some() || link_image.is_some())
        && (block.title().is_some() || block.subtext().is_some());

    tile.body = match &block.kind {
        BlockKind::Media {
            card,
            image: Some(image),
        } => TileBody::Media {
            kind: MediaKind::from_url(&image.url),
            url: image.url.clone(),
            position: image.position,
            alt: card.title.clone().unwrap_or_default(),
            caption: card.title.clone().map(|title| Caption {
                title,
                subtext: card.subtext.clone(),
            }),
        },
        BlockKind::Map { card } => TileBody::Map {
            embed_url: map_embed_url(card.content.as_deref()),
            caption: card.title.clone(),
        },
        BlockKind::Social(social) => match (&hero_id, &social.channel) {
            (Some(id), Some(channel)) => TileBody::VideoHero {
                poster: poster_url(id),
                caption: channel.title.clone().or_else(|| social.card.title.clone()),
            },
            _ => TileBody::Card {
                badge: badge(block, social),
                title: social.card.title.clone(),
                subtext: social.card.subtext.clone(),
                followers: social
                    .follower_count
                    .map(|n| format!("{} followers", format_follower_count(Some(n)))),
                on_image: false,
            },
        },
        BlockKind::Text { card } => TileBody::Text {
            title: card.title.clone(),
            subtext: card.subtext.clone(),
            body: card.content.clone(),
        },
        BlockKind::Link { card, image } => card_body(card, image.is_some()),
        BlockKind::Media { card, image: None } => card_body(card, false),
        BlockKind::Spacer | BlockKind::SocialIcon(_) => TileBody::Spacer,
    };
    tile
}

/// Desktop tiles in dataset order.
pub fn desktop_tiles(dataset: &Dataset, feeds: &dyn FeedLookup) -> Vec<Tile> {
    dataset
        .blocks()
        .iter()
        .map(|b| compose(b, Placement::Desktop(GridPlacement::of(b)), feeds.feed(&b.id)))
        .collect()
}

/// Mobile tiles in reflow order with reflowed spans.
pub fn mobile_tiles(dataset: &Dataset, feeds: &dyn FeedLookup) -> Vec<Tile> {
    mobile_layout(dataset.blocks())
        .into_iter()
        .map(|(b, placement)| compose(b, placement, feeds.feed(&b.id)))
        .collect()
}
