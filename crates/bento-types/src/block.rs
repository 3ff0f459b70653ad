//! Block data model and dataset loading.
//!
//! The dataset is stored as a flat JSON record per block (camelCase keys,
//! upper-case `type`). On load every record is normalised into a [`Block`]
//! whose [`BlockKind`] carries only the fields its variant actually uses.
//! After loading, a [`Dataset`] is never mutated.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BentoError, Result};

/// Desktop grid footprint of a block. Both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    cols: u32,
    rows: u32,
}

impl Span {
    /// Create a span, clamping each dimension to at least 1.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Column count.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Row count.
    pub fn rows(&self) -> u32 {
        self.rows
    }
}

/// Explicit 1-based desktop start lines. Either axis may be absent, in
/// which case the block flows naturally along that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridOrigin {
    pub column: Option<u32>,
    pub row: Option<u32>,
}

/// Focal point of media inside its tile, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaPosition {
    pub x: f32,
    pub y: f32,
}

impl Default for MediaPosition {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

/// One video of a channel feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
}

/// How a channel-backed SOCIAL tile presents its videos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    #[default]
    Single,
    Grid,
    List,
}

impl FeedMode {
    /// Grid and list both render the 2x2 thumbnail layout.
    pub fn is_gallery(self) -> bool {
        matches!(self, FeedMode::Grid | FeedMode::List)
    }
}

/// Presentation classes and overrides shared by every variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    /// Background class, e.g. `bg-gray-900`.
    pub color: Option<String>,
    /// Raw CSS `background` value; wins over `color`.
    pub custom_background: Option<String>,
    /// Text class, e.g. `text-white`.
    pub text_color: Option<String>,
}

/// Title / subtext / content triple carried by most variants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub title: Option<String>,
    pub subtext: Option<String>,
    /// Destination URL, body text, or map query depending on the variant.
    pub content: Option<String>,
}

/// An image or video URL with its focal point.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    pub position: MediaPosition,
}

/// Platform key and handle of a social destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLink {
    /// Registry key such as `github`; unknown keys are kept verbatim.
    pub platform: Option<String>,
    pub handle: Option<String>,
}

/// Video channel attached to a SOCIAL block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: String,
    /// Pinned video for the hero presentation.
    pub video_id: Option<String>,
    pub title: Option<String>,
    pub mode: FeedMode,
    /// Videos shipped with the dataset. Non-empty means no fetch.
    pub preseeded: Vec<VideoSummary>,
}

/// SOCIAL variant payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SocialBlock {
    pub card: Card,
    pub link: SocialLink,
    pub follower_count: Option<u64>,
    pub channel: Option<Channel>,
}

/// The closed set of block variants with their payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Link { card: Card, image: Option<Image> },
    Text { card: Card },
    Media { card: Card, image: Option<Image> },
    Social(SocialBlock),
    SocialIcon(SocialLink),
    Map { card: Card },
    Spacer,
}

/// A single tile of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub span: Span,
    pub origin: GridOrigin,
    pub surface: Surface,
    pub kind: BlockKind,
}

impl Block {
    /// Upper-case variant name as it appears in the dataset.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            BlockKind::Link { .. } => "LINK",
            BlockKind::Text { .. } => "TEXT",
            BlockKind::Media { .. } => "MEDIA",
            BlockKind::Social(_) => "SOCIAL",
            BlockKind::SocialIcon(_) => "SOCIAL_ICON",
            BlockKind::Map { .. } => "MAP",
            BlockKind::Spacer => "SPACER",
        }
    }

    /// Card fields, for variants that have them.
    pub fn card(&self) -> Option<&Card> {
        match &self.kind {
            BlockKind::Link { card, .. }
            | BlockKind::Text { card }
            | BlockKind::Media { card, .. }
            | BlockKind::Map { card } => Some(card),
            BlockKind::Social(social) => Some(&social.card),
            BlockKind::SocialIcon(_) | BlockKind::Spacer => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.card().and_then(|c| c.title.as_deref())
    }

    pub fn subtext(&self) -> Option<&str> {
        self.card().and_then(|c| c.subtext.as_deref())
    }

    /// The literal `content` field.
    pub fn content(&self) -> Option<&str> {
        self.card().and_then(|c| c.content.as_deref())
    }

    /// Channel of a SOCIAL block.
    pub fn channel(&self) -> Option<&Channel> {
        match &self.kind {
            BlockKind::Social(social) => social.channel.as_ref(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum BlockType {
    Link,
    Text,
    Media,
    Social,
    SocialIcon,
    Map,
    Spacer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    id: String,
    #[serde(rename = "type")]
    block_type: BlockType,
    title: Option<String>,
    content: Option<String>,
    subtext: Option<String>,
    image_url: Option<String>,
    media_position: Option<MediaPosition>,
    col_span: Option<i64>,
    row_span: Option<i64>,
    color: Option<String>,
    custom_background: Option<String>,
    text_color: Option<String>,
    grid_column: Option<i64>,
    grid_row: Option<i64>,
    channel_id: Option<String>,
    youtube_video_id: Option<String>,
    channel_title: Option<String>,
    youtube_mode: Option<FeedMode>,
    youtube_videos: Option<Vec<VideoSummary>>,
    social_platform: Option<String>,
    social_handle: Option<String>,
    follower_count: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Blocks(Vec<RawBlock>),
    Page { blocks: Vec<RawBlock> },
}

/// Empty strings in the dataset mean "absent".
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn span_dim(id: &str, axis: &str, value: Option<i64>) -> u32 {
    match value {
        Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
        other => {
            log::warn!("block `{id}`: {axis} {other:?} clamped to 1");
            1
        },
    }
}

fn grid_line(id: &str, axis: &str, value: Option<i64>) -> Option<u32> {
    let v = value?;
    match u32::try_from(v) {
        Ok(line) if line >= 1 => Some(line),
        _ => {
            log::warn!("block `{id}`: {axis} {v} is not a grid line, using natural flow");
            None
        },
    }
}

impl From<RawBlock> for Block {
    fn from(raw: RawBlock) -> Self {
        let span = Span::new(
            span_dim(&raw.id, "colSpan", raw.col_span),
            span_dim(&raw.id, "rowSpan", raw.row_span),
        );
        let origin = GridOrigin {
            column: grid_line(&raw.id, "gridColumn", raw.grid_column),
            row: grid_line(&raw.id, "gridRow", raw.grid_row),
        };
        let surface = Surface {
            color: present(raw.color),
            custom_background: present(raw.custom_background),
            text_color: present(raw.text_color),
        };
        let card = Card {
            title: present(raw.title),
            subtext: present(raw.subtext),
            content: present(raw.content),
        };
        let position = raw.media_position.unwrap_or_default();
        let image = present(raw.image_url).map(|url| Image { url, position });
        let link = SocialLink {
            platform: present(raw.social_platform),
            handle: present(raw.social_handle),
        };

        let kind = match raw.block_type {
            BlockType::Link => BlockKind::Link { card, image },
            BlockType::Text => BlockKind::Text { card },
            BlockType::Media => BlockKind::Media { card, image },
            BlockType::Social => BlockKind::Social(SocialBlock {
                card,
                link,
                follower_count: raw.follower_count,
                channel: present(raw.channel_id).map(|id| Channel {
                    id,
                    video_id: present(raw.youtube_video_id),
                    title: present(raw.channel_title),
                    mode: raw.youtube_mode.unwrap_or_default(),
                    preseeded: raw.youtube_videos.unwrap_or_default(),
                }),
            }),
            BlockType::SocialIcon => BlockKind::SocialIcon(link),
            BlockType::Map => BlockKind::Map { card },
            BlockType::Spacer => BlockKind::Spacer,
        };

        Block {
            id: raw.id,
            span,
            origin,
            surface,
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The immutable, ordered set of blocks for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    blocks: Vec<Block>,
}

impl Dataset {
    /// Build a dataset from already-normalised blocks.
    ///
    /// Block ids must be unique.
    pub fn new(blocks: Vec<Block>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if block.id.is_empty() {
                return Err(BentoError::Dataset("block with empty id".into()));
            }
            if !seen.insert(block.id.as_str()) {
                return Err(BentoError::Dataset(format!(
                    "duplicate block id `{}`",
                    block.id
                )));
            }
        }
        Ok(Self { blocks })
    }

    /// Parse a dataset from JSON: either a bare array of blocks or an
    /// object with a `blocks` array.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw = match serde_json::from_str::<DatasetFile>(json)? {
            DatasetFile::Blocks(blocks) | DatasetFile::Page { blocks } => blocks,
        };
        Self::new(raw.into_iter().map(Block::from).collect())
    }

    /// Read and parse a dataset file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            BentoError::Dataset(format!("cannot read {}: {e}", path.display()))
        })?;
        let dataset = Self::from_json(&json)?;
        log::info!(
            "Loaded {} blocks from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Blocks in dataset order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
