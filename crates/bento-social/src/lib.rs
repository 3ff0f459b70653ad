//! Social platform registry and follower count formatting.

pub mod count;
pub mod registry;

pub use count::{format_count, format_follower_count};
pub use registry::{PlatformEntry, UrlRule, resolve};
