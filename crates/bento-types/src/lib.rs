//! Foundation types for bento.
//!
//! This crate holds the pieces every other bento crate agrees on: the
//! block data model and dataset loader, colors, configuration, and the
//! shared error type.

pub mod block;
pub mod color;
pub mod config;
pub mod error;

pub use block::{Block, BlockKind, Dataset, Span};
pub use error::{BentoError, Result};
