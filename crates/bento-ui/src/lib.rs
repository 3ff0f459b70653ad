//! bento-ui: layout and interaction primitives.
//!
//! Everything here is pure arithmetic over the block dataset: desktop grid
//! placement, the mobile reflow, and the pointer-driven tilt effect. None
//! of it knows how a tile is eventually drawn.

pub mod grid;
pub mod icon;
pub mod reflow;
pub mod tilt;

pub use grid::{BorderRadius, GridPlacement, Placement};
pub use icon::Icon;
pub use reflow::{mobile_layout, mobile_order, mobile_span};
pub use tilt::{TiltEffect, TiltStyle};
