//! Pointer-driven 3D tilt.
//!
//! While the pointer moves over a tile, the tile rotates away from the
//! pointer by up to [`MAX_TILT_DEG`] on each axis, scales up slightly, and
//! casts a shadow opposite to the rotation. A glare highlight follows the
//! pointer. On leave the tile eases back to rest, more slowly than it
//! tracks.
//!
//! Everything here is plain arithmetic on the pointer position; it runs on
//! every pointer-move event without throttling.

use std::fmt::Write as _;
use std::time::Duration;

/// Perspective distance of the 3D transform, in pixels.
pub const PERSPECTIVE_PX: f32 = 800.0;

/// Rotation at the tile edge, in degrees.
pub const MAX_TILT_DEG: f32 = 10.0;

/// Scale applied while the pointer is over the tile.
pub const HOVER_SCALE: f32 = 1.02;

/// Shadow offset per degree of rotation, in pixels.
const SHADOW_PER_DEG: f32 = 1.5;

/// Transition while tracking the pointer.
pub const TRACK_TRANSITION: Duration = Duration::from_millis(100);

/// Transition when returning to rest.
pub const RELEASE_TRANSITION: Duration = Duration::from_millis(500);

/// Shadow under the tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TiltShadow {
    /// Offset shadow that follows the rotation.
    Cast { x: f32, y: f32 },
    /// Neutral shadow of a tile at rest.
    Resting,
}

/// Glare highlight center, in percent of the tile size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glare {
    pub x: f32,
    pub y: f32,
}

/// A computed tilt frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltStyle {
    pub rotate_x: f32,
    pub rotate_y: f32,
    pub scale: f32,
    pub shadow: TiltShadow,
    pub glare: Option<Glare>,
    pub transition: Duration,
}

/// Collapse `-0.0` so formatted output reads `0`.
fn unsigned_zero(v: f32) -> f32 {
    if v == 0.0 { 0.0 } else { v }
}

impl TiltStyle {
    /// Frame for a pointer at `(x, y)` inside a `width` x `height` box.
    ///
    /// A degenerate box (zero or non-finite size) is treated as if the
    /// pointer sat at its center.
    pub fn track(width: f32, height: f32, x: f32, y: f32) -> Self {
        let usable = width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite();
        let (x, y, width, height) = if usable && x.is_finite() && y.is_finite() {
            (x, y, width, height)
        } else {
            (0.5, 0.5, 1.0, 1.0)
        };

        let center_x = width / 2.0;
        let center_y = height / 2.0;
        let rotate_x = unsigned_zero(((y - center_y) / center_y) * -MAX_TILT_DEG);
        let rotate_y = unsigned_zero(((x - center_x) / center_x) * MAX_TILT_DEG);

        Self {
            rotate_x,
            rotate_y,
            scale: HOVER_SCALE,
            shadow: TiltShadow::Cast {
                x: unsigned_zero(rotate_y * SHADOW_PER_DEG),
                y: unsigned_zero(rotate_x * -SHADOW_PER_DEG),
            },
            glare: Some(Glare {
                x: x / width * 100.0,
                y: y / height * 100.0,
            }),
            transition: TRACK_TRANSITION,
        }
    }

    /// Frame for a tile returning to rest.
    pub fn rest() -> Self {
        Self {
            rotate_x: 0.0,
            rotate_y: 0.0,
            scale: 1.0,
            shadow: TiltShadow::Resting,
            glare: None,
            transition: RELEASE_TRANSITION,
        }
    }

    /// CSS `transform` value.
    pub fn transform_css(&self) -> String {
        format!(
            "perspective({PERSPECTIVE_PX}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            self.rotate_x,
            self.rotate_y,
            s = self.scale
        )
    }

    /// CSS `box-shadow` value.
    pub fn box_shadow_css(&self) -> String {
        match self.shadow {
            TiltShadow::Cast { x, y } => {
                format!("{x}px {y}px 25px rgba(0,0,0,0.15), 0 8px 30px rgba(0,0,0,0.1)")
            },
            TiltShadow::Resting => "0 4px 6px -1px rgba(0, 0, 0, 0.1)".to_string(),
        }
    }

    /// CSS `transition` value.
    pub fn transition_css(&self) -> String {
        let secs = self.transition.as_secs_f32();
        format!("transform {secs}s ease-out, box-shadow {secs}s ease-out")
    }

    /// All declarations as one inline style string.
    pub fn css(&self) -> String {
        let mut css = format!(
            "transform:{};box-shadow:{};transition:{};",
            self.transform_css(),
            self.box_shadow_css(),
            self.transition_css()
        );
        if let Some(glare) = self.glare {
            let _ = write!(css, "--glare-x:{}%;--glare-y:{}%;", glare.x, glare.y);
        }
        css
    }
}

/// Per-tile tilt state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TiltEffect {
    enabled: bool,
    style: Option<TiltStyle>,
}

impl TiltEffect {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            style: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Pointer moved to `(x, y)` relative to a `width` x `height` tile.
    pub fn pointer_move(&mut self, width: f32, height: f32, x: f32, y: f32) -> Option<&TiltStyle> {
        if !self.enabled {
            return None;
        }
        self.style = Some(TiltStyle::track(width, height, x, y));
        self.style.as_ref()
    }

    /// Pointer left the tile.
    pub fn pointer_leave(&mut self) -> Option<&TiltStyle> {
        if !self.enabled {
            return None;
        }
        self.style = Some(TiltStyle::rest());
        self.style.as_ref()
    }

    /// Current frame; `None` before the first event or when disabled.
    pub fn style(&self) -> Option<&TiltStyle> {
        self.style.as_ref()
    }

    /// Current frame as inline CSS; empty when there is none.
    pub fn css(&self) -> String {
        self.style.map(|s| s.css()).unwrap_or_default()
    }
}
