//! Desktop grid placement.
//!
//! Blocks with stored coordinates occupy `[column, column + cols)` x
//! `[row, row + rows)` on a fixed 9-column grid; blocks without them fall
//! into natural flow. The mobile layout reuses [`Placement`] with spans
//! only (see [`crate::reflow`]).

use std::fmt::Write as _;

use bento_types::{Block, Span};

/// Fixed track layout of one breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub columns: u32,
    pub row_height_px: u32,
    pub gap_px: u32,
}

impl GridSpec {
    /// CSS declarations for the grid container.
    pub fn container_css(&self) -> String {
        format!(
            "display:grid;grid-template-columns:repeat({}, 1fr);grid-auto-rows:{}px;gap:{}px;",
            self.columns, self.row_height_px, self.gap_px
        )
    }
}

/// Desktop grid: 9 columns of 64 px rows.
pub const DESKTOP_GRID: GridSpec = GridSpec {
    columns: 9,
    row_height_px: 64,
    gap_px: 8,
};

/// Mobile grid: 2 columns of 80 px rows, pure document-order flow.
pub const MOBILE_GRID: GridSpec = GridSpec {
    columns: 2,
    row_height_px: 80,
    gap_px: 12,
};

/// Viewport width (px) at which the desktop layout takes over.
pub const DESKTOP_BREAKPOINT_PX: u32 = 1024;

/// Half-open range of grid lines `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

/// Explicit desktop placement. `None` on an axis means natural flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridPlacement {
    pub column: Option<LineRange>,
    pub row: Option<LineRange>,
}

impl GridPlacement {
    /// Placement of a block from its stored coordinates and span.
    pub fn of(block: &Block) -> Self {
        let range = |start: Option<u32>, len: u32| {
            start.map(|start| LineRange {
                start,
                end: start.saturating_add(len),
            })
        };
        Self {
            column: range(block.origin.column, block.span.cols()),
            row: range(block.origin.row, block.span.rows()),
        }
    }

    /// True when neither axis is pinned.
    pub fn is_flow(&self) -> bool {
        self.column.is_none() && self.row.is_none()
    }
}

/// Per-block placement descriptor handed to the compositor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Desktop grid, explicit lines where the dataset provides them.
    Desktop(GridPlacement),
    /// Mobile flow grid, spans only.
    Mobile(Span),
}

impl Placement {
    /// Inline CSS for the tile's grid item.
    pub fn css(&self) -> String {
        let mut css = String::new();
        match self {
            Placement::Desktop(grid) => {
                if let Some(col) = grid.column {
                    let _ = write!(css, "grid-column:{} / {};", col.start, col.end);
                }
                if let Some(row) = grid.row {
                    let _ = write!(css, "grid-row:{} / {};", row.start, row.end);
                }
            },
            Placement::Mobile(span) => {
                let _ = write!(
                    css,
                    "grid-column:span {};grid-row:span {};",
                    span.cols(),
                    span.rows()
                );
            },
        }
        css
    }
}

/// Corner radius band. Smaller tiles get tighter corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BorderRadius {
    Tight,
    Small,
    Medium,
    Large,
}

impl BorderRadius {
    /// Band for a footprint, stepped on `min(cols, rows)`.
    pub fn for_span(span: Span) -> Self {
        match span.cols().min(span.rows()) {
            0..=1 => BorderRadius::Tight,
            2 => BorderRadius::Small,
            3 => BorderRadius::Medium,
            _ => BorderRadius::Large,
        }
    }

    /// CSS length of the band.
    pub fn css(self) -> &'static str {
        match self {
            BorderRadius::Tight => "0.5rem",
            BorderRadius::Small => "0.625rem",
            BorderRadius::Medium => "0.75rem",
            BorderRadius::Large => "0.875rem",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bento_types::Dataset;

    fn block(json: &str) -> Block {
        Dataset::from_json(&format!("[{json}]")).unwrap().blocks()[0].clone()
    }

    #[test]
    fn explicit_coordinates_span_half_open_ranges() {
        let b = block(r#"{"id":"a","type":"LINK","colSpan":2,"rowSpan":3,"gridColumn":4,"gridRow":1}"#);
        let p = GridPlacement::of(&b);
        assert_eq!(p.column, Some(LineRange { start: 4, end: 6 }));
        assert_eq!(p.row, Some(LineRange { start: 1, end: 4 }));
        assert_eq!(
            Placement::Desktop(p).css(),
            "grid-column:4 / 6;grid-row:1 / 4;"
        );
    }

    #[test]
    fn missing_coordinates_flow() {
        let b = block(r#"{"id":"a","type":"TEXT","colSpan":3,"rowSpan":2}"#);
        let p = GridPlacement::of(&b);
        assert!(p.is_flow());
        assert_eq!(Placement::Desktop(p).css(), "");
    }

    #[test]
    fn single_axis_is_pinned_independently() {
        let b = block(r#"{"id":"a","type":"TEXT","colSpan":3,"rowSpan":2,"gridRow":5}"#);
        let p = GridPlacement::of(&b);
        assert_eq!(p.column, None);
        assert_eq!(p.row, Some(LineRange { start: 5, end: 7 }));
    }

    #[test]
    fn mobile_placement_css_uses_spans() {
        assert_eq!(
            Placement::Mobile(Span::new(2, 3)).css(),
            "grid-column:span 2;grid-row:span 3;"
        );
    }

    #[test]
    fn radius_steps_on_smaller_dimension() {
        assert_eq!(BorderRadius::for_span(Span::new(1, 9)), BorderRadius::Tight);
        assert_eq!(BorderRadius::for_span(Span::new(2, 3)), BorderRadius::Small);
        assert_eq!(BorderRadius::for_span(Span::new(3, 3)), BorderRadius::Medium);
        assert_eq!(BorderRadius::for_span(Span::new(4, 6)), BorderRadius::Large);
        assert_eq!(BorderRadius::Large.css(), "0.875rem");
    }

    #[test]
    fn radius_is_monotonic() {
        let mut prev = BorderRadius::Tight;
        for n in 1..8 {
            let r = BorderRadius::for_span(Span::new(n, n));
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn container_css() {
        assert_eq!(
            DESKTOP_GRID.container_css(),
            "display:grid;grid-template-columns:repeat(9, 1fr);grid-auto-rows:64px;gap:8px;"
        );
    }
}
