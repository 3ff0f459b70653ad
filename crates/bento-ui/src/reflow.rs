//! Mobile reflow: document order and spans for the 2-column layout.
//!
//! Ordering and span recomputation are independent. Ordering reads the
//! desktop coordinates; spans read only the desktop spans. After reflow
//! the desktop coordinates play no part in placement.

use bento_types::{Block, Span};

use crate::grid::Placement;

/// Sort key used for a missing coordinate, so uncoordinated blocks sort last.
const MISSING: u32 = u32::MAX;

/// Blocks in mobile document order: `(row, column)` ascending, stable.
pub fn mobile_order(blocks: &[Block]) -> Vec<&Block> {
    let mut ordered: Vec<&Block> = blocks.iter().collect();
    ordered.sort_by_key(|b| {
        (
            b.origin.row.unwrap_or(MISSING),
            b.origin.column.unwrap_or(MISSING),
        )
    });
    ordered
}

/// Mobile span for a desktop span.
///
/// Wide tiles (5+ columns) take both mobile columns. Medium tiles (3-4
/// columns) shrink to one column but keep at least two rows.
pub fn mobile_span(desktop: Span) -> Span {
    let cols = if desktop.cols() >= 5 { 2 } else { 1 };
    let rows = if (3..5).contains(&desktop.cols()) {
        desktop.rows().max(2)
    } else {
        desktop.rows()
    };
    Span::new(cols, rows)
}

/// Reflowed blocks paired with their mobile placement.
pub fn mobile_layout(blocks: &[Block]) -> Vec<(&Block, Placement)> {
    mobile_order(blocks)
        .into_iter()
        .map(|b| (b, Placement::Mobile(mobile_span(b.span))))
        .collect()
}
