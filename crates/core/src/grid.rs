//! Column fitting and card placement for the scrollable works grid.
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | card width | `(width - gap * (cols - 1)) / cols` |
//! | card height | `floor(card_width / aspect)` |
//! | visible height | `min(rows_in_view, card_height * 1.5)` |
//! | top space | `rows_in_view - visible - 2` |
//! | grid height | `(card_height + gap) * rows - gap` |
//! | max scroll | `max(0, grid_height - visible + 6)` |

use crate::types::{Vec2, BOTTOM_SCROLL_MARGIN, CARD_ASPECT_RATIO, GRID_MAX_COLUMNS};

/// Pick a column count for a grid of `width` cells, trying 1 through
/// [`GRID_MAX_COLUMNS`] columns and stopping before cards would get narrower than `min`.
///
/// There is no upper bound on card width: a wide grid simply takes the largest count.
/// The result is never 0. If even a single column is narrower than `min`, 1 is returned.
///
/// ```
/// use ascii_field_core::calculate_grid_columns;
///
/// assert_eq!(calculate_grid_columns(100.0, 18.0, 2.0), 5);
/// assert_eq!(calculate_grid_columns(10.0, 18.0, 2.0), 1);
/// ```
pub fn calculate_grid_columns(width: f32, min: f32, gap: f32) -> u32 {
    let mut columns = 1;
    for c in 1..=GRID_MAX_COLUMNS {
        if card_width(width, c, gap) < min {
            columns = c.saturating_sub(1).max(1);
            break;
        }
        columns = c;
    }
    columns
}

#[inline]
fn card_width(width: f32, columns: u32, gap: f32) -> f32 {
    let c = columns.max(1) as f32;
    (width - gap * (c - 1.0)) / c
}

/// Resolved geometry of a card grid, all in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub card_size: Vec2,
    /// Top-left of the first card.
    pub origin: Vec2,
    pub gap: f32,
    pub visible_height: f32,
    pub grid_height: f32,
    pub max_scroll: f32,
}

impl GridLayout {
    /// Lay out `item_count` cards in a grid `width` cells wide starting at column
    /// `margin`, for a glyph surface of `resolution` cells.
    pub fn compute(
        item_count: usize,
        width: f32,
        columns: u32,
        margin: f32,
        gap: f32,
        resolution: Vec2,
    ) -> Self {
        let columns = columns.max(1);
        let rows = (item_count as u32).div_ceil(columns);

        let card_w = card_width(width, columns, gap);
        let card_h = (card_w / CARD_ASPECT_RATIO).floor();

        let visible_height = resolution.y.min(card_h * 1.5);
        let top_space = resolution.y - visible_height - 2.0;

        let grid_height = ((card_h + gap) * rows as f32 - gap).max(0.0);
        let max_scroll = (grid_height - visible_height + BOTTOM_SCROLL_MARGIN).max(0.0);

        Self {
            columns,
            rows,
            card_size: Vec2::new(card_w, card_h),
            origin: Vec2::new(margin, top_space),
            gap,
            visible_height,
            grid_height,
            max_scroll,
        }
    }

    /// Unscrolled top-left of card `index`.
    pub fn card_position(&self, index: usize) -> Vec2 {
        let col = (index as u32 % self.columns) as f32;
        let row = (index as u32 / self.columns) as f32;
        self.origin
            + Vec2::new(
                (self.card_size.x + self.gap) * col,
                (self.card_size.y + self.gap) * row,
            )
    }
}
