//! FieldView: maps the glyph and picture surfaces onto a terminal cell grid.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! | Source | Terminal cell |
//! |--------|---------------|
//! | glyph texel alpha | character, through the brightness map |
//! | glyph texel color | foreground |
//! | picture surface at the cell center | background |

use crate::core::{BrightnessMap, Surfaces};
use crate::cells::{CellGrid, FieldCell, TermColor};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows left for the field once the status line is reserved.
    pub fn field_rows(&self, status: bool) -> u16 {
        if status {
            self.height.saturating_sub(1)
        } else {
            self.height
        }
    }
}

pub struct FieldView {
    status_ink: TermColor,
    status_backdrop: TermColor,
}

impl Default for FieldView {
    fn default() -> Self {
        Self {
            status_ink: TermColor::rgb(150, 150, 160),
            status_backdrop: TermColor::rgb(20, 20, 26),
        }
    }
}

impl FieldView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status_colors(mut self, ink: TermColor, backdrop: TermColor) -> Self {
        self.status_ink = ink;
        self.status_backdrop = backdrop;
        self
    }

    /// Render both surfaces into `grid`, with an optional status line on the last row.
    ///
    /// Allocation-free once `grid` has been shaped for the viewport.
    pub fn render_into(
        &self,
        surfaces: &Surfaces,
        brightness: &BrightnessMap,
        status: Option<&str>,
        viewport: Viewport,
        grid: &mut CellGrid,
    ) {
        grid.reshape(viewport.width, viewport.height);
        grid.fill(FieldCell::EMPTY);

        let (cols, rows) = surfaces.glyph.resolution();
        let field_rows = viewport.field_rows(status.is_some());
        let w = (cols.min(viewport.width as u32)) as u16;
        let h = (rows.min(field_rows as u32)) as u16;

        for y in 0..h {
            let v = (y as f32 + 0.5) / rows.max(1) as f32;
            let Some(row) = grid.row_mut(y) else {
                break;
            };
            for (x, slot) in row.iter_mut().take(w as usize).enumerate() {
                let u = (x as f32 + 0.5) / cols.max(1) as f32;
                let ink = surfaces.glyph.texel(x as i32, y as i32);
                let glyph = if ink.a > 0.0 { brightness.char_for(ink.a) } else { ' ' };
                let backdrop = surfaces.picture.sample(u, v).rgb();
                *slot = FieldCell::new(glyph, ink.rgb().into(), backdrop.into());
            }
        }

        if let (Some(status), Some(last)) = (status, viewport.height.checked_sub(1)) {
            if let Some(row) = grid.row_mut(last) {
                row.fill(FieldCell::new(' ', self.status_ink, self.status_backdrop));
            }
            grid.write_text(1, last, status, self.status_ink, self.status_backdrop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{recreate, SurfaceConfig};
    use crate::types::{Rgb as FieldRgb, Rgba};

    fn surfaces() -> Surfaces {
        let mut s = recreate(&SurfaceConfig::new(40, 20, 1.0, 10));
        s.clear(FieldRgb::new(0.0, 0.0, 1.0));
        s
    }

    #[test]
    fn ink_picks_character_and_color() {
        let mut s = surfaces();
        s.glyph.put_texel(1, 0, Rgba::new(1.0, 0.0, 0.0, 1.0));
        let map = BrightnessMap::new(" .:#");
        let mut grid = CellGrid::new(1, 1);
        FieldView::new().render_into(&s, &map, None, Viewport::new(4, 2), &mut grid);

        let cell = grid.cell(1, 0).unwrap();
        assert_eq!(cell.glyph, '#');
        assert_eq!(cell.ink, TermColor::rgb(255, 0, 0));
        assert_eq!(cell.backdrop, TermColor::rgb(0, 0, 255));
        assert_eq!(grid.cell(0, 0).map(|c| c.glyph), Some(' '));
    }

    #[test]
    fn status_line_takes_last_row() {
        let s = surfaces();
        let map = BrightnessMap::new(" .:#");
        let mut grid = CellGrid::new(1, 1);
        FieldView::new().render_into(&s, &map, Some("home"), Viewport::new(6, 3), &mut grid);

        assert_eq!(grid.cell(1, 2).map(|c| c.glyph), Some('h'));
        assert_eq!(grid.cell(4, 2).map(|c| c.glyph), Some('e'));
        assert_eq!(grid.cell(0, 2).map(|c| c.backdrop), Some(TermColor::rgb(20, 20, 26)));
        // Outside the 4x2 field the grid stays empty.
        assert_eq!(grid.cell(5, 0), Some(FieldCell::EMPTY));
    }
}
