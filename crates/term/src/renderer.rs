//! TerminalRenderer: flushes a cell grid to a real terminal.
//!
//! Frames are encoded into a reusable byte buffer first and written with one syscall.
//! After the first frame only runs of changed cells are encoded, and colors are only
//! re-emitted when they differ from the previous cell written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::cells::{CellGrid, FieldCell, TermColor};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<CellGrid>,
    buf: Vec<u8>,
    mouse: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
            mouse: true,
        }
    }

    /// Skip mouse capture, leaving selection to the terminal.
    pub fn without_mouse(mut self) -> Self {
        self.mouse = false;
        self
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        if self.mouse {
            self.buf.queue(EnableMouseCapture)?;
            self.buf.queue(EnableFocusChange)?;
        }
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        if self.mouse {
            self.buf.queue(DisableFocusChange)?;
            self.buf.queue(DisableMouseCapture)?;
        }
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `grid`, then swap it with the previously drawn grid.
    ///
    /// Callers keep one `CellGrid` and pass it in every frame; after the call it holds
    /// the frame before, ready to be overwritten without cloning.
    pub fn draw_swap(&mut self, grid: &mut CellGrid) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.same_shape(grid) => {
                encode_diff_into(&prev, grid, &mut self.buf)?;
                prev
            }
            Some(mut prev) => {
                encode_full_into(grid, &mut self.buf)?;
                prev.reshape(grid.columns(), grid.rows());
                prev
            }
            None => {
                encode_full_into(grid, &mut self.buf)?;
                CellGrid::new(grid.columns(), grid.rows())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, grid);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(grid: &CellGrid, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..grid.rows() {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in grid.row(y).unwrap_or_default() {
            pen.print(out, cell)?;
        }
    }
    pen.reset(out)
}

/// Encode a diff redraw (changed runs) into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_diff_into(prev: &CellGrid, next: &CellGrid, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::default();
    for (x, y, len) in ChangedRuns::new(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        let row = next.row(y).unwrap_or_default();
        for cell in row.iter().skip(x as usize).take(len as usize) {
            pen.print(out, cell)?;
        }
    }
    pen.reset(out)
}

/// Last ink and backdrop sent, so runs of equal colors are not re-sent.
#[derive(Default)]
struct Pen {
    ink: Option<TermColor>,
    backdrop: Option<TermColor>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: &FieldCell) -> Result<()> {
        if self.ink != Some(cell.ink) {
            out.queue(SetForegroundColor(color(cell.ink)))?;
            self.ink = Some(cell.ink);
        }
        if self.backdrop != Some(cell.backdrop) {
            out.queue(SetBackgroundColor(color(cell.backdrop)))?;
            self.backdrop = Some(cell.backdrop);
        }
        out.queue(Print(cell.glyph))?;
        Ok(())
    }

    fn reset(&mut self, out: &mut Vec<u8>) -> Result<()> {
        if self.ink.is_some() || self.backdrop.is_some() {
            out.queue(ResetColor)?;
        }
        *self = Self::default();
        Ok(())
    }
}

fn color(c: TermColor) -> Color {
    let [r, g, b] = c.0;
    Color::Rgb { r, g, b }
}

/// Row-major runs `(x, y, len)` of cells that differ between two equally sized
/// buffers. Buffers of different sizes yield every row as one run.
struct ChangedRuns<'a> {
    prev: &'a CellGrid,
    next: &'a CellGrid,
    x: u16,
    y: u16,
    resized: bool,
}

impl<'a> ChangedRuns<'a> {
    fn new(prev: &'a CellGrid, next: &'a CellGrid) -> Self {
        Self {
            prev,
            next,
            x: 0,
            y: 0,
            resized: !prev.same_shape(next),
        }
    }

    fn differs(&self, x: u16, y: u16) -> bool {
        self.prev.cell(x, y) != self.next.cell(x, y)
    }
}

impl Iterator for ChangedRuns<'_> {
    type Item = (u16, u16, u16);

    fn next(&mut self) -> Option<Self::Item> {
        let (w, h) = (self.next.columns(), self.next.rows());
        if self.resized {
            if self.y >= h || w == 0 {
                return None;
            }
            self.y += 1;
            return Some((0, self.y - 1, w));
        }

        while self.y < h {
            while self.x < w && !self.differs(self.x, self.y) {
                self.x += 1;
            }
            if self.x < w {
                let start = self.x;
                while self.x < w && self.differs(self.x, self.y) {
                    self.x += 1;
                }
                return Some((start, self.y, self.x - start));
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}
