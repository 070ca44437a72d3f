//! Terminal preview of the glyph field (default binary).
//!
//! Each glyph cell becomes one terminal cell. Keyboard input maps to field actions,
//! the mouse drives the headless overlay so buttons and cards hover and click like
//! their browser twins.

use std::fmt::Write as _;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use ascii_field::engine::app::WHEEL_NOTCH;
use ascii_field::engine::{ElementAction, FieldApp, FieldConfig, HeadlessOverlay, OverlayEvent};
use ascii_field::input::{handle_key_event, should_quit, InputHandler, PointerEvent};
use ascii_field::logging::{self, LogSink};
use ascii_field::term::{CellGrid, FieldView, RenderThrottle, TerminalRenderer, Viewport};
use ascii_field::types::{FieldAction, Vec2};

const FRAME_MS: u64 = 33;
/// Keep-alive redraw interval while nothing changes on screen.
const STATIC_REDRAW_MS: u64 = 1000;
const HINTS: &str = "[1]home [2]work [3]contacts [j/k]scroll [m]obile [g]lyphs [p]ictures [q]uit";

fn main() -> Result<()> {
    logging::init(LogSink::FileOnly)?;

    let mut config = FieldConfig::from_env();
    // One terminal cell per glyph cell.
    config.pixel_ratio = 1.0;
    config.canvas_bleed = false;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}

/// Terminal cells to the CSS-pixel viewport the field is laid out for.
fn field_viewport(cell: u32, viewport: Viewport) -> (u32, u32) {
    (
        viewport.width as u32 * cell,
        viewport.field_rows(true) as u32 * cell,
    )
}

fn run(term: &mut TerminalRenderer, config: FieldConfig) -> Result<()> {
    let cell = config.char_size.max(1);
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let (vw, vh) = field_viewport(cell, viewport);

    let mut overlay = HeadlessOverlay::new();
    let mut app = FieldApp::new(config, vw, vh, &mut overlay).context("failed to start the field")?;

    let view = FieldView::new();
    let mut grid = CellGrid::new(w, h);
    let mut input = InputHandler::new();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);
    let mut events: Vec<OverlayEvent> = Vec::with_capacity(16);
    let mut status = String::with_capacity(160);
    let mut note = String::new();

    // Cell (column, row) to the CSS pixel at its center.
    let to_css = |column: u16, row: u16| ((column as f32 + 0.5) * cell as f32, (row as f32 + 0.5) * cell as f32);

    let frame = Duration::from_millis(FRAME_MS);
    let started = Instant::now();
    let mut last_frame = Instant::now();

    loop {
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        let action = match handle_key_event(key) {
                            // Held scroll keys repeat from the handler's timer.
                            Some(FieldAction::ScrollUp | FieldAction::ScrollDown) => {
                                input.handle_key_press(key.code)
                            }
                            other => other,
                        };
                        if let Some(action) = action {
                            app.apply(action, &mut overlay);
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; held scroll keys repeat internally.
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Mouse(mouse) => match input.handle_mouse(mouse) {
                    Some(PointerEvent::Moved { column, row }) | Some(PointerEvent::Down { column, row }) => {
                        let (x, y) = to_css(column, row);
                        overlay.pointer_moved(x, y);
                    }
                    Some(PointerEvent::Up { column, row }) => {
                        let (x, y) = to_css(column, row);
                        overlay.click(x, y);
                    }
                    Some(PointerEvent::Wheel(notches)) => app.wheel(notches * WHEEL_NOTCH),
                    None => {}
                },
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    let (vw, vh) = field_viewport(cell, viewport);
                    app.resize(vw, vh, 1.0, &mut overlay);
                    term.invalidate();
                    throttle.invalidate();
                }
                Event::FocusLost => {
                    input.pointer_left();
                    overlay.pointer_left();
                }
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed < frame {
            continue;
        }
        last_frame = Instant::now();

        for action in input.update(elapsed.as_millis() as u32) {
            app.apply(action, &mut overlay);
        }

        overlay.drain_events_into(&mut events);
        for event in events.drain(..) {
            if let Some(ElementAction::OpenExternal(url)) = app.handle_overlay_event(&event, &mut overlay) {
                note.clear();
                let _ = write!(note, "  link: {url}");
            }
        }

        let pointer = input
            .pointer()
            .map(|(column, row)| Vec2::new(column as f32 + 0.5, row as f32 + 0.5));
        app.frame(elapsed.as_secs_f32(), pointer, input.is_pointer_down(), &mut overlay);

        status.clear();
        let _ = write!(status, "{}  {HINTS}{note}", app.route().path());
        view.render_into(app.surfaces(), &app.field().brightness, Some(status.as_str()), viewport, &mut grid);

        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, grid.digest(), true) {
            term.draw_swap(&mut grid)?;
        }
    }
}
