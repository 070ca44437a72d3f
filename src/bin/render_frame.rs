//! Headless renderer: runs the field for a number of frames at a route and writes the
//! composited frame to a PNG.
//!
//! Usage: `render-frame [ROUTE] [OUT.png] [WIDTHxHEIGHT] [SECONDS]`
//!
//! Defaults: `/`, `frame.png`, `1280x720`, `2`.

use std::env;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};

use ascii_field::compositor::FrameImage;
use ascii_field::engine::{FieldApp, FieldConfig, HeadlessOverlay};
use ascii_field::logging::{self, LogSink};

const FPS: f32 = 60.0;

fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("size must look like 1280x720, got {s:?}"))?;
    let w = w.trim().parse().with_context(|| format!("bad width in {s:?}"))?;
    let h = h.trim().parse().with_context(|| format!("bad height in {s:?}"))?;
    if w == 0 || h == 0 {
        bail!("size must be non-zero, got {s:?}");
    }
    Ok((w, h))
}

fn main() -> Result<()> {
    logging::init(LogSink::Stderr)?;

    let mut args = env::args().skip(1);
    let route = args.next().unwrap_or_else(|| "/".to_string());
    let out = args.next().unwrap_or_else(|| "frame.png".to_string());
    let (width, height) = match args.next() {
        Some(s) => parse_size(&s)?,
        None => (1280, 720),
    };
    let seconds: f32 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("bad duration {s:?}"))?,
        None => 2.0,
    };

    let config = FieldConfig::from_env();
    let mut overlay = HeadlessOverlay::new();
    let mut app = FieldApp::new(config, width, height, &mut overlay).context("failed to start the field")?;
    app.navigate(&route, &mut overlay);

    // Let first requests reach the decoder before the clock starts.
    app.frame(0.0, None, false, &mut overlay);
    if !app.wait_for_assets(Duration::from_secs(5)) {
        tracing::warn!("some assets are still decoding");
    }

    let started = Instant::now();
    let frames = (seconds.max(0.0) * FPS).ceil() as usize;
    for _ in 0..frames {
        app.frame(1.0 / FPS, None, false, &mut overlay);
    }

    let mut image = FrameImage::new(1, 1);
    app.composite_into(&app.field().background, &mut image);
    image.save_png(&out).with_context(|| format!("failed to write {out}"))?;

    tracing::info!(
        route = %app.route().path(),
        frames,
        elapsed_ms = started.elapsed().as_millis() as u64,
        out = %out,
        "frame written"
    );
    Ok(())
}
