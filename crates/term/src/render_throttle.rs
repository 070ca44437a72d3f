//! Redraw throttling for the terminal preview.
//!
//! Animated frames always render. Once the field settles, a frame renders only when
//! its cell grid digest changed, or as a keep-alive every
//! `min_static_interval_ms`.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Decide whether to flush the frame with `fingerprint` at `now_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = fingerprint != self.last_fingerprint;
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;
        let render = !self.has_rendered || !is_static || changed || stale;
        if render {
            self.has_rendered = true;
            self.last_render_ms = now_ms;
            self.last_fingerprint = fingerprint;
        }
        render
    }

    /// Force the next call to render, e.g. after a terminal resize.
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }
}
