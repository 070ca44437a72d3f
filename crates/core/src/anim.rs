//! Animation primitives: exponential damping, eased timed fades, scroll accumulation
//! and wheel/touch momentum.
//!
//! Everything here is frame-rate independent: state advances by `dt` seconds.

use std::f32::consts::PI;

use crate::types::{EDGE_DAMPING_ZONE, IMAGE_FADE_SECONDS, SCROLL_SMOOTHING};

/// Exponential damping of `current` toward `target`.
///
/// `current + (target - current) * (1 - e^(-lambda * dt))`. Monotone toward the target and
/// never overshoots for `lambda, dt >= 0`.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    let k = 1.0 - (-lambda * dt.max(0.0)).exp();
    current + (target - current) * k
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sine ease-in-out on `t` in [0, 1].
#[inline]
pub fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t.clamp(0.0, 1.0)).cos() - 1.0) / 2.0
}

/// A scalar that moves between values along an eased timed curve.
///
/// Images use it for the glyph-dominance factor: 1 shows the glyph rendition, 0 the
/// picture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeAnimator {
    value: f32,
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Default for FadeAnimator {
    fn default() -> Self {
        Self::new(1.0, IMAGE_FADE_SECONDS)
    }
}

impl FadeAnimator {
    pub fn new(value: f32, duration: f32) -> Self {
        Self {
            value,
            from: value,
            to: value,
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.to
    }

    /// Start a fade from the current value. Re-targeting the running destination is a
    /// no-op, so hover handlers can call this every frame.
    pub fn fade_to(&mut self, target: f32) {
        if target == self.to {
            return;
        }
        self.from = self.value;
        self.to = target;
        self.elapsed = 0.0;
    }

    /// Jump to `value` with no animation.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.from = value;
        self.to = value;
        self.elapsed = 0.0;
    }

    pub fn update(&mut self, dt: f32) -> f32 {
        if self.is_settled() {
            return self.value;
        }
        self.elapsed += dt.max(0.0);
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        self.value = if t >= 1.0 {
            self.to
        } else {
            lerp(self.from, self.to, ease_in_out_sine(t))
        };
        self.value
    }
}

/// Scroll position of a scrollable layer, in cells.
///
/// Input moves the target; the displayed offset follows it with exponential smoothing.
/// Both stay within `[0, max]` at all times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimator {
    offset: f32,
    target: f32,
    max: f32,
    zone: f32,
    smoothing: f32,
}

impl ScrollAnimator {
    pub fn new(max: f32) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            max: max.max(0.0),
            zone: EDGE_DAMPING_ZONE,
            smoothing: SCROLL_SMOOTHING,
        }
    }

    pub fn with_edge_zone(mut self, zone: f32) -> Self {
        self.zone = zone.max(0.0);
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing.max(0.0);
        self
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Change the scroll range, clamping the current state into it.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.target = self.target.clamp(0.0, self.max);
        self.offset = self.offset.clamp(0.0, self.max);
    }

    /// Accumulate a scroll delta (positive scrolls down).
    ///
    /// Moving toward an edge within the damping zone scales the delta by
    /// `distance / zone`.
    pub fn apply_delta(&mut self, delta: f32) {
        if delta == 0.0 || !delta.is_finite() {
            return;
        }
        let mut factor = 1.0f32;
        if self.zone > 0.0 {
            let from_top = self.target;
            let from_bottom = self.max - self.target;
            if delta < 0.0 && from_top < self.zone {
                factor = factor.min(from_top / self.zone);
            }
            if delta > 0.0 && from_bottom < self.zone {
                factor = factor.min(from_bottom / self.zone);
            }
        }
        self.target = (self.target + delta * factor.max(0.0)).clamp(0.0, self.max);
    }

    /// Advance the displayed offset toward the target.
    pub fn update(&mut self, dt: f32) -> f32 {
        self.offset = damp(self.offset, self.target, self.smoothing, dt).clamp(0.0, self.max);
        self.offset
    }

    /// Jump both offset and target to `value` (clamped).
    pub fn jump_to(&mut self, value: f32) {
        let v = value.clamp(0.0, self.max);
        self.offset = v;
        self.target = v;
    }
}

/// Which input last drove the momentum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MomentumSource {
    #[default]
    Wheel,
    Touch,
}

/// Turns raw wheel and touch input into a per-frame scroll delta with inertia.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMomentum {
    pub wheel_speed: f32,
    pub wheel_decay: f32,
    pub touch_speed: f32,
    pub touch_decay: f32,
    pub held_decay: f32,
    velocity: f32,
    source: MomentumSource,
    finger_down: bool,
    dragging: bool,
    last_touch_y: f32,
}

impl Default for ScrollMomentum {
    fn default() -> Self {
        Self {
            wheel_speed: 0.002,
            wheel_decay: 0.9,
            touch_speed: 0.09,
            touch_decay: 0.94,
            held_decay: 0.75,
            velocity: 0.0,
            source: MomentumSource::Wheel,
            finger_down: false,
            dragging: false,
            last_touch_y: 0.0,
        }
    }
}

impl ScrollMomentum {
    /// Velocity under which motion snaps to rest.
    pub const REST_EPSILON: f32 = 0.0005;
    /// Touch moves shorter than this (pixels) are ignored.
    pub const TOUCH_DEADZONE: f32 = 3.0;

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_idle(&self) -> bool {
        self.velocity == 0.0
    }

    /// Feed a wheel event (`delta_y` in pixels, positive scrolls down).
    pub fn wheel(&mut self, delta_y: f32) {
        self.source = MomentumSource::Wheel;
        let delta = delta_y * self.wheel_speed;
        if self.velocity.signum() != delta.signum() {
            self.velocity = 0.0;
        }
        self.velocity += delta;
    }

    pub fn touch_start(&mut self, y: f32) {
        self.source = MomentumSource::Touch;
        self.finger_down = true;
        self.dragging = false;
        self.last_touch_y = y;
        self.velocity = 0.0;
    }

    pub fn touch_move(&mut self, y: f32) {
        let delta = self.last_touch_y - y;
        self.last_touch_y = y;
        if delta.abs() < Self::TOUCH_DEADZONE {
            return;
        }
        self.dragging = true;
        self.velocity = delta * self.touch_speed;
    }

    pub fn touch_end(&mut self) {
        self.finger_down = false;
        if !self.dragging {
            self.velocity = 0.0;
        }
    }

    /// Decay the velocity for one frame and return this frame's scroll delta.
    pub fn tick(&mut self, dt: f32) -> f32 {
        let frames = dt.max(0.0) * 60.0;
        let decay = if self.finger_down {
            self.held_decay
        } else {
            match self.source {
                MomentumSource::Wheel => self.wheel_decay,
                MomentumSource::Touch => self.touch_decay,
            }
        };
        self.velocity *= decay.powf(frames);
        if self.velocity.abs() < Self::REST_EPSILON {
            self.velocity = 0.0;
        }
        self.velocity * frames
    }
}
