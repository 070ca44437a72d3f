//! Pages and their fade state machine.
//!
//! ```text
//!   Entering --(|1 - opacity| < 0.001)--> Steady
//!      |                                    |
//!      +------------ begin_exit ------------+
//!                        |
//!                        v
//!                     Exiting --(opacity <= 0.003)--> Done
//! ```
//!
//! Opacity always moves by exponential damping toward the target. The tick that enters
//! `Done` reports the completion edge; `Done` is terminal until the fade is reset, so
//! the edge fires exactly once per exit.

use crate::core::damp;
use crate::element::{ElementAction, FrameCtx};
use crate::layer::{FrameInput, Layer};
use crate::overlay::{OverlayEvent, OverlayHost};
use crate::pages::MediaViewer;
use crate::router::Route;
use crate::types::{DEFAULT_FADE_SPEED, FADE_OUT_EPSILON, STEADY_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Entering,
    Steady,
    Exiting,
    Done,
}

impl FadePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            FadePhase::Entering => "entering",
            FadePhase::Steady => "steady",
            FadePhase::Exiting => "exiting",
            FadePhase::Done => "done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFade {
    opacity: f32,
    target: f32,
    speed: f32,
    phase: FadePhase,
}

impl Default for PageFade {
    /// Fully transparent, fading in at the default speed.
    fn default() -> Self {
        Self::new(0.0, 1.0, DEFAULT_FADE_SPEED)
    }
}

impl PageFade {
    pub fn new(opacity: f32, target: f32, speed: f32) -> Self {
        let mut fade = Self {
            opacity,
            target,
            speed,
            phase: FadePhase::Entering,
        };
        fade.reset(opacity, target, speed);
        fade
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == FadePhase::Done
    }

    /// Restart from `opacity` toward `target`. A target of 0 starts an exit.
    pub fn reset(&mut self, opacity: f32, target: f32, speed: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
        self.target = target.clamp(0.0, 1.0);
        self.speed = speed.max(0.0);
        self.phase = if self.target <= 0.0 {
            FadePhase::Exiting
        } else {
            FadePhase::Entering
        };
    }

    /// Redirect toward a new target mid-flight. Ignored once done.
    pub fn redirect(&mut self, target: f32) {
        if self.phase == FadePhase::Done {
            return;
        }
        self.target = target.clamp(0.0, 1.0);
        self.phase = if self.target <= 0.0 {
            FadePhase::Exiting
        } else {
            FadePhase::Entering
        };
    }

    pub fn begin_exit(&mut self) {
        self.redirect(0.0);
    }

    /// Advance by `dt` seconds. Returns true on the tick that completes a fade-out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.phase == FadePhase::Done {
            return false;
        }
        self.opacity = damp(self.opacity, self.target, self.speed, dt);

        match self.phase {
            FadePhase::Exiting if self.opacity <= FADE_OUT_EPSILON => {
                self.phase = FadePhase::Done;
                true
            }
            FadePhase::Entering if (self.target - self.opacity).abs() < STEADY_EPSILON => {
                self.phase = FadePhase::Steady;
                false
            }
            _ => false,
        }
    }
}

/// Typed handle to a layer inside its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

impl LayerId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
pub struct Page {
    name: &'static str,
    route: Route,
    layers: Vec<Layer>,
    fade: PageFade,
    media: Option<MediaViewer>,
}

impl Page {
    pub fn new(name: &'static str, route: Route) -> Self {
        Self {
            name,
            route,
            layers: Vec::new(),
            fade: PageFade::default(),
            media: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId(self.layers.len() - 1)
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.0)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id.0)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn set_media_viewer(&mut self, viewer: MediaViewer) {
        self.media = Some(viewer);
    }

    pub fn media_viewer(&self) -> Option<&MediaViewer> {
        self.media.as_ref()
    }

    pub fn fade(&self) -> &PageFade {
        &self.fade
    }

    pub fn opacity(&self) -> f32 {
        self.fade.opacity()
    }

    pub fn phase(&self) -> FadePhase {
        self.fade.phase()
    }

    pub fn begin_exit(&mut self) {
        self.fade.begin_exit();
    }

    pub fn reset_fade(&mut self, opacity: f32, target: f32, speed: f32) {
        self.fade.reset(opacity, target, speed);
    }

    /// Advance the fade, then update and draw every layer at the new opacity.
    ///
    /// Returns true on the frame the fade-out completes.
    pub fn tick(&mut self, frame: &mut FrameCtx<'_>, input: &FrameInput) -> bool {
        let completed = self.fade.tick(input.dt);
        let opacity = self.fade.opacity();
        for layer in &mut self.layers {
            layer.update(frame, input, opacity);
        }
        completed
    }

    /// Route an overlay event. Media steps are consumed here; other actions are
    /// returned for the host.
    ///
    /// Returns `None` when no element of this page owns the twin.
    pub fn handle_overlay(&mut self, event: &OverlayEvent) -> Option<Option<ElementAction>> {
        let action = self.layers.iter_mut().find_map(|l| l.handle_overlay(event))?;
        match (action, &mut self.media) {
            (Some(ElementAction::MediaStep(delta)), Some(media)) => {
                media.step(delta, &mut self.layers);
                Some(None)
            }
            (action, _) => Some(action),
        }
    }

    pub fn fade_images(&mut self, to_glyphs: bool) {
        for layer in &mut self.layers {
            layer.fade_images(to_glyphs);
        }
    }

    /// Release every overlay twin owned by this page.
    pub fn destroy(&mut self, overlay: &mut dyn OverlayHost) {
        for layer in &mut self.layers {
            layer.destroy(overlay);
        }
    }
}
