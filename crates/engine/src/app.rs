//! The composition root: owns every piece of engine state and runs one frame at a time.
//!
//! A host (terminal preview, headless renderer, test) drives [`FieldApp`] like this:
//!
//! ```text
//! resize? -> input (wheel/touch/actions) -> frame() -> composite_into() -> overlay events
//! ```
//!
//! Overlay events are forwarded through [`FieldApp::handle_overlay_event`]; navigation
//! actions are applied internally and every action is also returned to the host so it
//! can open external links.

use std::time::Duration;

use crate::assets::AssetLoader;
use crate::compositor::{Compositor, FrameImage, GlyphAtlas, SceneSource};
use crate::config::FieldConfig;
use crate::content::ContentStore;
use crate::context::FieldContext;
use crate::core::{grid_canvas_size, BrightnessMap, RenderSurfaceManager, ScrollMomentum, SurfaceConfig, Surfaces};
use crate::element::{ElementAction, FrameCtx};
use crate::error::Result;
use crate::layer::FrameInput;
use crate::manager::PageManager;
use crate::overlay::{OverlayEvent, OverlayHost};
use crate::pages::{navigation_layer, BuildCtx};
use crate::router::{create_page, Route};
use crate::types::{FieldAction, Vec2};

/// Wheel delta (pixels) fed to the scroll momentum for one notch of a discrete wheel.
pub const WHEEL_NOTCH: f32 = 120.0;

pub struct FieldApp {
    config: FieldConfig,
    surfaces: RenderSurfaceManager,
    field: FieldContext,
    content: ContentStore,
    assets: AssetLoader,
    pages: PageManager,
    compositor: Compositor,
    atlas: GlyphAtlas,
    momentum: ScrollMomentum,
    route: Route,
    images_as_glyphs: bool,
    viewport_width: u32,
}

impl FieldApp {
    /// Load content and the atlas named by `config` and show the home page.
    ///
    /// `viewport_width` and `viewport_height` are in CSS pixels.
    pub fn new(
        config: FieldConfig,
        viewport_width: u32,
        viewport_height: u32,
        overlay: &mut dyn OverlayHost,
    ) -> Result<Self> {
        let content = match &config.content_path {
            Some(path) => ContentStore::open(path)?,
            None => ContentStore::sample(),
        };
        let assets = AssetLoader::new(config.asset_root.clone());
        Self::with_parts(config, content, assets, viewport_width, viewport_height, overlay)
    }

    /// Build from already loaded content and an existing loader.
    pub fn with_parts(
        config: FieldConfig,
        content: ContentStore,
        assets: AssetLoader,
        viewport_width: u32,
        viewport_height: u32,
        overlay: &mut dyn OverlayHost,
    ) -> Result<Self> {
        let brightness = BrightnessMap::new(&config.sequence);
        let atlas = match &config.atlas_path {
            Some(path) => {
                let (columns, rows) = config.atlas_grid();
                GlyphAtlas::open(path, columns, rows)?
            }
            None => GlyphAtlas::procedural(brightness.len() as u32, config.char_size),
        };

        let surface_config = surface_config(&config, viewport_width, viewport_height, config.pixel_ratio);
        let surfaces = RenderSurfaceManager::new(surface_config);
        let is_mobile = config.is_mobile(viewport_width as f32);
        let field = FieldContext::new(brightness, surfaces.coordinate_system(), is_mobile);
        let (width, height) = surface_config.device_size();
        let compositor = Compositor::new(config.char_size, width, height);

        tracing::info!(
            columns = field.resolution().x,
            rows = field.resolution().y,
            mobile = is_mobile,
            glyphs = atlas.count(),
            "field ready"
        );

        let mut app = Self {
            config,
            surfaces,
            field,
            content,
            assets,
            pages: PageManager::new(),
            compositor,
            atlas,
            momentum: ScrollMomentum::default(),
            route: Route::Home,
            images_as_glyphs: true,
            viewport_width,
        };
        app.rebuild(overlay);
        Ok(app)
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn field(&self) -> &FieldContext {
        &self.field
    }

    pub fn surfaces(&self) -> &Surfaces {
        self.surfaces.surfaces()
    }

    pub fn pages(&self) -> &PageManager {
        &self.pages
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Route of the page currently shown or fading in.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Block until queued images are decoded or `timeout` passes.
    pub fn wait_for_assets(&self, timeout: Duration) -> bool {
        self.assets.wait_idle(timeout)
    }

    /// Route to `path`. Navigating to the route already shown is a no-op.
    pub fn navigate(&mut self, path: &str, overlay: &mut dyn OverlayHost) {
        let parsed = Route::parse(path);
        let route = parsed.clone().resolve(&self.content);
        if route != parsed {
            tracing::debug!(%path, "no such page, showing home");
        }
        if route == self.route {
            return;
        }
        let mut ctx = BuildCtx::new(&self.field, &mut *overlay, &self.content, &mut self.assets);
        let page = create_page(&route, &mut ctx);
        self.route = page.route().clone();
        self.pages.navigate(page, overlay);
        if !self.images_as_glyphs {
            self.pages.fade_images(false);
        }
    }

    /// Apply a new viewport (CSS pixels). Rebuilds the pages when the surfaces or the
    /// layout changed.
    pub fn resize(&mut self, viewport_width: u32, viewport_height: u32, pixel_ratio: f32, overlay: &mut dyn OverlayHost) {
        self.viewport_width = viewport_width;
        let next = surface_config(&self.config, viewport_width, viewport_height, pixel_ratio);
        // A bleed canvas can shift its offset without changing size.
        let moved = next != *self.surfaces.config();
        let recreated = self.surfaces.apply(next);
        let is_mobile = self.config.is_mobile(viewport_width as f32);
        if !moved && is_mobile == self.field.is_mobile {
            return;
        }
        if recreated {
            let (width, height) = self.surfaces.config().device_size();
            self.compositor.resize(width, height);
            tracing::debug!(width, height, generation = self.surfaces.generation(), "surfaces recreated");
        }
        self.rebuild(overlay);
    }

    /// Force a layout (`Some`) or go back to breakpoint detection (`None`).
    pub fn set_mobile(&mut self, mobile: Option<bool>, overlay: &mut dyn OverlayHost) {
        self.config.mobile = mobile;
        self.rebuild(overlay);
    }

    pub fn toggle_mobile(&mut self, overlay: &mut dyn OverlayHost) {
        let mobile = !self.field.is_mobile;
        self.set_mobile(Some(mobile), overlay);
    }

    /// Fade every image toward its glyph rendition (`true`) or its picture (`false`).
    pub fn set_images_as_glyphs(&mut self, to_glyphs: bool) {
        self.images_as_glyphs = to_glyphs;
        self.pages.fade_images(to_glyphs);
    }

    /// Feed a wheel event (`delta_y` in pixels, positive scrolls down).
    pub fn wheel(&mut self, delta_y: f32) {
        self.momentum.wheel(delta_y);
    }

    pub fn touch_start(&mut self, y: f32) {
        self.momentum.touch_start(y);
    }

    pub fn touch_move(&mut self, y: f32) {
        self.momentum.touch_move(y);
    }

    pub fn touch_end(&mut self) {
        self.momentum.touch_end();
    }

    /// Apply a host-level action.
    pub fn apply(&mut self, action: FieldAction, overlay: &mut dyn OverlayHost) {
        tracing::debug!(action = action.as_str(), "field action");
        if let Some(path) = action.route() {
            self.navigate(path, overlay);
            return;
        }
        match action {
            FieldAction::ScrollUp => self.wheel(-WHEEL_NOTCH),
            FieldAction::ScrollDown => self.wheel(WHEEL_NOTCH),
            FieldAction::ToggleMobile => self.toggle_mobile(overlay),
            FieldAction::ImagesToGlyphs => self.set_images_as_glyphs(true),
            FieldAction::ImagesToPictures => self.set_images_as_glyphs(false),
            FieldAction::GoHome | FieldAction::GoWork | FieldAction::GoContacts => {}
        }
    }

    /// Forward an overlay event. Navigation is applied here; the action is returned
    /// either way.
    pub fn handle_overlay_event(&mut self, event: &OverlayEvent, overlay: &mut dyn OverlayHost) -> Option<ElementAction> {
        let action = self.pages.dispatch(event)?;
        match &action {
            ElementAction::Navigate(path) => self.navigate(path, overlay),
            ElementAction::OpenExternal(url) => tracing::info!(%url, "open external link"),
            ElementAction::MediaStep(_) => {}
        }
        Some(action)
    }

    /// Advance by `dt` seconds and draw both surfaces. `pointer` is in cells.
    pub fn frame(&mut self, dt: f32, pointer: Option<Vec2>, pointer_down: bool, overlay: &mut dyn OverlayHost) {
        let scroll = self.momentum.tick(dt);
        let input = FrameInput::new(dt)
            .with_scroll(scroll)
            .with_pointer(pointer, pointer_down);

        let surfaces = self.surfaces.begin_frame(self.field.background);
        let mut frame = FrameCtx::new(surfaces, &self.field, overlay);
        self.pages.update(&mut frame, &input);
    }

    /// Composite the last drawn frame over `scene` into `out`.
    pub fn composite_into<S: SceneSource + ?Sized>(&self, scene: &S, out: &mut FrameImage) {
        self.compositor
            .composite_into(scene, self.surfaces.surfaces(), &self.atlas, out);
    }

    fn rebuild(&mut self, overlay: &mut dyn OverlayHost) {
        self.pages.clear(overlay);
        let width = self.viewport_width as f32;
        self.field = FieldContext::new(
            self.field.brightness.clone(),
            self.surfaces.coordinate_system(),
            self.config.is_mobile(width),
        );

        let mut ctx = BuildCtx::new(&self.field, &mut *overlay, &self.content, &mut self.assets);
        let navigation = navigation_layer(&mut ctx);
        let page = create_page(&self.route, &mut ctx);
        self.route = page.route().clone();
        self.pages.add_fixed_layer(navigation);
        self.pages.navigate(page, overlay);
        if !self.images_as_glyphs {
            self.pages.fade_images(false);
        }
    }
}

/// Surface sizes for a viewport (CSS pixels). With bleed enabled the surfaces cover a
/// cell-aligned canvas centered over the viewport instead of the viewport itself.
fn surface_config(config: &FieldConfig, viewport_width: u32, viewport_height: u32, pixel_ratio: f32) -> SurfaceConfig {
    if !config.canvas_bleed {
        return SurfaceConfig::new(viewport_width, viewport_height, pixel_ratio, config.char_size);
    }
    let ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
    let cell = (config.char_size as f32 / ratio).round().max(1.0) as u32;
    let canvas = grid_canvas_size(viewport_width, viewport_height, cell, ratio);
    SurfaceConfig::new(canvas.width, canvas.height, ratio, config.char_size)
        .with_canvas_offset(Vec2::new(canvas.left as f32, canvas.top as f32))
}
