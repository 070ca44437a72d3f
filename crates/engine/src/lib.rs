//! Scene graph, page lifecycle and host runtime of the glyph field.
//!
//! # Architecture
//!
//! ```text
//! FieldApp
//!   ├─ RenderSurfaceManager   glyph + picture surfaces
//!   ├─ PageManager            current page, incoming page, fixed layers
//!   │    └─ Page ─ Layer ─ Element
//!   ├─ Compositor + GlyphAtlas
//!   ├─ ContentStore           works, tags, people
//!   └─ AssetLoader            background image decoding
//! ```
//!
//! Elements never touch a DOM or a terminal; interactive ones register an overlay twin
//! through [`OverlayHost`] and receive its events back through
//! [`PageManager::dispatch`].
//!
//! # Example
//!
//! ```
//! use ascii_field_engine::{FieldApp, FieldConfig, HeadlessOverlay};
//!
//! let mut overlay = HeadlessOverlay::new();
//! let mut app = FieldApp::new(FieldConfig::default(), 800, 600, &mut overlay).unwrap();
//! app.frame(1.0 / 60.0, None, false, &mut overlay);
//! app.navigate("/work", &mut overlay);
//! assert_eq!(app.route().path(), "/work");
//! ```

pub mod app;
pub mod assets;
pub mod config;
pub mod content;
pub mod context;
pub mod element;
pub mod error;
pub mod layer;
pub mod manager;
pub mod overlay;
pub mod page;
pub mod pages;
pub mod router;

pub use ascii_field_compositor as compositor;
pub use ascii_field_core as core;
pub use ascii_field_types as types;

pub use app::FieldApp;
pub use assets::{AssetLoader, ImageSlot};
pub use config::FieldConfig;
pub use content::ContentStore;
pub use context::FieldContext;
pub use element::{Element, ElementAction};
pub use error::{FieldError, Result};
pub use layer::{FrameInput, Layer};
pub use manager::PageManager;
pub use overlay::{HeadlessOverlay, OverlayEvent, OverlayEventKind, OverlayHost, OverlayId};
pub use page::{FadePhase, Page};
pub use router::Route;
