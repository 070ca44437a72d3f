//! Page definitions: what each route puts on screen.
//!
//! Every builder receives a [`BuildCtx`] and returns a fully initialised
//! [`Page`](crate::page::Page) (or [`Layer`](crate::layer::Layer) for the fixed
//! navigation). Builders run once per navigation; nothing here runs per frame except
//! [`MediaViewer::step`].

mod contacts;
mod home;
mod media;
mod navigation;
mod title_font;
mod work;
mod work_details;

pub use contacts::contacts_page;
pub use home::home_page;
pub use media::MediaViewer;
pub use navigation::navigation_layer;
pub use title_font::{ascii_title, title_glyph};
pub use work::{work_page, works_grid};
pub use work_details::{team_frame_width, tools_sentence, work_details_page};

use crate::assets::AssetLoader;
use crate::content::ContentStore;
use crate::context::FieldContext;
use crate::overlay::OverlayHost;

/// Everything a page builder may read or register with.
pub struct BuildCtx<'a> {
    pub field: &'a FieldContext,
    pub overlay: &'a mut dyn OverlayHost,
    pub content: &'a ContentStore,
    pub assets: &'a mut AssetLoader,
}

impl<'a> BuildCtx<'a> {
    pub fn new(
        field: &'a FieldContext,
        overlay: &'a mut dyn OverlayHost,
        content: &'a ContentStore,
        assets: &'a mut AssetLoader,
    ) -> Self {
        Self {
            field,
            overlay,
            content,
            assets,
        }
    }
}
