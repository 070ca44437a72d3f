use crate::element::{Button, ElementAction};
use crate::layer::Layer;
use crate::types::{HorizontalAlign, Rgb, Rgba, Vec2, VerticalAlign};

use super::BuildCtx;

const LINKS: [(&str, &str); 3] = [("home", "/"), ("work", "/work"), ("contacts", "/contacts")];

/// The fixed navigation layer: three right-aligned buttons, top-right on desktop and
/// bottom-right on mobile.
pub fn navigation_layer(ctx: &mut BuildCtx<'_>) -> Layer {
    let res = ctx.field.resolution();
    let mut layer = Layer::new("navigation");

    let (vertical, rows) = if ctx.field.is_mobile {
        (VerticalAlign::End, [-8.0, -6.0, -4.0])
    } else {
        (VerticalAlign::Start, [4.0, 6.0, 8.0])
    };

    for ((text, path), row) in LINKS.into_iter().zip(rows) {
        layer.add_element(
            Button::new(
                ctx.overlay,
                text,
                text,
                Vec2::new(-4.0, row),
                ElementAction::Navigate(path.to_string()),
            )
            .with_color(Rgb::WHITE)
            .with_background(Rgba::new(0.0, 0.4, 0.4, 0.0))
            .aligned(HorizontalAlign::End, vertical, res),
        );
    }
    layer
}
