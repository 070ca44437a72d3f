use crate::element::{Button, ElementAction, TextBlock};
use crate::layer::Layer;
use crate::page::Page;
use crate::router::Route;
use crate::types::{HorizontalAlign, Rgba, Vec2, VerticalAlign};

use super::{ascii_title, BuildCtx};

pub fn contacts_page(ctx: &mut BuildCtx<'_>) -> Page {
    let res = ctx.field.resolution();
    let mut page = Page::new("contacts", Route::Contacts);
    let mut main = Layer::new("contacts");

    let title = if ctx.field.is_mobile {
        "CONTACTS".to_string()
    } else {
        ascii_title("contacts")
    };
    let title = TextBlock::new(title, Vec2::new(5.0, 4.0)).aligned(HorizontalAlign::Start, VerticalAlign::Start, res);
    let mut y = title.base.position.y + title.base.size.y + 2.0;
    main.add_element(title);

    for person in &ctx.content.people {
        let Some(link) = person.link.as_deref() else {
            continue;
        };
        let text = format!("{} ->", person.name);
        main.add_element(
            Button::new(
                ctx.overlay,
                &person.name,
                text,
                Vec2::new(5.0, y),
                ElementAction::OpenExternal(link.to_string()),
            )
            .with_background(Rgba::new(0.0, 0.4, 0.4, 0.2)),
        );
        y += 2.0;
    }

    page.add_layer(main);
    page
}
