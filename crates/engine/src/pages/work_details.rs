//! Detail page for a single work.
//!
//! Blocks stack downward from `(6, 4)`:
//!
//! | Block | Advance after |
//! |-------|---------------|
//! | ascii title | `height + 1` |
//! | subtitle | `2` |
//! | tag chips | `4` |
//! | description (wrapped) | `height + 3` |
//! | tools sentence | `4` |
//! | team frame | - |
//!
//! The media viewer sits to the right at `(60, 14)`.

use crate::content::{AssetKind, Work};
use crate::core::FadeAnimator;
use crate::element::{Button, ElementAction, ImageElement, TeamMemberCard, TextBlock, TitledFrame};
use crate::layer::Layer;
use crate::page::Page;
use crate::pages::MediaViewer;
use crate::router::Route;
use crate::types::{HorizontalAlign, Rgb, Rgba, Vec2, VerticalAlign, DESCRIPTION_WRAP_WIDTH, IMAGE_FADE_SECONDS};

use super::{ascii_title, BuildCtx};

const TEAM_CARD_SIZE: Vec2 = Vec2::new(10.0, 8.0);
const TEAM_CARD_STRIDE: f32 = 12.0;
const OWNER_ID: &str = "me";
const OWNER_COLOR: Rgb = Rgb::new(0.7, 0.6, 0.2);

const MEDIA_POSITION: Vec2 = Vec2::new(60.0, 14.0);
const MEDIA_SIZE: Vec2 = Vec2::new(70.0, 30.0);
const MEDIA_BUTTON_BG: Rgba = Rgba::new(0.4, 0.4, 0.4, 0.1);

/// `"BUILT WITH: a, b and c"`; `None` when there are no tools.
pub fn tools_sentence(tools: &[String]) -> Option<String> {
    let (last, rest) = tools.split_last()?;
    let list = if rest.is_empty() {
        last.clone()
    } else {
        format!("{} and {}", rest.join(", "), last)
    };
    Some(format!("BUILT WITH: {list}"))
}

/// Width of the team frame for `members` cards besides the owner's.
///
/// One column of padding, the owner card with its gap, then every member card with its
/// gap except the last, which keeps one column.
pub fn team_frame_width(members: usize) -> f32 {
    let gaps = members.saturating_sub(1) as f32 * TEAM_CARD_STRIDE;
    let last = if members > 0 { TEAM_CARD_STRIDE - 1.0 } else { 0.0 };
    1.0 + TEAM_CARD_STRIDE + gaps + last
}

pub fn work_details_page(ctx: &mut BuildCtx<'_>, work: &Work) -> Page {
    let res = ctx.field.resolution();
    let mut page = Page::new("work-details", Route::WorkDetails(work.id.clone()));
    let mut main = Layer::new("work-details");

    main.add_element(
        Button::new(
            ctx.overlay,
            "Go back to works",
            "<< Go back to works",
            Vec2::new(6.0, -4.0),
            ElementAction::Navigate("/work".to_string()),
        )
        .aligned(HorizontalAlign::Start, VerticalAlign::End, res),
    );

    let mut pos = Vec2::new(6.0, 4.0);

    let title = TextBlock::new(ascii_title(&work.title), pos).with_background(Rgba::new(1.0, 1.0, 1.0, 0.1));
    pos.y += title.base.size.y + 1.0;
    main.add_element(title);

    main.add_element(TextBlock::new(work.subtitle.to_uppercase(), pos));
    pos.y += 2.0;

    page.add_layer(tags_layer(ctx, work, pos));
    pos.y += 4.0;

    let description = TextBlock::wrapped(&work.description, DESCRIPTION_WRAP_WIDTH, pos);
    pos.y += description.base.size.y + 3.0;
    main.add_element(description);

    if let Some(tools) = tools_sentence(&work.tools) {
        let mut layer = Layer::new("tools");
        layer.add_element(TextBlock::new(tools, pos));
        page.add_layer(layer);
        pos.y += 4.0;
    }

    page.add_layer(team_layer(ctx, work, pos));
    media_viewer(ctx, work, &mut page);

    page.add_layer(main);
    page
}

fn tags_layer(ctx: &mut BuildCtx<'_>, work: &Work, pos: Vec2) -> Layer {
    let mut layer = Layer::new("tags");
    let mut offset_x = 0.0;
    for tag in ctx.content.tags(&work.tags) {
        let chip = TextBlock::new(format!(" {} ", tag.name), Vec2::new(pos.x + offset_x, pos.y))
            .with_background(Rgba::new(0.0, 0.4, 0.4, 0.2));
        offset_x += chip.base.size.x + 2.0;
        layer.add_element(chip);
    }
    layer
}

fn team_layer(ctx: &mut BuildCtx<'_>, work: &Work, pos: Vec2) -> Layer {
    let mut layer = Layer::new("team");
    let cards_y = pos.y + 2.0;

    layer.add_element(TeamMemberCard::new(
        ctx.overlay,
        ctx.content.person(OWNER_ID),
        Vec2::new(pos.x + 1.0, cards_y),
        TEAM_CARD_SIZE,
        OWNER_COLOR,
    ));

    let members: Vec<_> = work.team.iter().filter(|m| m.id != OWNER_ID).collect();
    let mut offset_x = 1.0 + TEAM_CARD_STRIDE;
    for member in &members {
        layer.add_element(TeamMemberCard::new(
            ctx.overlay,
            ctx.content.person(&member.id),
            Vec2::new(pos.x + offset_x, cards_y),
            TEAM_CARD_SIZE,
            Rgb::WHITE,
        ));
        offset_x += TEAM_CARD_STRIDE;
    }

    let width = team_frame_width(members.len());
    layer.add_element(TitledFrame::new('=', "TEAM", pos, Vec2::new(width, 11.0)));
    layer
}

fn media_viewer(ctx: &mut BuildCtx<'_>, work: &Work, page: &mut Page) {
    let slots: Vec<_> = work
        .gallery()
        .filter(|a| a.kind != AssetKind::Video)
        .map(|a| Some(ctx.assets.request(&a.src)))
        .collect();
    if slots.is_empty() {
        return;
    }

    let mut layer = Layer::new("media");
    let (x, y) = (MEDIA_POSITION.x, MEDIA_POSITION.y);
    let h = MEDIA_SIZE.y;

    let image = layer.add_element(
        ImageElement::new(slots[0].clone(), MEDIA_POSITION, MEDIA_SIZE)
            .with_fade(FadeAnimator::new(0.0, IMAGE_FADE_SECONDS)),
    );

    layer.add_element(
        Button::new(
            ctx.overlay,
            "Previous media",
            "   \n < \n   ",
            Vec2::new(x, y + h),
            ElementAction::MediaStep(-1),
        )
        .with_background(MEDIA_BUTTON_BG),
    );
    layer.add_element(
        Button::new(
            ctx.overlay,
            "Next media",
            "   \n > \n   ",
            Vec2::new(x + 3.0, y + h),
            ElementAction::MediaStep(1),
        )
        .with_background(MEDIA_BUTTON_BG),
    );
    let indicator = layer.add_element(TextBlock::new(
        MediaViewer::indicator_text(0, slots.len()),
        Vec2::new(x + 7.0, y + h + 1.0),
    ));

    let id = page.add_layer(layer);
    page.set_media_viewer(MediaViewer::new(id, image, indicator, slots));
}
