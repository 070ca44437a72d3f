use crate::core::{calculate_grid_columns, GridLayout};
use crate::element::{FadeGradient, GradientDirection, TextBlock, WorkCard};
use crate::layer::Layer;
use crate::page::Page;
use crate::router::Route;
use crate::types::{Vec2, CARD_GAP, MIN_CARD_WIDTH};

use super::{ascii_title, BuildCtx};

/// Works index: the big title and the scrollable card grid.
pub fn work_page(ctx: &mut BuildCtx<'_>) -> Page {
    let res = ctx.field.resolution();
    let margin = (res.x * 0.05).ceil();
    let mut page = Page::new("work", Route::Work);

    let mut main = Layer::new("work");
    main.add_element(TextBlock::new(ascii_title("WORK"), Vec2::new(margin, 3.0)));
    page.add_layer(main);

    let width = res.x - 2.0 * margin;
    let columns = calculate_grid_columns(width, MIN_CARD_WIDTH, CARD_GAP);
    page.add_layer(works_grid(ctx, width, columns, margin, CARD_GAP));
    page
}

/// One [`WorkCard`] per work, laid out by [`GridLayout`], between a top and a bottom
/// [`FadeGradient`]. Cards are clipped to the rows the gradients leave visible.
pub fn works_grid(ctx: &mut BuildCtx<'_>, width: f32, columns: u32, margin: f32, gap: f32) -> Layer {
    let res = ctx.field.resolution();
    let works = ctx.content.works();
    let layout = GridLayout::compute(works.len(), width, columns, margin, gap, res);

    let top = FadeGradient::new(Vec2::new(0.0, 2.0), Vec2::new(res.x, 5.0), GradientDirection::Top);
    let bottom = FadeGradient::new(
        Vec2::new(0.0, res.y - 1.5),
        Vec2::new(res.x, 3.0),
        GradientDirection::Bottom,
    );
    let clip_top = top.visible_rows(res.y).0;
    let clip_bottom = bottom.visible_rows(res.y).1;

    let mut layer = Layer::scrollable("works", layout.max_scroll);
    for (i, work) in works.iter().enumerate() {
        let tags = ctx.content.tags(&work.tags);
        let thumbnail = work.thumbnail().map(|asset| ctx.assets.request(&asset.src));
        let card = WorkCard::new(
            ctx.overlay,
            work,
            &tags,
            thumbnail,
            layout.card_position(i),
            layout.card_size,
        )
        .with_clip(clip_top, clip_bottom);
        layer.add_element(card);
    }
    layer.add_element(top);
    layer.add_element(bottom);

    tracing::debug!(
        works = works.len(),
        columns = layout.columns,
        max_scroll = layout.max_scroll,
        "laid out works grid"
    );
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use crate::content::ContentStore;
    use crate::element::Element;
    use crate::overlay::HeadlessOverlay;
    use crate::pages::test_support::desktop;

    #[test]
    fn grid_has_a_card_per_work_and_two_gradients() {
        let (field, _) = desktop();
        let mut overlay = HeadlessOverlay::new();
        let content = ContentStore::sample();
        let mut assets = AssetLoader::disabled();
        let mut ctx = BuildCtx::new(&field, &mut overlay, &content, &mut assets);
        let page = work_page(&mut ctx);

        let grid = &page.layers()[1];
        let cards = grid.elements().iter().filter(|e| matches!(e, Element::WorkCard(_))).count();
        let gradients = grid.elements().iter().filter(|e| matches!(e, Element::Gradient(_))).count();
        assert_eq!(cards, content.works().len());
        assert_eq!(gradients, 2);
        assert!(grid.scroll().is_some());
        assert_eq!(overlay.len(), content.works().len());
    }

    #[test]
    fn title_starts_at_margin() {
        let (field, _) = desktop();
        let mut overlay = HeadlessOverlay::new();
        let content = ContentStore::default();
        let mut assets = AssetLoader::disabled();
        let mut ctx = BuildCtx::new(&field, &mut overlay, &content, &mut assets);
        let page = work_page(&mut ctx);

        // ceil(160 * 0.05) = 8
        assert_eq!(page.layers()[0].elements()[0].base().position, Vec2::new(8.0, 3.0));
        assert_eq!(page.layers()[1].scroll().map(|s| s.max()), Some(0.0));
    }
}
