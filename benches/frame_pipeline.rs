use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ascii_field::compositor::{Compositor, FrameImage};
use ascii_field::core::{wrap_text, BrightnessMap};
use ascii_field::engine::{AssetLoader, ContentStore, FieldApp, FieldConfig, HeadlessOverlay};
use ascii_field::term::{CellGrid, FieldView, Viewport};
use ascii_field::types::{Rgb, DEFAULT_ASCII_SEQUENCE};

fn app(overlay: &mut HeadlessOverlay, route: &str) -> FieldApp {
    let config = FieldConfig {
        char_size: 10,
        ..FieldConfig::default()
    };
    let mut app = FieldApp::with_parts(config, ContentStore::sample(), AssetLoader::disabled(), 1280, 720, overlay)
        .expect("bench app");
    app.navigate(route, overlay);
    for _ in 0..240 {
        app.frame(1.0 / 60.0, None, false, overlay);
    }
    app
}

fn bench_frame(c: &mut Criterion) {
    let mut overlay = HeadlessOverlay::new();
    let mut home = app(&mut overlay, "/");
    c.bench_function("frame_home_60hz", |b| {
        b.iter(|| home.frame(black_box(1.0 / 60.0), None, false, &mut overlay))
    });

    let mut overlay = HeadlessOverlay::new();
    let mut work = app(&mut overlay, "/work");
    c.bench_function("frame_works_grid_60hz", |b| {
        b.iter(|| {
            work.wheel(black_box(12.0));
            work.frame(1.0 / 60.0, None, false, &mut overlay)
        })
    });
}

fn bench_composite(c: &mut Criterion) {
    let mut overlay = HeadlessOverlay::new();
    let app = app(&mut overlay, "/");
    let mut out = FrameImage::new(1, 1);

    c.bench_function("composite_1280x720", |b| {
        b.iter(|| app.composite_into(black_box(&Rgb::BLACK), &mut out))
    });

    let (w, h) = app.compositor().resolution();
    let compositor = Compositor::new(10, w, h);
    c.bench_function("frame_color_single_pixel", |b| {
        let surfaces = app.surfaces();
        b.iter(|| {
            compositor.frame_color(
                black_box(ascii_field::types::Vec2::new(0.31, 0.47)),
                &Rgb::BLACK,
                &surfaces.glyph,
                &surfaces.picture,
                app.atlas(),
            )
        })
    });
}

fn bench_field_view(c: &mut Criterion) {
    let mut overlay = HeadlessOverlay::new();
    let app = app(&mut overlay, "/");
    let map = BrightnessMap::new(DEFAULT_ASCII_SEQUENCE);
    let view = FieldView::new();
    let viewport = Viewport::new(128, 72);
    let mut grid = CellGrid::new(128, 72);

    c.bench_function("field_view_render_into", |b| {
        b.iter(|| {
            view.render_into(app.surfaces(), &map, Some("/  [q]uit"), viewport, &mut grid);
            black_box(grid.digest())
        })
    });
}

fn bench_wrap(c: &mut Criterion) {
    let text = ContentStore::sample()
        .works()
        .iter()
        .map(|w| w.description.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    c.bench_function("wrap_descriptions", |b| b.iter(|| wrap_text(black_box(&text), 50)));
}

criterion_group!(benches, bench_frame, bench_composite, bench_field_view, bench_wrap);
criterion_main!(benches);
