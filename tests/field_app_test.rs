use ascii_field::compositor::FrameImage;
use ascii_field::engine::{
    AssetLoader, ContentStore, ElementAction, FadePhase, FieldApp, FieldConfig, HeadlessOverlay, OverlayEvent, Route,
};
use ascii_field::types::{FieldAction, Rgb};

fn app(overlay: &mut HeadlessOverlay, width: u32, height: u32) -> FieldApp {
    let config = FieldConfig {
        char_size: 10,
        ..FieldConfig::default()
    };
    FieldApp::with_parts(config, ContentStore::sample(), AssetLoader::disabled(), width, height, overlay).unwrap()
}

fn run(app: &mut FieldApp, overlay: &mut HeadlessOverlay, frames: usize) {
    for _ in 0..frames {
        app.frame(1.0 / 60.0, None, false, overlay);
    }
}

/// Click the center of the twin labelled `label` and feed every queued event back.
fn click(app: &mut FieldApp, overlay: &mut HeadlessOverlay, label: &str) -> Vec<ElementAction> {
    let rect = overlay
        .find_label(label)
        .and_then(|e| e.rect)
        .unwrap_or_else(|| panic!("no placed twin labelled {label:?}"));
    overlay.click(rect.left + rect.width / 2.0, rect.top + rect.height / 2.0);

    let mut events: Vec<OverlayEvent> = Vec::new();
    overlay.drain_events_into(&mut events);
    events
        .iter()
        .filter_map(|e| app.handle_overlay_event(e, overlay))
        .collect()
}

#[test]
fn pointer_click_on_navigation_twin_navigates() {
    let mut overlay = HeadlessOverlay::new();
    let mut app = app(&mut overlay, 1600, 450);
    run(&mut app, &mut overlay, 1);

    let actions = click(&mut app, &mut overlay, "work");
    assert_eq!(actions, vec![ElementAction::Navigate("/work".into())]);
    assert_eq!(app.route(), &Route::Work);

    let next = app.pages().next().expect("work page fading in");
    assert_eq!(next.name(), "work");
    assert_eq!(next.phase(), FadePhase::Entering);
}

#[test]
fn transition_completes_and_old_page_twins_are_released() {
    let mut overlay = HeadlessOverlay::new();
    let mut app = app(&mut overlay, 1600, 450);
    run(&mut app, &mut overlay, 1);
    let before = overlay.len();

    app.navigate("/contacts", &mut overlay);
    run(&mut app, &mut overlay, 400);

    assert!(!app.pages().is_transitioning());
    assert_eq!(app.pages().current().map(|p| p.name()), Some("contacts"));
    assert_eq!(app.pages().current().map(|p| p.phase()), Some(FadePhase::Steady));
    // Navigation twins survive, the home page had none, contacts adds its buttons.
    assert!(overlay.len() >= before);
    assert!(overlay.find_label("work").is_some());
}

#[test]
fn work_card_click_opens_details_and_back_returns() {
    let mut overlay = HeadlessOverlay::new();
    let mut app = app(&mut overlay, 1600, 450);
    app.navigate("/work", &mut overlay);
    run(&mut app, &mut overlay, 400);

    let first = app.content().works()[0].clone();
    let actions = click(&mut app, &mut overlay, &format!("Go to {}", first.title));
    assert_eq!(actions, vec![ElementAction::Navigate(format!("/work/{}", first.id))]);
    assert_eq!(app.route(), &Route::WorkDetails(first.id.clone()));

    run(&mut app, &mut overlay, 400);
    let actions = click(&mut app, &mut overlay, "Go back to works");
    assert_eq!(actions, vec![ElementAction::Navigate("/work".into())]);
    assert_eq!(app.route(), &Route::Work);
}

#[test]
fn key_actions_route_like_links() {
    let mut overlay = HeadlessOverlay::new();
    let mut app = app(&mut overlay, 1600, 450);

    app.apply(FieldAction::GoContacts, &mut overlay);
    assert_eq!(app.route(), &Route::Contacts);
    app.apply(FieldAction::GoWork, &mut overlay);
    assert_eq!(app.route(), &Route::Work);
    app.apply(FieldAction::GoHome, &mut overlay);
    assert_eq!(app.route(), &Route::Home);
}

#[test]
fn narrow_viewport_uses_mobile_layout() {
    let mut overlay = HeadlessOverlay::new();
    let app = app(&mut overlay, 600, 800);
    assert!(app.field().is_mobile);
}

#[test]
fn resize_across_breakpoint_rebuilds_layout() {
    let mut overlay = HeadlessOverlay::new();
    let mut app = app(&mut overlay, 1600, 450);
    assert!(!app.field().is_mobile);

    app.resize(600, 800, 1.0, &mut overlay);
    assert!(app.field().is_mobile);
    assert_eq!(app.surfaces().glyph.resolution(), (60, 80));
    assert_eq!(overlay.entries().iter().filter(|e| e.label == "home").count(), 1);
}

#[test]
fn composite_output_matches_device_size() {
    let mut overlay = HeadlessOverlay::new();
    let mut app = app(&mut overlay, 320, 200);
    run(&mut app, &mut overlay, 60);

    let mut out = FrameImage::new(1, 1);
    app.composite_into(&Rgb::BLACK, &mut out);
    assert_eq!((out.width(), out.height()), (320, 200));
    assert!(out.as_bytes().chunks_exact(4).all(|p| p[3] == 255));
}
