use ascii_field::engine::content::AssetKind;
use ascii_field::engine::{ContentStore, FieldError, Route};

const CONTENT: &str = r##"{
  "works": [
    {
      "id": "orbit",
      "title": "Orbit",
      "tags": ["webgl", "missing"],
      "team": [{ "id": "me" }],
      "assets": [
        { "type": "video", "src": "orbit.mp4" },
        { "type": "image", "src": "orbit-1.png", "alt": "Hero" },
        { "type": "thumbnail", "src": "orbit-thumb.png" }
      ]
    }
  ],
  "tags": [{ "id": "webgl", "name": "WebGL", "color": "#3a7bd5" }],
  "people": [{ "id": "me", "name": "Me" }]
}"##;

#[test]
fn content_parses_with_defaults() {
    let store = ContentStore::from_json(CONTENT).unwrap();
    let work = store.work("orbit").unwrap();
    assert_eq!(work.subtitle, "");
    assert!(work.tools.is_empty());
    assert_eq!(work.team[0].roles, Vec::<String>::new());
}

#[test]
fn thumbnail_prefers_thumbnail_assets() {
    let store = ContentStore::from_json(CONTENT).unwrap();
    let work = store.work("orbit").unwrap();
    assert_eq!(work.thumbnail().map(|a| a.src.as_str()), Some("orbit-thumb.png"));

    let gallery: Vec<AssetKind> = work.gallery().map(|a| a.kind).collect();
    assert_eq!(gallery, vec![AssetKind::Video, AssetKind::Image]);
}

#[test]
fn unknown_tag_ids_are_skipped() {
    let store = ContentStore::from_json(CONTENT).unwrap();
    let tags = store.tags(&store.work("orbit").unwrap().tags);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "WebGL");
}

#[test]
fn serialized_assets_keep_the_type_key() {
    let store = ContentStore::from_json(CONTENT).unwrap();
    let v = serde_json::to_value(&store).unwrap();
    assert_eq!(v["works"][0]["assets"][1]["type"], "image");
    assert!(v["works"][0]["assets"][0].get("alt").is_none());
}

#[test]
fn malformed_content_is_an_error() {
    let err = ContentStore::from_json("{ \"works\": 3 }").unwrap_err();
    assert!(matches!(err, FieldError::Content(_)));
}

#[test]
fn every_sample_work_has_a_details_route() {
    let store = ContentStore::sample();
    assert!(!store.works().is_empty());
    for work in store.works() {
        let route = Route::parse(&format!("/work/{}", work.id));
        assert_eq!(route, Route::WorkDetails(work.id.clone()));
        assert!(store.work(&work.id).is_some());
    }
}
