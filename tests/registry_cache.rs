use route_template_rs::registry::ROUTE_CACHE_KEY;
use route_template_rs::{
    CacheStore, CompiledRoute, EngineOptions, FilterOutcome, HttpMethod, MemoryCacheStore, ParamMap,
    ParamPatterns, Registry, RegistryError, RouteFilter, compile,
};

fn route(template: &str) -> CompiledRoute {
    compile(template, ParamPatterns::new()).expect("template should compile")
}

fn names(registry: &Registry) -> Vec<String> {
    registry.all().names().map(str::to_string).collect()
}

fn seeded_registry() -> Registry {
    let registry = Registry::default();
    registry
        .register(
            "default",
            route("(<controller>(/<action>(/<id>)))").with_default("controller", "welcome"),
        )
        .expect("route should register");
    let mut overrides = ParamPatterns::new();
    overrides.insert("id".to_string(), "\\d+".to_string());
    registry
        .register(
            "post",
            compile("post/<id>", overrides).expect("template should compile"),
        )
        .expect("route should register");
    registry
}

#[test]
fn all_keeps_registration_order() {
    let registry = seeded_registry();
    registry.register("about", route("about")).expect("route should register");
    assert_eq!(names(&registry), vec!["default", "post", "about"]);
}

#[test]
fn unknown_name_is_an_error() {
    let registry = seeded_registry();
    let err = registry.get("missing").expect_err("route was never registered");
    match err {
        RegistryError::RouteNotFound { name } => assert_eq!(name, "missing"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(registry.by_name("missing").is_none());
}

#[test]
fn loading_a_snapshot_restores_the_saved_set_exactly() {
    let registry = seeded_registry();
    let blob = registry.save_snapshot().expect("snapshot should encode");
    let before = registry.get("post").expect("post is registered");

    registry.register("extra", route("extra")).expect("route should register");
    assert_eq!(registry.len(), 3);

    assert!(registry.load_snapshot(Some(blob.as_slice()), false).expect("snapshot should load"));
    assert_eq!(names(&registry), vec!["default", "post"]);

    let restored = registry.get("post").expect("post is restored");
    assert_eq!(restored.pattern(), before.pattern());
    assert_eq!(restored.defaults(), before.defaults());
    assert!(restored.matches("post/42", HttpMethod::Get).is_some());
    assert!(restored.matches("post/abc", HttpMethod::Get).is_none());
}

#[test]
fn restore_keeps_patterns_under_a_custom_default_segment_pattern() {
    let options = EngineOptions::builder()
        .default_param_pattern("[0-9]+")
        .build()
        .expect("options should build");
    let registry = Registry::new(Some(options)).expect("registry should build");
    registry
        .register("page", route("<slug>"))
        .expect("route should register");
    registry
        .register(
            "numbered",
            registry
                .compile("item/<id>", ParamPatterns::new())
                .expect("template should compile"),
        )
        .expect("route should register");
    let before_page = registry.get("page").expect("page is registered");
    let before_item = registry.get("numbered").expect("numbered is registered");

    let blob = registry.save_snapshot().expect("snapshot should encode");
    assert!(registry.load_snapshot(Some(blob.as_slice()), false).expect("snapshot should load"));

    let page = registry.get("page").expect("page is restored");
    assert_eq!(page.pattern(), before_page.pattern());
    assert!(page.matches("about", HttpMethod::Get).is_some());

    let item = registry.get("numbered").expect("numbered is restored");
    assert_eq!(item.pattern(), before_item.pattern());
    assert!(item.matches("item/7", HttpMethod::Get).is_some());
    assert!(item.matches("item/seven", HttpMethod::Get).is_none());
}

#[test]
fn appending_a_snapshot_keeps_existing_routes() {
    let source = seeded_registry();
    let blob = source.save_snapshot().expect("snapshot should encode");

    let registry = Registry::default();
    registry
        .register("post", route("article/<id>"))
        .expect("route should register");

    assert!(registry.load_snapshot(Some(blob.as_slice()), true).expect("snapshot should load"));
    assert_eq!(names(&registry), vec!["post", "default"]);
    assert_eq!(
        registry.get("post").expect("post is registered").template(),
        "article/<id>"
    );
}

#[test]
fn missing_or_corrupt_snapshot_is_not_loaded() {
    let registry = seeded_registry();

    assert!(!registry.load_snapshot(None, false).expect("nothing to load"));
    assert!(!registry
        .load_snapshot(Some(b"{not a snapshot".as_slice()), false)
        .expect("garbage is ignored"));
    assert!(!registry
        .load_snapshot(Some(br#"{"version":7,"routes":[]}"#.as_slice()), false)
        .expect("foreign version is ignored"));

    assert_eq!(names(&registry), vec!["default", "post"]);
    assert_eq!(registry.metrics().snapshots_rejected, 2);
}

#[test]
fn cache_store_round_trip() {
    let store = MemoryCacheStore::new();
    let registry = seeded_registry();
    let fresh = Registry::default();

    assert!(!fresh.load_cache(&store, false).expect("empty store"));

    registry.save_cache(&store).expect("cache should save");
    assert!(store.load(ROUTE_CACHE_KEY).expect("store load").is_some());

    assert!(fresh.load_cache(&store, false).expect("cache should load"));
    assert_eq!(names(&fresh), vec!["default", "post"]);
    assert_eq!(
        fresh
            .uri("default", &[("controller".to_string(), "news".to_string())]
                .into_iter()
                .collect::<ParamMap>())
            .expect("uri should build"),
        "news"
    );
}

#[test]
fn filters_are_restored_from_the_catalog() {
    let source = Registry::default();
    source
        .register(
            "guarded",
            route("<controller>/<action>").filter("refuse-fail", refuse_fail),
        )
        .expect("route should register");
    let blob = source.save_snapshot().expect("snapshot should encode");

    let without_catalog = Registry::default();
    let err = without_catalog
        .load_snapshot(Some(blob.as_slice()), false)
        .expect_err("filter id is unknown");
    assert!(matches!(err, RegistryError::UnknownFilter { ref filter, .. } if filter == "refuse-fail"));
    assert!(without_catalog.is_empty());

    let registry = Registry::default();
    registry.register_filter(RouteFilter::new("refuse-fail", refuse_fail));
    assert!(registry.load_snapshot(Some(blob.as_slice()), false).expect("snapshot should load"));

    let guarded = registry.get("guarded").expect("route is restored");
    assert_eq!(guarded.matches("test/fail", HttpMethod::Get), None);
    assert!(guarded.matches("test/pass", HttpMethod::Get).is_some());
}

fn refuse_fail(
    _route: &CompiledRoute,
    params: &ParamMap,
    _ctx: &route_template_rs::RequestContext<'_>,
) -> FilterOutcome {
    if params.get("action").map(String::as_str) == Some("fail") {
        FilterOutcome::Reject
    } else {
        FilterOutcome::Keep
    }
}
