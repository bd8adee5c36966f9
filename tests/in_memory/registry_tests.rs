//! Registry integration tests over the built-in engines.

use super::helpers::{
    ALIGNED, CountingEngine, FixedClock, NotAnEngine, TestRegistry, clock, registry,
    registry_with,
};
use cache_registry::cache_engine::{
    adapters::resolver::FactoryResolver,
    domain::EngineConfig,
    ports::{EngineCandidate, EngineDescriptor},
    services::{CacheRegistryError, ConfigurationError},
};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn named(name: &str) -> EngineDescriptor {
    EngineDescriptor::named(name).expect("valid engine name")
}

#[rstest]
fn default_memory_engine_is_usable_after_load(registry: TestRegistry) {
    let handle = registry
        .load(
            "default",
            named("Memory"),
            EngineConfig::new().with("className", "Memory"),
        )
        .expect("memory engine should load");

    handle
        .with_engine(|engine| engine.write("greeting", json!("hello")))
        .expect("engine lock")
        .expect("write");
    let fetched = registry.get("default").expect("alias should be bound");
    let value = fetched
        .with_engine(|engine| engine.read("greeting"))
        .expect("engine lock")
        .expect("read");

    assert_eq!(handle.kind(), "MemoryEngine");
    assert_eq!(value, Some(json!("hello")));
}

#[rstest]
fn reloading_an_alias_replaces_the_engine(registry: TestRegistry) {
    let first = registry
        .load("default", named("Memory"), EngineConfig::new())
        .expect("first load");
    let second = registry
        .load("default", named("Null"), EngineConfig::new())
        .expect("second load");

    let bound = registry.get("default").expect("alias should be bound");
    assert!(bound.same_instance(&second));
    assert!(!bound.same_instance(&first));
    assert_eq!(bound.kind(), "NullEngine");
}

#[rstest]
fn unknown_engine_reports_unavailable(registry: TestRegistry) {
    let err = registry
        .load("default", named("Redis"), EngineConfig::new())
        .expect_err("Redis is not registered");

    assert!(matches!(err, CacheRegistryError::Unavailable(_)));
    assert_eq!(err.to_string(), "cache engine Redis is not available");
    assert!(!registry.has("default"));
}

#[rstest]
fn non_engine_instance_is_rejected(registry: TestRegistry) {
    let err = registry
        .load(
            "default",
            EngineDescriptor::instance(NotAnEngine),
            EngineConfig::new(),
        )
        .expect_err("plain values are not engines");

    assert!(matches!(
        err,
        CacheRegistryError::Configuration(ConfigurationError::ContractViolation { .. })
    ));
    assert_eq!(
        err.to_string(),
        "NotAnEngine must implement the required backend contract"
    );
}

#[rstest]
fn file_engine_without_path_is_not_configured(registry: TestRegistry) {
    let err = registry
        .load("files", named("File"), EngineConfig::new())
        .expect_err("path is required");

    assert_eq!(err.to_string(), "FileEngine is not properly configured");
    assert!(!registry.has("files"));
}

#[rstest]
#[case(ALIGNED, 1)]
#[case(ALIGNED + 1, 0)]
#[case(ALIGNED + 10, 1)]
fn maintenance_runs_when_clock_matches_probability(
    clock: Arc<FixedClock>,
    #[case] now: i64,
    #[case] expected: usize,
) {
    let collections = Arc::new(AtomicUsize::new(0));
    let resolver = FactoryResolver::with_builtin_engines();
    let counter = Arc::clone(&collections);
    resolver
        .register_engine("Counting", move |_: &EngineConfig| {
            Box::new(CountingEngine::new(&counter)) as Box<dyn EngineCandidate>
        })
        .expect("valid engine name");
    let registry = registry_with(resolver, &clock);
    clock.set(now);

    registry
        .load(
            "counted",
            named("Counting"),
            EngineConfig::new().with("probability", 10),
        )
        .expect("counting engine should load");

    assert_eq!(collections.load(Ordering::SeqCst), expected);
}

#[rstest]
fn unload_is_idempotent(registry: TestRegistry) {
    registry
        .load("default", named("Memory"), EngineConfig::new())
        .expect("load");

    registry.unload("default");
    registry.unload("default");
    registry.unload("never-loaded");

    assert!(!registry.has("default"));
    assert!(registry.loaded().is_empty());
}

#[rstest]
fn loaded_lists_aliases_in_order(registry: TestRegistry) {
    for alias in ["sessions", "default", "views"] {
        registry
            .load(alias, named("Null"), EngineConfig::new())
            .expect("load");
    }

    assert_eq!(registry.loaded(), ["default", "sessions", "views"]);

    registry.reset();
    assert!(registry.loaded().is_empty());
}

#[rstest]
fn cloned_registries_share_bindings(registry: TestRegistry) {
    let other = registry.clone();
    registry
        .load("default", named("Memory"), EngineConfig::new())
        .expect("load");

    assert!(other.has("default"));
    other.unload("default");
    assert!(!registry.has("default"));
}
