use super::host::HostBridge;
use crate::engine::errors::{
    SENTINEL_NO_OUTPUT, SENTINEL_NOT_FOUND, SENTINEL_PROCESSOR_SPAWN, SENTINEL_RUNTIME,
    SENTINEL_STORE_CONNECTION, SENTINEL_STORE_QUERY,
};
use crate::engine::errors::FetchError;
use crate::engine::fetch::MemoryStore;
use crate::engine::types::ResultKind;
use crate::shared::config::{ProcessorConfig, Settings};
use crate::test_helpers::factory::Factory;

const URI: &str = "mongodb://127.0.0.1:27017";

fn host(store: MemoryStore, processor: ProcessorConfig) -> HostBridge<MemoryStore> {
    let settings = Settings {
        processor,
        ..Settings::default()
    };
    HostBridge::with_source(store, &settings)
}

fn stocked() -> MemoryStore {
    Factory::store()
        .with_document("doc-1", Factory::document().create())
        .create()
}

#[test]
fn typed_entry_points_answer_plain_values() {
    crate::logging::init_for_tests();

    let host = host(stocked(), Factory::processor().echo_query().create());

    assert_eq!(host.query_string(URI, "metrics", "containers", "doc-1", "pdf"), "pdf");
    assert_eq!(host.query_integer(URI, "metrics", "containers", "doc-1", "42"), 42);
    assert_eq!(host.query_float(URI, "metrics", "containers", "doc-1", "3.14"), 3.14);
}

#[test]
fn missing_document_answers_sentinel_and_zero() {
    crate::logging::init_for_tests();

    let host = host(stocked(), Factory::processor().identity().create());

    assert_eq!(
        host.query_string(URI, "metrics", "containers", "doc-404", "@"),
        SENTINEL_NOT_FOUND
    );
    assert_eq!(host.query_integer(URI, "metrics", "containers", "doc-404", "@"), 0);
    assert_eq!(host.query_float(URI, "metrics", "containers", "doc-404", "@"), 0.0);
}

#[test]
fn unavailable_store_answers_its_own_sentinel() {
    crate::logging::init_for_tests();

    let store = stocked();
    store.fail_with(FetchError::Connection("no reachable servers".into()));
    let host = host(store, Factory::processor().identity().create());

    assert_eq!(
        host.query_string(URI, "metrics", "containers", "doc-1", "@"),
        SENTINEL_STORE_CONNECTION
    );
}

#[test]
fn store_rejecting_the_query_answers_query_sentinel() {
    crate::logging::init_for_tests();

    let store = stocked();
    store.fail_with(FetchError::Query("unauthorized".into()));
    let host = host(store, Factory::processor().identity().create());

    assert_eq!(
        host.query_string(URI, "metrics", "containers", "doc-1", "@"),
        SENTINEL_STORE_QUERY
    );
}

#[test]
fn processor_failures_answer_sentinels() {
    crate::logging::init_for_tests();

    let missing = host(stocked(), Factory::processor().path("/nonexistent/jp").create());
    assert_eq!(
        missing.query_string(URI, "metrics", "containers", "doc-1", "@"),
        SENTINEL_PROCESSOR_SPAWN
    );
    assert_eq!(missing.query_float(URI, "metrics", "containers", "doc-1", "@"), 0.0);

    let silent = host(stocked(), Factory::processor().script("exit 1").create());
    assert_eq!(
        silent.query_string(URI, "metrics", "containers", "doc-1", "@"),
        SENTINEL_NO_OUTPUT
    );
}

#[test]
fn structured_query_keeps_the_error() {
    crate::logging::init_for_tests();

    let host = host(stocked(), Factory::processor().identity().create());
    let err = host
        .query(URI, "metrics", "containers", "doc-404", "@", ResultKind::Integer)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn blocking_from_async_context_is_refused_not_panicking() {
    crate::logging::init_for_tests();

    let host = host(stocked(), Factory::processor().echo_query().create());
    assert_eq!(
        host.query_string(URI, "metrics", "containers", "doc-1", "pdf"),
        SENTINEL_RUNTIME
    );
    assert_eq!(host.query_integer(URI, "metrics", "containers", "doc-1", "1"), 0);
}

#[test]
fn repeated_identical_calls_are_independent() {
    crate::logging::init_for_tests();

    let store = stocked();
    let host = host(store, Factory::processor().identity().create());

    let first = host.query_string(URI, "metrics", "containers", "doc-1", "@");
    let second = host.query_string(URI, "metrics", "containers", "doc-1", "@");
    assert_eq!(first, second);
    assert!(first.contains("\"mime\":\"application/pdf\""));
}
