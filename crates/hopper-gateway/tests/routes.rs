use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{Request, StatusCode};
use axum::Router;
use hopper_core::{Mapping, ReadRepository, Repository, ShortCode, StorageError};
use hopper_gateway::{App, AppState};
use hopper_generator::{RandomGenerator, RandomGeneratorSettings};
use hopper_shortener::MappingStore;
use hopper_storage::InMemoryRepository;
use std::sync::Arc;
use tower::ServiceExt;

struct BrokenRepository;

#[async_trait]
impl ReadRepository for BrokenRepository {
    async fn get(&self, _code: &ShortCode) -> hopper_storage::Result<Option<Mapping>> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl Repository for BrokenRepository {
    async fn insert(&self, _mapping: &Mapping) -> hopper_storage::Result<()> {
        Err(StorageError::Unavailable("connection refused".to_string()))
    }
}

fn generator() -> RandomGenerator {
    RandomGenerator::new(RandomGeneratorSettings::builder().seed(7).build()).unwrap()
}

fn router_with<R: Repository>(repository: R, base_url: &str) -> (Router, Arc<MappingStore<R, RandomGenerator>>) {
    let store = Arc::new(MappingStore::new(repository, generator()));
    let state = AppState::new(store.clone(), base_url);
    (App::router(state), store)
}

fn shorten_request(body: &str) -> Request<Body> {
    Request::post("/shorten")
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn shorten_redirects_home_and_lists_mapping() {
    let (router, store) = router_with(InMemoryRepository::new(), "");

    let response = router
        .clone()
        .oneshot(shorten_request("url=https%3A%2F%2Fexample.com%2Fa%3Fb%3D1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");

    let mappings = store.fast_tier().snapshot();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].url, "https://example.com/a?b=1");

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(&format!("<a href=\"/{}\">", mappings[0].code)));
    assert!(html.contains("https://example.com/a?b=1"));
}

#[tokio::test]
async fn home_escapes_stored_urls() {
    let (router, _store) = router_with(InMemoryRepository::new(), "https://hop.example");

    router
        .clone()
        .oneshot(shorten_request("url=%3Cscript%3Ealert(1)%3C%2Fscript%3E"))
        .await
        .unwrap();

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_string(response).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("href=\"https://hop.example/"));
}

#[tokio::test]
async fn empty_url_is_bad_request() {
    let (router, store) = router_with(InMemoryRepository::new(), "");

    let response = router.oneshot(shorten_request("url=")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.fast_tier().is_empty());
    assert!(store.durable().is_empty());
}

#[tokio::test]
async fn missing_url_field_is_bad_request() {
    let (router, _store) = router_with(InMemoryRepository::new(), "");

    let response = router.oneshot(shorten_request("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_without_form_content_type_is_bad_request() {
    let (router, store) = router_with(InMemoryRepository::new(), "");

    let response = router
        .oneshot(Request::post("/shorten").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.fast_tier().is_empty());
}

#[tokio::test]
async fn json_body_is_bad_request() {
    let (router, store) = router_with(InMemoryRepository::new(), "");

    let response = router
        .oneshot(
            Request::post("/shorten")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"https://example.com"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.durable().is_empty());
}

#[tokio::test]
async fn durable_failure_is_internal_error() {
    let (router, store) = router_with(BrokenRepository, "");

    let response = router
        .oneshot(shorten_request("url=https%3A%2F%2Fexample.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.fast_tier().is_empty());
}

#[tokio::test]
async fn known_code_redirects_to_original() {
    let (router, store) = router_with(InMemoryRepository::new(), "");
    store
        .durable()
        .insert(&Mapping::new(
            ShortCode::new_unchecked("abc123"),
            "https://example.com/target",
        ))
        .await
        .unwrap();

    let response = router
        .oneshot(Request::get("/abc123").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "https://example.com/target");
    assert!(store.fast_tier().contains(&ShortCode::new_unchecked("abc123")));
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let (router, _store) = router_with(InMemoryRepository::new(), "");

    let response = router
        .oneshot(Request::get("/nothere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_code_is_not_found() {
    let (router, _store) = router_with(InMemoryRepository::new(), "");

    let response = router
        .oneshot(Request::get("/not_a_code").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lookup_error_is_not_found() {
    let (router, _store) = router_with(BrokenRepository, "");

    let response = router
        .oneshot(Request::get("/abc123").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_ok() {
    let (router, _store) = router_with(InMemoryRepository::new(), "");

    let response = router
        .oneshot(Request::get("/-/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}
