#![cfg(feature = "web")]

//! The sample app over HTTP, driven through `tower::ServiceExt::oneshot`.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use scoped_lifetimes::app::{self, ServerSettings};
use scoped_lifetimes::{Lifetime, SampleService, ServiceCollection, SingletonService, TransientService};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let provider = app::build_provider(ServerSettings::default()).unwrap();
    app::router(Arc::new(provider))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> Value {
    let (status, body) = get(app, uri).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    assert_eq!(get(&app(), "/health").await, (StatusCode::OK, "ok".to_string()));
}

#[tokio::test]
async fn html_routes_render_the_sample_page() {
    let app = app();
    for uri in ["/", "/Sample", "/Sample/Index"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body.contains("<h1>Service lifetimes</h1>"), "{uri}");
        assert!(body.contains("ScopedService2"), "{uri}");
        assert!(body.contains("scope-"), "{uri}");
    }
}

#[tokio::test]
async fn requests_get_their_own_scope() {
    let app = app();
    let first = get_json(&app, "/api/lifetimes").await;
    let second = get_json(&app, "/api/lifetimes").await;

    for report in [&first, &second] {
        assert_eq!(report["transient"]["same"], false);
        assert_eq!(report["scoped"]["same"], true);
        assert_eq!(report["singleton"]["same"], true);
    }

    assert_ne!(first["scope"], second["scope"]);
    assert_ne!(first["scoped"]["first"], second["scoped"]["first"]);
    assert_eq!(first["singleton"]["first"], second["singleton"]["first"]);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _) = get(&app(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_role_is_500_and_does_not_break_later_requests() {
    let mut services = ServiceCollection::new();
    services
        .register_trait::<dyn TransientService, _>(Lifetime::Transient, || Arc::new(SampleService::new()))
        .register_trait::<dyn SingletonService, _>(Lifetime::Singleton, || Arc::new(SampleService::new()));
    let app = app::router(Arc::new(services.build()));

    let (status, body) = get(&app, "/api/lifetimes").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], "UnregisteredRole");
    assert!(error["role"].as_str().unwrap().contains("ScopedService"));

    let (status, _) = get(&app, "/Sample").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(get(&app, "/health").await.0, StatusCode::OK);
}
