//! HTTP routes of the sample app.

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Html,
    routing::get,
    Json, Router,
};

use super::view::render_index;
use crate::axum_integration::{create_app_with_di, DiRejection, DiScope};
use crate::{LifetimeReport, SampleController, ServiceProvider};

/// Builds the controller from the request's scope.
#[async_trait]
impl<S> FromRequestParts<S> for SampleController
where
    S: Send + Sync,
{
    type Rejection = DiRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let scope = DiScope::from_request_parts(parts, state).await?;
        Ok(SampleController::from_scope(scope.scope())?)
    }
}

/// The sample router: HTML and JSON views plus a health check.
pub fn router(provider: Arc<ServiceProvider>) -> Router {
    create_app_with_di(provider, |router| {
        router
            .route("/", get(index))
            .route("/Sample", get(index))
            .route("/Sample/Index", get(index))
            .route("/api/lifetimes", get(lifetimes))
            .route("/health", get(health))
    })
}

async fn index(controller: SampleController) -> Html<String> {
    let report = controller.report();
    let _span = tracing::info_span!("sample_index", scope = ?report.scope).entered();
    tracing::info!(%report, "rendering sample page");
    Html(render_index(&report))
}

async fn lifetimes(controller: SampleController) -> Json<LifetimeReport> {
    let report = controller.report();
    tracing::info!(scope = ?report.scope, %report, "lifetime report requested");
    Json(report)
}

async fn health() -> &'static str {
    "ok"
}
