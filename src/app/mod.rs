//! The web application: service wiring, routes and the server loop.

use std::sync::Arc;

use crate::{
    DiResult, LifetimeReport, LifetimeSamplesModule, Options, Resolver, SampleController, ServiceCollection,
    ServiceCollectionExt, ServiceProvider, TracingObserver,
};

mod error;
pub mod routes;
pub mod settings;
pub mod telemetry;
pub mod view;

pub use error::AppError;
pub use routes::router;
pub use settings::{add_server_settings, ServerSettings};
pub use telemetry::init_tracing;

/// Registers everything the app resolves.
pub fn configure_services(settings: ServerSettings) -> DiResult<ServiceCollection> {
    let mut services = ServiceCollection::new().add_module(LifetimeSamplesModule)?;
    add_server_settings(&mut services, settings);
    services.add_observer(Arc::new(TracingObserver::new()));
    Ok(services)
}

/// Builds the provider and fails fast on invalid settings.
pub fn build_provider(settings: ServerSettings) -> DiResult<ServiceProvider> {
    let provider = configure_services(settings)?.build();
    provider.get::<Options<ServerSettings>>()?;
    Ok(provider)
}

/// Simulates `requests` requests in-process, one scope each.
pub fn run_report(provider: &ServiceProvider, requests: usize) -> DiResult<Vec<LifetimeReport>> {
    (0..requests)
        .map(|_| provider.with_scope(|scope| SampleController::from_scope(scope).map(|c| c.report())))
        .collect()
}

/// Serves the sample app until Ctrl-C.
pub async fn serve(provider: ServiceProvider) -> Result<(), AppError> {
    let settings = provider.get::<Options<ServerSettings>>()?.get();
    let addr = settings.socket_addr()?;

    let app = router(Arc::new(provider));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(error) => {
            tracing::error!(%error, "failed to listen for Ctrl-C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
