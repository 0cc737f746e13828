//! Axum integration: one [`Scope`] per request.
//!
//! [`create_app_with_di`] puts the root provider into the request
//! extensions. The [`DiScope`] extractor opens the request's scope on first
//! use and stores it back into the extensions, so every extractor and the
//! handler of one request share a single scope. The scope ends once the
//! request and every handle to it are dropped.

use std::any::Any;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Extension, Router,
};
use serde::Serialize;

use crate::traits::ResolverCore;
use crate::{DiError, DiResult, Key, Scope, ScopeId, ServiceProvider};

/// Request-scoped resolver extracted in handlers.
///
/// # Examples
///
/// ```
/// use axum::{routing::get, Router};
/// use scoped_lifetimes::axum_integration::{create_app_with_di, DiScope, DiRejection};
/// use scoped_lifetimes::{Lifetime, Resolver, ServiceCollection};
/// use std::sync::Arc;
///
/// struct Greeting(&'static str);
///
/// async fn hello(scope: DiScope) -> Result<&'static str, DiRejection> {
///     Ok(scope.get::<Greeting>()?.0)
/// }
///
/// let mut services = ServiceCollection::new();
/// services.register(Lifetime::Scoped, || Greeting("hello"));
///
/// let app: Router = create_app_with_di(Arc::new(services.build()), |router| {
///     router.route("/", get(hello))
/// });
/// ```
#[derive(Clone, Debug)]
pub struct DiScope {
    scope: Arc<Scope>,
}

impl DiScope {
    pub fn id(&self) -> ScopeId {
        self.scope.id()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }
}

impl ResolverCore for DiScope {
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>> {
        self.scope.resolve_any(key)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DiScope
where
    S: Send + Sync,
{
    type Rejection = DiRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(scope) = parts.extensions.get::<Arc<Scope>>() {
            return Ok(DiScope { scope: scope.clone() });
        }

        let provider = parts
            .extensions
            .get::<Arc<ServiceProvider>>()
            .ok_or(DiRejection::MissingProvider)?;

        let scope = Arc::new(provider.create_scope());
        tracing::debug!(scope = %scope.id(), method = %parts.method, uri = %parts.uri, "request scope opened");
        parts.extensions.insert(scope.clone());

        Ok(DiScope { scope })
    }
}

/// Why a request could not get its dependencies.
#[derive(Debug)]
pub enum DiRejection {
    /// The router was not built with [`create_app_with_di`].
    MissingProvider,
    /// Resolving a dependency failed.
    Resolution(DiError),
}

impl From<DiError> for DiRejection {
    fn from(error: DiError) -> Self {
        DiRejection::Resolution(error)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    role: Option<&'a str>,
    message: String,
}

impl IntoResponse for DiRejection {
    fn into_response(self) -> Response {
        let body = match &self {
            DiRejection::MissingProvider => {
                tracing::error!("ServiceProvider not found in request extensions");
                ErrorBody {
                    error: "MissingProvider",
                    role: None,
                    message: "ServiceProvider not found in extensions. Make sure to use create_app_with_di()".to_string(),
                }
            }
            DiRejection::Resolution(error) => {
                tracing::error!(kind = error.kind(), role = error.role(), %error, "dependency resolution failed");
                ErrorBody {
                    error: error.kind(),
                    role: error.role(),
                    message: error.to_string(),
                }
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

/// Builds a router whose requests can extract [`DiScope`].
///
/// `configure` adds the routes; the provider layer is applied afterwards so
/// it covers all of them.
pub fn create_app_with_di<F>(provider: Arc<ServiceProvider>, configure: F) -> Router
where
    F: FnOnce(Router) -> Router,
{
    tracing::debug!(registrations = provider.registration_count(), "attaching service provider to router");
    configure(Router::new()).layer(Extension(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lifetime, Resolver, ServiceCollection};
    use axum::http::Request;

    struct Token(u32);

    fn parts_with(provider: Option<Arc<ServiceProvider>>) -> Parts {
        let (mut parts, _) = Request::builder().uri("/").body(()).unwrap().into_parts();
        if let Some(provider) = provider {
            parts.extensions.insert(provider);
        }
        parts
    }

    #[tokio::test]
    async fn extractors_of_one_request_share_the_scope() {
        let mut services = ServiceCollection::new();
        services.register(Lifetime::Scoped, || Token(1));
        let provider = Arc::new(services.build());

        let mut parts = parts_with(Some(provider));
        let a = DiScope::from_request_parts(&mut parts, &()).await.unwrap();
        let b = DiScope::from_request_parts(&mut parts, &()).await.unwrap();

        assert_eq!(a.id(), b.id());
        assert!(Arc::ptr_eq(&a.get_required::<Token>(), &b.get_required::<Token>()));
    }

    #[tokio::test]
    async fn missing_provider_is_rejected() {
        let mut parts = parts_with(None);
        let rejection = DiScope::from_request_parts(&mut parts, &()).await.unwrap_err();

        assert!(matches!(rejection, DiRejection::MissingProvider));
        assert_eq!(rejection.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
