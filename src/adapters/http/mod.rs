//! HTTP adapters - REST API implementations.
//!
//! [`app_router`] assembles the full application: public and protected
//! honeypot routes plus request id, tracing, timeout and CORS layers.

pub mod honeypot;
pub mod middleware;

pub use honeypot::{honeypot_router, public_router, HoneypotAppState};
pub use middleware::{api_key_middleware, ApiKeyState};

use axum::http::{HeaderName, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Builds the application router.
pub fn app_router(state: HoneypotAppState, api_key: ApiKeyState, server: &ServerConfig) -> Router {
    let protected = honeypot_router().route_layer(axum::middleware::from_fn_with_state(
        api_key,
        api_key_middleware,
    ));

    let x_request_id = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(public_router())
        .merge(protected)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(x_request_id))
                .layer(TimeoutLayer::new(server.request_timeout()))
                .layer(cors_layer(server)),
        )
}

/// Any origin unless `cors_origins` lists specific ones.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
