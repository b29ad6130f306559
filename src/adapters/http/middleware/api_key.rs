//! Shared-secret API key middleware.
//!
//! Callers present the key in the `x-api-key` header. Missing or wrong keys
//! are answered with 401 before the request reaches a handler.
//!
//! # Example
//!
//! ```ignore
//! use axum::{middleware, routing::post, Router};
//!
//! let app = Router::new()
//!     .route("/honey-pot", post(honey_pot))
//!     .route_layer(middleware::from_fn_with_state(
//!         ApiKeyState::new("secret"),
//!         api_key_middleware,
//!     ));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, Secret};
use subtle::ConstantTimeEq;

use crate::adapters::http::honeypot::ErrorResponse;
use crate::config::AuthConfig;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Expected key, shared across requests.
#[derive(Clone)]
pub struct ApiKeyState {
    expected: Arc<Secret<String>>,
}

impl ApiKeyState {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            expected: Arc::new(Secret::new(api_key.into())),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            expected: Arc::new(config.api_key.clone()),
        }
    }

    /// Compares in constant time.
    fn matches(&self, presented: &str) -> bool {
        let expected = self.expected.expose_secret().as_bytes();
        !expected.is_empty() && bool::from(expected.ct_eq(presented.as_bytes()))
    }
}

/// Rejects requests whose `x-api-key` header does not match.
pub async fn api_key_middleware(
    State(state): State<ApiKeyState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match presented {
        Some(key) if state.matches(key) => next.run(request).await,
        Some(_) => {
            tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
            unauthorized()
        }
        None => {
            tracing::warn!(path = %request.uri().path(), "Rejected request without API key");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(ErrorResponse::unauthorized())).into_response()
}
