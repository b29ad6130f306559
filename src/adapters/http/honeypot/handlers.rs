//! HTTP handlers for the honeypot endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::handlers::honeypot::{ProcessMessageCommand, ProcessMessageHandler};

use super::dto::{ErrorResponse, HealthResponse, HoneypotRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state.
#[derive(Clone)]
pub struct HoneypotAppState {
    pub handler: Arc<ProcessMessageHandler>,
}

impl HoneypotAppState {
    pub fn new(handler: ProcessMessageHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::active())
}

/// POST /honey-pot - Answer one scammer message
///
/// Malformed bodies get a 400. Everything after parsing answers 200, with
/// `status: "error"` only when processing itself broke down.
pub async fn honey_pot(
    State(state): State<HoneypotAppState>,
    payload: Result<Json<HoneypotRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!("Rejected honeypot request: {}", rejection.body_text());
            let error = ErrorResponse::bad_request(rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let metadata = request.metadata.clone().unwrap_or_default();
    tracing::debug!(
        session_id = %request.session_id,
        sender = %request.message.sender,
        sent_at = %request.message.sent_at(),
        history_len = request.conversation_history.len(),
        channel = %metadata.channel,
        language = %metadata.language,
        locale = %metadata.locale,
        "Inbound message"
    );

    let reply = state
        .handler
        .handle(ProcessMessageCommand::from(request))
        .await;

    (StatusCode::OK, Json(reply)).into_response()
}
