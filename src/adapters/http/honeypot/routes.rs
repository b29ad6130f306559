//! Route configuration for honeypot endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{health, honey_pot, HoneypotAppState};

/// Unauthenticated routes.
///
/// Routes:
/// - `GET /` - Liveness check
pub fn public_router() -> Router<HoneypotAppState> {
    Router::new().route("/", get(health))
}

/// Routes that require the API key.
///
/// Routes:
/// - `POST /honey-pot` - Answer one scammer message
pub fn honeypot_router() -> Router<HoneypotAppState> {
    Router::new().route("/honey-pot", post(honey_pot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerationBackend;
    use crate::adapters::callback::RecordingResultSink;
    use crate::application::handlers::honeypot::ProcessMessageHandler;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(backend: MockGenerationBackend) -> Router {
        let handler = ProcessMessageHandler::new(
            Arc::new(backend),
            Arc::new(RecordingResultSink::new()),
        )
        .with_rng_seed(7);

        public_router()
            .merge(honeypot_router())
            .with_state(HoneypotAppState::new(handler))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/honey-pot")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_route_exists() {
        let response = test_app(MockGenerationBackend::new())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "active");
    }

    #[tokio::test]
    async fn honey_pot_returns_generated_reply() {
        let backend = MockGenerationBackend::new().with_response(serde_json::json!({
            "scamDetected": true,
            "reply": "Ji, which branch are you calling from?",
            "agentNotes": "bank impersonation",
            "extractedIntelligence": {"phoneNumbers": ["+919876543210"]}
        }));

        let response = test_app(backend)
            .oneshot(post_json(
                r#"{"sessionId": "abc", "message": {"sender": "scammer", "text": "Call +919876543210"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["reply"], "Ji, which branch are you calling from?");
        assert_eq!(json["engagementMetrics"]["totalMessagesExchanged"], 1);
        assert_eq!(
            json["extractedIntelligence"]["phoneNumbers"][0],
            "+919876543210"
        );
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let response = test_app(MockGenerationBackend::new())
            .oneshot(post_json("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn missing_message_text_is_bad_request() {
        let response = test_app(MockGenerationBackend::new())
            .oneshot(post_json(r#"{"sessionId": "abc", "message": {}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn null_history_fields_are_accepted() {
        let response = test_app(MockGenerationBackend::new())
            .oneshot(post_json(
                r#"{"message": {"text": "hello"}, "conversationHistory": [{"sender": null, "text": null}]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["engagementMetrics"]["totalMessagesExchanged"], 2);
    }

    #[tokio::test]
    async fn exhausted_backends_still_answer_success() {
        let response = test_app(MockGenerationBackend::new().with_unavailable())
            .oneshot(post_json(r#"{"message": {"text": "send the code"}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["scamDetected"], true);
    }
}
