//! Data Transfer Objects for the honeypot endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::application::handlers::honeypot::ProcessMessageCommand;
use crate::domain::engagement::Turn;

/// Sender label for history turns that arrive without one.
pub const UNKNOWN_SENDER: &str = "unknown";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /honey-pot`. Only `message.text` is required.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub session_id: String,
    pub message: InboundMessage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversation_history: Vec<InboundTurn>,
    #[serde(default)]
    pub metadata: Option<RequestMetadata>,
}

/// The message being answered.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sender: String,
    pub text: String,
    #[serde(default)]
    pub timestamp: serde_json::Value,
}

/// One earlier turn. Timestamps may be strings or epoch numbers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InboundTurn {
    #[serde(deserialize_with = "null_as_default")]
    pub sender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    pub timestamp: serde_json::Value,
}

/// Channel information. Accepted and logged, not used for generation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RequestMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub channel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub locale: String,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl InboundMessage {
    /// Caller timestamp as text, empty when absent.
    pub fn sent_at(&self) -> String {
        timestamp_text(&self.timestamp)
    }
}

impl InboundTurn {
    fn into_turn(self) -> Turn {
        let sender = if self.sender.trim().is_empty() {
            UNKNOWN_SENDER.to_string()
        } else {
            self.sender
        };
        Turn::new(sender, self.text).with_timestamp(timestamp_text(&self.timestamp))
    }
}

fn timestamp_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<HoneypotRequest> for ProcessMessageCommand {
    fn from(request: HoneypotRequest) -> Self {
        Self {
            session_id: request.session_id,
            history: request
                .conversation_history
                .into_iter()
                .map(InboundTurn::into_turn)
                .collect(),
            message: request.message.text,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

impl HealthResponse {
    pub fn active() -> Self {
        Self {
            status: "active".to_string(),
            service: "HoneyPot-Agent".to_string(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: "Missing or invalid API key".to_string(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_request_deserializes() {
        let json = r#"{"message": {"text": "Your account is blocked"}}"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session_id, "");
        assert_eq!(req.message.text, "Your account is blocked");
        assert!(req.conversation_history.is_empty());
        assert!(req.metadata.is_none());
    }

    #[test]
    fn full_request_deserializes() {
        let json = r#"{
            "sessionId": "wertyu-dfghj-ertyui",
            "message": {"sender": "scammer", "text": "Share OTP", "timestamp": 1770005528731},
            "conversationHistory": [
                {"sender": "scammer", "text": "Hello", "timestamp": "2026-01-21T10:15:30Z"},
                {"sender": "user", "text": "Who is this?", "timestamp": 1770005528000}
            ],
            "metadata": {"channel": "SMS", "language": "English", "locale": "IN"}
        }"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.metadata.as_ref().unwrap().channel, "SMS");

        let cmd = ProcessMessageCommand::from(req);
        assert_eq!(cmd.session_id, "wertyu-dfghj-ertyui");
        assert_eq!(cmd.message, "Share OTP");
        assert_eq!(cmd.history.len(), 2);
        assert_eq!(cmd.history[0].timestamp, "2026-01-21T10:15:30Z");
        assert_eq!(cmd.history[1].timestamp, "1770005528000");
    }

    #[test]
    fn message_timestamp_renders_as_text() {
        let json = r#"{"message": {"sender": "scammer", "text": "hi", "timestamp": 1770005528731}}"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.message.sender, "scammer");
        assert_eq!(req.message.sent_at(), "1770005528731");

        let json = r#"{"message": {"text": "hi"}}"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.message.sent_at(), "");
    }

    #[test]
    fn missing_text_is_rejected() {
        let json = r#"{"sessionId": "s", "message": {"sender": "scammer"}}"#;
        assert!(serde_json::from_str::<HoneypotRequest>(json).is_err());
    }

    #[test]
    fn blank_history_sender_becomes_unknown() {
        let json = r#"{"message": {"text": "hi"}, "conversationHistory": [{"text": "earlier"}]}"#;
        let cmd = ProcessMessageCommand::from(serde_json::from_str::<HoneypotRequest>(json).unwrap());
        assert_eq!(cmd.history[0].sender, UNKNOWN_SENDER);
        assert_eq!(cmd.history[0].timestamp, "");
    }

    #[test]
    fn null_fields_default_like_missing_ones() {
        let json = r#"{
            "sessionId": null,
            "message": {"sender": null, "text": "Pay now", "timestamp": null},
            "conversationHistory": [
                {"sender": null, "text": null, "timestamp": null},
                {"sender": "scammer", "text": "hello"}
            ],
            "metadata": {"channel": null, "language": "English", "locale": null}
        }"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.message.sender, "");
        assert_eq!(req.metadata.as_ref().unwrap().channel, "");

        let cmd = ProcessMessageCommand::from(req);
        assert_eq!(cmd.session_id, "");
        assert_eq!(cmd.history.len(), 2);
        assert_eq!(cmd.history[0].sender, UNKNOWN_SENDER);
        assert_eq!(cmd.history[0].text, "");
        assert_eq!(cmd.history[1].text, "hello");
    }

    #[test]
    fn null_history_is_empty() {
        let json = r#"{"message": {"text": "hi"}, "conversationHistory": null}"#;
        let req: HoneypotRequest = serde_json::from_str(json).unwrap();
        assert!(req.conversation_history.is_empty());
    }

    #[test]
    fn null_text_is_still_rejected() {
        let json = r#"{"message": {"text": null}}"#;
        assert!(serde_json::from_str::<HoneypotRequest>(json).is_err());
    }

    #[test]
    fn health_response_serializes() {
        let json = serde_json::to_value(HealthResponse::active()).unwrap();
        assert_eq!(json, serde_json::json!({"status": "active", "service": "HoneyPot-Agent"}));
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::bad_request("bad body")).unwrap();
        assert_eq!(json["code"], "BAD_REQUEST");
        assert!(json.get("details").is_none());
    }
}
