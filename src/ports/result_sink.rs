//! Result Sink Port - Where final engagement outcomes are reported.
//!
//! Called once per processed message after the reply is built. Delivery is
//! best-effort: implementations must not block the caller for the duration
//! of delivery, and failures are only logged.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::engagement::{AgentReply, IntelligenceRecord};

/// Port for reporting engagement outcomes.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Report one outcome. Errors are for logging only.
    async fn submit(&self, payload: CallbackPayload) -> Result<(), SinkError>;
}

/// Outcome report sent to the evaluation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub session_id: String,
    pub scam_detected: bool,
    pub total_messages_exchanged: u64,
    pub extracted_intelligence: IntelligenceRecord,
    pub agent_notes: String,
}

impl CallbackPayload {
    /// Shapes a reply into the callback payload for `session_id`.
    pub fn from_reply(session_id: impl Into<String>, reply: &AgentReply) -> Self {
        Self {
            session_id: session_id.into(),
            scam_detected: reply.scam_detected(),
            total_messages_exchanged: reply.engagement_metrics().total_messages_exchanged,
            extracted_intelligence: reply.extracted_intelligence().clone(),
            agent_notes: reply.agent_notes().to_string(),
        }
    }
}

/// Result delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("callback endpoint unreachable: {0}")]
    Unreachable(String),

    #[error("callback endpoint returned status {status}")]
    Rejected { status: u16 },

    #[error("callback timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}
