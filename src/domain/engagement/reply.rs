//! The structured reply returned for every inbound message.

use serde::{Deserialize, Serialize};

use super::intelligence::{EngagementMetrics, GenerationResult, IntelligenceRecord};

/// In-persona excuse used whenever processing fails outright.
pub const SAFE_ERROR_REPLY: &str =
    "I am sorry, my internet is acting up again. What did you say?";

/// Analyst note attached to the safe-error reply.
pub const SAFE_ERROR_NOTES: &str = "Processing failed; safe stalling reply returned.";

/// Overall processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    Success,
    Error,
}

/// Reply handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentReply {
    status: ReplyStatus,
    scam_detected: bool,
    reply: String,
    agent_notes: String,
    engagement_metrics: EngagementMetrics,
    extracted_intelligence: IntelligenceRecord,
}

impl AgentReply {
    /// Builds a successful reply from a normalized generation result.
    ///
    /// A blank reply text is replaced by the safe excuse so the counterpart
    /// never receives an empty message.
    pub fn success(result: GenerationResult, metrics: EngagementMetrics) -> Self {
        let reply = if result.reply.trim().is_empty() {
            SAFE_ERROR_REPLY.to_string()
        } else {
            result.reply
        };

        Self {
            status: ReplyStatus::Success,
            scam_detected: result.scam_detected,
            reply,
            agent_notes: result.agent_notes,
            engagement_metrics: metrics,
            extracted_intelligence: result.extracted_intelligence,
        }
    }

    /// The fixed reply used when something unexpected escaped processing.
    pub fn safe_error() -> Self {
        Self {
            status: ReplyStatus::Error,
            scam_detected: true,
            reply: SAFE_ERROR_REPLY.to_string(),
            agent_notes: SAFE_ERROR_NOTES.to_string(),
            engagement_metrics: EngagementMetrics::zeroed(),
            extracted_intelligence: IntelligenceRecord::default(),
        }
    }

    pub fn status(&self) -> ReplyStatus {
        self.status
    }

    pub fn scam_detected(&self) -> bool {
        self.scam_detected
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    pub fn agent_notes(&self) -> &str {
        &self.agent_notes
    }

    pub fn engagement_metrics(&self) -> EngagementMetrics {
        self.engagement_metrics
    }

    pub fn extracted_intelligence(&self) -> &IntelligenceRecord {
        &self.extracted_intelligence
    }
}
