//! Extracted intelligence, engagement metrics and the shared generation result shape.

use serde::{Deserialize, Serialize};

/// Seconds of counterpart time each exchanged message is assumed to cost.
pub const SECONDS_PER_MESSAGE: u64 = 45;

/// Scam-relevant identifiers pulled from a conversation.
///
/// Lists are passed through as produced; no deduplication or format checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntelligenceRecord {
    pub bank_accounts: Vec<String>,
    pub upi_ids: Vec<String>,
    pub phishing_links: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub suspicious_keywords: Vec<String>,
}

impl IntelligenceRecord {
    /// Returns true if no identifiers were captured.
    pub fn is_empty(&self) -> bool {
        self.bank_accounts.is_empty()
            && self.upi_ids.is_empty()
            && self.phishing_links.is_empty()
            && self.phone_numbers.is_empty()
            && self.suspicious_keywords.is_empty()
    }

    /// Total number of captured items across all lists.
    pub fn item_count(&self) -> usize {
        self.bank_accounts.len()
            + self.upi_ids.len()
            + self.phishing_links.len()
            + self.phone_numbers.len()
            + self.suspicious_keywords.len()
    }
}

/// How long the counterpart has been kept busy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    pub engagement_duration_seconds: u64,
    pub total_messages_exchanged: u64,
}

impl EngagementMetrics {
    /// Derives metrics from the number of prior turns.
    ///
    /// The current inbound message counts as one more exchanged message.
    pub fn from_history_len(history_len: usize) -> Self {
        let total = history_len as u64 + 1;
        Self {
            engagement_duration_seconds: total * SECONDS_PER_MESSAGE,
            total_messages_exchanged: total,
        }
    }

    /// Metrics reported when processing failed outright.
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Outcome of one generation pass, from a backend or the fallback responder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub scam_detected: bool,
    pub reply: String,
    pub agent_notes: String,
    pub extracted_intelligence: IntelligenceRecord,
}
