//! Defensive normalization of parsed backend output.
//!
//! Backends are asked for a strict schema but may omit fields or return
//! the wrong types. Normalization never fails: anything unusable falls back
//! to a default.

use serde_json::Value;

use super::intelligence::{GenerationResult, IntelligenceRecord};

/// Reply used when the backend returned no usable reply text.
pub const DEFAULT_REPLY: &str = "Oh dear, I am having trouble reading this.";

/// Analyst note used when the backend returned none.
pub const DEFAULT_NOTES: &str = "Scam detected.";

/// Converts a parsed JSON object into a [`GenerationResult`].
pub fn normalize_generation(value: &Value) -> GenerationResult {
    let scam_detected = value
        .get("scamDetected")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    GenerationResult {
        scam_detected,
        reply: non_blank_string(value.get("reply")).unwrap_or_else(|| DEFAULT_REPLY.to_string()),
        agent_notes: non_blank_string(value.get("agentNotes"))
            .unwrap_or_else(|| DEFAULT_NOTES.to_string()),
        extracted_intelligence: normalize_intelligence(value.get("extractedIntelligence")),
    }
}

/// Builds an intelligence record, defaulting every missing or malformed list.
pub fn normalize_intelligence(value: Option<&Value>) -> IntelligenceRecord {
    let Some(value) = value else {
        return IntelligenceRecord::default();
    };

    IntelligenceRecord {
        bank_accounts: string_list(value.get("bankAccounts")),
        upi_ids: string_list(value.get("upiIds")),
        phishing_links: string_list(value.get("phishingLinks")),
        phone_numbers: string_list(value.get("phoneNumbers")),
        suspicious_keywords: string_list(value.get("suspiciousKeywords")),
    }
}

fn non_blank_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// String items of a JSON array; non-string items are dropped.
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
