//! Rule-based responder used when no generation backend answers.
//!
//! Keyword rules are checked in order against the lower-cased inbound
//! message, first match wins. A candidate that would repeat the agent's
//! previous reply is swapped for a random stalling line.

use rand::seq::SliceRandom;
use rand::Rng;

use super::intelligence::{GenerationResult, IntelligenceRecord};
use super::turn::ConversationContext;

/// Marker phrase of the OTP reply, used to detect that it was already sent.
pub const OTP_MARKER: &str = "two messages with codes";

pub const OTP_REPLY: &str = "Oh dear, I got two messages with codes just now. One says 4921 and the other says 8834. Which one do you need, beta?";

pub const PASSBOOK_REPLY: &str = "Wait, wait. Let me find my passbook, I keep it in the almirah with my important papers. One minute please.";

pub const BLOCKING_REPLY: &str = "Blocked?! Oh my god, please don't block my account, my pension comes into it! Tell me what I should do.";

/// Analyst note attached to every fallback result.
pub const FALLBACK_NOTES: &str = "Fallback responder active: generation backends unavailable.";

/// Generic stalling lines for when no rule applies or a rule would repeat.
pub const STALL_PHRASES: &[&str] = &[
    "Let me find my glasses, I cannot read this small text on the phone.",
    "This mouse is not working properly, the arrow keeps jumping everywhere.",
    "My screen just went all funny and blinking. Can you say that again?",
    "Sorry, the internet is so slow today. What did you say?",
    "Hold on, someone is ringing the doorbell. Don't go anywhere!",
    "My grandson usually handles these things. Let me try myself, slowly.",
];

/// Default sender roles that identify the agent's own turns.
pub fn default_own_roles() -> Vec<String> {
    vec!["agent".to_string(), "user".to_string()]
}

/// Deterministic persona responder with loop avoidance.
#[derive(Debug, Clone)]
pub struct FallbackResponder {
    own_roles: Vec<String>,
}

impl Default for FallbackResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackResponder {
    /// Creates a responder recognizing the default own sender roles.
    pub fn new() -> Self {
        Self {
            own_roles: default_own_roles(),
        }
    }

    /// Overrides which sender roles count as the agent's own turns.
    pub fn with_own_roles(mut self, roles: Vec<String>) -> Self {
        self.own_roles = roles;
        self
    }

    pub fn own_roles(&self) -> &[String] {
        &self.own_roles
    }

    /// Produces a reply for `context`, drawing stall lines from `rng`.
    ///
    /// The random source is only consulted when no rule applies or the rule
    /// reply equals the agent's previous reply.
    pub fn respond<R: Rng + ?Sized>(
        &self,
        context: &ConversationContext,
        rng: &mut R,
    ) -> GenerationResult {
        let last_own_reply = context.last_reply_from(&self.own_roles);
        let candidate = rule_reply(context.current_message(), last_own_reply);

        let reply = match candidate {
            Some(reply) if reply != last_own_reply => reply.to_string(),
            _ => pick_stall(rng, last_own_reply).to_string(),
        };

        GenerationResult {
            scam_detected: true,
            reply,
            agent_notes: FALLBACK_NOTES.to_string(),
            extracted_intelligence: IntelligenceRecord::default(),
        }
    }
}

/// First keyword rule matching `message`, if any.
fn rule_reply(message: &str, last_own_reply: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();

    if (lowered.contains("otp") || lowered.contains("code")) && !last_own_reply.contains(OTP_MARKER)
    {
        Some(OTP_REPLY)
    } else if lowered.contains("account") || lowered.contains("bank") {
        Some(PASSBOOK_REPLY)
    } else if lowered.contains("block") || lowered.contains("urgent") {
        Some(BLOCKING_REPLY)
    } else {
        None
    }
}

/// Uniform pick from the stall pool, skipping the previous reply when possible.
fn pick_stall<R: Rng + ?Sized>(rng: &mut R, last_own_reply: &str) -> &'static str {
    let pool: Vec<&'static str> = STALL_PHRASES
        .iter()
        .copied()
        .filter(|phrase| *phrase != last_own_reply)
        .collect();

    pool.choose(rng)
        .or_else(|| STALL_PHRASES.first())
        .copied()
        .unwrap_or(BLOCKING_REPLY)
}
