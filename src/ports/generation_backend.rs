//! Generation Backend Port - Interface for text-generation services.
//!
//! The engagement flow asks a backend for one structured JSON object per
//! inbound message. Adapters translate the request into their own envelope
//! (single prompt blob or role-tagged messages) and hand back the parsed
//! JSON. Synthesizing a reply when every backend fails is not the backend's
//! job; callers fall back on their own.
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct CannedBackend;
//!
//! #[async_trait]
//! impl GenerationBackend for CannedBackend {
//!     async fn generate(&self, _: &GenerationRequest) -> Result<serde_json::Value, GenerationError> {
//!         Ok(serde_json::json!({ "reply": "Oh dear" }))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("canned", "none")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for structured text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Produce one parsed JSON value for the request.
    async fn generate(&self, request: &GenerationRequest) -> Result<serde_json::Value, GenerationError>;

    /// Backend name and model, for logging.
    fn provider_info(&self) -> ProviderInfo;
}

/// Prompt material for one generation.
///
/// Carries the parts separately so each backend can choose between a single
/// prompt blob and a system/user message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Persona and output-schema instructions without the conversation log.
    pub instructions: String,
    /// Rendered conversation transcript.
    pub transcript: String,
    /// Instructions and transcript combined into one prompt.
    pub prompt: String,
    /// Correlation id for logs.
    pub trace_id: String,
}

impl GenerationRequest {
    /// Creates a new generation request.
    pub fn new(
        instructions: impl Into<String>,
        transcript: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            instructions: instructions.into(),
            transcript: transcript.into(),
            prompt: prompt.into(),
            trace_id: String::new(),
        }
    }

    /// Sets the trace id.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "openai").
    pub name: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Failure of a single backend attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited")]
    RateLimited,

    /// Provider returned a server error.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider rejected the request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Envelope or payload could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl AIError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

/// One failed candidate in a generation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFailure {
    /// Backend name and model, e.g. `gemini/gemini-1.5-flash`.
    pub backend: String,
    pub error: AIError,
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.backend, self.error)
    }
}

/// Generation could not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Every configured candidate failed.
    #[error("all {} generation candidates failed", .failures.len())]
    Unavailable {
        /// Failures in the order candidates were tried.
        failures: Vec<CandidateFailure>,
    },
}

impl GenerationError {
    /// Failures recorded for each attempted candidate.
    pub fn failures(&self) -> &[CandidateFailure] {
        match self {
            GenerationError::Unavailable { failures } => failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn GenerationBackend) {}

    #[test]
    fn request_builder_works() {
        let request = GenerationRequest::new("be janice", "SCAMMER: hi\n", "be janice\nSCAMMER: hi\n")
            .with_trace_id("trace-1");

        assert_eq!(request.instructions, "be janice");
        assert_eq!(request.transcript, "SCAMMER: hi\n");
        assert_eq!(request.trace_id, "trace-1");
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(
            AIError::Timeout { timeout_secs: 8 }.to_string(),
            "request timed out after 8s"
        );
        assert_eq!(AIError::unavailable("503").to_string(), "provider unavailable: 503");
        assert_eq!(AIError::parse("bad json").to_string(), "parse error: bad json");
    }

    #[test]
    fn generation_error_counts_failures() {
        let err = GenerationError::Unavailable {
            failures: vec![
                CandidateFailure {
                    backend: "gemini/a".to_string(),
                    error: AIError::RateLimited,
                },
                CandidateFailure {
                    backend: "gemini/b".to_string(),
                    error: AIError::AuthenticationFailed,
                },
            ],
        };

        assert_eq!(err.to_string(), "all 2 generation candidates failed");
        assert_eq!(err.failures()[0].to_string(), "gemini/a: rate limited");
    }
}
