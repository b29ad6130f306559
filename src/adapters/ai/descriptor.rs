//! Backend descriptors - one entry per generation candidate.
//!
//! A descriptor bundles everything needed to call one backend: the wire
//! style (which decides envelope and response path), an endpoint template,
//! the model identifier and the credential.
//!
//! # Example
//!
//! ```ignore
//! let candidates = vec![
//!     BackendDescriptor::gemini(key.clone(), "gemini-1.5-flash"),
//!     BackendDescriptor::gemini(key, "gemini-pro"),
//!     BackendDescriptor::openai(openai_key, "gpt-4o-mini"),
//! ];
//! ```

use secrecy::{ExposeSecret, Secret};

/// Placeholder replaced by the model identifier in endpoint templates.
pub const MODEL_PLACEHOLDER: &str = "{model}";

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Wire protocol of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiStyle {
    /// Google `generateContent`: single prompt blob, key as query parameter,
    /// payload at `candidates[0].content.parts[0].text`.
    Gemini,
    /// OpenAI-compatible chat completions: system + user messages, bearer
    /// auth, payload at `choices[0].message.content`.
    OpenAiChat,
}

impl ApiStyle {
    /// Short provider name used in logs.
    pub fn provider_name(&self) -> &'static str {
        match self {
            ApiStyle::Gemini => "gemini",
            ApiStyle::OpenAiChat => "openai",
        }
    }
}

/// One generation candidate.
#[derive(Debug, Clone)]
pub struct BackendDescriptor {
    /// Wire protocol.
    pub style: ApiStyle,
    /// Endpoint URL, may contain [`MODEL_PLACEHOLDER`].
    pub endpoint_template: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
    api_key: Secret<String>,
}

impl BackendDescriptor {
    /// Creates a descriptor from its parts.
    pub fn new(
        style: ApiStyle,
        endpoint_template: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            style,
            endpoint_template: endpoint_template.into(),
            model: model.into(),
            api_key: Secret::new(api_key.into()),
        }
    }

    /// Gemini candidate on the public endpoint.
    pub fn gemini(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::gemini_at(DEFAULT_GEMINI_BASE_URL, api_key, model)
    }

    /// Gemini candidate on a custom base URL.
    pub fn gemini_at(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::new(
            ApiStyle::Gemini,
            format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                MODEL_PLACEHOLDER
            ),
            model,
            api_key,
        )
    }

    /// OpenAI candidate on the public endpoint.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::openai_at(DEFAULT_OPENAI_BASE_URL, api_key, model)
    }

    /// OpenAI-compatible candidate on a custom base URL.
    pub fn openai_at(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self::new(
            ApiStyle::OpenAiChat,
            format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model,
            api_key,
        )
    }

    /// Endpoint with the model substituted.
    pub fn endpoint(&self) -> String {
        self.endpoint_template.replace(MODEL_PLACEHOLDER, &self.model)
    }

    /// `provider/model` label for logs and failure summaries.
    pub fn label(&self) -> String {
        format!("{}/{}", self.style.provider_name(), self.model)
    }

    /// Exposes the API key (for making requests).
    pub(crate) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}
