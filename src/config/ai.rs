//! Generation backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::descriptor::{DEFAULT_GEMINI_BASE_URL, DEFAULT_OPENAI_BASE_URL};
use crate::adapters::ai::BackendDescriptor;

/// Generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<Secret<String>>,

    /// Gemini models to try, in order (comma-separated)
    #[serde(default = "default_gemini_models")]
    pub gemini_models: String,

    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Per-candidate timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        has_key(&self.gemini_api_key)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        has_key(&self.openai_api_key)
    }

    pub fn gemini_model_list(&self) -> Vec<String> {
        self.gemini_models
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Ordered generation candidates: every Gemini model, then OpenAI.
    pub fn backend_descriptors(&self) -> Vec<BackendDescriptor> {
        let mut descriptors = Vec::new();

        if let Some(key) = self.gemini_api_key.as_ref().filter(|_| self.has_gemini()) {
            for model in self.gemini_model_list() {
                descriptors.push(BackendDescriptor::gemini_at(
                    &self.gemini_base_url,
                    key.expose_secret().clone(),
                    model,
                ));
            }
        }

        if let Some(key) = self.openai_api_key.as_ref().filter(|_| self.has_openai()) {
            descriptors.push(BackendDescriptor::openai_at(
                &self.openai_base_url,
                key.expose_secret().clone(),
                self.openai_model.clone(),
            ));
        }

        descriptors
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 9 {
            return Err(ValidationError::InvalidGenerationTimeout);
        }

        // At least one candidate must be reachable with a key
        if self.backend_descriptors().is_empty() {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        Ok(())
    }
}

fn has_key(key: &Option<Secret<String>>) -> bool {
    key.as_ref()
        .is_some_and(|k| !k.expose_secret().trim().is_empty())
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_models: default_gemini_models(),
            gemini_base_url: default_gemini_base_url(),
            openai_api_key: None,
            openai_model: default_openai_model(),
            openai_base_url: default_openai_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_gemini_models() -> String {
    "gemini-1.5-flash,gemini-1.5-flash-latest,gemini-pro".to_string()
}

fn default_gemini_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    8
}
