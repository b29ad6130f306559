//! Inbound API key configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Shared secret callers present in the `x-api-key` header
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub api_key: Secret<String>,
}

impl AuthConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
        }
    }

    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__API_KEY"));
        }
        Ok(())
    }
}
