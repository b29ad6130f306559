//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("No generation backend configured")]
    NoAiProviderConfigured,

    #[error("Generation timeout must be between 1 and 9 seconds")]
    InvalidGenerationTimeout,

    #[error("Generation timeout must be shorter than the request timeout")]
    GenerationTimeoutExceedsRequest,

    #[error("Invalid callback URL: {0}")]
    InvalidCallbackUrl(String),

    #[error("Invalid callback timeout")]
    InvalidCallbackTimeout,
}
