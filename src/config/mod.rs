//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `HONEYPOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use honeypot_agent::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on port {}", config.server.port);
//! ```

mod ai;
mod auth;
mod callback;
mod error;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use callback::CallbackConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::time::Duration;

/// Headroom left between the generation deadline and the request timeout
/// so the fallback reply is written before the HTTP layer gives up.
pub const GENERATION_DEADLINE_MARGIN: Duration = Duration::from_secs(1);

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Inbound API key
    pub auth: AuthConfig,

    /// Generation backends (Gemini/OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Result callback
    #[serde(default)]
    pub callback: CallbackConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HONEYPOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `HONEYPOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `HONEYPOT__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HONEYPOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.auth.validate()?;
        self.ai.validate()?;
        self.callback.validate()?;

        // One full candidate attempt must fit inside the request timeout
        if self.ai.timeout_secs >= self.server.request_timeout_secs {
            return Err(ValidationError::GenerationTimeoutExceedsRequest);
        }
        Ok(())
    }

    /// Budget for a whole generation pass across every candidate.
    pub fn generation_deadline(&self) -> Duration {
        self.server
            .request_timeout()
            .saturating_sub(GENERATION_DEADLINE_MARGIN)
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("HONEYPOT__AUTH__API_KEY", "test-key");
        env::set_var("HONEYPOT__AI__GEMINI_API_KEY", "g-key");
    }

    fn clear_env() {
        for key in [
            "HONEYPOT__AUTH__API_KEY",
            "HONEYPOT__AI__GEMINI_API_KEY",
            "HONEYPOT__AI__OPENAI_API_KEY",
            "HONEYPOT__AI__TIMEOUT_SECS",
            "HONEYPOT__CALLBACK__URL",
            "HONEYPOT__SERVER__PORT",
            "HONEYPOT__SERVER__ENVIRONMENT",
            "HONEYPOT__SERVER__REQUEST_TIMEOUT_SECS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.ai.has_gemini());
        assert!(!config.ai.has_openai());
        assert_eq!(config.callback.endpoint(), None);
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HONEYPOT__CALLBACK__URL", "https://example.com/results");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.callback.endpoint(), Some("https://example.com/results"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("HONEYPOT__AI__GEMINI_API_KEY", "g-key");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.ai.timeout_secs, 8);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HONEYPOT__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HONEYPOT__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_generation_deadline_fits_request_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HONEYPOT__AI__OPENAI_API_KEY", "sk-xxx");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        let chain_worst_case =
            config.ai.timeout() * config.ai.backend_descriptors().len() as u32;
        assert!(chain_worst_case > config.server.request_timeout());
        assert!(config.generation_deadline() < config.server.request_timeout());
        assert_eq!(config.generation_deadline(), Duration::from_secs(29));
    }

    #[test]
    fn test_candidate_timeout_must_be_below_request_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HONEYPOT__SERVER__REQUEST_TIMEOUT_SECS", "5");
        env::set_var("HONEYPOT__AI__TIMEOUT_SECS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::GenerationTimeoutExceedsRequest)
        );
    }

    #[test]
    fn test_generation_timeout_is_validated() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("HONEYPOT__AI__TIMEOUT_SECS", "30");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidGenerationTimeout)
        );
    }
}
