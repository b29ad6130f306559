//! Candidate Chain - Generation backend that walks an ordered candidate list.
//!
//! Each candidate is tried once, in order, with a bounded timeout. The first
//! candidate that answers with a success status and a parseable JSON object
//! wins; every other outcome is logged and the next candidate is tried.
//! There is no backoff and no second pass.
//!
//! # Example
//!
//! ```ignore
//! let chain = CandidateChain::new(vec![
//!     BackendDescriptor::gemini(key.clone(), "gemini-1.5-flash"),
//!     BackendDescriptor::gemini(key, "gemini-pro"),
//! ])
//! .with_timeout(Duration::from_secs(8));
//!
//! let value = chain.generate(&request).await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::descriptor::{ApiStyle, BackendDescriptor};
use super::envelope::{extract_payload, parse_payload, request_body};
use crate::ports::{
    AIError, CandidateFailure, GenerationBackend, GenerationError, GenerationRequest, ProviderInfo,
};

/// Header carrying the Gemini API key. Keeps the key out of request URLs.
pub const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";

/// Default per-candidate timeout.
pub const DEFAULT_CANDIDATE_TIMEOUT: Duration = Duration::from_secs(8);

/// Ordered list of generation candidates sharing one HTTP client.
#[derive(Debug, Clone)]
pub struct CandidateChain {
    candidates: Vec<BackendDescriptor>,
    client: Client,
    timeout: Duration,
}

impl CandidateChain {
    /// Creates a chain over `candidates` with the default timeout.
    pub fn new(candidates: Vec<BackendDescriptor>) -> Self {
        Self {
            candidates,
            client: Client::new(),
            timeout: DEFAULT_CANDIDATE_TIMEOUT,
        }
    }

    /// Sets the per-candidate timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn candidates(&self) -> &[BackendDescriptor] {
        &self.candidates
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// One complete attempt against a single candidate.
    async fn attempt(
        &self,
        candidate: &BackendDescriptor,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, AIError> {
        let response = self.send_request(candidate, request).await?;
        let response = Self::handle_response_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let payload = extract_payload(candidate.style, &body)?;

        parse_payload(&payload)
    }

    /// Sends the style-specific envelope to the candidate endpoint.
    async fn send_request(
        &self,
        candidate: &BackendDescriptor,
        request: &GenerationRequest,
    ) -> Result<Response, AIError> {
        let body = request_body(candidate.style, &candidate.model, request)?;

        let builder = self
            .client
            .post(candidate.endpoint())
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .json(&body);

        let builder = match candidate.style {
            ApiStyle::Gemini => builder.header(GEMINI_API_KEY_HEADER, candidate.api_key()),
            ApiStyle::OpenAiChat => builder.bearer_auth(candidate.api_key()),
        };

        builder.send().await.map_err(|e| self.map_transport_error(e))
    }

    /// Drops the URL from the error so nothing credential-like reaches logs.
    fn map_transport_error(&self, e: reqwest::Error) -> AIError {
        let e = e.without_url();
        if e.is_timeout() {
            AIError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AIError::network(format!("Connection failed: {}", e))
        } else {
            AIError::network(e.to_string())
        }
    }

    /// Maps non-success statuses to errors.
    async fn handle_response_status(response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::RateLimited),
            400 | 404 => Err(AIError::InvalidRequest(format!(
                "status {}: {}",
                status, error_body
            ))),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl GenerationBackend for CandidateChain {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        let mut failures = Vec::with_capacity(self.candidates.len());

        for candidate in &self.candidates {
            match self.attempt(candidate, request).await {
                Ok(value) => {
                    tracing::debug!(
                        trace_id = %request.trace_id,
                        backend = %candidate.label(),
                        "Generation candidate succeeded"
                    );
                    return Ok(value);
                }
                Err(error) => {
                    tracing::warn!(
                        trace_id = %request.trace_id,
                        backend = %candidate.label(),
                        "Generation candidate failed: {}",
                        error
                    );
                    failures.push(CandidateFailure {
                        backend: candidate.label(),
                        error,
                    });
                }
            }
        }

        Err(GenerationError::Unavailable { failures })
    }

    fn provider_info(&self) -> ProviderInfo {
        match self.candidates.first() {
            Some(first) => ProviderInfo::new(
                format!("chain:{}", first.style.provider_name()),
                first.model.clone(),
            ),
            None => ProviderInfo::new("chain", "none"),
        }
    }
}
