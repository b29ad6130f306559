//! Mock Generation Backend for testing.
//!
//! Provides a configurable implementation of the GenerationBackend port so
//! tests can run without calling real services.
//!
//! # Features
//!
//! - Pre-configured JSON responses, consumed in order
//! - Error injection for fallback testing
//! - Panic injection for safety-boundary testing
//! - Simulated delays
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let backend = MockGenerationBackend::new()
//!     .with_response(json!({ "reply": "Oh dear" }))
//!     .with_unavailable();
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    AIError, CandidateFailure, GenerationBackend, GenerationError, GenerationRequest, ProviderInfo,
};

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Return this JSON value.
    Success(serde_json::Value),
    /// Fail with these candidate failures.
    Unavailable(Vec<CandidateFailure>),
    /// Panic inside `generate`.
    Panic(String),
}

/// Mock generation backend.
#[derive(Debug, Clone)]
pub struct MockGenerationBackend {
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    info: ProviderInfo,
    delay: Duration,
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    /// Creates a new mock backend with default settings.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, value: serde_json::Value) -> Self {
        self.push(MockOutcome::Success(value))
    }

    /// Queues a failure where every candidate was unavailable.
    pub fn with_unavailable(self) -> Self {
        self.push(MockOutcome::Unavailable(vec![CandidateFailure {
            backend: "mock/mock-model-1".to_string(),
            error: AIError::unavailable("Server error 503"),
        }]))
    }

    /// Queues a panic.
    pub fn with_panic(self, message: impl Into<String>) -> Self {
        self.push(MockOutcome::Panic(message.into()))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this backend.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, outcome: MockOutcome) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    /// Next queued outcome; an exhausted queue behaves as unavailable.
    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Unavailable(Vec::new()))
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<serde_json::Value, GenerationError> {
        self.calls.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Success(value) => Ok(value),
            MockOutcome::Unavailable(failures) => Err(GenerationError::Unavailable { failures }),
            MockOutcome::Panic(message) => panic!("{}", message),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}
