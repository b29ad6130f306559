//! HTTP Result Sink - POSTs engagement outcomes to the evaluation endpoint.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{CallbackPayload, ResultSink, SinkError};

/// Default callback timeout.
pub const DEFAULT_CALLBACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Delivers outcomes as JSON to a fixed URL.
#[derive(Debug, Clone)]
pub struct HttpResultSink {
    url: String,
    client: Client,
    timeout: Duration,
}

impl HttpResultSink {
    /// Creates a sink posting to `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            timeout: DEFAULT_CALLBACK_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ResultSink for HttpResultSink {
    async fn submit(&self, payload: CallbackPayload) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout {
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else {
                    SinkError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::Rejected {
                status: status.as_u16(),
            });
        }

        tracing::debug!(
            session_id = %payload.session_id,
            "Callback delivered with status {}",
            status
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engagement::IntelligenceRecord;

    fn payload() -> CallbackPayload {
        CallbackPayload {
            session_id: "s-1".to_string(),
            scam_detected: true,
            total_messages_exchanged: 1,
            extracted_intelligence: IntelligenceRecord::default(),
            agent_notes: "notes".to_string(),
        }
    }

    #[test]
    fn builder_works() {
        let sink = HttpResultSink::new("http://localhost/cb").with_timeout(Duration::from_secs(2));
        assert_eq!(sink.url(), "http://localhost/cb");
        assert_eq!(sink.timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_reported() {
        let sink = HttpResultSink::new("http://127.0.0.1:9/cb").with_timeout(Duration::from_secs(2));
        let err = sink.submit(payload()).await.unwrap_err();
        assert!(matches!(err, SinkError::Unreachable(_) | SinkError::Timeout { .. }));
    }
}
