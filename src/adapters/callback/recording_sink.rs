//! Recording Result Sink for testing.
//!
//! Captures submitted payloads for assertions and can be told to fail.
//! Uses `.unwrap()` on its mutex; test use only.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::ports::{CallbackPayload, ResultSink, SinkError};

/// In-memory sink that records payloads.
#[derive(Debug, Clone, Default)]
pub struct RecordingResultSink {
    payloads: Arc<Mutex<Vec<CallbackPayload>>>,
    failure: Option<SinkError>,
    delay: Duration,
}

impl RecordingResultSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every submit record the payload and then fail with `error`.
    pub fn failing_with(mut self, error: SinkError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Delays each submit, to prove callers do not wait on delivery.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Payloads recorded so far.
    pub fn payloads(&self) -> Vec<CallbackPayload> {
        self.payloads.lock().unwrap().clone()
    }

    /// Waits until at least `count` payloads arrived or `timeout` passes.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<CallbackPayload> {
        let deadline = Instant::now() + timeout;
        loop {
            let payloads = self.payloads();
            if payloads.len() >= count || Instant::now() >= deadline {
                return payloads;
            }
            sleep(Duration::from_millis(5)).await;
        }
    }
}

#[async_trait]
impl ResultSink for RecordingResultSink {
    async fn submit(&self, payload: CallbackPayload) -> Result<(), SinkError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.payloads.lock().unwrap().push(payload);

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
