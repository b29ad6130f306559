//! Logging Result Sink - used when no evaluation endpoint is configured.

use async_trait::async_trait;

use crate::ports::{CallbackPayload, ResultSink, SinkError};

/// Writes each outcome to the log instead of delivering it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingResultSink;

#[async_trait]
impl ResultSink for LoggingResultSink {
    async fn submit(&self, payload: CallbackPayload) -> Result<(), SinkError> {
        tracing::info!(
            session_id = %payload.session_id,
            scam_detected = payload.scam_detected,
            total_messages = payload.total_messages_exchanged,
            intelligence_items = payload.extracted_intelligence.item_count(),
            "Engagement result (no callback endpoint configured)"
        );
        Ok(())
    }
}
