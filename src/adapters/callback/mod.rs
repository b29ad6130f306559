//! Result Sink Adapters.
//!
//! - `HttpResultSink` - POSTs outcomes to the evaluation endpoint
//! - `LoggingResultSink` - Logs outcomes when no endpoint is configured
//! - `RecordingResultSink` - Captures outcomes for tests

mod http_sink;
mod logging_sink;
mod recording_sink;

pub use http_sink::{HttpResultSink, DEFAULT_CALLBACK_TIMEOUT};
pub use logging_sink::LoggingResultSink;
pub use recording_sink::RecordingResultSink;
