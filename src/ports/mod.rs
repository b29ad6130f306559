//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the engagement domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationBackend` - Structured text generation (Gemini, OpenAI, mocks)
//! - `ResultSink` - Best-effort reporting of engagement outcomes

mod generation_backend;
mod result_sink;

pub use generation_backend::{
    AIError, CandidateFailure, GenerationBackend, GenerationError, GenerationRequest, ProviderInfo,
};
pub use result_sink::{CallbackPayload, ResultSink, SinkError};
