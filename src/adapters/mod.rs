//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generation backends (Gemini, OpenAI, mock)
//! - `callback` - Result sinks (HTTP callback, log, recording)
//! - `http` - Inbound REST API

pub mod ai;
pub mod callback;
pub mod http;
