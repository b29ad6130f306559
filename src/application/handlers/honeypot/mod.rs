//! Honeypot Command Handlers
//!
//! ## Commands
//! - `ProcessMessage` - Generate (or fall back to) a stalling reply for one
//!   inbound scammer message and report the outcome

mod process_message;

pub use process_message::{
    ProcessMessageCommand, ProcessMessageError, ProcessMessageHandler, DEFAULT_GENERATION_DEADLINE,
};
