//! Generation Backend Adapters.
//!
//! Implementations of the `GenerationBackend` port.
//!
//! ## Available Adapters
//!
//! - `CandidateChain` - Tries an ordered list of Gemini/OpenAI candidates
//!   until one returns a usable JSON object
//! - `MockGenerationBackend` - Configurable mock for testing

mod candidate_chain;
pub mod descriptor;
mod envelope;
mod mock_backend;

pub use candidate_chain::{CandidateChain, DEFAULT_CANDIDATE_TIMEOUT, GEMINI_API_KEY_HEADER};
pub use descriptor::{ApiStyle, BackendDescriptor};
pub use envelope::strip_code_fences;
pub use mock_backend::{MockGenerationBackend, MockOutcome};
