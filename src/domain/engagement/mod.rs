//! Engagement domain: turning a scammer's message into a stalling reply.
//!
//! Everything here is pure. Network access lives behind the ports, and the
//! only source of nondeterminism (stall phrase selection) takes an injected
//! random number generator.

pub mod fallback;
pub mod intelligence;
pub mod normalizer;
pub mod prompt;
pub mod reply;
pub mod stage;
pub mod transcript;
pub mod turn;

pub use fallback::FallbackResponder;
pub use intelligence::{EngagementMetrics, GenerationResult, IntelligenceRecord};
pub use normalizer::normalize_generation;
pub use prompt::{build_prompt, persona_instructions};
pub use reply::{AgentReply, ReplyStatus};
pub use stage::{EngagementStage, StageTransitionError};
pub use transcript::{format_context, format_transcript};
pub use turn::{ConversationContext, Turn};
