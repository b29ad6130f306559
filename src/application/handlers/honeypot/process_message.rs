//! ProcessMessageHandler - Turn one scammer message into a stalling reply

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::engagement::{
    build_prompt, format_context, normalize_generation, persona_instructions, AgentReply,
    ConversationContext, EngagementMetrics, EngagementStage, FallbackResponder, GenerationResult,
    StageTransitionError, Turn,
};
use crate::ports::{CallbackPayload, GenerationBackend, GenerationRequest, ResultSink};

/// Upper bound on one whole generation pass, across every candidate.
pub const DEFAULT_GENERATION_DEADLINE: Duration = Duration::from_secs(25);

/// Command to process one inbound message
#[derive(Debug, Clone, Default)]
pub struct ProcessMessageCommand {
    pub session_id: String,
    pub history: Vec<Turn>,
    pub message: String,
}

/// Failures that escape normal processing and trigger the safe-error reply
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessMessageError {
    #[error("stage error: {0}")]
    Stage(#[from] StageTransitionError),

    #[error("processing panicked: {0}")]
    Panicked(String),
}

/// Handler orchestrating generation, fallback, normalization and reporting
pub struct ProcessMessageHandler {
    backend: Arc<dyn GenerationBackend>,
    sink: Arc<dyn ResultSink>,
    responder: FallbackResponder,
    rng_seed: Option<u64>,
    generation_deadline: Duration,
}

impl ProcessMessageHandler {
    pub fn new(backend: Arc<dyn GenerationBackend>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            backend,
            sink,
            responder: FallbackResponder::new(),
            rng_seed: None,
            generation_deadline: DEFAULT_GENERATION_DEADLINE,
        }
    }

    /// Replaces the fallback responder.
    pub fn with_responder(mut self, responder: FallbackResponder) -> Self {
        self.responder = responder;
        self
    }

    /// Seeds stall phrase selection so fallback replies are reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Bounds the whole generation pass. When it runs out, the fallback
    /// responder answers. Keep it below the HTTP request timeout.
    pub fn with_generation_deadline(mut self, deadline: Duration) -> Self {
        self.generation_deadline = deadline;
        self
    }

    /// Processes the command. Never fails: unexpected errors produce the
    /// safe-error reply instead.
    pub async fn handle(&self, cmd: ProcessMessageCommand) -> AgentReply {
        let context = ConversationContext::new(cmd.session_id, cmd.history, cmd.message);
        with_safety_boundary(context.session_id(), self.engage(&context)).await
    }

    async fn engage(&self, context: &ConversationContext) -> Result<AgentReply, ProcessMessageError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut stage = EngagementStage::Received;

        // 1. Formatting
        stage = advance(stage, EngagementStage::Formatting, &trace_id)?;
        let transcript = format_context(context);
        let prompt = build_prompt(&transcript);
        let request = GenerationRequest::new(persona_instructions(), transcript, prompt)
            .with_trace_id(trace_id.clone());

        // 2. Generating, with every failure routed to the fallback responder
        stage = advance(stage, EngagementStage::Generating, &trace_id)?;
        let generation = AssertUnwindSafe(self.backend.generate(&request)).catch_unwind();
        let generated = tokio::time::timeout(self.generation_deadline, generation)
            .await
            .ok();

        let result = match generated {
            Some(Ok(Ok(value))) => {
                stage = advance(stage, EngagementStage::Generated, &trace_id)?;
                normalize_generation(&value)
            }
            Some(Ok(Err(err))) => {
                tracing::warn!(
                    trace_id = %trace_id,
                    session_id = %context.session_id(),
                    "Generation unavailable, using fallback responder: {}",
                    err
                );
                stage = advance(stage, EngagementStage::FallingBack, &trace_id)?;
                self.fallback(context)
            }
            Some(Err(panic)) => {
                tracing::error!(
                    trace_id = %trace_id,
                    session_id = %context.session_id(),
                    "Generation backend panicked, using fallback responder: {}",
                    panic_message(panic.as_ref())
                );
                stage = advance(stage, EngagementStage::FallingBack, &trace_id)?;
                self.fallback(context)
            }
            None => {
                tracing::warn!(
                    trace_id = %trace_id,
                    session_id = %context.session_id(),
                    deadline_ms = self.generation_deadline.as_millis() as u64,
                    "Generation deadline exceeded, using fallback responder"
                );
                stage = advance(stage, EngagementStage::FallingBack, &trace_id)?;
                self.fallback(context)
            }
        };

        // 3. Normalizing
        stage = advance(stage, EngagementStage::Normalizing, &trace_id)?;
        let metrics = EngagementMetrics::from_history_len(context.history().len());

        // 4. Responding
        stage = advance(stage, EngagementStage::Responding, &trace_id)?;
        let reply = AgentReply::success(result, metrics);
        self.dispatch_result(context.session_id(), &reply);

        advance(stage, EngagementStage::Done, &trace_id)?;
        tracing::info!(
            trace_id = %trace_id,
            session_id = %context.session_id(),
            total_messages = metrics.total_messages_exchanged,
            intelligence_items = reply.extracted_intelligence().item_count(),
            "Reply ready"
        );

        Ok(reply)
    }

    fn fallback(&self, context: &ConversationContext) -> GenerationResult {
        let mut rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.responder.respond(context, &mut rng)
    }

    /// Hands the outcome to the result sink on a detached task.
    fn dispatch_result(&self, session_id: &str, reply: &AgentReply) {
        let payload = CallbackPayload::from_reply(session_id, reply);
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            let session_id = payload.session_id.clone();
            if let Err(err) = sink.submit(payload).await {
                tracing::warn!(session_id = %session_id, "Result callback failed: {}", err);
            }
        });
    }
}

/// Runs `processing`, converting errors and panics into the safe-error reply.
pub(crate) async fn with_safety_boundary<F>(session_id: &str, processing: F) -> AgentReply
where
    F: Future<Output = Result<AgentReply, ProcessMessageError>>,
{
    let outcome = match AssertUnwindSafe(processing).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(panic) => Err(ProcessMessageError::Panicked(panic_message(panic.as_ref()))),
    };

    match outcome {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!(session_id = %session_id, "Returning safe-error reply: {}", err);
            AgentReply::safe_error()
        }
    }
}

fn advance(
    from: EngagementStage,
    to: EngagementStage,
    trace_id: &str,
) -> Result<EngagementStage, StageTransitionError> {
    let next = from.transition_to(to)?;
    tracing::debug!(trace_id = %trace_id, stage = %next, "Engagement stage");
    Ok(next)
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerationBackend;
    use crate::adapters::callback::RecordingResultSink;
    use crate::domain::engagement::fallback::{FALLBACK_NOTES, OTP_REPLY, STALL_PHRASES};
    use crate::domain::engagement::reply::SAFE_ERROR_REPLY;
    use crate::domain::engagement::ReplyStatus;
    use crate::ports::SinkError;
    use serde_json::json;
    use std::time::Duration;

    fn handler(
        backend: MockGenerationBackend,
        sink: RecordingResultSink,
    ) -> ProcessMessageHandler {
        ProcessMessageHandler::new(Arc::new(backend), Arc::new(sink)).with_rng_seed(42)
    }

    fn command(history: Vec<Turn>, message: &str) -> ProcessMessageCommand {
        ProcessMessageCommand {
            session_id: "sess-1".to_string(),
            history,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn generated_result_is_returned() {
        let backend = MockGenerationBackend::new().with_response(json!({
            "scamDetected": true,
            "reply": "Which app, beta? The blue one?",
            "agentNotes": "UPI collect scam",
            "extractedIntelligence": { "upiIds": ["scam@ybl"] }
        }));
        let sink = RecordingResultSink::new();

        let reply = handler(backend.clone(), sink.clone())
            .handle(command(vec![Turn::new("scammer", "hi")], "Pay to scam@ybl"))
            .await;

        assert_eq!(reply.status(), ReplyStatus::Success);
        assert_eq!(reply.reply(), "Which app, beta? The blue one?");
        assert_eq!(reply.extracted_intelligence().upi_ids, vec!["scam@ybl"]);
        assert_eq!(reply.engagement_metrics().total_messages_exchanged, 2);
        assert_eq!(reply.engagement_metrics().engagement_duration_seconds, 90);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn request_carries_transcript_and_prompt() {
        let backend = MockGenerationBackend::new().with_response(json!({}));
        handler(backend.clone(), RecordingResultSink::new())
            .handle(command(vec![Turn::new("scammer", "hello")], "send otp"))
            .await;

        let request = &backend.get_calls()[0];
        assert_eq!(
            request.transcript,
            "SCAMMER: hello\nSCAMMER (CURRENT MESSAGE): send otp\n"
        );
        assert!(request.prompt.contains(&request.transcript));
        assert!(!request.trace_id.is_empty());
    }

    #[tokio::test]
    async fn unavailable_backend_uses_fallback() {
        let backend = MockGenerationBackend::new().with_unavailable();

        let reply = handler(backend, RecordingResultSink::new())
            .handle(command(vec![], "Please share your OTP now"))
            .await;

        assert_eq!(reply.status(), ReplyStatus::Success);
        assert_eq!(reply.reply(), OTP_REPLY);
        assert_eq!(reply.agent_notes(), FALLBACK_NOTES);
        assert_eq!(reply.engagement_metrics().total_messages_exchanged, 1);
        assert_eq!(reply.engagement_metrics().engagement_duration_seconds, 45);
        assert!(reply.extracted_intelligence().is_empty());
    }

    #[tokio::test]
    async fn fallback_does_not_repeat_previous_reply() {
        let backend = MockGenerationBackend::new().with_unavailable();

        let reply = handler(backend, RecordingResultSink::new())
            .handle(command(vec![Turn::new("agent", OTP_REPLY)], "OTP please!"))
            .await;

        assert_ne!(reply.reply(), OTP_REPLY);
        assert!(STALL_PHRASES.contains(&reply.reply()));
    }

    #[tokio::test]
    async fn seeded_fallback_is_reproducible() {
        let first = handler(MockGenerationBackend::new(), RecordingResultSink::new())
            .handle(command(vec![], "hello"))
            .await;
        let second = handler(MockGenerationBackend::new(), RecordingResultSink::new())
            .handle(command(vec![], "hello"))
            .await;

        assert_eq!(first.reply(), second.reply());
    }

    #[tokio::test]
    async fn panicking_backend_uses_fallback() {
        let backend = MockGenerationBackend::new().with_panic("backend exploded");

        let reply = handler(backend, RecordingResultSink::new())
            .handle(command(vec![], "your bank account is blocked"))
            .await;

        assert_eq!(reply.status(), ReplyStatus::Success);
        assert_eq!(reply.agent_notes(), FALLBACK_NOTES);
    }

    #[tokio::test]
    async fn hung_backend_hits_deadline_and_falls_back() {
        let backend = MockGenerationBackend::new()
            .with_response(json!({"reply": "too late"}))
            .with_delay(Duration::from_secs(10));
        let sink = RecordingResultSink::new();

        let start = std::time::Instant::now();
        let reply = handler(backend, sink.clone())
            .with_generation_deadline(Duration::from_millis(200))
            .handle(command(vec![], "your bank account is blocked"))
            .await;

        assert!(start.elapsed() < Duration::from_secs(2));
        assert_eq!(reply.status(), ReplyStatus::Success);
        assert_eq!(reply.agent_notes(), FALLBACK_NOTES);
        assert_ne!(reply.reply(), "too late");
        assert_eq!(sink.wait_for(1, Duration::from_secs(2)).await.len(), 1);
    }

    #[tokio::test]
    async fn result_is_reported_to_sink() {
        let backend = MockGenerationBackend::new().with_response(json!({
            "agentNotes": "bank KYC scam",
            "extractedIntelligence": { "bankAccounts": ["001122334455"] }
        }));
        let sink = RecordingResultSink::new();

        handler(backend, sink.clone())
            .handle(command(vec![Turn::new("scammer", "a"), Turn::new("agent", "b")], "c"))
            .await;

        let payloads = sink.wait_for(1, Duration::from_secs(2)).await;
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].session_id, "sess-1");
        assert_eq!(payloads[0].total_messages_exchanged, 3);
        assert_eq!(payloads[0].agent_notes, "bank KYC scam");
        assert_eq!(payloads[0].extracted_intelligence.bank_accounts, vec!["001122334455"]);
    }

    #[tokio::test]
    async fn failing_sink_does_not_affect_reply() {
        let sink = RecordingResultSink::new().failing_with(SinkError::Rejected { status: 503 });

        let reply = handler(MockGenerationBackend::new(), sink.clone())
            .handle(command(vec![], "urgent"))
            .await;

        assert_eq!(reply.status(), ReplyStatus::Success);
        assert_eq!(sink.wait_for(1, Duration::from_secs(2)).await.len(), 1);
    }

    #[tokio::test]
    async fn slow_sink_does_not_delay_reply() {
        let sink = RecordingResultSink::new().with_delay(Duration::from_secs(5));

        let start = std::time::Instant::now();
        handler(MockGenerationBackend::new(), sink)
            .handle(command(vec![], "hello"))
            .await;

        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn safety_boundary_converts_errors() {
        let reply = with_safety_boundary("s", async {
            Err(ProcessMessageError::Stage(StageTransitionError {
                from: EngagementStage::Done,
                to: EngagementStage::Received,
            }))
        })
        .await;

        assert_eq!(reply.status(), ReplyStatus::Error);
        assert_eq!(reply.reply(), SAFE_ERROR_REPLY);
        assert_eq!(reply.engagement_metrics(), EngagementMetrics::zeroed());
    }

    #[tokio::test]
    async fn safety_boundary_converts_panics() {
        let reply = with_safety_boundary("s", async {
            if true {
                panic!("normalization defect");
            }
            Ok(AgentReply::safe_error())
        })
        .await;

        assert_eq!(reply.status(), ReplyStatus::Error);
        assert!(reply.extracted_intelligence().is_empty());
    }

    #[test]
    fn panic_message_reads_str_and_string() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }
}
