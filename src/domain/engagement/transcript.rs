//! Linear transcript rendering of a conversation.

use super::turn::{ConversationContext, Turn};

/// Label for the inbound message that is awaiting a reply.
pub const CURRENT_MESSAGE_LABEL: &str = "SCAMMER (CURRENT MESSAGE)";

/// Renders prior turns and the current message as one line each.
///
/// Lines are `<SENDER_UPPERCASED>: <text>` terminated by `\n`, in the order
/// given, followed by the current message under [`CURRENT_MESSAGE_LABEL`].
/// Text is included verbatim.
pub fn format_transcript(history: &[Turn], current_message: &str) -> String {
    let mut transcript = String::new();

    for turn in history {
        transcript.push_str(&turn.sender.to_uppercase());
        transcript.push_str(": ");
        transcript.push_str(&turn.text);
        transcript.push('\n');
    }

    transcript.push_str(CURRENT_MESSAGE_LABEL);
    transcript.push_str(": ");
    transcript.push_str(current_message);
    transcript.push('\n');

    transcript
}

/// Renders the transcript for a whole context.
pub fn format_context(context: &ConversationContext) -> String {
    format_transcript(context.history(), context.current_message())
}
