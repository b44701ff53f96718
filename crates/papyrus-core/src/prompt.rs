//! Prompt assembly as a pure function of context, history, and question.

use papyrus_llm::{Message, Role};
use papyrus_memory::Chunk;

use crate::session::HistoryTurn;

/// Bumped whenever the template wording changes.
pub const PROMPT_VERSION: &str = "v1";

const BASE_PROMPT: &str = "\
You are a document assistant. Answer the user's question using only the \
provided document excerpts. If the excerpts do not contain the answer, \
say so instead of guessing.";

const CHAT_PROMPT: &str = "\
You are a helpful assistant. Answer the user's questions concisely.";

/// Assemble the message sequence for one generation call.
///
/// The system message carries the instructions and the retrieved excerpts
/// (when any); prior turns follow as alternating user/assistant messages;
/// the question is the final user message.
#[must_use]
pub fn build_prompt(context: &[Chunk], history: &[HistoryTurn], question: &str) -> Vec<Message> {
    let mut system = if context.is_empty() {
        CHAT_PROMPT.to_owned()
    } else {
        let mut s = String::from(BASE_PROMPT);
        s.push_str("\n\nDocument excerpts:");
        for chunk in context {
            s.push_str("\n\n---\n");
            s.push_str(&chunk.text);
        }
        s
    };
    system.push_str("\n\n[prompt ");
    system.push_str(PROMPT_VERSION);
    system.push(']');

    let mut messages = Vec::with_capacity(2 + history.len() * 2);
    messages.push(Message::new(Role::System, system));
    for turn in history {
        messages.push(Message::new(Role::User, turn.question.clone()));
        messages.push(Message::new(Role::Assistant, turn.answer.clone()));
    }
    messages.push(Message::new(Role::User, question));
    messages
}
