//! Conversation history formatting

use super::model::{ConversationMessage, Role};

/// Content of the most recent assistant message, or an empty string.
pub fn last_assistant_message(history: &[ConversationMessage]) -> String {
    history
        .iter()
        .rev()
        .find(|message| message.role == Role::Assistant)
        .map(|message| message.content.clone())
        .unwrap_or_default()
}

/// Render the history as `"<Role>: <content>"` blocks separated by blank
/// lines, in chronological order, with trailing whitespace removed.
pub fn flatten(history: &[ConversationMessage]) -> String {
    let mut transcript = String::new();
    for message in history {
        transcript.push_str(message.role.label());
        transcript.push_str(": ");
        transcript.push_str(&message.content);
        transcript.push_str("\n\n");
    }
    transcript.trim_end().to_string()
}
