//! Agent module
//!
//! Forwards a prompt plus conversation history to the upstream agent API
//! and folds its event stream into a single answer.

mod client;
mod history;
mod model;
mod stream;

pub use client::{AgentClientConfig, AgentStreamClient, CREDENTIALS_MISSING_TEXT};
pub use history::{flatten, last_assistant_message};
pub use model::{AgentAnswer, AgentInvocation, ConversationMessage, Role};
pub use stream::{fold_answer, parse_line, LineDecoder, StreamEvent, StreamLine};
