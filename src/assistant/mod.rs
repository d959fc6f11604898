//! The producer assistant: a chat model primed with the current project.

mod chat;
mod context;

pub use chat::{
    Assistant, AssistantSession, ChatMessage, Role, DEFAULT_TEMPERATURE, EMPTY_REPLY, SNAG_REPLY,
};
pub use context::ProjectContext;
