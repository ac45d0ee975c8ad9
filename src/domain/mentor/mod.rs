//! Mentor module - conversation entities, reply parsing and prompt text.

mod handoff;
mod message;
mod prompts;
mod reply;

pub use handoff::{MentorHandoff, QuickPrompt};
pub use message::{ChatMessage, Role};
pub use prompts::{
    build_context, grading_prompt, greeting, mentor_system_instruction, mentor_user_content,
    CONTEXT_WINDOW, EMPTY_REPLY_TEXT,
};
pub use reply::{parse_reply, ParsedReply, FOLLOW_UP_DELIMITER, MAX_SUGGESTIONS};
