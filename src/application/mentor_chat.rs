//! Mentor Chat Service - the conversation with the AI coach.
//!
//! Gateway failures never surface as errors here: each class is rendered
//! as a mentor message with remediation chips.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::busy::{BusyFlag, BusyGuard};
use super::{LlmGateway, ProgressStore};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::mentor::{build_context, greeting, parse_reply, ChatMessage, MentorHandoff};
use crate::ports::GatewayError;

const MISSING_KEY_TEXT: &str = "I'm not connected to the AI service yet. Connect an API key \
to start chatting; it stays on this machine and is only sent to the model provider.";

const REJECTED_KEY_TEXT: &str = "The AI service rejected the configured API key. It may be \
invalid, expired or missing access to this model.";

/// Mentor message shown in place of a reply when the gateway fails.
pub fn remediation_message(error: &GatewayError) -> ChatMessage {
    match error {
        GatewayError::MissingCredential => ChatMessage::model(
            MISSING_KEY_TEXT,
            vec![
                "Connect API key".to_string(),
                "How do I get an API key?".to_string(),
            ],
        ),
        GatewayError::InvalidCredential => ChatMessage::model(
            REJECTED_KEY_TEXT,
            vec![
                "Update API key".to_string(),
                "Check key permissions".to_string(),
            ],
        ),
        GatewayError::Transient(message) => {
            ChatMessage::model(format!("Error: {}", message), vec!["Try again".to_string()])
        }
    }
}

/// Result of accepting a handoff from a skill detail view.
#[derive(Debug, Clone, Serialize)]
pub struct HandoffOutcome {
    pub handoff: MentorHandoff,
    /// `None` when this handoff was already sent.
    pub reply: Option<ChatMessage>,
}

#[derive(Default)]
struct Conversation {
    messages: Vec<ChatMessage>,
    handoff: Option<MentorHandoff>,
}

pub struct MentorChatService {
    store: Arc<ProgressStore>,
    gateway: Arc<LlmGateway>,
    conversation: Mutex<Conversation>,
    busy: BusyFlag,
}

impl MentorChatService {
    pub fn new(store: Arc<ProgressStore>, gateway: Arc<LlmGateway>) -> Self {
        Self {
            store,
            gateway,
            conversation: Mutex::new(Conversation::default()),
            busy: BusyFlag::new(),
        }
    }

    /// Full transcript, opening with a greeting tailored to the current
    /// profile.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        let mut conversation = self.conversation.lock().await;
        self.ensure_greeting(&mut conversation);
        conversation.messages.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// The handoff currently driving the "return to" breadcrumb.
    pub async fn current_handoff(&self) -> Option<MentorHandoff> {
        self.conversation.lock().await.handoff.clone()
    }

    /// Sends a learner message, using the last few messages as context.
    pub async fn send(&self, text: &str) -> Result<ChatMessage, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }
        let _guard = self.acquire()?;

        let context = {
            let mut conversation = self.conversation.lock().await;
            self.ensure_greeting(&mut conversation);
            let context = build_context(&conversation.messages);
            conversation.messages.push(ChatMessage::user(text));
            context
        };

        Ok(self.reply_to(text, &context).await)
    }

    /// Adopts a handoff and sends its question with the skill as context.
    /// Re-posting the same handoff does not send it again.
    pub async fn accept_handoff(&self, handoff: MentorHandoff) -> Result<HandoffOutcome, DomainError> {
        let _guard = self.acquire()?;

        {
            let mut conversation = self.conversation.lock().await;
            self.ensure_greeting(&mut conversation);
            if conversation.handoff.as_ref() == Some(&handoff) {
                return Ok(HandoffOutcome {
                    handoff,
                    reply: None,
                });
            }
            conversation.handoff = Some(handoff.clone());
            conversation
                .messages
                .push(ChatMessage::user(handoff.initial_query.clone()));
        }
        tracing::debug!(return_to = %handoff.return_to, "mentor handoff accepted");

        let reply = self
            .reply_to(&handoff.initial_query, &handoff.skill_context)
            .await;
        Ok(HandoffOutcome {
            handoff,
            reply: Some(reply),
        })
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, DomainError> {
        self.busy
            .try_acquire()
            .ok_or_else(|| DomainError::new(ErrorCode::Busy, "The mentor is still replying"))
    }

    async fn reply_to(&self, text: &str, context: &str) -> ChatMessage {
        let profile = self.store.profile();
        let reply = match self
            .gateway
            .generate_mentor_reply(text, context, profile.as_ref())
            .await
        {
            Ok(raw) => {
                let parsed = parse_reply(&raw);
                ChatMessage::model(parsed.text, parsed.suggestions)
            }
            Err(e) => {
                tracing::warn!(error = %e, "mentor reply failed");
                remediation_message(&e)
            }
        };

        self.conversation.lock().await.messages.push(reply.clone());
        reply
    }

    fn ensure_greeting(&self, conversation: &mut Conversation) {
        if conversation.messages.is_empty() {
            let profile = self.store.profile();
            conversation
                .messages
                .push(ChatMessage::model(greeting(profile.as_ref()), Vec::new()));
        }
    }
}
