//! Application layer - services orchestrating the domain and ports.
//!
//! - `ProgressStore` - authoritative learner state with change notification
//! - `CredentialManager` - active API key, pushed status updates
//! - `LlmGateway` - mentor replies and diagnostic grading
//! - `DiagnosticService` / `MasteryQuizService` - assessment flows
//! - `MentorChatService` - the coaching conversation

mod busy;
mod credentials;
mod diagnostic;
mod llm_gateway;
mod mastery_quiz;
mod mentor_chat;
mod progress_store;

pub use busy::{BusyFlag, BusyGuard};
pub use credentials::{fingerprint, CredentialManager, CredentialOrigin, CredentialStatus};
pub use diagnostic::{DiagnosticService, DiagnosticView};
pub use llm_gateway::LlmGateway;
pub use mastery_quiz::{MasteryQuizService, MasteryQuizView, QuizQuestionView};
pub use mentor_chat::{remediation_message, HandoffOutcome, MentorChatService};
pub use progress_store::ProgressStore;
