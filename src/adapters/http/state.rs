//! Shared state handed to every HTTP handler.

use std::sync::Arc;

use crate::application::{
    CredentialManager, DiagnosticService, LlmGateway, MasteryQuizService, MentorChatService,
    ProgressStore,
};
use crate::domain::catalog::ContentCatalog;
use crate::ports::{CredentialSource, LanguageModel, ModelInfo};

#[derive(Clone)]
pub struct AppState {
    pub progress: Arc<ProgressStore>,
    pub credentials: Arc<CredentialManager>,
    pub diagnostic: Arc<DiagnosticService>,
    pub mastery: Arc<MasteryQuizService>,
    pub mentor: Arc<MentorChatService>,
    pub model_info: ModelInfo,
}

impl AppState {
    /// Wires the services around one progress store and one model.
    pub fn new(
        progress: Arc<ProgressStore>,
        credentials: Arc<CredentialManager>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        let model_info = model.model_info();
        let source: Arc<dyn CredentialSource> = credentials.clone();
        let gateway = Arc::new(LlmGateway::new(model, source));

        Self {
            diagnostic: Arc::new(DiagnosticService::new(Arc::clone(&progress), Arc::clone(&gateway))),
            mastery: Arc::new(MasteryQuizService::new(Arc::clone(&progress))),
            mentor: Arc::new(MentorChatService::new(Arc::clone(&progress), gateway)),
            progress,
            credentials,
            model_info,
        }
    }

    pub fn catalog(&self) -> &ContentCatalog {
        self.progress.catalog()
    }
}
