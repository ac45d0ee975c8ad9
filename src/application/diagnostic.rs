//! Diagnostic Service - runs the open-response assessment.
//!
//! Each answer is graded by the language model and the graded level
//! overwrites that question's competency score. Only one answer may be
//! grading at a time.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::busy::BusyFlag;
use super::{LlmGateway, ProgressStore};
use crate::domain::assessment::{validate_answer, AssessmentError, DiagnosticPhase, DiagnosticSession, QuizResult};
use crate::domain::catalog::DiagnosticQuestion;
use crate::domain::competency::{CompetencyId, CompetencyReport};
use crate::domain::foundation::{DomainError, ErrorCode};

/// What the assessment screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticView {
    pub phase: DiagnosticPhase,
    pub question_index: usize,
    pub total_questions: usize,
    pub current_question: Option<DiagnosticQuestion>,
    pub results: BTreeMap<CompetencyId, QuizResult>,
    pub report: CompetencyReport,
    pub grading: bool,
}

#[derive(Default)]
struct RunState {
    session: DiagnosticSession,
    /// Bumped on every start so a late grading result can tell its run
    /// has been replaced.
    run: u64,
}

pub struct DiagnosticService {
    store: Arc<ProgressStore>,
    gateway: Arc<LlmGateway>,
    state: Mutex<RunState>,
    busy: BusyFlag,
}

impl DiagnosticService {
    pub fn new(store: Arc<ProgressStore>, gateway: Arc<LlmGateway>) -> Self {
        Self {
            store,
            gateway,
            state: Mutex::new(RunState::default()),
            busy: BusyFlag::new(),
        }
    }

    fn questions(&self) -> &[DiagnosticQuestion] {
        &self.store.catalog().diagnostic_questions
    }

    pub async fn view(&self) -> DiagnosticView {
        let state = self.state.lock().await;
        self.render(&state.session)
    }

    fn render(&self, session: &DiagnosticSession) -> DiagnosticView {
        DiagnosticView {
            phase: session.phase(),
            question_index: session.question_index(),
            total_questions: self.questions().len(),
            current_question: session.current_question(self.questions()).cloned(),
            results: session.results().clone(),
            report: CompetencyReport::from_scores(&self.store.scores()),
            grading: self.busy.is_busy(),
        }
    }

    /// Starts a fresh run from the overview or the results screen.
    pub async fn start(&self) -> Result<DiagnosticView, AssessmentError> {
        let mut state = self.state.lock().await;
        state.session.start()?;
        state.run += 1;
        tracing::debug!(run = state.run, "diagnostic started");
        Ok(self.render(&state.session))
    }

    pub async fn back(&self) -> DiagnosticView {
        let mut state = self.state.lock().await;
        state.session.back();
        self.render(&state.session)
    }

    pub async fn open_skills(&self) -> DiagnosticView {
        let mut state = self.state.lock().await;
        state.session.open_skills();
        self.render(&state.session)
    }

    /// Grades the answer to the current question, writes the level to the
    /// question's competency and advances.
    pub async fn submit_answer(&self, answer: &str) -> Result<QuizResult, DomainError> {
        let answer = validate_answer(answer)?.to_string();
        let _guard = self.busy.try_acquire().ok_or_else(|| {
            DomainError::new(ErrorCode::Busy, "An answer is already being graded")
        })?;

        let (run, index, question) = {
            let state = self.state.lock().await;
            let question = state
                .session
                .current_question(self.questions())
                .cloned()
                .ok_or_else(|| AssessmentError::invalid_state("no question is awaiting an answer"))?;
            (state.run, state.session.question_index(), question)
        };

        let profile = self.store.profile();
        let result = self
            .gateway
            .grade_open_response(&question, &answer, profile.as_ref())
            .await;

        let mut state = self.state.lock().await;
        let still_current = state.run == run
            && state.session.phase() == DiagnosticPhase::Quiz
            && state.session.question_index() == index;
        if !still_current {
            tracing::debug!(question_id = %question.id, "diagnostic moved on while grading, result discarded");
            return Err(AssessmentError::invalid_state("the diagnostic moved on while grading").into());
        }

        self.store.set_score(question.category, result.level)?;
        let total = self.questions().len();
        state.session.record(question.category, result.clone(), total)?;
        tracing::debug!(
            dimension = %question.category,
            level = result.level,
            score = result.score,
            "diagnostic answer graded"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockLanguageModel;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::catalog::ContentCatalog;
    use crate::ports::StaticCredential;

    async fn service(model: &MockLanguageModel) -> (DiagnosticService, Arc<ProgressStore>) {
        let catalog = Arc::new(ContentCatalog::builtin().unwrap());
        let store = Arc::new(
            ProgressStore::load(catalog, Arc::new(InMemoryKeyValueStore::new()))
                .await
                .unwrap(),
        );
        let gateway = Arc::new(LlmGateway::new(
            Arc::new(model.clone()),
            Arc::new(StaticCredential::new("k")),
        ));
        (DiagnosticService::new(Arc::clone(&store), gateway), store)
    }

    fn graded(level: u32) -> String {
        format!(r#"{{"level": {}, "score": {}, "feedback": "fb"}}"#, level, level * 20)
    }

    #[tokio::test]
    async fn answer_before_start_is_rejected() {
        let model = MockLanguageModel::new();
        let (svc, _) = service(&model).await;
        let err = svc.submit_answer("something").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_answer_is_rejected_without_grading() {
        let model = MockLanguageModel::new();
        let (svc, _) = service(&model).await;
        svc.start().await.unwrap();
        let err = svc.submit_answer("   ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn full_run_updates_scores_and_reaches_results() {
        let model = MockLanguageModel::new()
            .with_response(graded(3))
            .with_response(graded(5))
            .with_response(graded(1));
        let (svc, store) = service(&model).await;
        let questions = store.catalog().diagnostic_questions.clone();

        svc.start().await.unwrap();
        for _ in 0..questions.len() {
            svc.submit_answer("my answer").await.unwrap();
        }

        let view = svc.view().await;
        assert_eq!(view.phase, DiagnosticPhase::Results);
        assert!(view.current_question.is_none());
        assert_eq!(view.results.len(), questions.len());
        let scores = store.scores();
        assert_eq!(scores.get(questions[0].category), 3);
        assert_eq!(scores.get(questions[1].category), 5);
        assert_eq!(scores.get(questions[2].category), 1);
    }

    #[tokio::test]
    async fn grading_failure_still_advances_with_minimum() {
        let model = MockLanguageModel::new().with_error(crate::ports::GatewayError::InvalidCredential);
        let (svc, store) = service(&model).await;
        let first = store.catalog().diagnostic_questions[0].category;
        store.set_score(first, 4).unwrap();

        svc.start().await.unwrap();
        let result = svc.submit_answer("answer").await.unwrap();

        assert_eq!(result, QuizResult::grading_fallback());
        assert_eq!(store.scores().get(first), 1);
        assert_eq!(svc.view().await.question_index, 1);
    }

    #[tokio::test]
    async fn restart_clears_results() {
        let model = MockLanguageModel::new().with_response(graded(3));
        let (svc, _) = service(&model).await;
        svc.start().await.unwrap();
        svc.submit_answer("a").await.unwrap();
        svc.back().await;

        let view = svc.start().await.unwrap();
        assert_eq!(view.question_index, 0);
        assert!(view.results.is_empty());
    }

    #[tokio::test]
    async fn skills_mode_is_reachable_from_overview() {
        let model = MockLanguageModel::new();
        let (svc, _) = service(&model).await;
        assert_eq!(svc.open_skills().await.phase, DiagnosticPhase::Skills);
        assert_eq!(svc.back().await.phase, DiagnosticPhase::Overview);
    }
}
