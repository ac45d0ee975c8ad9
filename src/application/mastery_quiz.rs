//! Mastery Quiz Service - per-week fixed-choice quizzes.
//!
//! Passing (at most one wrong answer) marks the week complete.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::ProgressStore;
use crate::domain::assessment::{AssessmentError, MasteryQuizPhase, MasteryQuizSession, QuizOutcome};
use crate::domain::foundation::WeekNumber;

/// A question as shown while answering; the correct option stays hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestionView {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasteryQuizView {
    pub phase: MasteryQuizPhase,
    pub week: Option<WeekNumber>,
    pub questions: Vec<QuizQuestionView>,
    pub answers: Vec<Option<usize>>,
    pub can_submit: bool,
    pub outcome: Option<QuizOutcome>,
}

impl MasteryQuizView {
    fn from_session(session: &MasteryQuizSession) -> Self {
        let questions = session
            .quiz()
            .map(|quiz| {
                quiz.questions
                    .iter()
                    .map(|q| QuizQuestionView {
                        id: q.id.clone(),
                        question: q.question.clone(),
                        options: q.options.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let answers = session.answers().to_vec();
        Self {
            phase: session.phase(),
            week: session.quiz().map(|q| q.week_id),
            can_submit: session.phase() == MasteryQuizPhase::InProgress
                && answers.iter().all(Option::is_some),
            questions,
            answers,
            outcome: session.outcome().cloned(),
        }
    }
}

pub struct MasteryQuizService {
    store: Arc<ProgressStore>,
    session: Mutex<MasteryQuizSession>,
}

impl MasteryQuizService {
    pub fn new(store: Arc<ProgressStore>) -> Self {
        Self {
            store,
            session: Mutex::new(MasteryQuizSession::new()),
        }
    }

    pub async fn view(&self) -> MasteryQuizView {
        MasteryQuizView::from_session(&*self.session.lock().await)
    }

    /// Opens the week's quiz with fresh answers, replacing any open quiz.
    pub async fn start(&self, week: WeekNumber) -> Result<MasteryQuizView, AssessmentError> {
        let quiz = self.store.catalog().weekly_quiz(week);
        let mut session = self.session.lock().await;
        if quiz.is_none() {
            return Err(AssessmentError::NoQuizForWeek(week));
        }
        session.close();
        session.start(week, quiz)?;
        tracing::debug!(week = week.value(), "mastery quiz opened");
        Ok(MasteryQuizView::from_session(&session))
    }

    pub async fn select(
        &self,
        week: WeekNumber,
        question: usize,
        option: usize,
    ) -> Result<MasteryQuizView, AssessmentError> {
        let mut session = self.session.lock().await;
        ensure_week(&session, week)?;
        session.select(question, option)?;
        Ok(MasteryQuizView::from_session(&session))
    }

    /// Grades the quiz and, on a pass, marks the week complete.
    pub async fn submit(&self, week: WeekNumber) -> Result<QuizOutcome, AssessmentError> {
        let mut session = self.session.lock().await;
        ensure_week(&session, week)?;
        let outcome = session.submit()?;
        if outcome.passed {
            self.store.mark_week_complete(outcome.week);
        }
        tracing::info!(
            week = week.value(),
            correct = outcome.correct,
            total = outcome.total,
            passed = outcome.passed,
            "mastery quiz submitted"
        );
        Ok(outcome)
    }

    /// Cancels or closes the quiz without side effects.
    pub async fn close(&self) -> MasteryQuizView {
        let mut session = self.session.lock().await;
        session.close();
        MasteryQuizView::from_session(&session)
    }
}

fn ensure_week(session: &MasteryQuizSession, week: WeekNumber) -> Result<(), AssessmentError> {
    match session.quiz() {
        Some(quiz) if quiz.week_id == week => Ok(()),
        Some(quiz) => Err(AssessmentError::invalid_state(format!(
            "the open quiz is for week {}",
            quiz.week_id
        ))),
        None => Err(AssessmentError::invalid_state("no quiz is open")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::catalog::ContentCatalog;

    async fn service() -> (MasteryQuizService, Arc<ProgressStore>) {
        let catalog = Arc::new(ContentCatalog::builtin().unwrap());
        let store = Arc::new(
            ProgressStore::load(catalog, Arc::new(InMemoryKeyValueStore::new()))
                .await
                .unwrap(),
        );
        (MasteryQuizService::new(Arc::clone(&store)), store)
    }

    fn week(n: u8) -> WeekNumber {
        WeekNumber::new(n).unwrap()
    }

    /// Answers with `wrong` questions deliberately missed.
    async fn answer_with_mistakes(svc: &MasteryQuizService, store: &ProgressStore, w: WeekNumber, wrong: usize) {
        let quiz = store.catalog().weekly_quiz(w).unwrap().clone();
        for (i, q) in quiz.questions.iter().enumerate() {
            let option = if i < wrong {
                (q.correct_index + 1) % q.options.len()
            } else {
                q.correct_index
            };
            svc.select(w, i, option).await.unwrap();
        }
    }

    #[tokio::test]
    async fn week_without_quiz_is_coming_soon() {
        let (svc, _) = service().await;
        let err = svc.start(week(4)).await.unwrap_err();
        assert_eq!(err, AssessmentError::NoQuizForWeek(week(4)));
        assert_eq!(svc.view().await.phase, MasteryQuizPhase::NotStarted);
    }

    #[tokio::test]
    async fn view_hides_correct_answers_until_submit() {
        let (svc, _) = service().await;
        let view = svc.start(week(1)).await.unwrap();
        assert!(!view.questions.is_empty());
        assert!(!view.can_submit);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("correct_index"));
        assert!(!json.contains("explanation"));
    }

    #[tokio::test]
    async fn one_mistake_passes_and_completes_week() {
        let (svc, store) = service().await;
        svc.start(week(1)).await.unwrap();
        answer_with_mistakes(&svc, &store, week(1), 1).await;
        assert!(svc.view().await.can_submit);

        let outcome = svc.submit(week(1)).await.unwrap();
        assert!(outcome.passed);
        assert!(store.completed_weeks().contains(&week(1)));
    }

    #[tokio::test]
    async fn two_mistakes_fail_without_side_effects() {
        let (svc, store) = service().await;
        svc.start(week(2)).await.unwrap();
        answer_with_mistakes(&svc, &store, week(2), 2).await;

        let outcome = svc.submit(week(2)).await.unwrap();
        assert!(!outcome.passed);
        assert!(outcome.review.iter().all(|r| !r.explanation.is_empty()));
        assert!(store.completed_weeks().is_empty());
    }

    #[tokio::test]
    async fn incomplete_submission_is_rejected() {
        let (svc, _) = service().await;
        svc.start(week(3)).await.unwrap();
        svc.select(week(3), 0, 0).await.unwrap();
        assert!(matches!(
            svc.submit(week(3)).await,
            Err(AssessmentError::Incomplete { answered: 1, .. })
        ));
    }

    #[tokio::test]
    async fn answers_for_another_week_are_rejected() {
        let (svc, _) = service().await;
        svc.start(week(1)).await.unwrap();
        assert!(matches!(
            svc.select(week(2), 0, 0).await,
            Err(AssessmentError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn close_discards_answers_and_allows_retry() {
        let (svc, store) = service().await;
        svc.start(week(5)).await.unwrap();
        answer_with_mistakes(&svc, &store, week(5), 3).await;
        svc.submit(week(5)).await.unwrap();

        let view = svc.close().await;
        assert_eq!(view.phase, MasteryQuizPhase::NotStarted);
        assert!(view.answers.is_empty());

        let view = svc.start(week(5)).await.unwrap();
        assert!(view.answers.iter().all(Option::is_none));
    }
}
