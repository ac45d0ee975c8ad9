//! Integration tests for the diagnostic and mastery quiz flows.
//!
//! These tests drive the application services end to end with a scripted
//! language model and in-memory storage.

use std::sync::Arc;

use ai_pm_forge::adapters::ai::MockLanguageModel;
use ai_pm_forge::adapters::storage::InMemoryKeyValueStore;
use ai_pm_forge::application::{DiagnosticService, LlmGateway, MasteryQuizService, ProgressStore};
use ai_pm_forge::domain::assessment::{AssessmentError, DiagnosticPhase, MasteryQuizPhase};
use ai_pm_forge::domain::catalog::ContentCatalog;
use ai_pm_forge::domain::competency::{CompetencyId, OverallLevel};
use ai_pm_forge::domain::foundation::WeekNumber;
use ai_pm_forge::domain::roadmap::{build_roadmap, WeekStatus};
use ai_pm_forge::ports::{GatewayError, StaticCredential};

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn store() -> Arc<ProgressStore> {
    let catalog = Arc::new(ContentCatalog::builtin().unwrap());
    Arc::new(
        ProgressStore::load(catalog, Arc::new(InMemoryKeyValueStore::new()))
            .await
            .unwrap(),
    )
}

fn grade(level: u32, score: u32) -> String {
    format!(
        r#"{{"level": {}, "score": {}, "feedback": "Think of it like a credit check."}}"#,
        level, score
    )
}

fn week(n: u8) -> WeekNumber {
    WeekNumber::new(n).unwrap()
}

// =============================================================================
// Diagnostic
// =============================================================================

#[tokio::test]
async fn full_diagnostic_overwrites_scores_and_reports() {
    let store = store().await;
    let model = MockLanguageModel::new()
        .with_response(grade(5, 92))
        .with_response(grade(3, 60))
        .with_response(grade(1, 15));
    let gateway = Arc::new(LlmGateway::new(
        Arc::new(model.clone()),
        Arc::new(StaticCredential::new("test-key")),
    ));
    let diagnostic = DiagnosticService::new(Arc::clone(&store), gateway);

    let view = diagnostic.start().await.unwrap();
    assert_eq!(view.phase, DiagnosticPhase::Quiz);
    assert_eq!(view.total_questions, 3);

    for answer in [
        "Split the document and use a long-context model.",
        "Route easy queries to a smaller model.",
        "Not sure.",
    ] {
        diagnostic.submit_answer(answer).await.unwrap();
    }

    let view = diagnostic.view().await;
    assert_eq!(view.phase, DiagnosticPhase::Results);
    assert_eq!(view.results.len(), 3);
    assert_eq!(model.call_count(), 3);

    let scores = store.scores();
    assert_eq!(scores.get(CompetencyId::Tech), 5);
    assert_eq!(scores.get(CompetencyId::Econ), 3);
    assert_eq!(scores.get(CompetencyId::Prob), 1);
    assert_eq!(view.report.scores, scores);
    assert_eq!(view.report.overall, OverallLevel::from_mean(scores.mean()));
}

#[tokio::test]
async fn diagnostic_without_key_records_fallback_levels() {
    let store = store().await;
    store.set_score(CompetencyId::Tech, 4).unwrap();
    let model = MockLanguageModel::new();
    let gateway = Arc::new(LlmGateway::new(
        Arc::new(model.clone()),
        Arc::new(StaticCredential::none()),
    ));
    let diagnostic = DiagnosticService::new(Arc::clone(&store), gateway);

    diagnostic.start().await.unwrap();
    let result = diagnostic.submit_answer("An answer").await.unwrap();

    assert_eq!((result.level, result.score), (1, 0));
    assert_eq!(store.scores().get(CompetencyId::Tech), 1);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn provider_outage_still_advances_the_diagnostic() {
    let store = store().await;
    let model = MockLanguageModel::new().with_error(GatewayError::transient("HTTP 503"));
    let gateway = Arc::new(LlmGateway::new(
        Arc::new(model),
        Arc::new(StaticCredential::new("k")),
    ));
    let diagnostic = DiagnosticService::new(store, gateway);

    diagnostic.start().await.unwrap();
    diagnostic.submit_answer("An answer").await.unwrap();
    assert_eq!(diagnostic.view().await.question_index, 1);
}

// =============================================================================
// Mastery quiz and roadmap
// =============================================================================

#[tokio::test]
async fn passing_week_one_completes_it_on_the_roadmap() {
    let store = store().await;
    let quizzes = MasteryQuizService::new(Arc::clone(&store));

    let view = quizzes.start(week(1)).await.unwrap();
    assert_eq!(view.phase, MasteryQuizPhase::InProgress);
    assert_eq!(view.questions.len(), 3);

    // One wrong answer out of three still passes.
    quizzes.select(week(1), 0, 1).await.unwrap();
    quizzes.select(week(1), 1, 2).await.unwrap();
    let view = quizzes.select(week(1), 2, 0).await.unwrap();
    assert!(view.can_submit);

    let outcome = quizzes.submit(week(1)).await.unwrap();
    assert!(outcome.passed);
    assert_eq!(outcome.correct, 2);
    assert!(store.completed_weeks().contains(&week(1)));

    let snapshot = store.snapshot();
    let roadmap = build_roadmap(store.catalog(), &snapshot.scores, &snapshot.completed_weeks, true);
    assert_eq!(roadmap[0].status, WeekStatus::Completed);
    assert!(roadmap[0].completed);
}

#[tokio::test]
async fn failing_quiz_leaves_week_open() {
    let store = store().await;
    let quizzes = MasteryQuizService::new(Arc::clone(&store));

    quizzes.start(week(2)).await.unwrap();
    for question in 0..3 {
        quizzes.select(week(2), question, 0).await.unwrap();
    }
    let outcome = quizzes.submit(week(2)).await.unwrap();

    assert!(!outcome.passed);
    assert!(store.completed_weeks().is_empty());
}

#[tokio::test]
async fn quiz_requires_every_answer() {
    let store = store().await;
    let quizzes = MasteryQuizService::new(store);

    quizzes.start(week(3)).await.unwrap();
    quizzes.select(week(3), 0, 1).await.unwrap();

    assert!(matches!(
        quizzes.submit(week(3)).await,
        Err(AssessmentError::Incomplete { .. })
    ));
}

#[tokio::test]
async fn week_without_quiz_cannot_be_started() {
    let quizzes = MasteryQuizService::new(store().await);
    assert_eq!(
        quizzes.start(week(4)).await.unwrap_err(),
        AssessmentError::NoQuizForWeek(week(4))
    );
    assert_eq!(quizzes.view().await.phase, MasteryQuizPhase::NotStarted);
}
