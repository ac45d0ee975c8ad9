//! Mastery quiz - fixed-choice, locally graded, gates week completion.

use serde::{Deserialize, Serialize};

use super::AssessmentError;
use crate::domain::catalog::WeeklyQuiz;
use crate::domain::foundation::{StateMachine, WeekNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryQuizPhase {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
}

impl StateMachine for MasteryQuizPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use MasteryQuizPhase::*;
        matches!(
            (self, target),
            (NotStarted, InProgress)
                | (InProgress, Submitted)
                | (InProgress, NotStarted)
                | (Submitted, NotStarted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use MasteryQuizPhase::*;
        match self {
            NotStarted => vec![InProgress],
            InProgress => vec![Submitted, NotStarted],
            Submitted => vec![NotStarted],
        }
    }
}

/// At most one wrong answer is tolerated, whatever the quiz length.
pub fn passes(correct: usize, total: usize) -> bool {
    correct + 1 >= total
}

/// Per-question review revealed after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionReview {
    pub question_id: String,
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    pub week: WeekNumber,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
    pub review: Vec<QuestionReview>,
}

/// State of the mastery quiz modal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MasteryQuizSession {
    phase: MasteryQuizPhase,
    quiz: Option<WeeklyQuiz>,
    answers: Vec<Option<usize>>,
    outcome: Option<QuizOutcome>,
}

impl MasteryQuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MasteryQuizPhase {
        self.phase
    }

    pub fn quiz(&self) -> Option<&WeeklyQuiz> {
        self.quiz.as_ref()
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn outcome(&self) -> Option<&QuizOutcome> {
        self.outcome.as_ref()
    }

    /// Opens the quiz for a week. Weeks without a quiz are reported as
    /// coming soon and leave the session untouched.
    pub fn start(
        &mut self,
        week: WeekNumber,
        quiz: Option<&WeeklyQuiz>,
    ) -> Result<(), AssessmentError> {
        let quiz = quiz.ok_or(AssessmentError::NoQuizForWeek(week))?;
        let phase = self.phase.transition_to(MasteryQuizPhase::InProgress)?;
        self.phase = phase;
        self.answers = vec![None; quiz.questions.len()];
        self.quiz = Some(quiz.clone());
        self.outcome = None;
        Ok(())
    }

    /// Selects an option. Re-selecting overwrites; last choice wins.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), AssessmentError> {
        if self.phase != MasteryQuizPhase::InProgress {
            return Err(AssessmentError::invalid_state("quiz is not in progress"));
        }
        let quiz = self
            .quiz
            .as_ref()
            .ok_or_else(|| AssessmentError::invalid_state("no active quiz"))?;
        let q = quiz
            .questions
            .get(question)
            .ok_or_else(|| AssessmentError::out_of_range("question", question, quiz.questions.len()))?;
        if option >= q.options.len() {
            return Err(AssessmentError::out_of_range("option", option, q.options.len()));
        }
        self.answers[question] = Some(option);
        Ok(())
    }

    /// Grades the quiz. Every question must have an answer.
    pub fn submit(&mut self) -> Result<QuizOutcome, AssessmentError> {
        if self.phase != MasteryQuizPhase::InProgress {
            return Err(AssessmentError::invalid_state("quiz is not in progress"));
        }
        let quiz = self
            .quiz
            .as_ref()
            .ok_or_else(|| AssessmentError::invalid_state("no active quiz"))?;
        let answered = self.answers.iter().filter(|a| a.is_some()).count();
        if answered < quiz.questions.len() {
            return Err(AssessmentError::Incomplete {
                answered,
                total: quiz.questions.len(),
            });
        }

        let review: Vec<QuestionReview> = quiz
            .questions
            .iter()
            .zip(self.answers.iter())
            .filter_map(|(q, a)| {
                a.map(|selected| QuestionReview {
                    question_id: q.id.clone(),
                    selected,
                    correct_index: q.correct_index,
                    is_correct: selected == q.correct_index,
                    explanation: q.explanation.clone(),
                })
            })
            .collect();
        let correct = review.iter().filter(|r| r.is_correct).count();
        let total = quiz.questions.len();
        let outcome = QuizOutcome {
            week: quiz.week_id,
            correct,
            total,
            passed: passes(correct, total),
            review,
        };

        self.phase = self.phase.transition_to(MasteryQuizPhase::Submitted)?;
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Closes or cancels the modal, discarding answers.
    pub fn close(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::WeeklyQuizQuestion;

    fn quiz(n: usize) -> WeeklyQuiz {
        WeeklyQuiz {
            week_id: WeekNumber::new(2).unwrap(),
            questions: (0..n)
                .map(|i| WeeklyQuizQuestion {
                    id: format!("q{i}"),
                    question: "?".into(),
                    options: vec!["a".into(), "b".into(), "c".into()],
                    correct_index: 1,
                    explanation: "because".into(),
                })
                .collect(),
        }
    }

    fn started(n: usize) -> MasteryQuizSession {
        let mut s = MasteryQuizSession::new();
        let q = quiz(n);
        s.start(q.week_id, Some(&q)).unwrap();
        s
    }

    #[test]
    fn pass_rule_allows_one_miss() {
        assert!(passes(3, 3));
        assert!(passes(2, 3));
        assert!(!passes(1, 3));
        assert!(passes(0, 1));
        assert!(passes(0, 0));
    }

    #[test]
    fn start_without_quiz_is_coming_soon() {
        let mut s = MasteryQuizSession::new();
        let week = WeekNumber::new(4).unwrap();
        assert_eq!(s.start(week, None), Err(AssessmentError::NoQuizForWeek(week)));
        assert_eq!(s.phase(), MasteryQuizPhase::NotStarted);
    }

    #[test]
    fn last_selection_wins() {
        let mut s = started(2);
        s.select(0, 0).unwrap();
        s.select(0, 2).unwrap();
        assert_eq!(s.answers()[0], Some(2));
    }

    #[test]
    fn selection_rejects_bad_indices() {
        let mut s = started(2);
        assert!(matches!(s.select(5, 0), Err(AssessmentError::OutOfRange { .. })));
        assert!(matches!(s.select(0, 3), Err(AssessmentError::OutOfRange { .. })));
    }

    #[test]
    fn submit_requires_every_answer() {
        let mut s = started(3);
        s.select(0, 1).unwrap();
        assert_eq!(
            s.submit(),
            Err(AssessmentError::Incomplete { answered: 1, total: 3 })
        );
        assert_eq!(s.phase(), MasteryQuizPhase::InProgress);
    }

    #[test]
    fn n_minus_one_correct_passes() {
        let mut s = started(3);
        s.select(0, 1).unwrap();
        s.select(1, 1).unwrap();
        s.select(2, 0).unwrap();
        let outcome = s.submit().unwrap();
        assert_eq!(outcome.correct, 2);
        assert!(outcome.passed);
        assert!(!outcome.review[2].is_correct);
        assert_eq!(outcome.review[2].explanation, "because");
        assert_eq!(s.phase(), MasteryQuizPhase::Submitted);
    }

    #[test]
    fn n_minus_two_correct_fails() {
        let mut s = started(3);
        s.select(0, 1).unwrap();
        s.select(1, 0).unwrap();
        s.select(2, 0).unwrap();
        assert!(!s.submit().unwrap().passed);
    }

    #[test]
    fn selection_locked_after_submit() {
        let mut s = started(1);
        s.select(0, 1).unwrap();
        s.submit().unwrap();
        assert!(s.select(0, 0).is_err());
        assert!(s.submit().is_err());
    }

    #[test]
    fn close_discards_answers() {
        let mut s = started(2);
        s.select(0, 1).unwrap();
        s.close();
        assert_eq!(s.phase(), MasteryQuizPhase::NotStarted);
        assert!(s.answers().is_empty());
        assert!(s.quiz().is_none());
    }

    #[test]
    fn start_while_in_progress_is_rejected() {
        let mut s = started(1);
        let q = quiz(1);
        assert!(matches!(
            s.start(q.week_id, Some(&q)),
            Err(AssessmentError::InvalidState(_))
        ));
    }
}
