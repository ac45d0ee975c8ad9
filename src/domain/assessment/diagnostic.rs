//! Diagnostic flow - open-ended questions graded externally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AssessmentError, QuizResult};
use crate::domain::catalog::DiagnosticQuestion;
use crate::domain::competency::CompetencyId;
use crate::domain::foundation::StateMachine;

/// Mode of the assessment screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticPhase {
    #[default]
    Overview,
    Quiz,
    Results,
    /// Skill catalog browser, reachable from the overview or a deep link.
    Skills,
}

impl StateMachine for DiagnosticPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DiagnosticPhase::*;
        matches!(
            (self, target),
            (Overview, Quiz)
                | (Overview, Skills)
                | (Quiz, Results)
                | (Quiz, Overview)
                | (Results, Overview)
                | (Results, Quiz)
                | (Skills, Overview)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DiagnosticPhase::*;
        match self {
            Overview => vec![Quiz, Skills],
            Quiz => vec![Results, Overview],
            Results => vec![Overview, Quiz],
            Skills => vec![Overview],
        }
    }
}

/// In-memory state of one learner's diagnostic run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosticSession {
    phase: DiagnosticPhase,
    question_index: usize,
    results: BTreeMap<CompetencyId, QuizResult>,
}

impl DiagnosticSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DiagnosticPhase {
        self.phase
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Results of this run keyed by the dimension they scored.
    pub fn results(&self) -> &BTreeMap<CompetencyId, QuizResult> {
        &self.results
    }

    /// Question currently awaiting an answer.
    pub fn current_question<'a>(
        &self,
        questions: &'a [DiagnosticQuestion],
    ) -> Option<&'a DiagnosticQuestion> {
        match self.phase {
            DiagnosticPhase::Quiz => questions.get(self.question_index),
            _ => None,
        }
    }

    /// Begins a fresh run: index back to 0, previous results cleared.
    pub fn start(&mut self) -> Result<(), AssessmentError> {
        self.phase = self.phase.transition_to(DiagnosticPhase::Quiz)?;
        self.question_index = 0;
        self.results.clear();
        Ok(())
    }

    /// Records the graded result for the current question and advances,
    /// finishing the run after the last question.
    pub fn record(
        &mut self,
        category: CompetencyId,
        result: QuizResult,
        total_questions: usize,
    ) -> Result<(), AssessmentError> {
        if self.phase != DiagnosticPhase::Quiz {
            return Err(AssessmentError::invalid_state(format!(
                "cannot record an answer in {:?}",
                self.phase
            )));
        }
        self.results.insert(category, result);
        if self.question_index + 1 < total_questions {
            self.question_index += 1;
        } else {
            self.phase = self.phase.transition_to(DiagnosticPhase::Results)?;
        }
        Ok(())
    }

    /// Returns to the overview from any mode.
    pub fn back(&mut self) {
        self.phase = DiagnosticPhase::Overview;
    }

    /// Opens the skill browser, leaving any quiz in progress.
    pub fn open_skills(&mut self) {
        self.phase = DiagnosticPhase::Skills;
    }
}

/// Rejects blank free-text answers.
pub fn validate_answer(answer: &str) -> Result<&str, AssessmentError> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        Err(AssessmentError::EmptyAnswer)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(level: u32) -> QuizResult {
        QuizResult {
            level,
            score: level * 20,
            feedback: "fb".into(),
        }
    }

    #[test]
    fn start_moves_to_quiz_and_resets() {
        let mut s = DiagnosticSession::new();
        s.start().unwrap();
        s.record(CompetencyId::Tech, result(3), 3).unwrap();
        s.back();
        s.start().unwrap();
        assert_eq!(s.phase(), DiagnosticPhase::Quiz);
        assert_eq!(s.question_index(), 0);
        assert!(s.results().is_empty());
    }

    #[test]
    fn last_answer_moves_to_results() {
        let mut s = DiagnosticSession::new();
        s.start().unwrap();
        s.record(CompetencyId::Tech, result(3), 2).unwrap();
        assert_eq!(s.phase(), DiagnosticPhase::Quiz);
        assert_eq!(s.question_index(), 1);
        s.record(CompetencyId::Econ, result(5), 2).unwrap();
        assert_eq!(s.phase(), DiagnosticPhase::Results);
        assert_eq!(s.results().len(), 2);
    }

    #[test]
    fn record_outside_quiz_is_rejected() {
        let mut s = DiagnosticSession::new();
        assert!(matches!(
            s.record(CompetencyId::Tech, result(1), 3),
            Err(AssessmentError::InvalidState(_))
        ));
    }

    #[test]
    fn start_from_skills_is_rejected() {
        let mut s = DiagnosticSession::new();
        s.open_skills();
        assert!(s.start().is_err());
        s.back();
        assert!(s.start().is_ok());
    }

    #[test]
    fn results_can_restart() {
        let mut s = DiagnosticSession::new();
        s.start().unwrap();
        s.record(CompetencyId::Prob, result(2), 1).unwrap();
        assert!(s.start().is_ok());
    }

    #[test]
    fn current_question_only_during_quiz() {
        let questions = vec![DiagnosticQuestion {
            id: "q".into(),
            category: CompetencyId::Tech,
            question: "Q".into(),
            scenario: "S".into(),
            rubric: "R".into(),
        }];
        let mut s = DiagnosticSession::new();
        assert!(s.current_question(&questions).is_none());
        s.start().unwrap();
        assert_eq!(s.current_question(&questions).unwrap().id, "q");
    }

    #[test]
    fn blank_answers_are_rejected() {
        assert_eq!(validate_answer("  \n"), Err(AssessmentError::EmptyAnswer));
        assert_eq!(validate_answer(" use RAG "), Ok("use RAG"));
    }

    #[test]
    fn phase_transitions() {
        use DiagnosticPhase::*;
        assert!(Overview.can_transition_to(&Quiz));
        assert!(!Overview.can_transition_to(&Results));
        assert!(!Skills.can_transition_to(&Quiz));
        assert!(!Results.is_terminal());
    }
}
