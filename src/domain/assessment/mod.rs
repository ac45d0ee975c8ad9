//! Assessment module - diagnostic and mastery quiz flows.
//!
//! The diagnostic asks open-ended scenario questions graded by the language
//! model; each graded level overwrites one competency score. Mastery quizzes
//! are fixed-choice and graded locally; passing marks the week complete.

mod diagnostic;
mod errors;
mod mastery;
mod result;

pub use diagnostic::{validate_answer, DiagnosticPhase, DiagnosticSession};
pub use errors::AssessmentError;
pub use mastery::{passes, MasteryQuizPhase, MasteryQuizSession, QuestionReview, QuizOutcome};
pub use result::{QuizResult, GRADING_FALLBACK_FEEDBACK, MAX_LEVEL, MAX_SCORE, MIN_LEVEL};
