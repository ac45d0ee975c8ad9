//! Assessment-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError, WeekNumber};

/// Errors raised by the diagnostic and mastery quiz flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// No mastery quiz is defined for the week ("coming soon").
    NoQuizForWeek(WeekNumber),
    /// Operation is not allowed in the current phase.
    InvalidState(String),
    /// Submission attempted with unanswered questions.
    Incomplete { answered: usize, total: usize },
    /// Question or option index does not exist.
    OutOfRange { field: String, index: usize, len: usize },
    /// Free-text answer was blank.
    EmptyAnswer,
}

impl AssessmentError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        AssessmentError::InvalidState(message.into())
    }

    pub fn out_of_range(field: impl Into<String>, index: usize, len: usize) -> Self {
        AssessmentError::OutOfRange {
            field: field.into(),
            index,
            len,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::NoQuizForWeek(_) => ErrorCode::QuizNotFound,
            AssessmentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            AssessmentError::Incomplete { .. } => ErrorCode::QuizIncomplete,
            AssessmentError::OutOfRange { .. } => ErrorCode::OutOfRange,
            AssessmentError::EmptyAnswer => ErrorCode::EmptyField,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AssessmentError::NoQuizForWeek(week) => {
                format!("Quiz for week {} coming soon", week)
            }
            AssessmentError::InvalidState(msg) => format!("Invalid state: {}", msg),
            AssessmentError::Incomplete { answered, total } => {
                format!("Answered {} of {} questions", answered, total)
            }
            AssessmentError::OutOfRange { field, index, len } => {
                format!("{} index {} out of range (0..{})", field, index, len)
            }
            AssessmentError::EmptyAnswer => "Answer cannot be empty".to_string(),
        }
    }
}

impl std::fmt::Display for AssessmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AssessmentError {}

impl From<ValidationError> for AssessmentError {
    fn from(err: ValidationError) -> Self {
        AssessmentError::InvalidState(err.to_string())
    }
}

impl From<AssessmentError> for DomainError {
    fn from(err: AssessmentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
