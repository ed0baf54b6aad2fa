//! Quiz error types.
//!
//! Ingestion and validation failures are recovered by skipping the offending
//! record; answer-parsing failures are reported to the user without touching
//! scheduling state. An untracked question is a programming error.

use thiserror::Error;

use crate::question::QuestionId;

/// Errors that can occur while building, answering, or scheduling questions.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The record's `type` tag does not name a known question kind.
    #[error("unsupported question type: {0}")]
    UnsupportedType(String),

    /// A required key is absent from the record.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A key is present but holds a value of the wrong shape.
    #[error("field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// A true/false answer that is neither true nor false.
    #[error("invalid input '{0}': answer must be 'True' or 'False'")]
    InvalidAnswer(String),

    /// The box manager has no location recorded for this question.
    #[error("question {0} is not tracked by the box manager")]
    UntrackedQuestion(QuestionId),
}

impl QuizError {
    /// Returns `true` if the session can carry on after this error without
    /// any scheduling change.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QuizError::InvalidAnswer(_))
    }

    /// Returns `true` if this error came from a malformed question record.
    pub fn is_ingestion(&self) -> bool {
        matches!(
            self,
            QuizError::UnsupportedType(_)
                | QuizError::MissingField(_)
                | QuizError::InvalidField { .. }
        )
    }
}
