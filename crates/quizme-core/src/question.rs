//! Question model.
//!
//! A question is a prompt plus one of two answer kinds. Identity is an opaque
//! [`QuestionId`], never the question's content, so two questions with the
//! same text are still tracked separately by the scheduler.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;

/// Stable, never-reused identifier of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(Uuid);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The answer shape of a question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Free-text answer compared after normalization.
    ShortAnswer { answer: String, case_sensitive: bool },
    /// Boolean answer with optional explanation shown on a miss.
    TrueFalse {
        answer: bool,
        explanation: Option<String>,
    },
}

impl QuestionKind {
    /// Label appended to the prompt when the question is presented.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::ShortAnswer { .. } => "Short Answer",
            QuestionKind::TrueFalse { .. } => "True/False",
        }
    }
}

/// A single quiz question.
#[derive(Debug, Clone)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    last_presented: DateTime<Utc>,
    kind: QuestionKind,
}

impl Question {
    /// Create a question of any kind. It has never been presented, so its
    /// timestamp starts at the Unix epoch.
    pub fn new(prompt: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: QuestionId::new(),
            prompt: prompt.into(),
            last_presented: DateTime::UNIX_EPOCH,
            kind,
        }
    }

    pub fn short_answer(
        prompt: impl Into<String>,
        answer: impl Into<String>,
        case_sensitive: bool,
    ) -> Self {
        Self::new(
            prompt,
            QuestionKind::ShortAnswer {
                answer: answer.into(),
                case_sensitive,
            },
        )
    }

    pub fn true_false(
        prompt: impl Into<String>,
        answer: bool,
        explanation: Option<String>,
    ) -> Self {
        Self::new(
            prompt,
            QuestionKind::TrueFalse {
                answer,
                explanation: explanation.filter(|e| !e.is_empty()),
            },
        )
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// When the question was last shown; the epoch if never.
    pub fn last_presented(&self) -> DateTime<Utc> {
        self.last_presented
    }

    /// Show the question. Restarts its box-interval clock whether or not the
    /// answer that follows is correct.
    pub fn present(&mut self, now: DateTime<Utc>) -> String {
        self.last_presented = now;
        format!("{} ({})", self.prompt, self.kind.label())
    }

    /// Score a raw answer.
    ///
    /// Short answers always score. True/false answers that are not
    /// recognizably true or false return [`QuizError::InvalidAnswer`]; the
    /// caller must not reschedule the question in that case.
    pub fn check(&self, raw_answer: &str) -> Result<bool, QuizError> {
        match &self.kind {
            QuestionKind::ShortAnswer {
                answer,
                case_sensitive,
            } => Ok(
                normalize(raw_answer, *case_sensitive) == normalize(answer, *case_sensitive),
            ),
            QuestionKind::TrueFalse { answer, .. } => {
                parse_true_false(raw_answer).map(|given| given == *answer)
            }
        }
    }

    /// Corrective text shown after a wrong answer.
    pub fn feedback(&self) -> String {
        match &self.kind {
            QuestionKind::ShortAnswer { answer, .. } => {
                format!("Incorrect. The correct answer is: {answer}")
            }
            QuestionKind::TrueFalse {
                explanation: Some(explanation),
                ..
            } => format!("Incorrect. {explanation}"),
            QuestionKind::TrueFalse { explanation: None, .. } => "Incorrect.".to_string(),
        }
    }
}

/// Normalize free text for comparison: trim, optionally lower-case, and drop
/// everything that is neither a word character nor whitespace.
pub fn normalize(text: &str, case_sensitive: bool) -> String {
    let trimmed = text.trim();
    let cased = if case_sensitive {
        trimmed.to_string()
    } else {
        trimmed.to_lowercase()
    };
    cased
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Parse a user's true/false answer (`true`/`t`/`false`/`f`, any case).
pub fn parse_true_false(raw: &str) -> Result<bool, QuizError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "t" => Ok(true),
        "false" | "f" => Ok(false),
        _ => Err(QuizError::InvalidAnswer(raw.trim().to_string())),
    }
}
