//! JSON question file parser.
//!
//! Loads question records from a JSON array and turns each into a
//! [`Question`]. A bad record is skipped and reported; it never aborts the
//! rest of the file.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::error::QuizError;
use crate::question::{normalize, Question, QuestionKind};

type Record = Map<String, Value>;
type Builder = fn(&Record) -> Result<Question, QuizError>;

/// Type tag → constructor for every supported question kind.
const BUILDERS: &[(&str, Builder)] = &[
    ("shortanswer", build_short_answer),
    ("truefalse", build_true_false),
];

/// A record that could not be turned into a question.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Position of the record in the file.
    pub index: usize,
    pub error: QuizError,
}

/// Result of building questions from raw records.
#[derive(Debug, Default)]
pub struct Ingested {
    pub questions: Vec<Question>,
    /// File position of each entry in `questions`.
    pub record_indices: Vec<usize>,
    pub skipped: Vec<SkippedRecord>,
}

/// Read a JSON question file. The top level must be an array of records.
pub fn load_question_file(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("question file not found at {}", path.display()))?;

    parse_question_str(&content, path)
}

/// Parse a JSON string into raw records (useful for testing).
pub fn parse_question_str(content: &str, source_path: &Path) -> Result<Vec<Value>> {
    let parsed: Value = serde_json::from_str(content)
        .with_context(|| format!("invalid JSON in question file {}", source_path.display()))?;

    match parsed {
        Value::Array(records) => Ok(records),
        _ => anyhow::bail!(
            "question file {} must contain a JSON array",
            source_path.display()
        ),
    }
}

/// Build questions from raw records, skipping the ones that are malformed.
pub fn build_questions(records: &[Value]) -> Ingested {
    let mut ingested = Ingested::default();

    for (index, record) in records.iter().enumerate() {
        match build_question(record) {
            Ok(question) => {
                ingested.questions.push(question);
                ingested.record_indices.push(index);
            }
            Err(error) => {
                tracing::debug!("skipping question record {index}: {error}");
                ingested.skipped.push(SkippedRecord { index, error });
            }
        }
    }

    ingested
}

/// Build a single question from one record.
pub fn build_question(record: &Value) -> Result<Question, QuizError> {
    let record = record.as_object().ok_or(QuizError::InvalidField {
        field: "record",
        expected: "an object",
    })?;
    let tag = required_str(record, "type")?;

    let (_, build) = BUILDERS
        .iter()
        .find(|(name, _)| *name == tag)
        .ok_or_else(|| QuizError::UnsupportedType(tag.to_string()))?;

    build(record)
}

fn build_short_answer(record: &Record) -> Result<Question, QuizError> {
    let prompt = required_str(record, "question")?;
    let answer = required_str(record, "correct_answer")?;
    let case_sensitive = match record.get("case_sensitive") {
        None | Some(Value::Null) => false,
        Some(v) => v.as_bool().ok_or(QuizError::InvalidField {
            field: "case_sensitive",
            expected: "a boolean",
        })?,
    };
    Ok(Question::short_answer(prompt, answer, case_sensitive))
}

fn build_true_false(record: &Record) -> Result<Question, QuizError> {
    let prompt = required_str(record, "question")?;
    let answer = record
        .get("correct_answer")
        .ok_or(QuizError::MissingField("correct_answer"))?
        .as_bool()
        .ok_or(QuizError::InvalidField {
            field: "correct_answer",
            expected: "a boolean",
        })?;
    let explanation = match record.get("explanation") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            v.as_str()
                .ok_or(QuizError::InvalidField {
                    field: "explanation",
                    expected: "a string",
                })?
                .to_string(),
        ),
    };
    Ok(Question::true_false(prompt, answer, explanation))
}

fn required_str<'a>(record: &'a Record, field: &'static str) -> Result<&'a str, QuizError> {
    record
        .get(field)
        .ok_or(QuizError::MissingField(field))?
        .as_str()
        .ok_or(QuizError::InvalidField {
            field,
            expected: "a string",
        })
}

/// A warning from question set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Position of the record in the file.
    pub index: usize,
    /// Warning message.
    pub message: String,
}

/// Check built questions for issues that do not stop a session but make it
/// less useful.
pub fn validate_questions(ingested: &Ingested) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let questions = || {
        ingested
            .record_indices
            .iter()
            .copied()
            .zip(&ingested.questions)
    };

    // Check for duplicate prompts
    let mut seen = std::collections::HashSet::new();
    for (index, q) in questions() {
        if !seen.insert(q.prompt().trim()) {
            warnings.push(ValidationWarning {
                index,
                message: format!("duplicate question: {}", q.prompt().trim()),
            });
        }
    }

    for (index, q) in questions() {
        if q.prompt().trim().is_empty() {
            warnings.push(ValidationWarning {
                index,
                message: "question text is empty".into(),
            });
        }

        if let QuestionKind::ShortAnswer {
            answer,
            case_sensitive,
        } = q.kind()
        {
            if normalize(answer, *case_sensitive).trim().is_empty() {
                warnings.push(ValidationWarning {
                    index,
                    message: format!(
                        "correct_answer '{answer}' is empty after normalization; any blank answer will match"
                    ),
                });
            }
        }
    }

    warnings
}
