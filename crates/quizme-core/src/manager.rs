//! The box manager: owns every question, the fixed sequence of boxes, and the
//! table recording which box each question is in.
//!
//! Box order is priority order. [`BoxManager::next`] walks the boxes front to
//! back, skipping the terminal "Known Questions" box, and returns the first
//! question any of them offers. [`BoxManager::move_question`] applies the
//! promotion/demotion rule after each scored answer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::QuizError;
use crate::question::{Question, QuestionId};
use crate::review_box::{Interval, ReviewBox};

/// Index of the "Missed Questions" box.
pub const MISSED: usize = 0;
/// Index of the "Unasked Questions" box.
pub const UNASKED: usize = 1;
/// Index of the "Correctly Answered Once" box.
pub const CORRECT_ONCE: usize = 2;
/// Index of the "Correctly Answered Twice" box.
pub const CORRECT_TWICE: usize = 3;
/// Index of the terminal "Known Questions" box.
pub const KNOWN: usize = 4;

/// Population of one box, reported after every move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxCount {
    pub name: String,
    pub count: usize,
}

/// Outcome of a [`BoxManager::move_question`] call.
#[derive(Debug, Clone)]
pub struct Placement {
    pub from: usize,
    pub to: usize,
    pub counts: Vec<BoxCount>,
}

/// Owner of all questions and their box assignments for one session.
#[derive(Debug)]
pub struct BoxManager {
    boxes: Vec<ReviewBox>,
    questions: HashMap<QuestionId, Question>,
    location: HashMap<QuestionId, usize>,
}

impl BoxManager {
    pub fn new() -> Self {
        let boxes = vec![
            ReviewBox::new("Missed Questions", Interval::seconds(60)),
            ReviewBox::new("Unasked Questions", Interval::seconds(0)),
            ReviewBox::new("Correctly Answered Once", Interval::seconds(180)),
            ReviewBox::new("Correctly Answered Twice", Interval::seconds(360)),
            ReviewBox::new("Known Questions", Interval::Never),
        ];
        Self {
            boxes,
            questions: HashMap::new(),
            location: HashMap::new(),
        }
    }

    /// Place a brand-new question in "Unasked Questions".
    ///
    /// Returns `false` without changing anything if a question with the same
    /// id is already tracked.
    pub fn admit(&mut self, question: Question) -> bool {
        let id = question.id();
        if self.location.contains_key(&id) {
            tracing::debug!(%id, "question already admitted, ignoring");
            return false;
        }
        self.boxes[UNASKED].add(id);
        self.location.insert(id, UNASKED);
        self.questions.insert(id, question);
        true
    }

    /// Admit many questions; returns how many were newly admitted.
    pub fn admit_all(&mut self, questions: impl IntoIterator<Item = Question>) -> usize {
        let mut admitted = 0;
        for question in questions {
            if self.admit(question) {
                admitted += 1;
            }
        }
        tracing::info!(admitted, "questions admitted");
        admitted
    }

    /// The next question to ask, or `None` when no non-terminal box has an
    /// eligible question. `None` ends the session.
    pub fn next(&self, now: DateTime<Utc>) -> Option<QuestionId> {
        self.boxes[..KNOWN]
            .iter()
            .find_map(|b| b.select(&self.questions, now))
    }

    /// Present a tracked question, restarting its interval clock.
    pub fn present(&mut self, id: QuestionId, now: DateTime<Utc>) -> Result<String, QuizError> {
        self.questions
            .get_mut(&id)
            .map(|q| q.present(now))
            .ok_or(QuizError::UntrackedQuestion(id))
    }

    /// Move a question after a scored answer.
    ///
    /// Correct from "Missed" jumps to "Correctly Answered Once"; any other
    /// correct answer moves one box up, saturating at "Known Questions". Any
    /// incorrect answer sends the question back to "Missed".
    pub fn move_question(&mut self, id: QuestionId, correct: bool) -> Result<Placement, QuizError> {
        let from = *self
            .location
            .get(&id)
            .ok_or(QuizError::UntrackedQuestion(id))?;
        let to = next_box(from, correct, self.boxes.len() - 1);

        self.boxes[from].remove(id);
        self.boxes[to].add(id);
        self.location.insert(id, to);

        tracing::debug!(
            %id,
            from = self.boxes[from].name(),
            to = self.boxes[to].name(),
            correct,
            "question moved"
        );
        for b in &self.boxes {
            tracing::debug!("{b}");
        }

        Ok(Placement {
            from,
            to,
            counts: self.counts(),
        })
    }

    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(&id)
    }

    /// Index of the box currently holding `id`.
    pub fn location(&self, id: QuestionId) -> Option<usize> {
        self.location.get(&id).copied()
    }

    pub fn boxes(&self) -> &[ReviewBox] {
        &self.boxes
    }

    pub fn counts(&self) -> Vec<BoxCount> {
        self.boxes
            .iter()
            .map(|b| BoxCount {
                name: b.name().to_string(),
                count: b.len(),
            })
            .collect()
    }

    /// Number of tracked questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for BoxManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Transition rule between box indices.
fn next_box(current: usize, correct: bool, last: usize) -> usize {
    match (correct, current) {
        (true, MISSED) => CORRECT_ONCE,
        (true, i) => (i + 1).min(last),
        (false, _) => MISSED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::UNIX_EPOCH + TimeDelta::days(1) + TimeDelta::seconds(secs)
    }

    /// Every tracked question is in exactly the box its location says.
    fn assert_consistent(m: &BoxManager) {
        for (id, idx) in &m.location {
            for (i, b) in m.boxes().iter().enumerate() {
                assert_eq!(b.contains(*id), i == *idx, "question {id} in box {i}");
            }
        }
        let total: usize = m.boxes().iter().map(ReviewBox::len).sum();
        assert_eq!(total, m.len());
    }

    #[test]
    fn boxes_in_priority_order() {
        let m = BoxManager::new();
        let names: Vec<_> = m.boxes().iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            vec![
                "Missed Questions",
                "Unasked Questions",
                "Correctly Answered Once",
                "Correctly Answered Twice",
                "Known Questions",
            ]
        );
        assert_eq!(m.boxes()[MISSED].interval(), Interval::seconds(60));
        assert_eq!(m.boxes()[KNOWN].interval(), Interval::Never);
    }

    #[test]
    fn admit_places_in_unasked_once() {
        let mut m = BoxManager::new();
        let q = Question::short_answer("2 + 2?", "4", false);
        let id = q.id();
        assert!(m.admit(q.clone()));
        assert!(!m.admit(q));
        assert_eq!(m.location(id), Some(UNASKED));
        assert_eq!(m.boxes()[UNASKED].len(), 1);
        assert_consistent(&m);
    }

    #[test]
    fn transition_table() {
        assert_eq!(next_box(MISSED, true, KNOWN), CORRECT_ONCE);
        assert_eq!(next_box(UNASKED, true, KNOWN), CORRECT_ONCE);
        assert_eq!(next_box(CORRECT_ONCE, true, KNOWN), CORRECT_TWICE);
        assert_eq!(next_box(CORRECT_TWICE, true, KNOWN), KNOWN);
        assert_eq!(next_box(KNOWN, true, KNOWN), KNOWN);
        for i in MISSED..=KNOWN {
            assert_eq!(next_box(i, false, KNOWN), MISSED);
        }
    }

    #[test]
    fn missed_then_correct_skips_unasked() {
        let mut m = BoxManager::new();
        let q = Question::short_answer("2 + 2?", "4", false);
        let id = q.id();
        m.admit(q);

        let placement = m.move_question(id, false).unwrap();
        assert_eq!((placement.from, placement.to), (UNASKED, MISSED));

        let placement = m.move_question(id, true).unwrap();
        assert_eq!((placement.from, placement.to), (MISSED, CORRECT_ONCE));
        assert_consistent(&m);
    }

    #[test]
    fn saturates_at_known() {
        let mut m = BoxManager::new();
        let q = Question::true_false("Rust has a borrow checker", true, None);
        let id = q.id();
        m.admit(q);

        for expected in [CORRECT_ONCE, CORRECT_TWICE, KNOWN, KNOWN, KNOWN] {
            m.move_question(id, true).unwrap();
            assert_eq!(m.location(id), Some(expected));
            assert_consistent(&m);
        }

        m.move_question(id, false).unwrap();
        assert_eq!(m.location(id), Some(MISSED));
        assert_consistent(&m);
    }

    #[test]
    fn move_reports_counts() {
        let mut m = BoxManager::new();
        let a = Question::short_answer("a", "a", false);
        let b = Question::short_answer("b", "b", false);
        let id = a.id();
        m.admit_all([a, b]);

        let placement = m.move_question(id, true).unwrap();
        let counts: Vec<_> = placement.counts.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![0, 1, 1, 0, 0]);
    }

    #[test]
    fn untracked_move_is_an_error() {
        let mut m = BoxManager::new();
        let err = m.move_question(QuestionId::new(), true).unwrap_err();
        assert!(matches!(err, QuizError::UntrackedQuestion(_)));
        assert!(m.present(QuestionId::new(), at(0)).is_err());
    }

    #[test]
    fn next_follows_box_priority() {
        let mut m = BoxManager::new();
        let missed = Question::short_answer("missed", "a", false);
        let unasked = Question::short_answer("unasked", "a", false);
        let (missed_id, unasked_id) = (missed.id(), unasked.id());
        m.admit_all([missed, unasked]);

        m.present(missed_id, at(0)).unwrap();
        m.move_question(missed_id, false).unwrap();

        // Missed is still resting, so Unasked supplies the question.
        assert_eq!(m.next(at(30)), Some(unasked_id));
        // Once rested, Missed outranks Unasked.
        assert_eq!(m.next(at(60)), Some(missed_id));
    }

    #[test]
    fn known_box_is_never_offered() {
        let mut m = BoxManager::new();
        let q = Question::short_answer("q", "a", false);
        let id = q.id();
        m.admit(q);
        for _ in 0..3 {
            m.move_question(id, true).unwrap();
        }
        assert_eq!(m.location(id), Some(KNOWN));
        assert_eq!(m.next(at(1_000_000_000)), None);
    }

    #[test]
    fn single_question_walkthrough() {
        let mut m = BoxManager::new();
        let q = Question::short_answer("What is 2 + 2?", "4", false);
        let id = q.id();
        m.admit(q);

        assert_eq!(m.next(at(0)), Some(id));
        m.present(id, at(0)).unwrap();
        let correct = m.question(id).unwrap().check("4").unwrap();
        assert!(correct);
        m.move_question(id, correct).unwrap();
        assert_eq!(m.location(id), Some(CORRECT_ONCE));

        assert_eq!(m.next(at(1)), None);
        assert_eq!(m.next(at(179)), None);
        assert_eq!(m.next(at(180)), Some(id));
    }
}
