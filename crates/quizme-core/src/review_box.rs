//! A single Leitner box: a set of question ids sharing one re-ask interval.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::question::{Question, QuestionId};

/// Minimum time a question must rest after being presented before its box
/// will offer it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    After(TimeDelta),
    /// Questions in this box are never offered.
    Never,
}

impl Interval {
    pub fn seconds(secs: i64) -> Self {
        Interval::After(TimeDelta::seconds(secs))
    }

    /// Whether a question last presented at `last` has rested long enough.
    pub fn is_elapsed(&self, last: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Interval::After(min) => now.signed_duration_since(last) >= *min,
            Interval::Never => false,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::After(d) => write!(f, "{}s", d.num_seconds()),
            Interval::Never => write!(f, "never"),
        }
    }
}

/// A named bucket of questions. Holds membership only; question data lives in
/// the [`BoxManager`](crate::manager::BoxManager).
#[derive(Debug, Clone)]
pub struct ReviewBox {
    name: String,
    interval: Interval,
    // Insertion order is kept so equal timestamps resolve first-in.
    members: Vec<QuestionId>,
}

impl ReviewBox {
    pub fn new(name: impl Into<String>, interval: Interval) -> Self {
        Self {
            name: name.into(),
            interval,
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Add a question. Adding an existing member is a no-op; returns whether
    /// the question was newly added.
    pub fn add(&mut self, id: QuestionId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.members.push(id);
        true
    }

    /// Remove a question; returns whether it was a member.
    pub fn remove(&mut self, id: QuestionId) -> bool {
        match self.members.iter().position(|m| *m == id) {
            Some(pos) => {
                self.members.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Pick the next question to ask from this box.
    ///
    /// A member is eligible once its rest interval has elapsed. Among eligible
    /// members the one presented most recently wins, not the most overdue.
    /// Members missing from `questions` are ignored.
    pub fn select(
        &self,
        questions: &HashMap<QuestionId, Question>,
        now: DateTime<Utc>,
    ) -> Option<QuestionId> {
        let mut best: Option<(QuestionId, DateTime<Utc>)> = None;
        for id in &self.members {
            let Some(question) = questions.get(id) else {
                continue;
            };
            let last = question.last_presented();
            if !self.interval.is_elapsed(last, now) {
                continue;
            }
            match best {
                Some((_, best_last)) if best_last >= last => {}
                _ => best = Some((*id, last)),
            }
        }
        best.map(|(id, _)| id)
    }
}

impl fmt::Display for ReviewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Box(name='{}', questions_count={})",
            self.name,
            self.members.len()
        )
    }
}
