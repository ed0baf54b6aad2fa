//! The interactive quiz session.
//!
//! One turn: ask the box manager for the next question, present it, read an
//! answer, score it, and move the question. The session ends when no
//! question is eligible or the user enters the quit sentinel.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::clock::Clock;
use crate::error::QuizError;
use crate::manager::{BoxCount, BoxManager};
use crate::question::QuestionId;

/// Input that ends the session, compared verbatim before any parsing.
pub const QUIT_SENTINEL: &str = "q";

/// Session options.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Print every box's population after each move.
    pub show_box_counts: bool,
}

/// Totals for a finished session.
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub asked: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub invalid: usize,
    /// Whether the session ended on the quit sentinel (or end of input)
    /// rather than by running out of eligible questions.
    pub quit: bool,
    pub final_counts: Vec<BoxCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    AwaitingAnswer(QuestionId),
    Done,
}

/// Drives one quiz session over a box manager.
pub struct Session<C: Clock> {
    manager: BoxManager,
    clock: C,
    config: SessionConfig,
}

impl<C: Clock> Session<C> {
    pub fn new(manager: BoxManager, clock: C, config: SessionConfig) -> Self {
        Self {
            manager,
            clock,
            config,
        }
    }

    pub fn manager(&self) -> &BoxManager {
        &self.manager
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run the session until it is exhausted or the user quits.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let mut state = State::Running;

        writeln!(output, "Type '{QUIT_SENTINEL}' at any time to quit the session.")?;

        while state != State::Done {
            state = match state {
                State::Running => match self.manager.next(self.clock.now()) {
                    Some(id) => State::AwaitingAnswer(id),
                    None => {
                        writeln!(output, "All questions have been reviewed. Session complete!")?;
                        State::Done
                    }
                },
                State::AwaitingAnswer(id) => self.turn(id, input, output, &mut summary)?,
                State::Done => State::Done,
            };
        }

        writeln!(output, "Thank you, goodbye!")?;
        output.flush()?;

        summary.final_counts = self.manager.counts();
        Ok(summary)
    }

    fn turn<R: BufRead, W: Write>(
        &mut self,
        id: QuestionId,
        input: &mut R,
        output: &mut W,
        summary: &mut SessionSummary,
    ) -> Result<State> {
        let text = self.manager.present(id, self.clock.now())?;
        writeln!(output, "{text}")?;
        write!(output, "Answer: ")?;
        output.flush()?;

        let Some(answer) = read_answer(input)? else {
            tracing::debug!("input closed, ending session");
            writeln!(output)?;
            summary.quit = true;
            return Ok(State::Done);
        };
        if answer == QUIT_SENTINEL {
            summary.quit = true;
            return Ok(State::Done);
        }

        let question = self
            .manager
            .question(id)
            .ok_or(QuizError::UntrackedQuestion(id))?;
        let correct = match question.check(&answer) {
            Ok(correct) => correct,
            Err(e) if e.is_recoverable() => {
                tracing::debug!(%id, "unrecognized answer: {e}");
                writeln!(output, "Invalid input: Answer must be 'True' or 'False'.")?;
                summary.invalid += 1;
                return Ok(State::Running);
            }
            Err(e) => return Err(e.into()),
        };

        summary.asked += 1;
        if correct {
            summary.correct += 1;
            writeln!(output, "Correct!")?;
        } else {
            summary.incorrect += 1;
            writeln!(output, "{}", question.feedback())?;
        }

        let placement = self.manager.move_question(id, correct)?;
        if self.config.show_box_counts {
            for b in self.manager.boxes() {
                writeln!(output, "{b}")?;
            }
        }
        tracing::debug!(from = placement.from, to = placement.to, "turn complete");

        Ok(State::Running)
    }
}

/// Read one line of input, stripping only the line terminator. `None` at end
/// of input.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read answer")?;
    if read == 0 {
        return Ok(None);
    }
    let trimmed = line.strip_suffix('\n').unwrap_or(&line);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    Ok(Some(trimmed.to_string()))
}
