//! quizme-core — Leitner-box scheduling, question model, and the session loop.
//!
//! This crate defines the question variants, the fixed sequence of review
//! boxes, the promotion/demotion rule that moves questions between them, and
//! the interactive loop that drives a quiz session.

pub mod clock;
pub mod config;
pub mod error;
pub mod manager;
pub mod parser;
pub mod question;
pub mod review_box;
pub mod session;

pub use error::QuizError;
pub use manager::BoxManager;
pub use question::{Question, QuestionId, QuestionKind};
pub use review_box::{Interval, ReviewBox};
