//! The `quizme validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizme_core::parser;
use quizme_core::question::QuestionKind;

pub fn execute(questions_path: PathBuf) -> Result<()> {
    let records = parser::load_question_file(&questions_path)?;
    let ingested = parser::build_questions(&records);

    println!(
        "Question file: {} ({} records, {} questions)",
        questions_path.display(),
        records.len(),
        ingested.questions.len()
    );

    for skipped in &ingested.skipped {
        println!("  [#{}] SKIPPED: {}", skipped.index + 1, skipped.error);
    }

    let warnings = parser::validate_questions(&ingested);
    for w in &warnings {
        println!("  [#{}] WARNING: {}", w.index + 1, w.message);
    }

    let short_answer = ingested
        .questions
        .iter()
        .filter(|q| matches!(q.kind(), QuestionKind::ShortAnswer { .. }))
        .count();
    let true_false = ingested.questions.len() - short_answer;

    let mut table = Table::new();
    table.set_header(vec!["Type", "Questions"]);
    table.add_row(vec![Cell::new("Short Answer"), Cell::new(short_answer)]);
    table.add_row(vec![Cell::new("True/False"), Cell::new(true_false)]);
    println!("{table}");

    let problems = ingested.skipped.len() + warnings.len();
    if problems == 0 {
        println!("All questions valid.");
    } else {
        println!("\n{problems} problem(s) found.");
    }

    Ok(())
}
