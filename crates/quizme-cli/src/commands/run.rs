//! The `quizme run` command.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizme_core::clock::SystemClock;
use quizme_core::config::load_config_from;
use quizme_core::manager::BoxManager;
use quizme_core::parser;
use quizme_core::session::{Session, SessionConfig, SessionSummary};

pub fn execute(
    name: String,
    questions_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    show_box_counts: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let questions_path = questions_path.or(config.questions).context(
        "no question file given; pass --questions or set `questions` in quizme.toml",
    )?;

    tracing::info!(path = %questions_path.display(), "loading questions");
    let records = parser::load_question_file(&questions_path)
        .context("Exiting due to error in loading questions")?;
    let ingested = parser::build_questions(&records);

    for skipped in &ingested.skipped {
        eprintln!(
            "{}. Skipping question #{}.",
            capitalize(&skipped.error.to_string()),
            skipped.index + 1
        );
    }

    println!("Welcome, {name}! Let's start your adaptive quiz session.");

    let mut manager = BoxManager::new();
    manager.admit_all(ingested.questions);

    let session_config = SessionConfig {
        show_box_counts: show_box_counts || config.show_box_counts,
    };
    let mut session = Session::new(manager, SystemClock, session_config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    let summary = session.run(&mut input, &mut output)?;

    print_summary(&summary);

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn print_summary(summary: &SessionSummary) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Box", "Questions"]);
    for count in &summary.final_counts {
        table.add_row(vec![Cell::new(&count.name), Cell::new(count.count)]);
    }

    let accuracy = if summary.asked == 0 {
        0.0
    } else {
        summary.correct as f64 / summary.asked as f64 * 100.0
    };
    eprintln!(
        "\nAnswered {} ({} correct, {} incorrect, {:.1}%), {} invalid",
        summary.asked, summary.correct, summary.incorrect, accuracy, summary.invalid
    );
    eprintln!("{table}");
}
