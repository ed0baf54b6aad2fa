//! quizme CLI — adaptive spaced-repetition quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizme", version, about = "Adaptive spaced-repetition quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an adaptive quiz session
    Run {
        /// Your name
        name: String,

        /// Path to JSON file containing questions
        #[arg(long)]
        questions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print box populations after every answer
        #[arg(long)]
        show_box_counts: bool,
    },

    /// Check a question file for malformed or suspicious questions
    Validate {
        /// Path to JSON file containing questions
        #[arg(long)]
        questions: PathBuf,
    },

    /// Create starter config and example question file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizme_core=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            name,
            questions,
            config,
            show_box_counts,
        } => commands::run::execute(name, questions, config, show_box_counts),
        Commands::Validate { questions } => commands::validate::execute(questions),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
