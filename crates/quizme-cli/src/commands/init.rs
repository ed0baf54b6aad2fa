//! The `quizme init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizme.toml
    if std::path::Path::new("quizme.toml").exists() {
        println!("quizme.toml already exists, skipping.");
    } else {
        std::fs::write("quizme.toml", SAMPLE_CONFIG)?;
        println!("Created quizme.toml");
    }

    // Create example question file
    std::fs::create_dir_all("questions")?;
    let example_path = std::path::Path::new("questions/example.json");
    if example_path.exists() {
        println!("questions/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUESTIONS)?;
        println!("Created questions/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to questions/example.json");
    println!("  2. Run: quizme validate --questions questions/example.json");
    println!("  3. Run: quizme run <your name>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizme configuration

# Question file used when --questions is not given.
questions = "questions/example.json"

# Print every box's population after each answer.
show_box_counts = false
"#;

const EXAMPLE_QUESTIONS: &str = r#"[
  {
    "type": "shortanswer",
    "question": "What is the capital of France?",
    "correct_answer": "Paris"
  },
  {
    "type": "truefalse",
    "question": "The Pacific is the largest ocean on Earth.",
    "correct_answer": true,
    "explanation": "It covers about a third of the planet's surface."
  },
  {
    "type": "shortanswer",
    "question": "What is the chemical symbol for sodium?",
    "correct_answer": "Na",
    "case_sensitive": true
  },
  {
    "type": "truefalse",
    "question": "Lightning never strikes the same place twice.",
    "correct_answer": false,
    "explanation": "Tall structures are struck many times a year."
  }
]
"#;
