//! quizme configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizme configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizmeConfig {
    /// Question file used when `--questions` is not given.
    pub questions: Option<PathBuf>,
    /// Print every box's population after each scored answer.
    pub show_box_counts: bool,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not rescanned, so a value containing `${...}` is
/// kept literally.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizme.toml` in the current directory
/// 2. `~/.config/quizme/config.toml`
///
/// Environment variable override: `QUIZME_QUESTIONS`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizmeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizme.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizmeConfig::default(),
    };

    if let Ok(questions) = std::env::var("QUIZME_QUESTIONS") {
        config.questions = Some(PathBuf::from(questions));
    }

    config.questions = config
        .questions
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));

    Ok(config)
}

/// Parse a TOML string into a config (useful for testing).
pub fn parse_config_str(content: &str) -> Result<QuizmeConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizme"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZME_TEST_VAR", "decks");
        assert_eq!(resolve_env_vars("${_QUIZME_TEST_VAR}"), "decks");
        assert_eq!(
            resolve_env_vars("/home/${_QUIZME_TEST_VAR}/geo.json"),
            "/home/decks/geo.json"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZME_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_rescan_values() {
        std::env::set_var("_QUIZME_SELF_REF", "${_QUIZME_SELF_REF}");
        assert_eq!(
            resolve_env_vars("${_QUIZME_SELF_REF}/q.json"),
            "${_QUIZME_SELF_REF}/q.json"
        );
        std::env::remove_var("_QUIZME_SELF_REF");

        std::env::set_var("_QUIZME_A", "a");
        std::env::set_var("_QUIZME_B", "b");
        assert_eq!(resolve_env_vars("${_QUIZME_A}-${_QUIZME_B}"), "a-b");
        std::env::remove_var("_QUIZME_A");
        std::env::remove_var("_QUIZME_B");
    }

    #[test]
    fn default_config() {
        let config = QuizmeConfig::default();
        assert!(config.questions.is_none());
        assert!(!config.show_box_counts);
    }

    #[test]
    fn parse_full_config() {
        let config = parse_config_str(
            r#"
questions = "questions/example.json"
show_box_counts = true
"#,
        )
        .unwrap();
        assert_eq!(
            config.questions,
            Some(PathBuf::from("questions/example.json"))
        );
        assert!(config.show_box_counts);
    }

    #[test]
    fn parse_empty_config() {
        assert_eq!(parse_config_str("").unwrap(), QuizmeConfig::default());
    }

    #[test]
    fn parse_bad_config() {
        assert!(parse_config_str("show_box_counts = \"yes\"").is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizme.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizme.toml");
        std::fs::write(&path, "show_box_counts = true\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(config.show_box_counts);
    }
}
