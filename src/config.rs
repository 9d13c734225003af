//! Runtime settings (environment) and the survey catalog file (TOML).
//!
//! Environment variables:
//!   PORT                : u16 (default 8080)
//!   SECRET_KEY          : session signing secret (insecure dev default if unset)
//!   DATABASE_URL        : selects the PostgreSQL backend ("sqlite:..." URLs stay embedded)
//!   SQLITE_PATH         : embedded database file (default "responses.db")
//!   FIGURES_DIR         : directory holding the figure images (default "figures")
//!   SURVEY_CONFIG_PATH  : optional TOML catalog, see `SurveyConfig`
//!   SURVEY_SHUFFLE      : "true"/"false", overrides the catalog's `shuffle`

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::Question;

pub const DEV_SECRET_KEY: &str = "dev-secret-change-me";

/// Where responses are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
  /// `sqlite:` URL, e.g. `sqlite:responses.db`.
  Sqlite { url: String },
  Postgres { url: String },
}

#[derive(Clone, Debug)]
pub struct Settings {
  pub port: u16,
  pub secret_key: String,
  pub storage: StorageBackend,
  pub figures_dir: PathBuf,
  pub survey_config_path: Option<PathBuf>,
  pub shuffle_override: Option<bool>,
}

impl Settings {
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Resolve settings through an arbitrary lookup (the process env in production).
  pub fn from_lookup<F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let secret_key = non_empty("SECRET_KEY").unwrap_or_else(|| {
      warn!(target: "figure_survey", "SECRET_KEY not set; using insecure development default");
      DEV_SECRET_KEY.to_string()
    });

    let storage = match non_empty("DATABASE_URL") {
      Some(url) if url.starts_with("sqlite:") => StorageBackend::Sqlite { url },
      Some(url) => StorageBackend::Postgres { url },
      None => StorageBackend::Sqlite {
        url: format!("sqlite:{}", non_empty("SQLITE_PATH").unwrap_or_else(|| "responses.db".to_string())),
      },
    };

    let shuffle_override = non_empty("SURVEY_SHUFFLE").and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
      "1" | "true" | "yes" | "on" => Some(true),
      "0" | "false" | "no" | "off" => Some(false),
      other => {
        warn!(target: "figure_survey", value = %other, "Ignoring unrecognized SURVEY_SHUFFLE");
        None
      }
    });

    Self {
      port: non_empty("PORT").and_then(|p| p.parse::<u16>().ok()).unwrap_or(8080),
      secret_key,
      storage,
      figures_dir: non_empty("FIGURES_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("figures")),
      survey_config_path: non_empty("SURVEY_CONFIG_PATH").map(PathBuf::from),
      shuffle_override,
    }
  }
}

/// Survey definition accepted in TOML:
///
/// ```toml
/// shuffle = false
///
/// [default_question]
/// prompt = "Which option best answers the question?"
/// choices = ["A", "B", "C", "D"]
///
/// [[questions]]
/// figure = "Figure1.png"
/// prompt = "Which bar is tallest?"
/// choices = ["Red", "Blue"]
/// correct = "Blue"
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct SurveyConfig {
  #[serde(default = "default_shuffle")]
  pub shuffle: bool,
  #[serde(default)]
  pub default_question: Option<Question>,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

fn default_shuffle() -> bool { true }

#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  pub figure: String,
  pub prompt: String,
  pub choices: Vec<String>,
  #[serde(default)]
  pub correct: Option<String>,
}

impl QuestionCfg {
  pub fn into_entry(self) -> (String, Question) {
    (self.figure, Question { prompt: self.prompt, choices: self.choices, correct: self.correct })
  }
}

pub fn parse_survey_config(raw: &str) -> Result<SurveyConfig, toml::de::Error> {
  toml::from_str::<SurveyConfig>(raw)
}

/// Load the catalog file. On any IO/parse error, returns None and the built-in catalog applies.
pub fn load_survey_config(path: &Path) -> Option<SurveyConfig> {
  let shown = path.display().to_string();
  match std::fs::read_to_string(path) {
    Ok(s) => match parse_survey_config(&s) {
      Ok(cfg) => {
        info!(target: "figure_survey", path = %shown, questions = cfg.questions.len(), shuffle = cfg.shuffle, "Loaded survey config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "figure_survey", path = %shown, error = %e, "Failed to parse survey config");
        None
      }
    },
    Err(e) => {
      error!(target: "figure_survey", path = %shown, error = %e, "Failed to read survey config file");
      None
    }
  }
}
