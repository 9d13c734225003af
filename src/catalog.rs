//! Immutable figure → question lookup, built once at startup.

use std::collections::HashMap;

use tracing::info;

use crate::config::SurveyConfig;
use crate::domain::Question;
use crate::seeds::{builtin_questions, placeholder_question};

#[derive(Clone, Debug)]
pub struct QuestionCatalog {
  by_figure: HashMap<String, Question>,
  fallback: Question,
}

impl QuestionCatalog {
  pub fn new(entries: impl IntoIterator<Item = (String, Question)>, fallback: Question) -> Self {
    Self { by_figure: entries.into_iter().collect(), fallback }
  }

  pub fn builtin() -> Self {
    Self::new(builtin_questions(), placeholder_question())
  }

  pub fn from_config(cfg: SurveyConfig) -> Self {
    let fallback = cfg.default_question.unwrap_or_else(placeholder_question);
    let catalog = Self::new(cfg.questions.into_iter().map(|q| q.into_entry()), fallback);
    info!(target: "survey", questions = catalog.len(), "Question catalog ready");
    catalog
  }

  /// Question for a figure, or the placeholder when the figure is unknown.
  pub fn lookup(&self, figure: &str) -> &Question {
    self.by_figure.get(figure).unwrap_or(&self.fallback)
  }

  pub fn contains(&self, figure: &str) -> bool {
    self.by_figure.contains_key(figure)
  }

  pub fn len(&self) -> usize {
    self.by_figure.len()
  }
}
