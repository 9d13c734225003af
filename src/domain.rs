//! Domain models: questions, submitted answers and stored response records.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A multiple-choice question shown next to a figure.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
  pub prompt: String,
  pub choices: Vec<String>,
  /// `None` for free-response style figures without a right answer.
  #[serde(default)]
  pub correct: Option<String>,
}

impl Question {
  /// Grade a submitted label. `None` when the question has no correct answer.
  pub fn grade(&self, choice: &str) -> Option<bool> {
    self.correct.as_deref().map(|c| c == choice)
  }
}

/// An answer ready to be appended to the response store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewResponse {
  pub ts: DateTime<Utc>,
  pub participant_id: String,
  pub figure: String,
  pub question: String,
  pub choice: String,
  pub correct_choice: Option<String>,
  pub is_correct: Option<bool>,
}

impl NewResponse {
  /// Stored timestamp form, e.g. `2026-01-02T03:04:05.123456+00:00`.
  /// Fixed width, so text ordering matches time ordering.
  pub fn ts_string(&self) -> String {
    self.ts.to_rfc3339_opts(SecondsFormat::Micros, false)
  }

  pub fn is_correct_flag(&self) -> Option<i32> {
    self.is_correct.map(i32::from)
  }
}

/// A response as read back from storage.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ResponseRecord {
  pub id: i64,
  pub ts: String,
  pub participant_id: String,
  pub figure: String,
  pub question: String,
  pub choice: String,
  pub correct_choice: Option<String>,
  pub is_correct: Option<bool>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn question(correct: Option<&str>) -> Question {
    Question {
      prompt: "Which?".into(),
      choices: vec!["A".into(), "B".into()],
      correct: correct.map(Into::into),
    }
  }

  #[test]
  fn grading_follows_correct_choice() {
    let q = question(Some("B"));
    assert_eq!(q.grade("B"), Some(true));
    assert_eq!(q.grade("A"), Some(false));
    assert_eq!(q.grade(""), Some(false));
    assert_eq!(question(None).grade("A"), None);
  }

  #[test]
  fn timestamp_is_fixed_width_utc() {
    let r = NewResponse {
      ts: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
      participant_id: "p".into(),
      figure: "f.png".into(),
      question: "q".into(),
      choice: "c".into(),
      correct_choice: None,
      is_correct: None,
    };
    assert_eq!(r.ts_string(), "2026-01-02T03:04:05.000000+00:00");
    assert_eq!(r.is_correct_flag(), None);
  }
}
