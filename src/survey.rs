//! Survey progression: participant session state and its transitions.
//!
//!   - `start`   : fresh participant id, index 0, optional shuffled figure order
//!   - `current` : question + progress for the current index, or completion
//!   - `submit`  : grade + record the answer, advance the index
//!
//! Once `current_index >= total` the session is complete and submissions are no-ops.

use chrono::{DateTime, Utc};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::catalog::QuestionCatalog;
use crate::domain::{NewResponse, Question};
use crate::figures::FigureStore;
use crate::state::AppState;
use crate::storage::StorageError;

/// Per-participant progress, carried in the signed session cookie.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
  pub participant_id: String,
  pub current_index: usize,
  /// Present only in shuffle mode.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub figure_order: Option<Vec<String>>,
}

impl SessionState {
  pub fn start<R: Rng + ?Sized>(mut figures: Vec<String>, shuffle: bool, rng: &mut R) -> Self {
    let figure_order = if shuffle && !figures.is_empty() {
      figures.shuffle(rng);
      Some(figures)
    } else {
      None
    };
    Self { participant_id: new_participant_id(rng), current_index: 0, figure_order }
  }

  /// The order this participant walks through: the stored permutation, or a fresh listing.
  pub fn figures(&self, store: &FigureStore) -> Vec<String> {
    match &self.figure_order {
      Some(order) if !order.is_empty() => order.clone(),
      _ => store.list(),
    }
  }
}

/// 8 random bytes, hex-encoded.
pub fn new_participant_id<R: Rng + ?Sized>(rng: &mut R) -> String {
  let mut bytes = [0u8; 8];
  rng.fill(&mut bytes[..]);
  hex::encode(bytes)
}

/// `floor(index / total * 100)`; an empty survey counts as finished.
pub fn progress_percent(index: usize, total: usize) -> u32 {
  if total == 0 {
    return 100;
  }
  (index.min(total) * 100 / total) as u32
}

#[derive(Debug, PartialEq)]
pub struct QuestionView<'a> {
  pub figure: &'a str,
  pub question: &'a Question,
  pub index: usize,
  pub total: usize,
  pub percent: u32,
}

#[derive(Debug, PartialEq)]
pub enum SurveyStep<'a> {
  Question(QuestionView<'a>),
  Complete,
}

pub fn current_step<'a>(session: &SessionState, order: &'a [String], catalog: &'a QuestionCatalog) -> SurveyStep<'a> {
  let total = order.len();
  match order.get(session.current_index) {
    Some(figure) => SurveyStep::Question(QuestionView {
      figure,
      question: catalog.lookup(figure),
      index: session.current_index,
      total,
      percent: progress_percent(session.current_index, total),
    }),
    None => SurveyStep::Complete,
  }
}

/// Grade `choice` against the current question and advance.
/// Returns None (and leaves the session untouched) when the survey is already complete.
pub fn submit_answer(
  session: &mut SessionState,
  order: &[String],
  catalog: &QuestionCatalog,
  choice: &str,
  now: DateTime<Utc>,
) -> Option<NewResponse> {
  let figure = order.get(session.current_index)?;
  let question = catalog.lookup(figure);
  let response = NewResponse {
    ts: now,
    participant_id: session.participant_id.clone(),
    figure: figure.clone(),
    question: question.prompt.clone(),
    choice: choice.to_string(),
    correct_choice: question.correct.clone(),
    is_correct: question.grade(choice),
  };
  session.current_index += 1;
  Some(response)
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
  Recorded,
  AlreadyComplete,
}

/// Start a participant session using the app's figure store and shuffle policy.
#[instrument(level = "info", skip(state))]
pub fn start_session(state: &AppState) -> SessionState {
  let figures = state.figures.list();
  let total = figures.len();
  let session = SessionState::start(figures, state.shuffle, &mut rand::thread_rng());
  info!(target: "survey", participant = %session.participant_id, total, shuffle = state.shuffle, "Survey started");
  session
}

/// Continue an existing session, or start over when the cookie was missing/invalid.
pub fn resume_or_start(state: &AppState, existing: Option<SessionState>) -> SessionState {
  match existing {
    Some(s) => s,
    None => {
      debug!(target: "survey", "No usable session; starting a fresh participant");
      start_session(state)
    }
  }
}

/// Persist the answer for the current figure. The session only advances once the write succeeded.
#[instrument(level = "info", skip(state, session, choice), fields(participant = %session.participant_id, index = session.current_index, choice_len = choice.len()))]
pub async fn record_answer(state: &AppState, session: &mut SessionState, choice: &str) -> Result<SubmitOutcome, StorageError> {
  let order = session.figures(&state.figures);
  let mut next = session.clone();
  let Some(response) = submit_answer(&mut next, &order, &state.catalog, choice, Utc::now()) else {
    debug!(target: "survey", participant = %session.participant_id, "Submission after completion ignored");
    return Ok(SubmitOutcome::AlreadyComplete);
  };

  state.store.insert_response(&response).await?;
  *session = next;
  info!(target: "survey", participant = %session.participant_id, figure = %response.figure, is_correct = ?response.is_correct, index = session.current_index, total = order.len(), "Answer recorded");
  Ok(SubmitOutcome::Recorded)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  fn figures(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Figure{i:02}.png")).collect()
  }

  fn catalog() -> QuestionCatalog {
    QuestionCatalog::new(
      vec![
        ("Figure00.png".to_string(), Question { prompt: "First?".into(), choices: vec!["Yes".into(), "No".into()], correct: Some("Yes".into()) }),
        ("Figure01.png".to_string(), Question { prompt: "Second?".into(), choices: vec!["Up".into(), "Down".into()], correct: Some("Down".into()) }),
      ],
      crate::seeds::placeholder_question(),
    )
  }

  #[test]
  fn start_without_shuffle_keeps_natural_order() {
    let mut rng = StdRng::seed_from_u64(7);
    let s = SessionState::start(figures(3), false, &mut rng);
    assert_eq!(s.current_index, 0);
    assert_eq!(s.figure_order, None);
    assert_eq!(s.participant_id.len(), 16);
    assert!(s.participant_id.chars().all(|c| c.is_ascii_hexdigit()));
  }

  #[test]
  fn start_with_shuffle_stores_a_permutation() {
    let mut rng = StdRng::seed_from_u64(42);
    let s = SessionState::start(figures(12), true, &mut rng);
    let mut order = s.figure_order.clone().unwrap();
    order.sort();
    assert_eq!(order, figures(12));

    let other = SessionState::start(figures(12), true, &mut rng);
    assert_ne!(s.participant_id, other.participant_id);
  }

  #[test]
  fn progress_is_monotonic_and_below_100() {
    for n in 1..=25 {
      let values: Vec<u32> = (0..n).map(|i| progress_percent(i, n)).collect();
      assert_eq!(values[0], 0);
      assert!(values.windows(2).all(|w| w[0] <= w[1]));
      assert!(values.iter().all(|v| *v < 100));
    }
    assert_eq!(progress_percent(1, 3), 33);
    assert_eq!(progress_percent(2, 3), 66);
    assert_eq!(progress_percent(0, 0), 100);
  }

  #[test]
  fn current_step_resolves_question_and_fallback() {
    let order = vec!["Figure01.png".to_string(), "Mystery.png".to_string()];
    let catalog = catalog();
    let mut s = SessionState { participant_id: "abc".into(), current_index: 0, figure_order: None };

    match current_step(&s, &order, &catalog) {
      SurveyStep::Question(v) => {
        assert_eq!(v.figure, "Figure01.png");
        assert_eq!(v.question.prompt, "Second?");
        assert_eq!((v.index, v.total, v.percent), (0, 2, 0));
      }
      SurveyStep::Complete => panic!("expected a question"),
    }

    s.current_index = 1;
    match current_step(&s, &order, &catalog) {
      SurveyStep::Question(v) => {
        assert_eq!(v.question.correct, None);
        assert_eq!(v.percent, 50);
      }
      SurveyStep::Complete => panic!("expected a question"),
    }

    s.current_index = 2;
    assert_eq!(current_step(&s, &order, &catalog), SurveyStep::Complete);
  }

  #[test]
  fn empty_survey_is_immediately_complete() {
    let s = SessionState::start(Vec::new(), true, &mut StdRng::seed_from_u64(1));
    assert_eq!(s.figure_order, None);
    assert_eq!(current_step(&s, &[], &catalog()), SurveyStep::Complete);
  }

  #[test]
  fn submit_grades_and_advances_until_complete() {
    let order = vec!["Figure00.png".to_string(), "Figure01.png".to_string(), "Mystery.png".to_string()];
    let catalog = catalog();
    let mut s = SessionState { participant_id: "p1".into(), current_index: 0, figure_order: None };
    let now = Utc::now();

    let r = submit_answer(&mut s, &order, &catalog, "Yes", now).unwrap();
    assert_eq!((r.figure.as_str(), r.is_correct), ("Figure00.png", Some(true)));
    assert_eq!(r.correct_choice.as_deref(), Some("Yes"));
    assert_eq!(r.question, "First?");

    let r = submit_answer(&mut s, &order, &catalog, "Up", now).unwrap();
    assert_eq!(r.is_correct, Some(false));

    let r = submit_answer(&mut s, &order, &catalog, "A", now).unwrap();
    assert_eq!(r.is_correct, None);
    assert_eq!(r.correct_choice, None);

    assert_eq!(s.current_index, 3);
    assert!(submit_answer(&mut s, &order, &catalog, "Yes", now).is_none());
    assert_eq!(s.current_index, 3);
  }

  #[test]
  fn empty_choice_is_graded_not_rejected() {
    let order = vec!["Figure00.png".to_string()];
    let mut s = SessionState { participant_id: "p".into(), current_index: 0, figure_order: None };
    let r = submit_answer(&mut s, &order, &catalog(), "", Utc::now()).unwrap();
    assert_eq!(r.choice, "");
    assert_eq!(r.is_correct, Some(false));
  }

  #[test]
  fn stored_order_wins_over_listing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.png"), b"x").unwrap();
    let store = FigureStore::new(dir.path());

    let shuffled = SessionState { participant_id: "p".into(), current_index: 0, figure_order: Some(vec!["z.png".into()]) };
    assert_eq!(shuffled.figures(&store), vec!["z.png"]);

    let plain = SessionState { figure_order: None, ..shuffled };
    assert_eq!(plain.figures(&store), vec!["a.png"]);
  }
}
