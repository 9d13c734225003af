//! Stats aggregation: pivot flat response rows into a participant × figure
//! answer matrix plus a per-figure accuracy summary. Recomputed on every call.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::QuestionCatalog;
use crate::domain::ResponseRecord;

/// Shown for figures a participant has not answered.
pub const UNANSWERED: &str = "—";

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ParticipantRow {
  /// First 8 characters of the participant id.
  pub participant: String,
  /// First response time, `YYYY-MM-DD HH:MM:SS`.
  pub started: String,
  /// One entry per figure, aligned with `StatsReport::figures`.
  pub answers: Vec<String>,
  pub correct: u32,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FigureSummary {
  pub figure: String,
  pub question: String,
  pub correct: u32,
  pub total: u32,
  /// Percent rounded to one decimal; `None` when nobody answered.
  pub accuracy: Option<f64>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StatsReport {
  pub figures: Vec<String>,
  pub participants: Vec<ParticipantRow>,
  pub figure_summary: Vec<FigureSummary>,
}

struct Acc<'a> {
  id: &'a str,
  first_ts: &'a str,
  answers: HashMap<&'a str, &'a str>,
  correct: u32,
}

/// `responses` may come in any order; rows are ordered by each participant's first answer.
/// Repeated answers to one figure show the earliest.
pub fn build_report(responses: &[ResponseRecord], figures: &[String], catalog: &QuestionCatalog) -> StatsReport {
  let mut chronological: Vec<&ResponseRecord> = responses.iter().collect();
  chronological.sort_by(|a, b| a.ts.cmp(&b.ts).then(a.id.cmp(&b.id)));

  let mut slots: HashMap<&str, usize> = HashMap::new();
  let mut accs: Vec<Acc<'_>> = Vec::new();
  for r in &chronological {
    let slot = *slots.entry(r.participant_id.as_str()).or_insert_with(|| {
      accs.push(Acc { id: &r.participant_id, first_ts: &r.ts, answers: HashMap::new(), correct: 0 });
      accs.len() - 1
    });
    let acc = &mut accs[slot];
    acc.answers.entry(r.figure.as_str()).or_insert(r.choice.as_str());
    if r.is_correct == Some(true) {
      acc.correct += 1;
    }
  }

  let participants = accs
    .iter()
    .map(|acc| ParticipantRow {
      participant: acc.id.chars().take(8).collect(),
      started: display_ts(acc.first_ts),
      answers: figures
        .iter()
        .map(|f| acc.answers.get(f.as_str()).copied().unwrap_or(UNANSWERED).to_string())
        .collect(),
      correct: acc.correct,
    })
    .collect();

  let mut totals: HashMap<&str, (u32, u32)> = figures.iter().map(|f| (f.as_str(), (0, 0))).collect();
  for r in responses {
    if let Some((correct, total)) = totals.get_mut(r.figure.as_str()) {
      *total += 1;
      if r.is_correct == Some(true) {
        *correct += 1;
      }
    }
  }

  let figure_summary = figures
    .iter()
    .map(|f| {
      let (correct, total) = totals.get(f.as_str()).copied().unwrap_or((0, 0));
      FigureSummary {
        figure: f.clone(),
        question: catalog.lookup(f).prompt.clone(),
        correct,
        total,
        accuracy: accuracy(correct, total),
      }
    })
    .collect();

  StatsReport { figures: figures.to_vec(), participants, figure_summary }
}

/// Percentage to one decimal; exact ties round to even (12.25 -> 12.2).
pub fn accuracy(correct: u32, total: u32) -> Option<f64> {
  if total == 0 {
    return None;
  }
  let pct = f64::from(correct) / f64::from(total) * 100.0;
  Some((pct * 10.0).round_ties_even() / 10.0)
}

fn display_ts(ts: &str) -> String {
  ts.chars().take(19).collect::<String>().replace('T', " ")
}
