//! HTML pages. Templates live in `templates/` and are embedded at build time;
//! every dynamic value passes through `escape_html` before insertion.

use axum::response::Html;

use crate::stats::StatsReport;
use crate::survey::QuestionView;
use crate::util::{escape_html, fill_template};

const LAYOUT: &str = include_str!("../templates/layout.html");
const HOME: &str = include_str!("../templates/home.html");
const SURVEY: &str = include_str!("../templates/survey.html");
const COMPLETE: &str = include_str!("../templates/complete.html");
const STATS: &str = include_str!("../templates/stats.html");
const ERROR: &str = include_str!("../templates/error.html");

fn page(title: &str, body: &str) -> Html<String> {
  Html(fill_template(LAYOUT, &[("title", escape_html(title).as_str()), ("body", body)]))
}

pub fn home(figure_count: usize) -> Html<String> {
  let body = fill_template(HOME, &[("count", figure_count.to_string().as_str())]);
  page("Figure survey", &body)
}

pub fn survey(view: &QuestionView<'_>) -> Html<String> {
  let choices: String = view
    .question
    .choices
    .iter()
    .map(|c| {
      let c = escape_html(c);
      format!("    <label><input type=\"radio\" name=\"choice\" value=\"{c}\" required> {c}</label>\n")
    })
    .collect();

  let body = fill_template(
    SURVEY,
    &[
      ("number", (view.index + 1).to_string().as_str()),
      ("total", view.total.to_string().as_str()),
      ("percent", view.percent.to_string().as_str()),
      ("figure_path", escape_html(&encode_path_segment(view.figure)).as_str()),
      ("figure", escape_html(view.figure).as_str()),
      ("prompt", escape_html(&view.question.prompt).as_str()),
      ("choices", choices.trim_end()),
    ],
  );
  page(&format!("Question {} of {}", view.index + 1, view.total), &body)
}

pub fn complete() -> Html<String> {
  page("Thank you", COMPLETE)
}

pub fn stats(report: &StatsReport) -> Html<String> {
  let figure_headers: String = report
    .figures
    .iter()
    .map(|f| format!("<th>{}</th>", escape_html(f)))
    .collect();

  let participant_rows: String = report
    .participants
    .iter()
    .map(|p| {
      let answers: String = p.answers.iter().map(|a| format!("<td>{}</td>", escape_html(a))).collect();
      format!(
        "    <tr><td><code>{}</code></td><td>{}</td>{}<td class=\"correct\">{}</td></tr>\n",
        escape_html(&p.participant),
        escape_html(&p.started),
        answers,
        p.correct
      )
    })
    .collect();

  let summary_rows: String = report
    .figure_summary
    .iter()
    .map(|s| {
      let accuracy = s.accuracy.map(|a| format!("{a:.1}%")).unwrap_or_else(|| "n/a".into());
      format!(
        "    <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        escape_html(&s.figure),
        escape_html(&s.question),
        s.correct,
        s.total,
        accuracy
      )
    })
    .collect();

  let body = fill_template(
    STATS,
    &[
      ("participant_count", report.participants.len().to_string().as_str()),
      ("figure_headers", figure_headers.as_str()),
      ("participant_rows", participant_rows.trim_end()),
      ("summary_rows", summary_rows.trim_end()),
    ],
  );
  page("Survey results", &body)
}

pub fn error() -> Html<String> {
  page("Error", ERROR)
}

/// Percent-encode everything outside the URL "unreserved" set.
fn encode_path_segment(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  for b in name.bytes() {
    if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
      out.push(b as char);
    } else {
      out.push_str(&format!("%{b:02X}"));
    }
  }
  out
}
