//! HTTP endpoint handlers. These are thin wrappers that forward to the survey/stats logic.
//! Each handler is instrumented and logs basic result info.

use axum::{
  extract::State,
  response::{Html, IntoResponse, Redirect, Response},
  Form, Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::protocol::{AnswerForm, HealthOut};
use crate::session;
use crate::state::AppState;
use crate::stats::{build_report, StatsReport};
use crate::survey::{self, SubmitOutcome, SurveyStep};
use crate::views;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip_all)]
pub async fn http_home(State(state): State<AppState>) -> Html<String> {
  views::home(state.figures.list().len())
}

#[instrument(level = "info", skip_all)]
pub async fn http_start(State(state): State<AppState>, jar: SignedCookieJar) -> Result<impl IntoResponse, AppError> {
  let session = survey::start_session(&state);
  let jar = session::save(jar, &session)?;
  Ok((jar, Redirect::to("/survey")))
}

#[instrument(level = "info", skip_all)]
pub async fn http_get_survey(State(state): State<AppState>, jar: SignedCookieJar) -> Result<Response, AppError> {
  let session = survey::resume_or_start(&state, session::load(&jar));
  let order = session.figures(&state.figures);
  let page = match survey::current_step(&session, &order, &state.catalog) {
    SurveyStep::Complete => None,
    SurveyStep::Question(view) => Some(views::survey(&view)),
  };
  let jar = session::save(jar, &session)?;
  match page {
    Some(html) => Ok((jar, html).into_response()),
    None => {
      info!(target: "survey", participant = %session.participant_id, "Survey complete; redirecting");
      Ok((jar, Redirect::to("/complete")).into_response())
    }
  }
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_survey(
  State(state): State<AppState>,
  jar: SignedCookieJar,
  form: Option<Form<AnswerForm>>,
) -> Result<Response, AppError> {
  let mut session = survey::resume_or_start(&state, session::load(&jar));
  let choice = form.map(|Form(f)| f.choice).unwrap_or_default();
  let outcome = survey::record_answer(&state, &mut session, &choice).await?;
  let jar = session::save(jar, &session)?;
  let target = match outcome {
    SubmitOutcome::Recorded => "/survey",
    SubmitOutcome::AlreadyComplete => "/complete",
  };
  Ok((jar, Redirect::to(target)).into_response())
}

#[instrument(level = "info")]
pub async fn http_complete() -> Html<String> { views::complete() }

async fn current_report(state: &AppState) -> Result<StatsReport, AppError> {
  let responses = state.store.fetch_all().await?;
  let figures = state.figures.list();
  let report = build_report(&responses, &figures, &state.catalog);
  info!(target: "survey", responses = responses.len(), participants = report.participants.len(), figures = figures.len(), "Stats computed");
  Ok(report)
}

#[instrument(level = "info", skip_all)]
pub async fn http_stats(State(state): State<AppState>) -> Result<Html<String>, AppError> {
  Ok(views::stats(&current_report(&state).await?))
}

#[instrument(level = "info", skip_all)]
pub async fn http_stats_json(State(state): State<AppState>) -> Result<Json<StatsReport>, AppError> {
  Ok(Json(current_report(&state).await?))
}
