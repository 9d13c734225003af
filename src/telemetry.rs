//! Logging setup for the survey server.
//!
//! LOG_LEVEL takes `EnvFilter` directives (default `DEFAULT_FILTER`), LOG_FORMAT=json
//! switches to one JSON object per line. Targets: `figure_survey` (process),
//! `survey` (participant flow), `storage` (persistence); the router's TraceLayer
//! adds per-request spans under `tower_http`.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,figure_survey=debug,survey=debug,storage=debug,tower_http=info,axum=info";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Directives from LOG_LEVEL, or the defaults when unset or unparsable.
fn survey_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_tracing() {
    let level = std::env::var("LOG_LEVEL").ok();
    let format = std::env::var("LOG_FORMAT").ok();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(survey_filter(level.as_deref()))
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match LogFormat::parse(format.as_deref()) {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}
