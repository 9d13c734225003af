//! Request/response shapes for the HTTP endpoints (serde ready).

use serde::{Deserialize, Serialize};

/// Body of `POST /survey`. A missing field reads as the empty choice.
#[derive(Debug, Default, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub choice: String,
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
