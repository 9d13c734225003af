//! Application state shared by all handlers.
//!
//! This module owns:
//!   - the response store (SQLite or PostgreSQL)
//!   - the immutable question catalog
//!   - the figure store and the shuffle policy
//!   - the session cookie signing key

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use tracing::{info, instrument, warn};

use crate::catalog::QuestionCatalog;
use crate::config::{load_survey_config, Settings};
use crate::figures::FigureStore;
use crate::session::key_from_secret;
use crate::storage::{self, ResponseStore, StorageError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResponseStore>,
    pub catalog: Arc<QuestionCatalog>,
    pub figures: FigureStore,
    pub shuffle: bool,
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ResponseStore>,
        catalog: QuestionCatalog,
        figures: FigureStore,
        shuffle: bool,
        cookie_key: Key,
    ) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            figures,
            shuffle,
            cookie_key,
        }
    }

    /// Build state from settings: load the catalog, connect storage, derive the cookie key.
    #[instrument(level = "info", skip_all)]
    pub async fn from_settings(settings: &Settings) -> Result<Self, StorageError> {
        let (catalog, cfg_shuffle) = match settings
            .survey_config_path
            .as_deref()
            .and_then(load_survey_config)
        {
            Some(cfg) => {
                let shuffle = cfg.shuffle;
                (QuestionCatalog::from_config(cfg), shuffle)
            }
            None => {
                info!(target: "figure_survey", "Using built-in question catalog");
                (QuestionCatalog::builtin(), true)
            }
        };
        let shuffle = settings.shuffle_override.unwrap_or(cfg_shuffle);

        let store = storage::connect(&settings.storage).await?;
        let figures = FigureStore::new(settings.figures_dir.clone());
        let listed = figures.list();
        for figure in listed.iter().filter(|f| !catalog.contains(f)) {
            warn!(target: "figure_survey", %figure, "Figure has no catalog question; placeholder will be shown");
        }
        info!(
            target: "figure_survey",
            figures_dir = %figures.dir().display(),
            figures = listed.len(),
            questions = catalog.len(),
            shuffle,
            "Survey state ready"
        );

        Ok(Self::new(
            store,
            catalog,
            figures,
            shuffle,
            key_from_secret(&settings.secret_key),
        ))
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
