//! Response persistence: one append-only `responses` table behind `ResponseStore`.
//!
//! Backends:
//!   - `SqliteResponseStore`   : embedded single-file database (default)
//!   - `PostgresResponseStore` : networked database, selected by DATABASE_URL

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::config::StorageBackend;
use crate::domain::{NewResponse, ResponseRecord};

mod postgres;
mod sqlite;

pub use postgres::PostgresResponseStore;
pub use sqlite::SqliteResponseStore;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Append one answer.
    async fn insert_response(&self, response: &NewResponse) -> Result<(), StorageError>;

    /// Every stored answer, newest first.
    async fn fetch_all(&self) -> Result<Vec<ResponseRecord>, StorageError>;
}

/// Connect to the configured backend and create the schema if needed.
pub async fn connect(backend: &StorageBackend) -> Result<Arc<dyn ResponseStore>, StorageError> {
    match backend {
        StorageBackend::Sqlite { url } => {
            let store = SqliteResponseStore::connect(url).await?;
            store.migrate().await?;
            info!(target: "storage", %url, "Using SQLite response store");
            Ok(Arc::new(store))
        }
        StorageBackend::Postgres { url } => {
            let store = PostgresResponseStore::connect(url).await?;
            store.migrate().await?;
            info!(target: "storage", "Using PostgreSQL response store");
            Ok(Arc::new(store))
        }
    }
}

pub(crate) fn flag_to_bool(flag: Option<i32>) -> Option<bool> {
    flag.map(|v| v != 0)
}
