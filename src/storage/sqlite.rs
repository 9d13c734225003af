use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{debug, instrument};

use super::{flag_to_bool, ResponseStore, StorageError};
use crate::domain::{NewResponse, ResponseRecord};

const CREATE_RESPONSES: &str = r"
    CREATE TABLE IF NOT EXISTS responses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ts TEXT NOT NULL,
        user_id TEXT NOT NULL,
        figure TEXT NOT NULL,
        question TEXT NOT NULL,
        choice TEXT NOT NULL,
        correct_choice TEXT,
        is_correct INTEGER
    )
";

#[derive(Clone)]
pub struct SqliteResponseStore {
    pool: SqlitePool,
}

impl SqliteResponseStore {
    /// Connect using a `sqlite:` URL, e.g. `sqlite:responses.db` or
    /// `sqlite:file:memdb?mode=memory&cache=shared`. Missing files are created.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA busy_timeout = 5000;")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the responses table if it does not exist.
    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_RESPONSES).execute(&self.pool).await?;
        Ok(())
    }
}

fn map_row(row: &SqliteRow) -> Result<ResponseRecord, StorageError> {
    Ok(ResponseRecord {
        id: row.try_get("id")?,
        ts: row.try_get("ts")?,
        participant_id: row.try_get("user_id")?,
        figure: row.try_get("figure")?,
        question: row.try_get("question")?,
        choice: row.try_get("choice")?,
        correct_choice: row.try_get("correct_choice")?,
        is_correct: flag_to_bool(row.try_get("is_correct")?),
    })
}

#[async_trait]
impl ResponseStore for SqliteResponseStore {
    #[instrument(level = "debug", skip(self, response), fields(participant = %response.participant_id, figure = %response.figure))]
    async fn insert_response(&self, response: &NewResponse) -> Result<(), StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO responses (ts, user_id, figure, question, choice, correct_choice, is_correct)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(response.ts_string())
        .bind(&response.participant_id)
        .bind(&response.figure)
        .bind(&response.question)
        .bind(&response.choice)
        .bind(response.correct_choice.as_deref())
        .bind(response.is_correct_flag())
        .execute(&self.pool)
        .await?;
        debug!(target: "storage", id = res.last_insert_rowid(), "Response inserted (sqlite)");
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<ResponseRecord>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, ts, user_id, figure, question, choice, correct_choice, is_correct
                FROM responses
                ORDER BY ts DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }
}
