use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, instrument};

use super::{flag_to_bool, ResponseStore, StorageError};
use crate::domain::{NewResponse, ResponseRecord};

const CREATE_RESPONSES: &str = r"
    CREATE TABLE IF NOT EXISTS responses (
        id SERIAL PRIMARY KEY,
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
pub struct PostgresResponseStore {
    pool: PgPool,
}

impl PostgresResponseStore {
    /// Connect a pool to `database_url` (postgres://...).
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_RESPONSES).execute(&self.pool).await?;
        Ok(())
    }
}

fn map_row(row: &PgRow) -> Result<ResponseRecord, StorageError> {
    let id: i32 = row.try_get("id")?;
    Ok(ResponseRecord {
        id: i64::from(id),
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
impl ResponseStore for PostgresResponseStore {
    #[instrument(level = "debug", skip(self, response), fields(participant = %response.participant_id, figure = %response.figure))]
    async fn insert_response(&self, response: &NewResponse) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO responses (ts, user_id, figure, question, choice, correct_choice, is_correct)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
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
        debug!(target: "storage", "Response inserted (postgres)");
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn response(participant: &str, figure: &str, secs: u32, is_correct: Option<bool>) -> NewResponse {
        NewResponse {
            ts: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, secs).unwrap(),
            participant_id: participant.into(),
            figure: figure.into(),
            question: "Which?".into(),
            choice: "B".into(),
            correct_choice: is_correct.map(|_| "B".to_string()),
            is_correct,
        }
    }

    /// Needs a reachable server; set TEST_DATABASE_URL=postgres://... to run.
    #[tokio::test]
    async fn insert_then_fetch_newest_first() {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set; skipping postgres store test");
            return;
        };
        let store = PostgresResponseStore::connect(&url).await.expect("connect");
        store.migrate().await.expect("migrate");
        // idempotent schema creation
        store.migrate().await.expect("migrate twice");

        let tag = format!("pgtest-{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
        let (p1, p2) = (format!("{tag}-p1"), format!("{tag}-p2"));

        store.insert_response(&response(&p1, "a.png", 1, Some(true))).await.unwrap();
        store.insert_response(&response(&p1, "b.png", 3, None)).await.unwrap();
        store.insert_response(&response(&p2, "a.png", 2, Some(false))).await.unwrap();

        let rows: Vec<ResponseRecord> = store
            .fetch_all()
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.participant_id.starts_with(&tag))
            .collect();

        sqlx::query("DELETE FROM responses WHERE user_id LIKE $1")
            .bind(format!("{tag}-%"))
            .execute(&store.pool)
            .await
            .unwrap();

        assert_eq!(rows.len(), 3);
        let order: Vec<(&str, &str)> = rows.iter().map(|r| (r.participant_id.as_str(), r.figure.as_str())).collect();
        assert_eq!(order, vec![(p1.as_str(), "b.png"), (p2.as_str(), "a.png"), (p1.as_str(), "a.png")]);

        assert_eq!(rows[0].is_correct, None);
        assert_eq!(rows[0].correct_choice, None);
        assert_eq!(rows[1].is_correct, Some(false));
        assert_eq!(rows[2].is_correct, Some(true));
        assert_eq!(rows[2].correct_choice.as_deref(), Some("B"));
        assert_eq!(rows[2].ts, "2026-03-01T12:00:01.000000+00:00");
        assert!(rows[2].id < rows[0].id);
    }
}
