// src/store.rs
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

use crate::error::StoreError;
use crate::models::PollMetadata;

/// Durable view of the poll-metadata singleton and the vote ledger.
///
/// Requests coordinate only through the backing store's own atomicity;
/// there is no in-process locking across requests.
#[async_trait]
pub trait PollStore: Send + Sync {
    /// `None` until the first poll is ever initialized.
    async fn read_metadata(&self) -> Result<Option<PollMetadata>, StoreError>;

    /// Deletes every vote and installs `meta` as the current metadata,
    /// atomically. Must stay safe under concurrent duplicate invocation.
    async fn reset_for(&self, meta: &PollMetadata) -> Result<(), StoreError>;

    async fn has_voted(&self, voter: &str) -> Result<bool, StoreError>;

    /// Inserts one vote keyed by the voter fingerprint. The existence check
    /// is atomic with the insert; a second vote for the same voter fails
    /// with `StoreError::DuplicateVote`.
    async fn record_vote(&self, voter: &str, option: &str) -> Result<(), StoreError>;

    /// Count per supplied option, zero included. Persisted votes for options
    /// not in `options` (stale during a reset window) are ignored.
    async fn tally(&self, options: &[String]) -> Result<HashMap<String, i64>, StoreError>;
}

/// Relational backend. The `votes` primary key on the voter fingerprint is
/// the dedup guarantee; an insert that conflicts affects zero rows.
pub struct PgPollStore {
    pool: PgPool,
}

impl PgPollStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollStore for PgPollStore {
    async fn read_metadata(&self) -> Result<Option<PollMetadata>, StoreError> {
        let meta = sqlx::query_as::<_, PollMetadata>(
            "SELECT question_hash, options_hash FROM poll_metadata WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(meta)
    }

    async fn reset_for(&self, meta: &PollMetadata) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM votes").execute(&mut *tx).await?;
        sqlx::query(
            "INSERT INTO poll_metadata (id, question_hash, options_hash) VALUES (1, $1, $2) \
             ON CONFLICT (id) DO UPDATE SET question_hash = $1, options_hash = $2",
        )
        .bind(&meta.question_hash)
        .bind(&meta.options_hash)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn has_voted(&self, voter: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM votes WHERE fingerprint = $1")
            .bind(voter)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    async fn record_vote(&self, voter: &str, option: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO votes (fingerprint, vote, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT (fingerprint) DO NOTHING",
        )
        .bind(voter)
        .bind(option)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::DuplicateVote);
        }
        Ok(())
    }

    async fn tally(&self, options: &[String]) -> Result<HashMap<String, i64>, StoreError> {
        let rows = sqlx::query("SELECT vote, COUNT(*) AS votes FROM votes GROUP BY vote")
            .fetch_all(&self.pool)
            .await?;

        let mut counts: HashMap<String, i64> =
            options.iter().map(|option| (option.clone(), 0)).collect();
        for row in rows {
            let option: String = row.get("vote");
            let votes: i64 = row.get("votes");
            if let Some(count) = counts.get_mut(&option) {
                *count = votes;
            }
        }
        Ok(counts)
    }
}
