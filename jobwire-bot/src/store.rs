//! Dedup store
//!
//! One table, one concern: which job ids have already been announced.
//! Rows are written on first announcement and never touched again; there
//! is no retention policy, so the table grows without bound.
//!
//! Each check/mark pair is an independent round trip with no lock around
//! the sequence. If the scheduled cycle and a command race on the same job
//! id, both can observe "not posted" and both deliver it; that weakening
//! of at-most-once is accepted.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

/// Errors from dedup-store round trips
///
/// Not handled anywhere; a store failure aborts the task that triggered it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Test-and-mark interface over the announced-job set
///
/// The production implementation is [`PostedJobsStore`]; tests substitute
/// an in-memory set.
#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Has this job id already been announced?
    async fn has_been_posted(&self, job_id: &str) -> Result<bool, StoreError>;

    /// Record that this job id has been announced. Idempotent.
    async fn mark_as_posted(&self, job_id: &str) -> Result<(), StoreError>;
}

/// Postgres-backed dedup store owning the connection pool
pub struct PostedJobsStore {
    pool: PgPool,
}

impl PostedJobsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the posted_jobs table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posted_jobs (
                job_id VARCHAR(255) PRIMARY KEY
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("posted_jobs table ready");
        Ok(())
    }
}

#[async_trait]
impl DedupStore for PostedJobsStore {
    async fn has_been_posted(&self, job_id: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM posted_jobs WHERE job_id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn mark_as_posted(&self, job_id: &str) -> Result<(), StoreError> {
        // ON CONFLICT DO NOTHING makes the insert idempotent; a second
        // mark for the same id leaves exactly one row.
        sqlx::query(
            r#"
            INSERT INTO posted_jobs (job_id) VALUES ($1)
            ON CONFLICT (job_id) DO NOTHING
            "#,
        )
        .bind(job_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
