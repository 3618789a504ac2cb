// src/db.rs
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connects the pool and bootstraps the tables the store relies on. The
/// primary key on `votes.fingerprint` backs the dedup guarantee.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    init_schema(&pool).await?;
    Ok(pool)
}

async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS poll_metadata (
            id SMALLINT PRIMARY KEY,
            question_hash TEXT NOT NULL,
            options_hash TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS votes (
            fingerprint TEXT PRIMARY KEY,
            vote TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
