//! Database initialization
//!
//! Creates the database on first run and applies the idempotent schema.
//! The UNIQUE constraints on (mdp_name, rotation) and
//! (mdp_name, function_name) back the rotation sequencer's checks at the
//! storage layer.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create the schema if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await?;

    // WAL allows dashboard reads to proceed alongside the single writer
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_evaluations_table(&pool).await?;

    Ok(pool)
}

/// Create the evaluations table (idempotent, safe to call repeatedly)
pub async fn create_evaluations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS evaluations (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            mdp_name TEXT NOT NULL,
            function_name TEXT NOT NULL,
            manager TEXT NOT NULL,
            rotation INTEGER NOT NULL,
            responses TEXT NOT NULL,
            job_knowledge REAL NOT NULL,
            quality_of_work REAL NOT NULL,
            communication REAL NOT NULL,
            initiative REAL NOT NULL,
            overall REAL NOT NULL,
            submitted_at TEXT NOT NULL,
            email_response INTEGER NOT NULL DEFAULT 0,
            respondent_email TEXT,
            UNIQUE (mdp_name, rotation),
            UNIQUE (mdp_name, function_name),
            CHECK (rotation > 0),
            CHECK (job_knowledge >= 0.0 AND job_knowledge <= 5.0),
            CHECK (quality_of_work >= 0.0 AND quality_of_work <= 5.0),
            CHECK (communication >= 0.0 AND communication <= 5.0),
            CHECK (initiative >= 0.0 AND initiative <= 5.0),
            CHECK (overall >= 0.0 AND overall <= 5.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_evaluations_mdp_name ON evaluations(mdp_name)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_evaluations_submitted_at ON evaluations(submitted_at)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
