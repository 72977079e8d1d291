pub mod activities;
pub mod pool;
pub mod routine_activities;
pub mod routines;
pub mod schema;
pub mod users;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};
use std::path::Path;
use std::time::Duration;

/// Database handle type (the pool is internally reference counted)
pub type Db = SqlitePool;

/// Result of a repository call; store errors are passed through untouched
pub type DbResult<T> = std::result::Result<T, sqlx::Error>;

/// Open or create the SQLite database at the given path
///
/// Creates all required tables on first run.
pub async fn open_database(path: impl AsRef<Path>, max_connections: u32) -> DbResult<Db> {
    let path = path.as_ref();
    tracing::info!("Opening database at: {:?}", path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let db = pool::create_pool(options, max_connections).await?;
    initialize_schema(&db).await?;

    tracing::info!("Database initialized successfully");

    Ok(db)
}

/// Open a fresh in-memory database with the schema applied
pub async fn open_in_memory() -> DbResult<Db> {
    let db = pool::create_memory_pool().await?;
    initialize_schema(&db).await?;
    Ok(db)
}

/// Create tables if they don't exist
pub async fn initialize_schema(db: &Db) -> DbResult<()> {
    for statement in schema::ALL {
        sqlx::query(statement).execute(db).await?;
    }
    Ok(())
}
