use std::{str::FromStr, time::Duration};

use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use tracing::info;

pub mod models;

/// Default maximum connections in the pool.
/// SQLite benefits from limited connections due to single-writer model.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connection acquisition / busy timeout in seconds.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Owns the SQLite connection pool. Constructed once at startup and cloned
/// into whatever needs database access; connections are acquired per call.
#[derive(Clone)]
pub struct DBService {
    pub pool: Pool<Sqlite>,
}

impl DBService {
    /// Open (or create) the database at `TASK_API_DB_PATH` and run migrations.
    pub async fn new() -> Result<DBService, sqlx::Error> {
        let db_path =
            std::env::var("TASK_API_DB_PATH").unwrap_or_else(|_| "tasks.db".to_string());
        Self::new_with_path(&db_path).await
    }

    pub async fn new_with_path(db_path: &str) -> Result<DBService, sqlx::Error> {
        let database_url = format!("sqlite://{}", db_path);

        let options = SqliteConnectOptions::from_str(&database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS));

        let pool = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        info!(path = %db_path, "database ready");

        Ok(DBService { pool })
    }
}
