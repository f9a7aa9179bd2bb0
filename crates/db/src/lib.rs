//! Persistence layer for the diary service.
//!
//! The store is SQLite. The default URL, `sqlite::memory:`, keeps every
//! entry in process memory so the diary resets on restart; a file URL
//! persists it.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod models;
pub mod repositories;
pub mod seed;

pub type DbPool = sqlx::SqlitePool;

/// Maximum pool size for file-backed databases.
const MAX_FILE_CONNECTIONS: u32 = 8;

/// Whether a SQLite URL refers to an in-memory database.
pub fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create a connection pool from a database URL.
///
/// Each in-memory SQLite connection is its own database, so in-memory URLs
/// get exactly one connection that is never recycled.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
    } else {
        SqlitePoolOptions::new()
            .max_connections(MAX_FILE_CONNECTIONS)
            .connect_with(options)
            .await
    }
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Format a timestamp the way it is stored: fixed-width UTC with
/// microsecond precision, so text comparison orders correctly.
pub fn to_db_timestamp(ts: entrepaginas_core::types::Timestamp) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn in_memory_urls_are_detected() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:diary?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://diary.db"));
    }

    #[test]
    fn db_timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 12, 15, 10, 30, 0).unwrap();
        let fractional = whole + chrono::Duration::milliseconds(5);

        assert_eq!(to_db_timestamp(whole), "2024-12-15T10:30:00.000000Z");
        assert_eq!(to_db_timestamp(fractional), "2024-12-15T10:30:00.005000Z");
        assert!(to_db_timestamp(whole) < to_db_timestamp(fractional));
    }
}
