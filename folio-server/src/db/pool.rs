//! Database connection pool management
//!
//! Uses sqlx SqlitePool with explicit connection limits.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Default maximum connections for the pool.
/// Kept low for a single-site backend.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a SQLite connection pool.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (`sqlite://folio.db?mode=rwc`)
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("sqlite://folio.db?mode=rwc").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a SQLite connection pool with custom options.
///
/// In-memory databases (`sqlite::memory:`) exist per connection, so callers
/// using one should pass `max_connections = 1`.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?;

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pool_acquires_connection() {
        let pool = create_pool_with_options("sqlite::memory:", 1)
            .await
            .expect("pool creation failed");

        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn concurrent_pool_access() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("pool.db").display());
        let pool = create_pool(&url).await.expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i64,) = sqlx::query_as("SELECT ?")
                        .bind(i as i64)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i64);
        }
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        assert!(create_pool("postgres://localhost/folio").await.is_err());
    }
}
