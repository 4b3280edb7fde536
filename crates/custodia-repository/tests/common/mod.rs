//! Common test infrastructure for database integration tests.

use custodia_config::DatabaseConfig;
use custodia_repository::DatabasePool;
use std::sync::Arc;

/// Test database wrapper.
///
/// Provides a fresh in-memory SQLite database with migrations applied.
/// The pool is capped at a single connection so every statement sees the
/// same in-memory database.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a new test database and runs migrations.
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            log_queries: true,
        };

        let pool = DatabasePool::new(&config)
            .await
            .expect("Failed to open in-memory database");

        pool.run_migrations()
            .await
            .expect("Failed to run migrations");

        Self {
            pool: Arc::new(pool),
        }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<DatabasePool> {
        Arc::clone(&self.pool)
    }
}
