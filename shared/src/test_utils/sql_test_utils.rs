use log::debug;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::store::sql::{run_migrations, SqlUserStore};

/// # SQL test utilities
///
/// Helpers for running store and router tests against a private in-memory
/// SQLite database. Every pool gets its own database, so tests never share rows.
///
/// ## Example
/// ```rust,ignore
/// use bookstore_shared::test_utils::sql_test_utils::create_test_store;
///
/// #[tokio::test]
/// async fn my_sql_test() {
///     let store = create_test_store().await;
///     // ...
/// }
/// ```
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

// A single connection that never expires keeps the in-memory database alive
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(IN_MEMORY_URL)
        .await
        .expect("Failed to open in-memory database");

    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    debug!("In-memory test database ready");
    pool
}

pub async fn create_test_store() -> SqlUserStore {
    SqlUserStore::with_pool(create_test_pool().await)
}

/// Counts rows in the users table
pub async fn count_users(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}
