use async_trait::async_trait;
use log::{debug, info};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::env;
use std::str::FromStr;

use crate::error::{map_acquire_error, map_sqlx_error, RestError, Result};
use crate::models::{now_str, User};

// Store Constants
const DEFAULT_DATABASE_URL: &str = "sqlite://users.db?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

const QUERY_INSERT_USER: &str =
    "INSERT INTO users(first_name, last_name, email, date_created, status) VALUES (?, ?, ?, ?, ?);";
const QUERY_GET_USER: &str =
    "SELECT id, first_name, last_name, email, date_created, status FROM users WHERE id = ?;";
const QUERY_UPDATE_USER: &str =
    "UPDATE users SET first_name = ?, last_name = ?, email = ? WHERE id = ?;";
const QUERY_DELETE_USER: &str = "DELETE FROM users WHERE id = ?;";
const QUERY_FIND_BY_STATUS: &str =
    "SELECT id, first_name, last_name, email, date_created, status FROM users WHERE status = ?;";

const MIGRATIONS: &[&str] = &[include_str!(
    "../../migrations/20240101000001_create_users.sql"
)];

/// Creates a SQLite connection pool for the given URL
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(map_acquire_error)?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(map_acquire_error)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    for migration in MIGRATIONS {
        sqlx::query(migration).execute(pool).await.map_err(|e| {
            RestError::internal_server_error(format!("error running migration: {}", e))
        })?;
    }

    debug!("Applied {} migration(s)", MIGRATIONS.len());
    Ok(())
}

// SqlUserStore

/// Relational store for users
pub struct SqlUserStore {
    pool: SqlitePool,
}

impl SqlUserStore {
    /// Creates a new SQL store from the environment and applies migrations
    pub async fn new() -> Result<Self> {
        // Use environment variables for connection settings if available
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        info!(
            "Connecting to {} with at most {} connections",
            database_url, max_connections
        );

        let pool = create_pool(&database_url, max_connections).await?;
        run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Creates a new SQL store over an existing pool.
    /// This is mainly useful for testing with an in-memory database.
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // The connection is returned to the pool when dropped, on every exit path
    async fn acquire(&self) -> Result<PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(map_acquire_error)
    }
}

#[async_trait]
impl super::UserStore for SqlUserStore {
    async fn get_user(&self, id: i64) -> Result<User> {
        let mut conn = self.acquire().await?;

        let user = sqlx::query_as::<_, User>(QUERY_GET_USER)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn save_user(&self, mut user: User) -> Result<User> {
        let mut conn = self.acquire().await?;

        user.date_created = now_str();

        let result = sqlx::query(QUERY_INSERT_USER)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.date_created)
            .bind(&user.status)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        user.id = result.last_insert_rowid();
        debug!("Inserted user with id {}", user.id);

        Ok(user)
    }

    async fn update_user(&self, user: User) -> Result<User> {
        let mut conn = self.acquire().await?;

        // Rows affected is deliberately ignored
        sqlx::query(QUERY_UPDATE_USER)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(user.id)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> Result<()> {
        let mut conn = self.acquire().await?;

        sqlx::query(QUERY_DELETE_USER)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_status(&self, status: &str) -> Result<Vec<User>> {
        let mut conn = self.acquire().await?;

        let users = sqlx::query_as::<_, User>(QUERY_FIND_BY_STATUS)
            .bind(status)
            .fetch_all(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(users)
    }
}
