/// Persistence layer
///
/// Pool construction, schema creation, and the data accessors. Every
/// resource table keys its rows to an owning user.

pub mod owned;
pub mod users;

use std::path::Path;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::configuration::DatabaseSettings;
use crate::error::AppError;

/// Open the SQLite pool, creating the database file on first run
pub async fn get_connection_pool(settings: &DatabaseSettings) -> Result<SqlitePool, AppError> {
    if let Some(parent) = Path::new(&settings.path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Internal(format!("Failed to create database directory: {}", e))
            })?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(settings.connect_options())
        .await?;

    Ok(pool)
}

/// Create the schema if it does not exist yet
///
/// Ids are uuid strings. Dates are ISO-8601 TEXT, which keeps
/// lexicographic range filters correct.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), AppError> {
    let statements = [
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            hashed_password TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS transactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            date TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT,
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        "CREATE TABLE IF NOT EXISTS categories (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id),
            UNIQUE (user_id, name)
        )",
        "CREATE TABLE IF NOT EXISTS recurring_transactions (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT,
            frequency TEXT NOT NULL,
            start_date TEXT NOT NULL,
            next_due_date TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
        "CREATE TABLE IF NOT EXISTS goals (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            target_amount REAL NOT NULL,
            current_amount REAL NOT NULL DEFAULT 0,
            target_date TEXT NOT NULL,
            FOREIGN KEY (user_id) REFERENCES users (id)
        )",
    ];

    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}
