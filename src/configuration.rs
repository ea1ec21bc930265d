use std::time::Duration;

use config::ConfigError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
    }
}

/// JWT authentication settings
///
/// The secret and algorithm are process-wide; rotating the secret
/// invalidates every outstanding token.
#[derive(serde::Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: String,
    pub access_token_expire_minutes: i64, // e.g. 30
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 8000_i64)?
        .set_default("database.path", "data/finance.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("jwt.secret", "super-secret-key")?
        .set_default("jwt.algorithm", "HS256")?
        .set_default("jwt.access_token_expire_minutes", 30_i64)?
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    settings.try_deserialize::<Settings>()
}
