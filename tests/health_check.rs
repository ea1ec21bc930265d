//! Integration tests for the public surface of the server

use std::net::TcpListener;

use fintrack::configuration::{get_configuration, DatabaseSettings};
use fintrack::startup::run;
use fintrack::store::{create_tables, get_connection_pool};
use sqlx::SqlitePool;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    _db_dir: TempDir,
}

async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let mut configuration = get_configuration().expect("Failed to read configuration.");
    let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
    configuration.database.path = db_dir.path().join("test.db").to_string_lossy().into_owned();
    let connection_pool = configure_database(&configuration.database).await;

    let jwt_config = configuration.jwt.clone();
    let server =
        run(listener, connection_pool.clone(), jwt_config).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        _db_dir: db_dir,
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> SqlitePool {
    let pool = get_connection_pool(config)
        .await
        .expect("Failed to open test database");
    create_tables(&pool).await.expect("Failed to create schema");
    pool
}

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/health_check", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn schema_is_created_on_startup() {
    let app = spawn_app().await;

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&app.db_pool)
            .await
            .expect("Failed to list tables");

    for expected in [
        "categories",
        "goals",
        "recurring_transactions",
        "transactions",
        "users",
    ] {
        assert!(
            tables.iter().any(|t| t == expected),
            "missing table {}",
            expected
        );
    }
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .get(&format!("{}/no-such-route", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(404, response.status().as_u16());
}
