use fintrack::configuration::{get_configuration, DatabaseSettings, JwtSettings};
use fintrack::startup::run;
use fintrack::store::{create_tables, get_connection_pool};
use serde_json::{json, Value};
use sqlx::{Row, SqlitePool};
use std::net::TcpListener;
use tempfile::TempDir;

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    pub jwt: JwtSettings,
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
    let server = run(listener, connection_pool.clone(), jwt_config.clone())
        .expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool: connection_pool,
        jwt: jwt_config,
        _db_dir: db_dir,
    }
}

pub async fn configure_database(config: &DatabaseSettings) -> SqlitePool {
    let connection_pool = get_connection_pool(config)
        .await
        .expect("Failed to open test database");
    create_tables(&connection_pool)
        .await
        .expect("Failed to create schema");
    connection_pool
}

async fn register_user(app: &TestApp, username: &str, password: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(&format!("{}/auth/register", &app.address))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to execute request.")
}

async fn login_and_get_token(app: &TestApp, username: &str, password: &str) -> String {
    let response = reqwest::Client::new()
        .post(&format!("{}/auth/login", &app.address))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16(), "Login should succeed");

    let response_body: Value = response.json().await.expect("Failed to parse response");
    response_body["access_token"]
        .as_str()
        .expect("No access token in response")
        .to_string()
}

// --- Registration Tests ---

#[tokio::test]
async fn register_returns_201_for_valid_credentials() {
    let app = spawn_app().await;

    let response = register_user(&app, "alice", "SecurePass123").await;

    assert_eq!(201, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["username"], "alice");
    assert!(response_body.get("id").is_some());
    assert!(
        response_body.get("hashed_password").is_none(),
        "Password hash must never appear in a response"
    );

    // Verify user was created in database with a hashed password
    let user = sqlx::query("SELECT username, hashed_password FROM users WHERE username = 'alice'")
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch created user");

    assert_eq!(user.get::<String, _>("username"), "alice");
    let hashed_password = user.get::<String, _>("hashed_password");
    assert!(
        hashed_password.starts_with("$2"),
        "Expected a bcrypt hash, got: {}",
        hashed_password
    );
    assert_ne!(hashed_password, "SecurePass123");
}

#[tokio::test]
async fn register_accepts_a_short_password() {
    let app = spawn_app().await;

    let response = register_user(&app, "alice", "pw1").await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn register_returns_400_for_invalid_username() {
    let app = spawn_app().await;

    let invalid_usernames = vec![
        ("", "empty username"),
        ("   ", "whitespace only"),
        ("user name", "contains a space"),
        ("user@example.com", "contains an @"),
    ];

    for (invalid_username, reason) in invalid_usernames {
        let response = register_user(&app, invalid_username, "SecurePass123").await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "Should reject invalid username: {}",
            reason
        );
        let response_body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(response_body["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn register_returns_409_for_duplicate_username() {
    let app = spawn_app().await;

    // First registration should succeed
    let response1 = register_user(&app, "alice", "SecurePass123").await;
    assert_eq!(201, response1.status().as_u16());

    // Duplicate registration should fail with 409
    let response2 = register_user(&app, "alice", "OtherPass456").await;
    assert_eq!(
        409,
        response2.status().as_u16(),
        "Should reject duplicate username with 409 Conflict"
    );

    let response_body: Value = response2.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "DUPLICATE_ENTRY");
    assert_eq!(response_body["message"], "Username already registered");
}

#[tokio::test]
async fn register_returns_400_for_missing_fields() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let test_cases = vec![
        (json!({"username": "alice"}), "missing password"),
        (json!({"password": "Pass123"}), "missing username"),
        (json!({}), "missing all fields"),
    ];

    for (body, reason) in test_cases {
        let response = client
            .post(&format!("{}/auth/register", &app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            400,
            response.status().as_u16(),
            "Should reject request: {}",
            reason
        );
    }
}

// --- Login Tests ---

#[tokio::test]
async fn login_returns_200_and_a_bearer_token() {
    let app = spawn_app().await;
    register_user(&app, "alice", "SecurePass123").await;

    let response = reqwest::Client::new()
        .post(&format!("{}/auth/login", &app.address))
        .json(&json!({ "username": "alice", "password": "SecurePass123" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    let access_token = response_body["access_token"]
        .as_str()
        .expect("No access token in response");
    assert_eq!(
        access_token.matches('.').count(),
        2,
        "Expected a three-part JWT"
    );
    assert_eq!(response_body["token_type"], "bearer");
    assert_eq!(response_body["expires_in"], 1800);
}

#[tokio::test]
async fn login_returns_401_for_invalid_password() {
    let app = spawn_app().await;
    register_user(&app, "alice", "SecurePass123").await;

    let response = reqwest::Client::new()
        .post(&format!("{}/auth/login", &app.address))
        .json(&json!({ "username": "alice", "password": "WrongPassword123" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "INVALID_CREDENTIALS");
    assert_eq!(response_body["message"], "Incorrect username or password");
}

#[tokio::test]
async fn login_returns_the_same_401_for_nonexistent_user() {
    let app = spawn_app().await;

    let response = reqwest::Client::new()
        .post(&format!("{}/auth/login", &app.address))
        .json(&json!({ "username": "nonexistent", "password": "SecurePass123" }))
        .send()
        .await
        .expect("Failed to execute request.");

    // Same status, code and message as a wrong password, so the response
    // does not reveal which usernames exist.
    assert_eq!(401, response.status().as_u16());
    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "INVALID_CREDENTIALS");
    assert_eq!(response_body["message"], "Incorrect username or password");
}

#[tokio::test]
async fn login_returns_400_for_missing_fields() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let test_cases = vec![
        (json!({"username": "alice"}), "missing password"),
        (json!({"password": "Pass123"}), "missing username"),
        (json!({}), "missing all fields"),
    ];

    for (body, reason) in test_cases {
        let response = client
            .post(&format!("{}/auth/login", &app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            400,
            response.status().as_u16(),
            "Should reject request: {}",
            reason
        );
    }
}

// --- Protected Routes Tests ---

#[tokio::test]
async fn get_current_user_returns_200_with_valid_token() {
    let app = spawn_app().await;
    register_user(&app, "alice", "SecurePass123").await;
    let access_token = login_and_get_token(&app, "alice", "SecurePass123").await;

    let response = reqwest::Client::new()
        .get(&format!("{}/api/me", &app.address))
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["username"], "alice");
    assert!(response_body.get("id").is_some());
    assert!(
        response_body.get("hashed_password").is_none(),
        "Password hash must never appear in a response"
    );
}

#[tokio::test]
async fn protected_route_returns_401_without_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/me", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    assert_eq!(
        response
            .headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer"),
        "A missing token should trigger a Bearer challenge"
    );
    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "UNAUTHORIZED");
    assert_eq!(response_body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn protected_route_returns_401_with_invalid_token() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/api/me", &app.address))
        .header("Authorization", "Bearer invalid.token.here")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    assert!(
        response.headers().get("www-authenticate").is_none(),
        "The challenge header is only sent when the token is absent"
    );
    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "UNAUTHORIZED");
    assert_eq!(response_body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn protected_route_rejects_malformed_authorization_header() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let malformed_headers = vec![
        "Bearer",             // missing token
        "Basic dXNlcjpwYXNz", // not Bearer
        "BearerToken",        // missing space
        "",                   // empty
    ];

    for header in malformed_headers {
        let response = client
            .get(&format!("{}/api/me", &app.address))
            .header("Authorization", header)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            401,
            response.status().as_u16(),
            "Should reject malformed header: {}",
            header
        );
    }
}

#[tokio::test]
async fn all_protected_endpoints_require_auth() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let protected_paths = vec![
        "/api/me",
        "/api/transactions",
        "/api/categories",
        "/api/recurring-transactions",
        "/api/goals",
        "/api/reports/summary",
    ];

    for path in protected_paths {
        let response = client
            .get(&format!("{}{}", &app.address, path))
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            401,
            response.status().as_u16(),
            "Endpoint {} should require authentication",
            path
        );
    }
}

// --- Token Lifecycle Tests ---

#[tokio::test]
async fn tampered_token_returns_the_uniform_401() {
    let app = spawn_app().await;
    register_user(&app, "alice", "SecurePass123").await;
    let access_token = login_and_get_token(&app, "alice", "SecurePass123").await;

    // Flip the first character of the signature, keeping valid base64url
    let mut parts: Vec<String> = access_token.split('.').map(String::from).collect();
    let flipped = if parts[2].starts_with('A') { "B" } else { "A" };
    parts[2].replace_range(0..1, flipped);
    let tampered_token = parts.join(".");

    let response = reqwest::Client::new()
        .get(&format!("{}/api/me", &app.address))
        .header("Authorization", format!("Bearer {}", tampered_token))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "UNAUTHORIZED");
    assert_eq!(response_body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn expired_token_returns_the_uniform_401() {
    let app = spawn_app().await;
    register_user(&app, "alice", "SecurePass123").await;

    // Sign a token that expired five minutes ago with the server's own key
    let mut expired_config = app.jwt.clone();
    expired_config.access_token_expire_minutes = -5;
    let access_token = fintrack::auth::generate_access_token("alice", &expired_config)
        .expect("Failed to sign token");

    let response = reqwest::Client::new()
        .get(&format!("{}/api/me", &app.address))
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "UNAUTHORIZED");
    assert_eq!(response_body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn token_for_a_deleted_user_is_rejected() {
    let app = spawn_app().await;
    register_user(&app, "alice", "SecurePass123").await;
    let access_token = login_and_get_token(&app, "alice", "SecurePass123").await;

    sqlx::query("DELETE FROM users WHERE username = 'alice'")
        .execute(&app.db_pool)
        .await
        .expect("Failed to delete user");

    let response = reqwest::Client::new()
        .get(&format!("{}/api/me", &app.address))
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(401, response.status().as_u16());
    let response_body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(response_body["code"], "UNAUTHORIZED");
    assert_eq!(response_body["message"], "Could not validate credentials");
}

// --- End-to-End Scenario ---

#[tokio::test]
async fn registered_user_can_log_in_and_record_a_transaction() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = register_user(&app, "alice", "pw1").await;
    assert_eq!(201, response.status().as_u16());

    let access_token = login_and_get_token(&app, "alice", "pw1").await;

    let response = client
        .post(&format!("{}/api/transactions", &app.address))
        .header("Authorization", format!("Bearer {}", access_token))
        .json(&json!({
            "date": "2024-01-01",
            "amount": 50.0,
            "type": "expense",
            "category": "food"
        }))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());

    let response = client
        .get(&format!("{}/api/transactions", &app.address))
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(200, response.status().as_u16());

    let response_body: Value = response.json().await.expect("Failed to parse response");
    let transactions = response_body.as_array().expect("Expected a JSON array");
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["amount"], 50.0);
    assert_eq!(transactions[0]["type"], "expense");
    assert_eq!(transactions[0]["category"], "food");
}
