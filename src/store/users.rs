/// Credential store
///
/// Registration and login lookups against the users table. Username
/// uniqueness is enforced by the store constraint itself, never by a
/// check-then-insert, so two concurrent registrations of the same
/// name cannot both succeed.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::auth::{hash_password, verify_password};
use crate::domain::User;
use crate::error::AppError;
use crate::validators::{is_valid_password, is_valid_username};

// A real bcrypt hash (of an unrelated string) verified for unknown
// usernames, keeping lookup misses and wrong passwords on the same
// timing path.
const PLACEHOLDER_HASH: &str = "$2a$12$R9h/cIPz0gi.URNNX3kh2OPST9/PgBkqquzi.Ss7KIUgO2t0jWMUW";

/// Create a new account
///
/// # Errors
/// Validation errors for a malformed username or password, and a
/// duplicate-entry error when the username is already taken
pub async fn register(pool: &SqlitePool, username: &str, password: &str) -> Result<User, AppError> {
    let username = is_valid_username(username)?;
    is_valid_password(password)?;

    let user = User {
        id: Uuid::new_v4().to_string(),
        username,
        hashed_password: hash_password(password)?,
    };

    sqlx::query("INSERT INTO users (id, username, hashed_password) VALUES (?, ?, ?)")
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.hashed_password)
        .execute(pool)
        .await?;

    tracing::info!(username = %user.username, user_id = %user.id, "New user registered");
    Ok(user)
}

/// Exact-match, case-sensitive lookup
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, hashed_password FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Check a username/password pair against stored credentials
///
/// Returns None for an unknown username and for a wrong password
/// alike; callers cannot tell which happened, and neither can a
/// client timing the difference.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    match find_by_username(pool, username).await? {
        Some(user) if verify_password(password, &user.hashed_password) => Ok(Some(user)),
        Some(_) => Ok(None),
        None => {
            let _ = verify_password(password, PLACEHOLDER_HASH);
            Ok(None)
        }
    }
}
