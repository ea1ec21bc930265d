/// Auth Gateway
///
/// Turns a presented bearer token into the authenticated user behind
/// it. This is the single entry point protected request handling goes
/// through; handlers never touch raw tokens.

use sqlx::SqlitePool;

use crate::auth::jwt::validate_access_token;
use crate::configuration::JwtSettings;
use crate::domain::User;
use crate::error::{AppError, AuthError};
use crate::store::users;

/// Resolve a bearer token to the user it was issued for
///
/// Verifies the token, then looks up the subject in the credential
/// store. A valid signature over a username that no longer exists is
/// still rejected, covering accounts deleted after token issuance.
///
/// # Errors
/// Any `AuthError` from token verification, plus `UnknownSubject`
/// when the subject matches no stored user
pub async fn resolve_user(
    pool: &SqlitePool,
    token: &str,
    config: &JwtSettings,
) -> Result<User, AppError> {
    let claims = validate_access_token(token, config)?;
    let username = claims.subject()?;

    match users::find_by_username(pool, username).await? {
        Some(user) => Ok(user),
        None => {
            tracing::warn!(subject = username, "Token subject has no stored user");
            Err(AppError::Auth(AuthError::UnknownSubject))
        }
    }
}
