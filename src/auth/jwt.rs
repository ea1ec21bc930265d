/// JWT Token Generation and Validation
///
/// Issues compact signed access tokens and verifies presented ones.
/// Every verification failure is classified into a distinct AuthError
/// for diagnostics; the HTTP layer collapses them into one response.

use std::str::FromStr;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError, ConfigError};

/// Generate a new access token for a subject username
///
/// # Arguments
/// * `subject` - Username the token is issued for
/// * `config` - JWT configuration settings
///
/// # Errors
/// Returns error if the configured algorithm is unknown or signing fails
pub fn generate_access_token(subject: &str, config: &JwtSettings) -> Result<String, AppError> {
    let algorithm = signing_algorithm(config)?;
    let claims = Claims::new(subject, config.access_token_expire_minutes);

    encode(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Validate an access token and extract its claims
///
/// Checks signature integrity against the server-held secret and the
/// expiry timestamp with zero leeway. A token that decodes fine but
/// carries no subject claim is rejected as well.
///
/// # Errors
/// `AuthError::InvalidSignature`, `TokenExpired`, `MalformedToken`
/// or `MissingSubject`, depending on which check failed
pub fn validate_access_token(token: &str, config: &JwtSettings) -> Result<Claims, AppError> {
    let algorithm = signing_algorithm(config)?;
    let mut validation = Validation::new(algorithm);
    // Expiry is an exact comparison; no clock-skew allowance
    validation.leeway = 0;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(classify_jwt_error)?;

    data.claims.subject()?;

    Ok(data.claims)
}

/// Parse the configured algorithm identifier (e.g. "HS256")
fn signing_algorithm(config: &JwtSettings) -> Result<Algorithm, AppError> {
    Algorithm::from_str(&config.algorithm).map_err(|_| {
        AppError::Config(ConfigError::InvalidValue(format!(
            "unsupported jwt algorithm: {}",
            config.algorithm
        )))
    })
}

fn classify_jwt_error(err: jsonwebtoken::errors::Error) -> AppError {
    use jsonwebtoken::errors::ErrorKind;

    tracing::warn!("JWT validation error: {}", err);

    let auth_error = match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::MalformedToken,
    };
    AppError::Auth(auth_error)
}
