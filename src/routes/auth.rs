/// Authentication Routes
///
/// Handles user registration, login, and current user information.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::audit::{log_audit, AuditLog};
use crate::auth::generate_access_token;
use crate::configuration::JwtSettings;
use crate::domain::User;
use crate::error::{AppError, AuthError, ErrorContext};
use crate::store::users;

/// User registration request
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Authentication response with a bearer access token
#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Public view of an account. Never carries the stored hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
        }
    }
}

/// POST /auth/register
///
/// Register a new account with username and password.
/// Returns the created account; no credential material leaves here.
///
/// # Errors
/// - 400: Validation errors (malformed username or password)
/// - 409: Username already registered (duplicate)
/// - 500: Internal server error
pub async fn register(
    form: web::Json<RegisterRequest>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_registration");

    let user = users::register(pool.get_ref(), &form.username, &form.password)
        .await
        .map_err(|error| {
            context.log_error(&error);
            error
        })?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User registered successfully"
    );
    log_audit(
        &AuditLog::new("REGISTER", "user", "SUCCESS", "Account created")
            .with_user_id(user.id.clone()),
    );

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// POST /auth/login
///
/// Authenticate with username and password.
/// Returns a bearer access token on success.
///
/// # Errors
/// - 401: Invalid credentials (unknown username or wrong password)
/// - 500: Internal server error
///
/// # Security Notes
/// - Uses same error message for "not found" and "wrong password"
/// - Prevents user enumeration attacks
pub async fn login(
    form: web::Json<LoginRequest>,
    pool: web::Data<SqlitePool>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_login");

    let maybe_user = users::authenticate(pool.get_ref(), &form.username, &form.password)
        .await
        .map_err(|error| {
            context.log_error(&error);
            error
        })?;

    let user = match maybe_user {
        Some(user) => user,
        None => {
            let error = AppError::Auth(AuthError::InvalidCredentials);
            context.log_error(&error);
            log_audit(&AuditLog::new(
                "LOGIN",
                "user",
                "FAILURE",
                "Incorrect username or password",
            ));
            return Err(error);
        }
    };

    let access_token =
        generate_access_token(&user.username, jwt_config.get_ref()).map_err(|error| {
            context.log_error(&error);
            error
        })?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User logged in successfully"
    );
    log_audit(&AuditLog::new("LOGIN", "user", "SUCCESS", "Login").with_user_id(user.id.clone()));

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: jwt_config.access_token_expire_minutes * 60,
    }))
}

/// GET /api/me
///
/// Current authenticated account, as resolved by the JWT middleware.
/// **Requires valid JWT access token** in Authorization header.
///
/// # Errors
/// - 401: Missing or invalid token (handled by middleware)
pub async fn get_current_user(user: web::ReqData<User>) -> Result<HttpResponse, AppError> {
    let user = user.into_inner();
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}
