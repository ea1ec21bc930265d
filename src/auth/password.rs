/// Password Hashing and Verification
///
/// Handles bcrypt hashing with a per-call random salt.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::AppError;

/// Hash a password using bcrypt
///
/// Each call salts independently, so hashing the same password twice
/// yields two different strings that both verify.
///
/// # Errors
/// Returns error if bcrypt hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its stored hash
///
/// A stored hash that bcrypt cannot parse counts as a mismatch, not an
/// error: a corrupted hash must never authenticate anyone, and must
/// never turn a login attempt into a server fault.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}
