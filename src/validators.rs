/// Input validators module - rejects malformed finance data before it reaches the store
/// Features:
/// 1. DoS Protection: input length limits on every free-text field
/// 2. Data Theft Protection: control character and null byte rejection
/// 3. Account Safety: username restricted to a conservative charset
/// 4. Domain Rules: positive amounts, closed sets for type and frequency

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const MAX_USERNAME_LENGTH: usize = 64;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_LABEL_LENGTH: usize = 100; // category/goal/recurring names
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Transaction direction values accepted on the wire ("type" field)
pub const TRANSACTION_KINDS: [&str; 2] = ["income", "expense"];
/// Recurrence schedules accepted on the wire
pub const FREQUENCIES: [&str; 4] = ["daily", "weekly", "monthly", "yearly"];

lazy_static! {
    // Letters, digits, dot, underscore, hyphen. No spaces, no '@'.
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
}

/// Validates a username at registration time
/// - Trims surrounding whitespace
/// - Checks length constraints
/// - Restricts to a conservative charset
pub fn is_valid_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("username".to_string()));
    }

    if trimmed.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::TooLong(
            "username".to_string(),
            MAX_USERNAME_LENGTH,
        ));
    }

    if !USERNAME_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("username".to_string()));
    }

    Ok(trimmed.to_string())
}

/// Validates a plaintext password before hashing
///
/// Passwords are never trimmed or rewritten; only emptiness and an
/// upper length bound are checked.
pub fn is_valid_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::EmptyField("password".to_string()));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong(
            "password".to_string(),
            MAX_PASSWORD_LENGTH,
        ));
    }

    Ok(())
}

/// Validates a monetary amount that must be strictly positive
pub fn is_positive_amount(field: &str, amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::NotPositive(field.to_string()));
    }
    Ok(())
}

/// Validates a monetary amount that may be zero (e.g. goal progress)
pub fn is_non_negative_amount(field: &str, amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ValidationError::NegativeValue(field.to_string()));
    }
    Ok(())
}

/// Validates the transaction direction ("type" on the wire)
pub fn is_valid_kind(kind: &str) -> Result<String, ValidationError> {
    if TRANSACTION_KINDS.contains(&kind) {
        Ok(kind.to_string())
    } else {
        Err(ValidationError::UnknownVariant(
            "type".to_string(),
            "income, expense",
        ))
    }
}

/// Validates the recurrence schedule of a recurring transaction
pub fn is_valid_frequency(frequency: &str) -> Result<String, ValidationError> {
    if FREQUENCIES.contains(&frequency) {
        Ok(frequency.to_string())
    } else {
        Err(ValidationError::UnknownVariant(
            "frequency".to_string(),
            "daily, weekly, monthly, yearly",
        ))
    }
}

/// Validates a short user-facing label (category name, goal name, ...)
/// - Checks length constraints
/// - Rejects control characters and null bytes
pub fn is_valid_label(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }

    if trimmed.len() > MAX_LABEL_LENGTH {
        return Err(ValidationError::TooLong(field.to_string(), MAX_LABEL_LENGTH));
    }

    if has_control_characters(trimmed) {
        return Err(ValidationError::InvalidFormat(field.to_string()));
    }

    Ok(trimmed.to_string())
}

/// Validates an optional free-text description
pub fn is_valid_description(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(text) => {
            if text.len() > MAX_DESCRIPTION_LENGTH {
                return Err(ValidationError::TooLong(
                    "description".to_string(),
                    MAX_DESCRIPTION_LENGTH,
                ));
            }
            if has_control_characters(text) {
                return Err(ValidationError::InvalidFormat("description".to_string()));
            }
            Ok(Some(text.to_string()))
        }
    }
}

/// Detects null bytes and control characters (data theft protection)
fn has_control_characters(input: &str) -> bool {
    input.contains('\0') || input.chars().any(|c| c.is_control())
}
