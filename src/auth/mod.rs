/// Authentication module
///
/// Handles JWT token generation/validation, password hashing,
/// and bearer-token resolution to stored users.

mod claims;
mod gateway;
mod jwt;
mod password;

pub use claims::Claims;
pub use gateway::resolve_user;
pub use jwt::generate_access_token;
pub use jwt::validate_access_token;
pub use password::hash_password;
pub use password::verify_password;
