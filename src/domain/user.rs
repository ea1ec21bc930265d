/// A registered account. The stored hash never leaves this type via
/// serialization; HTTP responses use a separate view.

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub hashed_password: String,
}
