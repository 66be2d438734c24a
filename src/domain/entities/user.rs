//! User account entity.

use uuid::Uuid;

/// A registered account.
///
/// `password_hash` is an Argon2 PHC string. It never leaves the service layer:
/// response DTOs are built from `id` and `username` only.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

/// Input data for creating a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    /// Materializes the stored form with a fresh id.
    pub fn into_user(self, id: Uuid) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}
