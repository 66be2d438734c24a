//! DTOs for account endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::User;

/// Username and password, as posted to `/auth/register` and `/auth/login`.
///
/// Missing fields deserialize as empty strings and fail validation.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username or password is empty"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Username or password is empty"))]
    pub password: String,
}

/// Public view of an account. Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
        }
    }
}

/// Response of `/auth/register` and `/auth/whoami`.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user: UserResponse,
    pub message: String,
    pub success: bool,
}

/// Response of `/auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
    pub success: bool,
}
