//! Handlers for account endpoints (register, login, whoami).

use axum::{Extension, Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{AccountResponse, CredentialsRequest, LoginResponse};
use crate::api::middleware::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "Secr3t!pass" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if a field is empty or the password is too weak.
/// Returns 409 Conflict if the username is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state
        .account_service
        .register(&payload.username, &payload.password)
        .await?;

    Ok(Json(AccountResponse {
        user: user.into(),
        message: "User created successfully".to_string(),
        success: true,
    }))
}

/// Exchanges credentials for a bearer token valid for 24 hours.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Errors
///
/// Returns 400 Bad Request if a field is empty.
/// Returns 404 Not Found if the user does not exist.
/// Returns 401 Unauthorized if the password is wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let token = state
        .account_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        message: "User logged in successfully".to_string(),
        success: true,
    }))
}

/// Returns the account the bearer token belongs to.
///
/// # Endpoint
///
/// `GET /auth/whoami`
///
/// # Errors
///
/// Returns 400 Bad Request if the token carries a malformed user id.
/// Returns 404 Not Found if the account was deleted after the token was issued.
pub async fn whoami_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<AccountResponse>, AppError> {
    let user_id = user.parse_id().map_err(|e| {
        AppError::bad_request(
            "Invalid user ID",
            json!({ "user_id": user.user_id, "reason": e.to_string() }),
        )
    })?;

    let account = state.account_service.who_am_i(user_id).await?;

    Ok(Json(AccountResponse {
        user: account.into(),
        message: "User found".to_string(),
        success: true,
    }))
}
