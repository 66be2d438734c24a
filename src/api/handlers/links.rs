//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::links::{
    CreateLinkRequest, CreateLinkResponse, LinkListResponse, LinkResponse, MessageResponse,
};
use crate::api::handlers::require_short_id;
use crate::api::middleware::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /shortener`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is empty or malformed.
/// Returns 401 Unauthorized if the token carries a malformed user id.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>, AppError> {
    let owner_id = owner_id(&user)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create(&payload.url, Some(owner_id))
        .await?;
    let short_url = state.link_service.short_url(&link.short_id);

    Ok(Json(CreateLinkResponse {
        short_link: LinkResponse::new(link, short_url),
        message: "Short link created successfully".to_string(),
        success: true,
    }))
}

/// Lists the caller's links.
///
/// # Endpoint
///
/// `GET /shortener`
///
/// # Errors
///
/// Returns 401 Unauthorized if the token carries a malformed user id.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<LinkListResponse>, AppError> {
    let owner_id = owner_id(&user)?;

    let links = state
        .link_service
        .list_links(owner_id)
        .await?
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.short_id);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(LinkListResponse {
        links,
        message: "Links found".to_string(),
        success: true,
    }))
}

/// Deletes a short link. Deleting an unknown id succeeds.
///
/// # Endpoint
///
/// `DELETE /shortener/{short_id}`
///
/// # Errors
///
/// Returns 400 Bad Request if the short id is blank.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(short_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    require_short_id(&short_id)?;

    state.link_service.delete(&short_id).await?;

    Ok(Json(MessageResponse {
        message: "Short link deleted successfully".to_string(),
        success: true,
    }))
}

fn owner_id(user: &AuthenticatedUser) -> Result<Uuid, AppError> {
    user.parse_id().map_err(|_| {
        AppError::unauthorized(
            "Unauthorized",
            serde_json::json!({ "reason": "Token carries an invalid user id" }),
        )
    })
}
