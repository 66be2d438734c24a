//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::handlers::require_short_id;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its long URL and counts the click.
///
/// # Endpoint
///
/// `GET /shortener/{short_id}`
///
/// Responds with `301 Moved Permanently` and a `Location` header.
///
/// # Errors
///
/// Returns 400 Bad Request if the short id is blank.
/// Returns 404 Not Found if the link does not exist or has expired.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(short_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_short_id(&short_id)?;

    let long_url = state.link_service.redirect(&short_id).await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, long_url)]))
}
