//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::{LinkResponse, LinkStatsResponse};
use crate::api::handlers::require_short_id;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a link with its click count and last click time.
///
/// Reading statistics does not count as a click.
///
/// # Endpoint
///
/// `GET /shortener/stats/{short_id}`
///
/// # Errors
///
/// Returns 400 Bad Request if the short id is blank.
/// Returns 404 Not Found if the link does not exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(short_id): Path<String>,
) -> Result<Json<LinkStatsResponse>, AppError> {
    require_short_id(&short_id)?;

    let link = state.link_service.get_link(&short_id).await?;
    let short_url = state.link_service.short_url(&link.short_id);

    Ok(Json(LinkStatsResponse {
        link: LinkResponse::new(link, short_url),
        message: "Link found".to_string(),
        success: true,
    }))
}
