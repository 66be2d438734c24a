//! DTOs for short link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Request body of `POST /shortener`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Long URL to shorten. Its shape is checked by the link service.
    #[serde(default)]
    #[validate(length(min = 1, message = "Link is empty"))]
    pub url: String,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub long_url: String,
    pub short_id: String,
    pub short_url: String,
    pub clicks: i64,
    pub last_click: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkResponse {
    /// Builds the response view of `link`, rendered at `short_url`.
    pub fn new(link: ShortLink, short_url: String) -> Self {
        Self {
            id: link.id,
            user_id: link.user_id,
            long_url: link.long_url,
            short_id: link.short_id,
            short_url,
            clicks: link.clicks,
            last_click: link.last_click,
            created_at: link.created_at,
            expires_at: link.expires_at,
        }
    }
}

/// Response of `POST /shortener`.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub short_link: LinkResponse,
    pub message: String,
    pub success: bool,
}

/// Response of `GET /shortener`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
    pub message: String,
    pub success: bool,
}

/// Response of `GET /shortener/stats/{short_id}`.
#[derive(Debug, Serialize)]
pub struct LinkStatsResponse {
    pub link: LinkResponse,
    pub message: String,
    pub success: bool,
}

/// Response of endpoints that return no payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    pub success: bool,
}
