//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

use serde_json::Value;

use crate::error::AppError;

pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;
pub mod stats;

pub use auth::{login_handler, register_handler, whoami_handler};
pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler, list_links_handler};
pub use redirect::redirect_handler;
pub use stats::stats_handler;

/// Catch-all for unknown routes, answered in the error envelope.
pub async fn fallback_handler() -> AppError {
    AppError::not_found("route not found", Value::Null)
}

/// Rejects blank short ids from path parameters.
pub(crate) fn require_short_id(short_id: &str) -> Result<(), AppError> {
    if short_id.trim().is_empty() {
        return Err(AppError::bad_request("ShortID is empty", Value::Null));
    }
    Ok(())
}
