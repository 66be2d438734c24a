//! API route configuration.
//!
//! Account creation and login are public; everything else requires a bearer
//! token verified by [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, list_links_handler, login_handler,
    redirect_handler, register_handler, stats_handler, whoami_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes reachable without a token.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /auth/whoami`                - Current account (POST accepted too)
/// - `GET    /shortener`                  - List own links
/// - `POST   /shortener`                  - Create a short link
/// - `GET    /shortener/{short_id}`       - 301 redirect to the long URL
/// - `DELETE /shortener/{short_id}`       - Delete a short link
/// - `GET    /shortener/stats/{short_id}` - Click statistics
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/whoami", get(whoami_handler).post(whoami_handler))
        .route(
            "/shortener",
            get(list_links_handler).post(create_link_handler),
        )
        .route(
            "/shortener/{short_id}",
            get(redirect_handler).delete(delete_link_handler),
        )
        .route("/shortener/stats/{short_id}", get(stats_handler))
}
