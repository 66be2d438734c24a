//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AccountService, LinkService, TokenService};
use crate::domain::repositories::{LinkRepository, UserRepository};

/// Services shared across requests.
///
/// Cloning is cheap; every field is an `Arc`. Services hold trait objects so
/// the same router runs against PostgreSQL or in-memory storage.
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService<dyn UserRepository>>,
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    /// Wires the services over the given repositories.
    ///
    /// # Arguments
    ///
    /// - `users` - account storage
    /// - `links` - short link storage
    /// - `jwt_secret` - key bearer tokens are signed with
    /// - `public_base_url` - prefix short links are rendered against
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        jwt_secret: &str,
        public_base_url: &str,
    ) -> Self {
        let token_service = Arc::new(TokenService::new(jwt_secret));

        Self {
            account_service: Arc::new(AccountService::new(users, token_service.clone())),
            link_service: Arc::new(LinkService::new(links, public_base_url)),
            token_service,
        }
    }
}
