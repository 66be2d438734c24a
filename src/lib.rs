//! # Link Shortener
//!
//! A URL shortening service with user accounts, built with Axum and PostgreSQL.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Accounts, tokens and link lifecycle
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL and in-memory storage
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Registration with a password policy and Argon2 hashing
//! - HS256 bearer tokens valid for 24 hours
//! - Random 6-character short ids with collision retry
//! - Links expire 30 days after creation
//! - Atomic click counting
//!
//! ## Quick Start
//!
//! ```bash
//! export DB_HOST=localhost DB_PORT=5432 DB_USER=postgres DB_PASSWORD=postgres
//! export DB_NAME=shortener DB_SSL_MODE=disable APP_PORT=8081 JWT_SECRET=change-me
//!
//! # Migrations are applied on startup
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AccountService, Claims, LinkService, TokenService};
    pub use crate::domain::entities::{NewShortLink, NewUser, ShortLink, User};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
