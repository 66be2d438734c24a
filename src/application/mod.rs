//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules, and
//! give HTTP handlers and the admin CLI a single API to call.
//!
//! # Available Services
//!
//! - [`services::account_service::AccountService`] - Registration, login and account lookup
//! - [`services::link_service::LinkService`] - Short link creation, redirect and removal
//! - [`services::token_service::TokenService`] - Bearer token issuance and verification

pub mod services;
