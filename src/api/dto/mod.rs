//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs derive `Validate`; response DTOs carry the `message` and
//! `success` fields every endpoint returns alongside its payload.

pub mod auth;
pub mod health;
pub mod links;
