//! Repository implementations.
//!
//! Concrete implementations of the domain repository traits.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - Account storage in PostgreSQL
//! - [`PgLinkRepository`] - Short link storage and click counting in PostgreSQL
//! - [`InMemoryUserRepository`] / [`InMemoryLinkRepository`] - Process-local storage

pub mod memory;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use memory::{InMemoryLinkRepository, InMemoryUserRepository};
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
