//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation inputs live in separate
//! `New*` structs so that generated fields (ids, counters) are never supplied
//! by callers.
//!
//! - [`User`] / [`NewUser`] - An account that owns links
//! - [`ShortLink`] / [`NewShortLink`] - A short identifier mapped to a long URL

pub mod link;
pub mod user;

pub use link::{LINK_TTL_DAYS, LinkState, NewShortLink, ShortLink};
pub use user::{NewUser, User};
