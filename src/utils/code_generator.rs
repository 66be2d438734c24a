//! Short identifier generation.
//!
//! Identifiers are drawn uniformly from a 62-symbol alphanumeric alphabet.
//! Uniqueness is not guaranteed here; callers check storage and retry (see
//! [`crate::application::services::LinkService`]).

use rand::Rng;

/// Length of every generated short identifier.
pub const CODE_LENGTH: usize = 6;

/// Symbols a short identifier is built from: `[a-zA-Z0-9]`.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random short identifier of [`CODE_LENGTH`] characters.
///
/// Uses the thread-local generator from `rand`; the output is not meant to be
/// unguessable, only well spread.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
