//! Password policy, hashing and verification.
//!
//! Hashes are Argon2id PHC strings with a per-call random salt, so hashing the
//! same password twice yields two different strings that both verify.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::{Value, json};

use crate::error::AppError;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Characters that satisfy the "special character" requirement.
pub const SPECIAL_CHARACTERS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];

/// Hashes a password with Argon2id and a fresh salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the hasher rejects its parameters.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AppError::internal("Failed to hash password", Value::Null)
        })
}

/// Returns true if `candidate` matches the stored `hash`.
///
/// A stored hash that cannot be parsed never verifies.
pub fn verify_password(hash: &str, candidate: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::error!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

/// Checks a password against the composition policy.
///
/// # Rules
///
/// - Not empty
/// - At least [`MIN_PASSWORD_LENGTH`] characters
/// - At least one uppercase letter, one lowercase letter, one digit, and one
///   of [`SPECIAL_CHARACTERS`]
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming the first violated rule; for the
/// composition rules every missing class is listed.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::bad_request("password is required", Value::Null));
    }

    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(AppError::bad_request(
            format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
            json!({ "provided_length": length }),
        ));
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c));

    let missing: Vec<&str> = [
        (has_upper, "uppercase letter"),
        (has_lower, "lowercase letter"),
        (has_digit, "digit"),
        (has_special, "special character (@$!%*?&)"),
    ]
    .into_iter()
    .filter(|(present, _)| !present)
    .map(|(_, requirement)| requirement)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::bad_request(
            format!(
                "password must contain at least one {}",
                missing.join(", one ")
            ),
            json!({ "missing": missing }),
        ));
    }

    Ok(())
}
