//! Classification of PostgreSQL errors raised by the repositories.

/// Unique constraint on `users.username`.
pub const USERS_USERNAME_KEY: &str = "users_username_key";

/// Unique constraint on `short_links.short_id`.
pub const SHORT_LINKS_SHORT_ID_KEY: &str = "short_links_short_id_key";

/// Returns true if `e` is a unique violation of `constraint`.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}
