//! User accounts: registration, login and lookup.

use std::sync::Arc;

use serde_json::{Value, json};
use uuid::Uuid;

use crate::application::services::TokenService;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, validate_password, verify_password};

/// Service for managing accounts and exchanging credentials for tokens.
///
/// Password hashing and verification run on the blocking pool so a slow
/// Argon2 round does not stall the async workers.
pub struct AccountService<U: UserRepository + ?Sized> {
    user_repository: Arc<U>,
    token_service: Arc<TokenService>,
}

impl<U: UserRepository + ?Sized> AccountService<U> {
    /// Creates a new account service.
    pub fn new(user_repository: Arc<U>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_repository,
            token_service,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the password does not meet the policy.
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] on hashing or storage errors.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AppError> {
        validate_password(password)?;

        if self
            .user_repository
            .find_by_username(username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "user already exists",
                json!({ "username": username }),
            ));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Password hashing task failed");
                AppError::internal("Failed to hash password", Value::Null)
            })??;

        let user = self
            .user_repository
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => {
                    AppError::conflict("user already exists", json!({ "username": username }))
                }
                other => other,
            })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has this username.
    /// Returns [`AppError::Unauthorized`] if the password does not match.
    /// Returns [`AppError::Internal`] on storage or signing errors.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::not_found("user not found", json!({ "username": username }))
            })?;

        let stored_hash = user.password_hash.clone();
        let candidate = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&stored_hash, &candidate))
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "Password verification task failed");
                    AppError::internal("Failed to verify password", Value::Null)
                })?;

        if !matches {
            tracing::warn!(username = %username, "Login with wrong password");
            return Err(AppError::unauthorized("invalid password", Value::Null));
        }

        let token = self.token_service.issue(user.id)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(token)
    }

    /// Looks up the account a token was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the account no longer exists.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn who_am_i(&self, user_id: Uuid) -> Result<User, AppError> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("user not found", json!({ "user_id": user_id })))
    }

    /// Lists every account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repository.list().await
    }

    /// Finds an account by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has this username.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn find_user(&self, username: &str) -> Result<User, AppError> {
        self.user_repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found("user not found", json!({ "username": username })))
    }

    /// Deletes an account by username. Links it owned are kept unowned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has this username.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete_user(&self, username: &str) -> Result<(), AppError> {
        if !self.user_repository.delete_by_username(username).await? {
            return Err(AppError::not_found(
                "user not found",
                json!({ "username": username }),
            ));
        }

        tracing::info!(username = %username, "User deleted");
        Ok(())
    }
}
