//! Process-local repository implementations.
//!
//! Backed by `tokio::sync::RwLock`-guarded maps. They honor the same contracts
//! as the PostgreSQL repositories (uniqueness, atomic click counting, newest
//! first listing) and back the HTTP tests; the server always runs on
//! PostgreSQL. Deleting a user does not touch links held by a separate
//! [`InMemoryLinkRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{NewShortLink, NewUser, ShortLink, User};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;

/// In-memory user storage keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == new_user.username) {
            return Err(AppError::conflict(
                "user already exists",
                json!({ "username": new_user.username }),
            ));
        }

        let user = new_user.into_user(Uuid::new_v4());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn delete_by_username(&self, username: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|_, u| u.username != username);
        Ok(users.len() < before)
    }
}

/// In-memory link storage keyed by short id.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<HashMap<String, ShortLink>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut links = self.links.write().await;

        if links.contains_key(&new_link.short_id) {
            return Err(AppError::conflict(
                "short id already exists",
                json!({ "short_id": new_link.short_id }),
            ));
        }

        let link = new_link.into_link(Uuid::new_v4());
        links.insert(link.short_id.clone(), link.clone());
        Ok(link)
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.links.read().await.get(short_id).cloned())
    }

    async fn record_click(
        &self,
        short_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError> {
        let mut links = self.links.write().await;

        match links.get_mut(short_id) {
            Some(link) if !link.is_expired_at(at) => {
                link.record_click(at);
                Ok(Some(link.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self
            .links
            .read()
            .await
            .values()
            .filter(|l| l.user_id == Some(user_id))
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn delete(&self, short_id: &str) -> Result<bool, AppError> {
        Ok(self.links.write().await.remove(short_id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
