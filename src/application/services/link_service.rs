//! Short link lifecycle: creation, redirect resolution, listing and removal.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::is_valid_long_url;

/// Upper bound on short id draws per creation.
pub const MAX_CODE_ATTEMPTS: usize = 5;

/// Service for creating, resolving and removing short links.
///
/// Works against any [`LinkRepository`], including `dyn LinkRepository`
/// as stored in the application state.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    public_base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service rendering short links under `public_base_url`.
    pub fn new(link_repository: Arc<L>, public_base_url: impl Into<String>) -> Self {
        Self {
            link_repository,
            public_base_url: public_base_url.into(),
        }
    }

    /// Creates a short link owned by `owner_id`, expiring in 30 days.
    ///
    /// The URL shape is checked before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty or malformed.
    /// Returns [`AppError::Conflict`] if the generated id was taken concurrently
    /// on every attempt.
    /// Returns [`AppError::Internal`] if no free id was found.
    pub async fn create(
        &self,
        long_url: &str,
        owner_id: Option<Uuid>,
    ) -> Result<ShortLink, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request("Link is empty", Value::Null));
        }
        if !is_valid_long_url(long_url) {
            return Err(AppError::bad_request(
                "invalid URL",
                json!({ "url": long_url }),
            ));
        }

        let mut last_conflict = None;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let short_id = generate_code();

            if self
                .link_repository
                .find_by_short_id(&short_id)
                .await?
                .is_some()
            {
                tracing::debug!(short_id = %short_id, attempt, "Short id collision, regenerating");
                continue;
            }

            let new_link =
                NewShortLink::expiring(long_url.to_string(), short_id, owner_id, Utc::now());

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    tracing::info!(
                        short_id = %link.short_id,
                        user_id = ?link.user_id,
                        "Short link created"
                    );
                    return Ok(link);
                }
                Err(e @ AppError::Conflict { .. }) => {
                    tracing::warn!(attempt, "Short id taken during insert, regenerating");
                    last_conflict = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_conflict.unwrap_or_else(|| {
            AppError::internal(
                "Failed to generate unique short id",
                json!({ "reason": "Too many collisions" }),
            )
        }))
    }

    /// Renders the public URL of a short id.
    pub fn short_url(&self, short_id: &str) -> String {
        format!(
            "{}/shortener/{}",
            self.public_base_url.trim_end_matches('/'),
            short_id
        )
    }

    /// Resolves a short id to its long URL and counts the click.
    ///
    /// Expired links resolve like missing ones and are not counted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link is missing or expired.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn redirect(&self, short_id: &str) -> Result<String, AppError> {
        let link = self.get_link(short_id).await?;
        let now = Utc::now();

        if link.is_expired_at(now) {
            tracing::debug!(short_id = %short_id, "Redirect to expired link refused");
            return Err(AppError::not_found(
                "short link has expired",
                json!({ "short_id": short_id }),
            ));
        }

        let clicked = self
            .link_repository
            .record_click(short_id, now)
            .await?
            .ok_or_else(|| not_found(short_id))?;

        Ok(clicked.long_url)
    }

    /// Fetches a link without touching its counters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this short id.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link(&self, short_id: &str) -> Result<ShortLink, AppError> {
        self.link_repository
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| not_found(short_id))
    }

    /// Lists links owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_links(&self, owner_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        self.link_repository.list_by_user(owner_id).await
    }

    /// Removes a link. Removing an unknown id succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete(&self, short_id: &str) -> Result<(), AppError> {
        if self.link_repository.delete(short_id).await? {
            tracing::info!(short_id = %short_id, "Short link deleted");
        } else {
            tracing::debug!(short_id = %short_id, "Delete of unknown short id");
        }
        Ok(())
    }

    /// Checks that link storage is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

fn not_found(short_id: &str) -> AppError {
    AppError::not_found("short link not found", json!({ "short_id": short_id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LINK_TTL_DAYS;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::{DateTime, Duration};
    use mockall::Sequence;

    const BASE_URL: &str = "http://localhost:8081";

    fn test_link(short_id: &str, expires_at: Option<DateTime<Utc>>) -> ShortLink {
        ShortLink {
            id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            long_url: "https://example.com/x".to_string(),
            short_id: short_id.to_string(),
            clicks: 0,
            last_click: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    fn service(mock: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(Arc::new(mock), BASE_URL)
    }

    #[tokio::test]
    async fn test_create_sets_thirty_day_expiry() {
        let mut mock = MockLinkRepository::new();
        let owner = Uuid::new_v4();

        mock.expect_find_by_short_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_create()
            .times(1)
            .withf(move |new_link| {
                new_link.user_id == Some(owner) && new_link.long_url == "https://example.com/x"
            })
            .returning(|new_link| Ok(new_link.into_link(Uuid::new_v4())));

        let before = Utc::now();
        let link = service(mock)
            .create("https://example.com/x", Some(owner))
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(link.short_id.len(), 6);
        assert_eq!(link.clicks, 0);
        assert!(link.last_click.is_none());

        let expires_at = link.expires_at.unwrap();
        assert!(expires_at >= before + Duration::days(LINK_TTL_DAYS));
        assert!(expires_at <= after + Duration::days(LINK_TTL_DAYS));
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_url_without_persisting() {
        let mut mock = MockLinkRepository::new();
        mock.expect_find_by_short_id().times(0);
        mock.expect_create().times(0);

        let result = service(mock).create("not-a-url", None).await;

        match result {
            Err(AppError::Validation { message, .. }) => assert_eq!(message, "invalid URL"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_empty_url() {
        let mut mock = MockLinkRepository::new();
        mock.expect_create().times(0);

        let result = service(mock).create("", None).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_regenerates_on_existing_id() {
        let mut mock = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock.expect_find_by_short_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| Ok(Some(test_link(id, None))));
        mock.expect_find_by_short_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        mock.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(new_link.into_link(Uuid::new_v4())));

        let result = service(mock).create("https://example.com/x", None).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_retries_after_insert_conflict() {
        let mut mock = MockLinkRepository::new();
        let mut seq = Sequence::new();

        mock.expect_find_by_short_id()
            .times(2)
            .returning(|_| Ok(None));
        mock.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", Value::Null)));
        mock.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_link| Ok(new_link.into_link(Uuid::new_v4())));

        let result = service(mock).create("https://example.com/x", None).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_surfaces_conflict_after_exhausting_attempts() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_short_id()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Ok(None));
        mock.expect_create()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", Value::Null)));

        let result = service(mock).create("https://example.com/x", None).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_fails_when_every_id_is_taken() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_short_id()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|id| Ok(Some(test_link(id, None))));
        mock.expect_create().times(0);

        let result = service(mock).create("https://example.com/x", None).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_redirect_counts_click() {
        let mut mock = MockLinkRepository::new();
        let expires_at = Some(Utc::now() + Duration::days(1));

        mock.expect_find_by_short_id()
            .times(1)
            .returning(move |id| Ok(Some(test_link(id, expires_at))));

        let before = Utc::now();
        mock.expect_record_click()
            .times(1)
            .withf(move |id, at| id == "abc123" && *at >= before && *at <= Utc::now())
            .returning(move |id, at| {
                let mut link = test_link(id, expires_at);
                link.record_click(at);
                Ok(Some(link))
            });

        let long_url = service(mock).redirect("abc123").await.unwrap();

        assert_eq!(long_url, "https://example.com/x");
    }

    #[tokio::test]
    async fn test_redirect_refuses_expired_link() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_short_id()
            .times(1)
            .returning(|id| Ok(Some(test_link(id, Some(Utc::now() - Duration::seconds(1))))));
        mock.expect_record_click().times(0);

        let result = service(mock).redirect("abc123").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_redirect_unknown_id() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_short_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_record_click().times(0);

        let result = service(mock).redirect("zzzzzz").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_redirect_link_deleted_mid_flight() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_short_id()
            .times(1)
            .returning(|id| Ok(Some(test_link(id, None))));
        mock.expect_record_click()
            .times(1)
            .returning(|_, _| Ok(None));

        let result = service(mock).redirect("abc123").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_link_does_not_count() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_short_id()
            .times(1)
            .returning(|id| Ok(Some(test_link(id, None))));
        mock.expect_record_click().times(0);

        let link = service(mock).get_link("abc123").await.unwrap();

        assert_eq!(link.short_id, "abc123");
        assert_eq!(link.clicks, 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let mut mock = MockLinkRepository::new();

        mock.expect_delete()
            .times(1)
            .withf(|id| id == "nothere")
            .returning(|_| Ok(false));

        assert!(service(mock).delete("nothere").await.is_ok());
    }

    #[tokio::test]
    async fn test_list_links_passes_owner() {
        let mut mock = MockLinkRepository::new();
        let owner = Uuid::new_v4();

        mock.expect_list_by_user()
            .times(1)
            .withf(move |id| *id == owner)
            .returning(|_| Ok(vec![test_link("aaaaaa", None), test_link("bbbbbb", None)]));

        let links = service(mock).list_links(owner).await.unwrap();

        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_short_url() {
        let service = service(MockLinkRepository::new());
        assert_eq!(
            service.short_url("abc123"),
            "http://localhost:8081/shortener/abc123"
        );

        let service = LinkService::new(Arc::new(MockLinkRepository::new()), "https://sho.rt/");
        assert_eq!(service.short_url("abc123"), "https://sho.rt/shortener/abc123");
    }
}
