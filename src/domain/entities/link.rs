//! Short link entity and its lifecycle.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// How long a freshly created link stays redirectable.
pub const LINK_TTL_DAYS: i64 = 30;

/// A stored mapping from a short identifier to a long URL.
///
/// `user_id` is nullable at the schema level so anonymous links can exist,
/// although every link created over HTTP carries its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub long_url: String,
    pub short_id: String,
    pub clicks: i64,
    pub last_click: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a stored link at a given instant.
///
/// `Deleted` is not represented: a deleted link no longer exists in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Active,
    Expired,
}

impl ShortLink {
    /// Returns the lifecycle state at `now`.
    pub fn state_at(&self, now: DateTime<Utc>) -> LinkState {
        match self.expires_at {
            Some(expires_at) if now >= expires_at => LinkState::Expired,
            _ => LinkState::Active,
        }
    }

    /// Returns true if the link had expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == LinkState::Expired
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Counts one successful redirect.
    pub fn record_click(&mut self, at: DateTime<Utc>) {
        self.clicks += 1;
        self.last_click = Some(at);
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub user_id: Option<Uuid>,
    pub long_url: String,
    pub short_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewShortLink {
    /// Builds a link created at `now` that expires [`LINK_TTL_DAYS`] later.
    pub fn expiring(
        long_url: String,
        short_id: String,
        user_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            long_url,
            short_id,
            created_at: now,
            expires_at: Some(now + Duration::days(LINK_TTL_DAYS)),
        }
    }

    /// Materializes the stored form with a fresh id and zero clicks.
    pub fn into_link(self, id: Uuid) -> ShortLink {
        ShortLink {
            id,
            user_id: self.user_id,
            long_url: self.long_url,
            short_id: self.short_id,
            clicks: 0,
            last_click: None,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_expiring_at(expires_at: Option<DateTime<Utc>>) -> ShortLink {
        ShortLink {
            id: Uuid::new_v4(),
            user_id: None,
            long_url: "https://example.com".to_string(),
            short_id: "abc123".to_string(),
            clicks: 0,
            last_click: None,
            created_at: Utc::now(),
            expires_at,
        }
    }

    #[test]
    fn test_new_link_expires_in_thirty_days() {
        let now = Utc::now();
        let new_link = NewShortLink::expiring(
            "https://example.com".to_string(),
            "abc123".to_string(),
            None,
            now,
        );

        assert_eq!(new_link.expires_at, Some(now + Duration::days(30)));
        assert_eq!(new_link.created_at, now);
    }

    #[test]
    fn test_into_link_starts_without_clicks() {
        let id = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let link = NewShortLink::expiring(
            "https://example.com".to_string(),
            "abc123".to_string(),
            Some(owner),
            Utc::now(),
        )
        .into_link(id);

        assert_eq!(link.id, id);
        assert_eq!(link.user_id, Some(owner));
        assert_eq!(link.clicks, 0);
        assert!(link.last_click.is_none());
    }

    #[test]
    fn test_state_active_before_expiry() {
        let now = Utc::now();
        let link = link_expiring_at(Some(now + Duration::seconds(1)));
        assert_eq!(link.state_at(now), LinkState::Active);
    }

    #[test]
    fn test_state_expired_at_exact_expiry() {
        let now = Utc::now();
        let link = link_expiring_at(Some(now));
        assert_eq!(link.state_at(now), LinkState::Expired);
    }

    #[test]
    fn test_link_is_expired() {
        let link = link_expiring_at(Some(Utc::now() - Duration::seconds(1)));
        assert!(link.is_expired());
    }

    #[test]
    fn test_link_without_expiry_never_expires() {
        let link = link_expiring_at(None);
        assert!(!link.is_expired_at(Utc::now() + Duration::days(10_000)));
    }

    #[test]
    fn test_record_click() {
        let mut link = link_expiring_at(None);
        let at = Utc::now();

        link.record_click(at);
        link.record_click(at);

        assert_eq!(link.clicks, 2);
        assert_eq!(link.last_click, Some(at));
    }
}
