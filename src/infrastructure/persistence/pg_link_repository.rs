//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::db_error::{SHORT_LINKS_SHORT_ID_KEY, is_unique_violation_on};

const LINK_COLUMNS: &str =
    "id, user_id, long_url, short_id, clicks, last_click, created_at, expires_at";

/// PostgreSQL repository for short links.
///
/// Click counting is a single `UPDATE ... SET clicks = clicks + 1` so
/// concurrent redirects never lose an increment.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    user_id: Option<Uuid>,
    long_url: String,
    short_id: String,
    clicks: i64,
    last_click: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for ShortLink {
    fn from(row: LinkRow) -> Self {
        ShortLink {
            id: row.id,
            user_id: row.user_id,
            long_url: row.long_url,
            short_id: row.short_id,
            clicks: row.clicks,
            last_click: row.last_click,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let short_id = new_link.short_id.clone();

        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO short_links (id, user_id, long_url, short_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new_link.user_id)
        .bind(&new_link.long_url)
        .bind(&new_link.short_id)
        .bind(new_link.created_at)
        .bind(new_link.expires_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, SHORT_LINKS_SHORT_ID_KEY) {
                AppError::conflict("short id already exists", json!({ "short_id": short_id }))
            } else {
                AppError::from(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM short_links WHERE short_id = $1"
        ))
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn record_click(
        &self,
        short_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE short_links
            SET clicks = clicks + 1, last_click = $2
            WHERE short_id = $1
              AND (expires_at IS NULL OR expires_at > $2)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(short_id)
        .bind(at)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM short_links WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortLink::from).collect())
    }

    async fn delete(&self, short_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_links WHERE short_id = $1")
            .bind(short_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(|e| {
                tracing::error!(error = %e, "Storage ping failed");
                AppError::internal("Database unreachable", json!({ "reason": e.to_string() }))
            })
    }
}
