//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{
    Click, LinkPatch, LinkState, NewClick, NewLink, OwnerId, ShortLink,
};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str =
    "id, code, original, owner_id, click_count, created_at, updated_at, deleted_at";

const CLICK_COLUMNS: &str = "id, link_id, clicked_at, ip, user_agent, referer";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: Uuid,
    code: String,
    original: String,
    owner_id: Option<String>,
    click_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<LinkRow> for ShortLink {
    fn from(r: LinkRow) -> Self {
        ShortLink {
            id: r.id,
            code: r.code,
            original: r.original,
            owner_id: r.owner_id.map(OwnerId::new),
            click_count: r.click_count,
            created_at: r.created_at,
            updated_at: r.updated_at,
            state: LinkState::from_deleted_at(r.deleted_at),
        }
    }
}

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: Uuid,
    clicked_at: DateTime<Utc>,
    ip: Option<String>,
    user_agent: Option<String>,
    referer: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click {
            id: r.id,
            link_id: r.link_id,
            clicked_at: r.clicked_at,
            ip: r.ip,
            user_agent: r.user_agent,
            referer: r.referer,
        }
    }
}

/// PostgreSQL repository for links and clicks.
///
/// Code uniqueness is enforced by the `links_code_key` constraint; its
/// violation surfaces as [`AppError::Conflict`] through `From<sqlx::Error>`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (id, code, original, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&new_link.code)
        .bind(&new_link.original)
        .bind(new_link.owner_id.as_ref().map(OwnerId::as_str))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE code = $1 AND deleted_at IS NULL
            "#
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_owned_active(
        &self,
        id: Uuid,
        owner: &OwnerId,
    ) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL
            "#
        ))
        .bind(id)
        .bind(owner.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_owned(&self, id: Uuid, owner: &OwnerId) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE id = $1 AND owner_id = $2
            "#
        ))
        .bind(id)
        .bind(owner.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_fields(&self, id: Uuid, patch: LinkPatch) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links
            SET original   = COALESCE($2, original),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.original)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET deleted_at = NOW(),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_active_by_owner(&self, owner: &OwnerId) -> Result<Vec<ShortLink>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE owner_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC
            "#
        ))
        .bind(owner.as_str())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tx = self.pool.begin().await?;

        // The row lock taken here serializes concurrent increments.
        let updated = sqlx::query(
            r#"
            UPDATE links
            SET click_count = click_count + 1,
                updated_at  = NOW()
            WHERE id = $1
            "#,
        )
        .bind(new_click.link_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "URL not found",
                json!({ "id": new_click.link_id }),
            ));
        }

        let row = sqlx::query_as::<_, ClickRow>(&format!(
            r#"
            INSERT INTO link_clicks (link_id, ip, user_agent, referer)
            VALUES ($1, $2, $3, $4)
            RETURNING {CLICK_COLUMNS}
            "#
        ))
        .bind(new_click.link_id)
        .bind(new_click.meta.ip)
        .bind(new_click.meta.user_agent)
        .bind(new_click.meta.referer)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn list_clicks(
        &self,
        link_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(&format!(
            r#"
            SELECT {CLICK_COLUMNS}
            FROM link_clicks
            WHERE link_id = $1
            ORDER BY clicked_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(link_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
