//! In-process repository implementations.
//!
//! Used for `STORE_BACKEND=memory` and by the HTTP test suite. Each
//! repository keeps its state behind a single async mutex, so every operation
//! is atomic with respect to the others: the code uniqueness check and
//! insert happen under one lock, and a click row and its counter bump are
//! applied together.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::{Click, LinkPatch, NewClick, NewLink, OwnerId, ShortLink};
use crate::domain::repositories::{ApiToken, LinkRepository, TokenRepository};
use crate::error::AppError;
use crate::utils::db_error::LINKS_CODE_CONSTRAINT;

#[derive(Default)]
struct LinkTables {
    links: HashMap<Uuid, ShortLink>,
    /// code -> link id; codes are never released, even on soft delete.
    codes: HashMap<String, Uuid>,
    /// Link ids in insertion order.
    order: Vec<Uuid>,
    clicks: Vec<Click>,
    next_click_id: i64,
}

/// In-memory link store.
#[derive(Default)]
pub struct MemoryLinkRepository {
    tables: Mutex<LinkTables>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of click rows recorded for a link.
    pub async fn click_rows(&self, link_id: Uuid) -> usize {
        let tables = self.tables.lock().await;
        tables.clicks.iter().filter(|c| c.link_id == link_id).count()
    }

    /// Total number of links, including soft-deleted ones.
    pub async fn len(&self) -> usize {
        self.tables.lock().await.links.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<ShortLink, AppError> {
        let mut tables = self.tables.lock().await;

        if tables.codes.contains_key(&new_link.code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "constraint": LINKS_CODE_CONSTRAINT }),
            ));
        }

        let link = ShortLink::new(
            Uuid::new_v4(),
            new_link.code,
            new_link.original,
            new_link.owner_id,
            Utc::now(),
        );

        tables.codes.insert(link.code.clone(), link.id);
        tables.order.push(link.id);
        tables.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .codes
            .get(code)
            .and_then(|id| tables.links.get(id))
            .filter(|link| link.is_active())
            .cloned())
    }

    async fn find_owned_active(
        &self,
        id: Uuid,
        owner: &OwnerId,
    ) -> Result<Option<ShortLink>, AppError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .links
            .get(&id)
            .filter(|link| link.is_owned_by(owner) && link.is_active())
            .cloned())
    }

    async fn find_owned(&self, id: Uuid, owner: &OwnerId) -> Result<Option<ShortLink>, AppError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .links
            .get(&id)
            .filter(|link| link.is_owned_by(owner))
            .cloned())
    }

    async fn update_fields(&self, id: Uuid, patch: LinkPatch) -> Result<ShortLink, AppError> {
        let mut tables = self.tables.lock().await;

        let link = tables
            .links
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;

        if let Some(original) = patch.original {
            link.original = original;
        }
        link.updated_at = Utc::now();

        Ok(link.clone())
    }

    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().await;

        let Some(link) = tables.links.get_mut(&id) else {
            return Ok(false);
        };

        let now = Utc::now();
        match link.state.delete(now) {
            Some(deleted) => {
                link.state = deleted;
                link.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_active_by_owner(&self, owner: &OwnerId) -> Result<Vec<ShortLink>, AppError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .order
            .iter()
            .rev()
            .filter_map(|id| tables.links.get(id))
            .filter(|link| link.is_owned_by(owner) && link.is_active())
            .cloned()
            .collect())
    }

    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let link = tables.links.get_mut(&new_click.link_id).ok_or_else(|| {
            AppError::not_found("URL not found", json!({ "id": new_click.link_id }))
        })?;
        link.click_count += 1;
        link.updated_at = now;

        tables.next_click_id += 1;
        let click = Click {
            id: tables.next_click_id,
            link_id: new_click.link_id,
            clicked_at: now,
            ip: new_click.meta.ip,
            user_agent: new_click.meta.user_agent,
            referer: new_click.meta.referer,
        };
        tables.clicks.push(click.clone());

        Ok(click)
    }

    async fn list_clicks(
        &self,
        link_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Click>, AppError> {
        let tables = self.tables.lock().await;

        Ok(tables
            .clicks
            .iter()
            .rev()
            .filter(|c| c.link_id == link_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
struct TokenTable {
    tokens: Vec<ApiToken>,
    next_id: i64,
}

/// In-memory token store.
#[derive(Default)]
pub struct MemoryTokenRepository {
    table: Mutex<TokenTable>,
}

impl MemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for MemoryTokenRepository {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<OwnerId>, AppError> {
        let table = self.table.lock().await;

        Ok(table
            .tokens
            .iter()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
            .map(|t| t.owner_id.clone()))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut table = self.table.lock().await;

        if let Some(token) = table
            .tokens
            .iter_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            token.last_used_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        owner: &OwnerId,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut table = self.table.lock().await;

        if table
            .tokens
            .iter()
            .any(|t| t.name == name || t.token_hash == token_hash)
        {
            return Err(AppError::internal(
                "Token already exists",
                json!({ "name": name }),
            ));
        }

        table.next_id += 1;
        let token = ApiToken {
            id: table.next_id,
            name: name.to_string(),
            owner_id: owner.clone(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        table.tokens.push(token.clone());

        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let table = self.table.lock().await;
        Ok(table.tokens.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let table = self.table.lock().await;
        Ok(table.tokens.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let table = self.table.lock().await;
        Ok(table.tokens.iter().find(|t| t.name == name).cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.table.lock().await;

        match table
            .tokens
            .iter_mut()
            .find(|t| t.id == id && !t.is_revoked())
        {
            Some(token) => {
                token.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ClickMeta;
    use std::sync::Arc;

    fn new_link(code: &str, owner: Option<&str>) -> NewLink {
        NewLink {
            code: code.to_string(),
            original: "https://example.com".to_string(),
            owner_id: owner.map(OwnerId::from),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_code() {
        let repo = MemoryLinkRepository::new();
        repo.insert(new_link("Ab1cD2", None)).await.unwrap();

        let err = repo.insert(new_link("Ab1cD2", Some("u1"))).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_deleted_code_is_not_reused() {
        let repo = MemoryLinkRepository::new();
        let link = repo.insert(new_link("Ab1cD2", None)).await.unwrap();
        assert!(repo.soft_delete(link.id).await.unwrap());

        let err = repo.insert(new_link("Ab1cD2", None)).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_soft_delete_twice() {
        let repo = MemoryLinkRepository::new();
        let link = repo.insert(new_link("Ab1cD2", None)).await.unwrap();

        assert!(repo.soft_delete(link.id).await.unwrap());
        assert!(!repo.soft_delete(link.id).await.unwrap());
        assert!(!repo.soft_delete(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_owned_active_filters_all_three() {
        let repo = MemoryLinkRepository::new();
        let u1 = OwnerId::new("u1");
        let u2 = OwnerId::new("u2");
        let link = repo.insert(new_link("Ab1cD2", Some("u1"))).await.unwrap();

        assert!(repo.find_owned_active(link.id, &u1).await.unwrap().is_some());
        assert!(repo.find_owned_active(link.id, &u2).await.unwrap().is_none());
        assert!(
            repo.find_owned_active(Uuid::new_v4(), &u1)
                .await
                .unwrap()
                .is_none()
        );

        repo.soft_delete(link.id).await.unwrap();
        assert!(repo.find_owned_active(link.id, &u1).await.unwrap().is_none());
        assert!(repo.find_owned(link.id, &u1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_fields_empty_patch_refreshes_updated_at() {
        let repo = MemoryLinkRepository::new();
        let link = repo.insert(new_link("Ab1cD2", Some("u1"))).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = repo
            .update_fields(link.id, LinkPatch::new(Some(String::new())))
            .await
            .unwrap();

        assert_eq!(updated.original, link.original);
        assert!(updated.updated_at > link.updated_at);
    }

    #[tokio::test]
    async fn test_record_click_unknown_link_writes_nothing() {
        let repo = MemoryLinkRepository::new();
        let missing = Uuid::new_v4();

        let err = repo
            .record_click(NewClick {
                link_id: missing,
                meta: ClickMeta::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(repo.click_rows(missing).await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_clicks_are_all_counted() {
        let repo = Arc::new(MemoryLinkRepository::new());
        let link = repo.insert(new_link("Ab1cD2", None)).await.unwrap();

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.record_click(NewClick {
                        link_id: link.id,
                        meta: ClickMeta::default(),
                    })
                    .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = repo.find_active_by_code("Ab1cD2").await.unwrap().unwrap();
        assert_eq!(stored.click_count, 50);
        assert_eq!(repo.click_rows(link.id).await, 50);
    }

    #[tokio::test]
    async fn test_list_clicks_newest_first_with_paging() {
        let repo = MemoryLinkRepository::new();
        let link = repo.insert(new_link("Ab1cD2", None)).await.unwrap();

        for i in 0..5 {
            repo.record_click(NewClick {
                link_id: link.id,
                meta: ClickMeta::new(Some(format!("10.0.0.{i}")), None, None),
            })
            .await
            .unwrap();
        }

        let page = repo.list_clicks(link.id, 1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].ip.as_deref(), Some("10.0.0.3"));
        assert_eq!(page[1].ip.as_deref(), Some("10.0.0.2"));
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let repo = MemoryTokenRepository::new();
        let owner = OwnerId::new("u1");

        let token = repo.create_token("cli", &owner, "hash-1").await.unwrap();
        assert_eq!(repo.find_owner("hash-1").await.unwrap(), Some(owner));
        assert!(repo.create_token("cli", &OwnerId::new("u2"), "hash-2").await.is_err());

        repo.update_last_used("hash-1").await.unwrap();
        let stored = repo.find_by_name("cli").await.unwrap().unwrap();
        assert!(stored.last_used_at.is_some());

        assert!(repo.revoke_token(token.id).await.unwrap());
        assert!(!repo.revoke_token(token.id).await.unwrap());
        assert!(repo.find_owner("hash-1").await.unwrap().is_none());
    }
}
