//! Owner-scoped link management.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::{Click, LinkPatch, OwnerId, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const NOT_OWNED_MESSAGE: &str = "URL not found or not owned by user";

/// Guards every mutation of a link behind an ownership check.
///
/// A missing link, a link owned by someone else, an anonymous link and a
/// soft-deleted link all produce the same [`AppError::NotFound`], so callers
/// cannot probe for other owners' ids.
pub struct OwnedLinkService {
    repository: Arc<dyn LinkRepository>,
}

impl OwnedLinkService {
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Active links of `owner`, newest first.
    pub async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<ShortLink>, AppError> {
        self.repository.list_active_by_owner(owner).await
    }

    /// Applies `patch` to a link the caller owns.
    ///
    /// Absent fields keep their value; `updated_at` is refreshed even when
    /// the patch carries no changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] unless the link is active and owned by `owner`.
    pub async fn update_owned(
        &self,
        id: Uuid,
        owner: &OwnerId,
        patch: LinkPatch,
    ) -> Result<ShortLink, AppError> {
        let link = self.require_owned_active(id, owner).await?;

        let changed = !patch.is_empty();
        let updated = self.repository.update_fields(link.id, patch).await?;
        info!(id = %updated.id, owner = %owner, changed, "Short link updated");

        Ok(updated)
    }

    /// Soft-deletes a link the caller owns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] unless the link is active and owned by
    /// `owner`, which makes a second delete of the same link fail.
    pub async fn soft_delete_owned(&self, id: Uuid, owner: &OwnerId) -> Result<(), AppError> {
        let link = self.require_owned_active(id, owner).await?;

        // Lost a race with a concurrent delete.
        if !self.repository.soft_delete(link.id).await? {
            return Err(not_owned(id));
        }

        info!(id = %link.id, owner = %owner, "Short link deleted");
        Ok(())
    }

    /// Click history of a link the caller owns, newest first.
    ///
    /// Soft-deleted links keep their history.
    pub async fn link_clicks(
        &self,
        id: Uuid,
        owner: &OwnerId,
        offset: i64,
        limit: i64,
    ) -> Result<(ShortLink, Vec<Click>), AppError> {
        let link = self
            .repository
            .find_owned(id, owner)
            .await?
            .ok_or_else(|| not_owned(id))?;

        let clicks = self.repository.list_clicks(link.id, offset, limit).await?;
        Ok((link, clicks))
    }

    async fn require_owned_active(&self, id: Uuid, owner: &OwnerId) -> Result<ShortLink, AppError> {
        self.repository
            .find_owned_active(id, owner)
            .await?
            .ok_or_else(|| not_owned(id))
    }
}

fn not_owned(id: Uuid) -> AppError {
    AppError::not_found(NOT_OWNED_MESSAGE, json!({ "id": id }))
}
