//! Repository trait for short link data access.

use crate::domain::entities::{Click, LinkPatch, NewClick, NewLink, OwnerId, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Store interface for short links and their clicks.
///
/// The store must be transactional and must enforce uniqueness of `code`,
/// reporting a violation as [`AppError::Conflict`] and nothing else as such.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    /// Returns [`AppError::Unavailable`] / [`AppError::Internal`] on store failure.
    async fn insert(&self, new_link: NewLink) -> Result<ShortLink, AppError>;

    /// Finds the active link with the given code.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by id that is active and owned by `owner`.
    ///
    /// All three conditions are applied in one lookup.
    async fn find_owned_active(
        &self,
        id: Uuid,
        owner: &OwnerId,
    ) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by id owned by `owner`, whatever its lifecycle state.
    async fn find_owned(&self, id: Uuid, owner: &OwnerId) -> Result<Option<ShortLink>, AppError>;

    /// Applies the present fields of `patch` and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    async fn update_fields(&self, id: Uuid, patch: LinkPatch) -> Result<ShortLink, AppError>;

    /// Sets `deleted_at = now()` on an active link.
    ///
    /// Returns `Ok(false)` if the link is missing or already deleted.
    async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError>;

    /// Lists the owner's active links, newest first.
    async fn list_active_by_owner(&self, owner: &OwnerId) -> Result<Vec<ShortLink>, AppError>;

    /// Inserts a click and increments the link's counter in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist; nothing is
    /// written in that case.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Lists clicks for a link, newest first.
    async fn list_clicks(
        &self,
        link_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Click>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
