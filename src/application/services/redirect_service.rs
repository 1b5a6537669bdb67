//! Redirect resolution and click recording.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::{Click, ClickMeta, NewClick, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Service behind the public `GET /{code}` redirect.
///
/// Every resolved visit is recorded; no bot or duplicate filtering happens here.
pub struct RedirectService {
    repository: Arc<dyn LinkRepository>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Resolves a code to its active link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown and soft-deleted codes alike.
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_active_by_code(code)
            .await?
            .ok_or_else(|| {
                debug!(code, "Short code not found");
                AppError::not_found("URL not found", json!({ "code": code }))
            })
    }

    /// Stores one click and increments the link's counter atomically.
    pub async fn record_click(&self, link_id: Uuid, meta: ClickMeta) -> Result<Click, AppError> {
        self.repository
            .record_click(NewClick { link_id, meta })
            .await
    }

    /// Resolves `code` and records the visit before returning the link.
    pub async fn resolve_and_record(
        &self,
        code: &str,
        meta: ClickMeta,
    ) -> Result<ShortLink, AppError> {
        let link = self.resolve(code).await?;
        self.record_click(link.id, meta).await?;
        Ok(link)
    }
}
