//! Short link creation service.

use std::sync::Arc;

use tracing::info;

use super::code_allocator::CodeAllocator;
use crate::domain::entities::{NewLink, OwnerId, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// A newly created link together with its public URL.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub short_url: String,
    pub link: ShortLink,
}

/// Service for shortening URLs.
///
/// Claims a unique code through [`CodeAllocator`] and persists exactly one
/// link per successful call. The destination URL is expected to be already
/// validated by the HTTP layer.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    allocator: CodeAllocator,
    base_url: String,
}

impl LinkService {
    /// Creates a service using random codes.
    ///
    /// `base_url` is the public origin short URLs are built on, e.g.
    /// `https://sho.rt`.
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self::with_allocator(repository, base_url, CodeAllocator::default())
    }

    pub fn with_allocator(
        repository: Arc<dyn LinkRepository>,
        base_url: impl Into<String>,
        allocator: CodeAllocator,
    ) -> Self {
        Self {
            repository,
            allocator,
            base_url: base_url.into(),
        }
    }

    /// Shortens `original_url`, owned by `owner` or anonymous when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] only if the seven-character fallback
    /// code collides as well. Store failures propagate unchanged.
    pub async fn create_short(
        &self,
        original_url: String,
        owner: Option<OwnerId>,
    ) -> Result<CreatedLink, AppError> {
        let link = self
            .allocator
            .allocate(|code| {
                self.repository.insert(NewLink {
                    code,
                    original: original_url.clone(),
                    owner_id: owner.clone(),
                })
            })
            .await?;

        info!(
            code = %link.code,
            owner = owner.as_ref().map(OwnerId::as_str).unwrap_or("anonymous"),
            "Short link created"
        );

        Ok(CreatedLink {
            short_url: self.short_url(&link.code),
            link,
        })
    }

    /// Builds the public URL for a code: `<base_url>/<code>`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }
}
