//! Repository trait for API tokens.

use crate::domain::entities::OwnerId;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// API token bound to an owner identity.
///
/// Only the HMAC of the raw token is stored.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub name: String,
    pub owner_id: OwnerId,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Repository interface for API token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryTokenRepository`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns the owner of a non-revoked token with this hash.
    async fn find_owner(&self, token_hash: &str) -> Result<Option<OwnerId>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the name or hash already exists.
    async fn create_token(
        &self,
        name: &str,
        owner: &OwnerId,
        token_hash: &str,
    ) -> Result<ApiToken, AppError>;

    /// Lists all tokens, newest first.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError>;

    /// Revokes a token. Returns `Ok(false)` if it was missing or already revoked.
    async fn revoke_token(&self, id: i64) -> Result<bool, AppError>;
}
