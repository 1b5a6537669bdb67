//! Identity resolution from API bearer tokens.

use hmac::{Hmac, Mac};
use rand::Rng;
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::OwnerId;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Length of generated raw tokens.
pub const TOKEN_LENGTH: usize = 48;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Maps bearer tokens to the owner identity they were issued for.
///
/// Tokens are hashed with HMAC-SHA256 keyed by `signing_secret` before storage
/// and comparison. A database dump alone is not enough to verify or forge a
/// token.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// `signing_secret` must match the value used when tokens were issued.
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: impl Into<String>) -> Self {
        Self {
            repository,
            signing_secret: signing_secret.into(),
        }
    }

    /// Returns the lowercase hex HMAC of `token`, 64 characters long.
    pub fn hash_token(&self, token: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes()).map_err(|e| {
            AppError::internal("Token hashing failed", json!({ "reason": e.to_string() }))
        })?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Resolves the owner behind a raw bearer token.
    ///
    /// Refreshes the token's `last_used_at` on success; a failure to do so is
    /// logged and does not reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown and revoked tokens.
    pub async fn resolve_owner(&self, token: &str) -> Result<OwnerId, AppError> {
        let token_hash = self.hash_token(token)?;

        let Some(owner) = self.repository.find_owner(&token_hash).await? else {
            debug!("Rejected unknown or revoked token");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or revoked token" }),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            warn!(error = %e, "Failed to update token last_used_at");
        }

        Ok(owner)
    }

    /// Stores a token for `owner` and returns its record.
    ///
    /// Only the hash of `raw_token` is persisted.
    pub async fn issue_token(
        &self,
        name: &str,
        owner: &OwnerId,
        raw_token: &str,
    ) -> Result<ApiToken, AppError> {
        let token_hash = self.hash_token(raw_token)?;
        self.repository
            .create_token(name, owner, &token_hash)
            .await
    }
}

/// Generates a random alphanumeric token of [`TOKEN_LENGTH`] characters.
pub fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LENGTH)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}
