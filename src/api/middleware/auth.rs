//! Bearer token identity extractors.
//!
//! Handlers declare how much identity they need through their arguments:
//!
//! - [`MaybeOwner`] for routes open to anonymous callers
//! - [`Owner`] for routes that act on the caller's own links
//!
//! Both read `Authorization: Bearer <token>` and resolve it through
//! [`crate::application::services::AuthService`]. A header that is present
//! but malformed, unknown or revoked is always rejected with `401`, even on
//! anonymous routes.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::OwnerId;
use crate::error::AppError;
use crate::state::AppState;

/// Identity of the caller, if any.
#[derive(Debug, Clone)]
pub struct MaybeOwner(pub Option<OwnerId>);

/// Identity of an authenticated caller.
///
/// Rejects with `401 Unauthorized` and `WWW-Authenticate: Bearer` when the
/// header is missing.
#[derive(Debug, Clone)]
pub struct Owner(pub OwnerId);

impl FromRequestParts<AppState> for MaybeOwner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeOwner(None));
        }

        resolve(parts, state).await.map(|owner| MaybeOwner(Some(owner)))
    }
}

impl FromRequestParts<AppState> for Owner {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        resolve(parts, state).await.map(Owner)
    }
}

async fn resolve(parts: &mut Parts, state: &AppState) -> Result<OwnerId, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    state.auth_service.resolve_owner(&token).await
}
