//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::middleware::auth::MaybeOwner;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for one URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// A bearer token is optional. Without one the link is anonymous and can
/// never be listed, updated or deleted.
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_url": "http://localhost:3000/aZ3k9Q",
///   "id": "6f1c...",
///   "code": "aZ3k9Q",
///   "original": "https://example.com/some/long/path",
///   "owner_id": "u1",
///   "click_count": 0,
///   "created_at": "...",
///   "updated_at": "..."
/// }
/// ```
///
/// # Errors
///
/// - `400` for a malformed body or a non-http(s) URL
/// - `401` for a present but invalid token
pub async fn shorten_handler(
    State(state): State<AppState>,
    MaybeOwner(owner): MaybeOwner,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state
        .link_service
        .create_short(payload.original_url, owner)
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
