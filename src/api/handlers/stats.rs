//! Handler for per-link click history.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;
use uuid::Uuid;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::stats::StatsResponse;
use crate::api::middleware::auth::Owner;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click history of one of the caller's links.
///
/// # Endpoint
///
/// `GET /user/urls/{id}/stats?page=1&page_size=25`
///
/// Deleted links keep their history and remain visible here.
///
/// # Errors
///
/// - `400` for `page = 0` or `page_size` outside 10..=1000
/// - `404` if the link does not exist or belongs to someone else
pub async fn stats_handler(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<StatsResponse>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|msg| AppError::bad_request(msg, json!({})))?;

    let (link, clicks) = state
        .owned_link_service
        .link_clicks(id, &owner, offset, limit)
        .await?;

    Ok(Json(StatsResponse::new(
        link,
        clicks,
        params.page(),
        params.page_size(),
    )))
}
