//! Handlers for the caller's own links (list, update, delete).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::api::middleware::auth::Owner;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's active links, newest first.
///
/// # Endpoint
///
/// `GET /user/urls`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Owner(owner): Owner,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.owned_link_service.list_by_owner(&owner).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Changes the destination of one of the caller's links.
///
/// # Endpoint
///
/// `PATCH /user/urls/{id}`
///
/// # Request Body
///
/// ```json
/// { "original": "https://example.com/new" }
/// ```
///
/// An absent or empty `original` keeps the destination and only refreshes
/// `updated_at`.
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist, is deleted, or belongs
/// to someone else.
pub async fn update_link_handler(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateLinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .owned_link_service
        .update_owned(id, &owner, payload.into_patch())
        .await?;

    Ok(Json(link.into()))
}

/// Soft-deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /user/urls/{id}`
///
/// # Response
///
/// ```json
/// { "status": "ok" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found under the same conditions as update, including a
/// repeated delete.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Owner(owner): Owner,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state.owned_link_service.soft_delete_owned(id, &owner).await?;

    Ok(Json(json!({ "status": "ok" })))
}
