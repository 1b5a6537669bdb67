//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::domain::entities::ClickMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the active link for `code`
/// 2. Record the click (client IP, `User-Agent`, `Referer`) and bump the
///    counter in one transaction
/// 3. Return `302 Found` with `Location` set to the original URL
///
/// The redirect is only sent once the click is stored.
///
/// # Errors
///
/// Returns 404 Not Found for unknown and soft-deleted codes.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let meta = ClickMeta::new(
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let link = state.redirect_service.resolve_and_record(&code, meta).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, link.original)]))
}
