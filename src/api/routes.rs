//! API route configuration.
//!
//! Identity is resolved per handler through the
//! [`crate::api::middleware::auth`] extractors rather than a route layer, so
//! anonymous and owner-only routes can share one router.

use crate::api::handlers::{
    delete_link_handler, list_links_handler, redirect_handler, shorten_handler, stats_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// Link routes.
///
/// # Endpoints
///
/// - `POST   /shorten`              - Create a short link (token optional)
/// - `GET    /{code}`               - Redirect to the original URL
/// - `GET    /user/urls`            - List the caller's active links
/// - `PATCH  /user/urls/{id}`       - Change a link's destination
/// - `DELETE /user/urls/{id}`       - Soft-delete a link
/// - `GET    /user/urls/{id}/stats` - Click history of a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/user/urls", get(list_links_handler))
        .route(
            "/user/urls/{id}",
            patch(update_link_handler).delete(delete_link_handler),
        )
        .route("/user/urls/{id}/stats", get(stats_handler))
        .route("/{code}", get(redirect_handler))
}
