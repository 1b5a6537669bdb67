//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, OwnedLinkService, RedirectService};
use crate::domain::repositories::{LinkRepository, TokenRepository};

/// Services wired over one pair of repositories.
///
/// Cloning is cheap; every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub owned_link_service: Arc<OwnedLinkService>,
    pub auth_service: Arc<AuthService>,
    /// Raw store handle, used by the health check.
    pub links: Arc<dyn LinkRepository>,
}

impl AppState {
    /// Builds all services from a link store and a token store.
    ///
    /// `base_url` is the origin short URLs are built on; `signing_secret`
    /// keys the API token HMAC.
    pub fn new(
        links: Arc<dyn LinkRepository>,
        tokens: Arc<dyn TokenRepository>,
        base_url: impl Into<String>,
        signing_secret: impl Into<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(links.clone(), base_url)),
            redirect_service: Arc::new(RedirectService::new(links.clone())),
            owned_link_service: Arc::new(OwnedLinkService::new(links.clone())),
            auth_service: Arc::new(AuthService::new(tokens, signing_secret)),
            links,
        }
    }
}
