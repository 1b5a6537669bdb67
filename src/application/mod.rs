//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and enforce the rules the store
//! cannot express on its own. Handlers talk to services, never to
//! repositories directly.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - URL shortening
//! - [`services::redirect_service::RedirectService`] - Redirect resolution and click recording
//! - [`services::owned_link_service::OwnedLinkService`] - Owner-scoped listing, update and delete
//! - [`services::auth_service::AuthService`] - Bearer token to owner resolution

pub mod services;
