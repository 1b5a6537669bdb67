//! Business logic services for the application layer.

pub mod auth_service;
pub mod code_allocator;
pub mod link_service;
pub mod owned_link_service;
pub mod redirect_service;

pub use auth_service::AuthService;
pub use code_allocator::CodeAllocator;
pub use link_service::{CreatedLink, LinkService};
pub use owned_link_service::OwnedLinkService;
pub use redirect_service::RedirectService;
