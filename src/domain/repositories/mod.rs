//! Repository trait definitions for the domain layer.
//!
//! These traits are the data-access seams of the service. Concrete
//! implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated by `mockall` under `cfg(test)`.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short links and their click log
//! - [`TokenRepository`] - API tokens used to resolve owner identities

pub mod link_repository;
pub mod token_repository;

pub use link_repository::LinkRepository;
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
