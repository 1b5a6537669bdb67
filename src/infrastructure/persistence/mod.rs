//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, lookups and the click transaction (PostgreSQL)
//! - [`PgTokenRepository`] - API token storage and lookup (PostgreSQL)
//! - [`MemoryLinkRepository`], [`MemoryTokenRepository`] - In-process equivalents

pub mod memory;
pub mod pg_link_repository;
pub mod pg_token_repository;

pub use memory::{MemoryLinkRepository, MemoryTokenRepository};
pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
