//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`crate::application::services::RedirectService::resolve`] finds the active link
//! 3. [`crate::application::services::RedirectService::record_click`] stores the
//!    click and bumps the counter in one transaction
//! 4. The handler answers `302 Found`

pub mod entities;
pub mod repositories;
