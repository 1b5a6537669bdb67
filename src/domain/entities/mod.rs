//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A code-to-destination mapping with ownership and lifecycle
//! - [`Click`] - A recorded visit to a short link
//! - [`OwnerId`] - A resolved, authenticated identity
//!
//! Creation and partial-update inputs live next to their entity:
//! `NewLink`, `LinkPatch`, `NewClick`, `ClickMeta`.

pub mod click;
pub mod link;
pub mod owner;

pub use click::{Click, ClickMeta, NewClick};
pub use link::{LinkPatch, LinkState, NewLink, ShortLink};
pub use owner::OwnerId;
