//! HTTP middleware and request extractors.
//!
//! Provides bearer-token identity extraction and request tracing.

pub mod auth;
pub mod tracing;
