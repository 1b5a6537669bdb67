//! DTO for the link update endpoint.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use super::shorten::validate_http_url;
use crate::domain::entities::LinkPatch;

/// Request body for `PATCH /user/urls/{id}`.
///
/// Absent or empty `original` leaves the destination unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New destination URL.
    #[validate(custom(function = "validate_optional_url"))]
    pub original: Option<String>,
}

impl UpdateLinkRequest {
    pub fn into_patch(self) -> LinkPatch {
        LinkPatch::new(self.original)
    }
}

fn validate_optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_http_url(value)
}
