//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError};

use super::link::LinkResponse;
use crate::application::services::CreatedLink;

/// Request body for `POST /shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination URL; must be absolute `http` or `https`.
    #[validate(custom(function = "validate_http_url"))]
    pub original_url: String,
}

/// Response for a created link: the link itself plus its public URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,

    #[serde(flatten)]
    pub link: LinkResponse,
}

impl From<CreatedLink> for ShortenResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            short_url: created.short_url,
            link: created.link.into(),
        }
    }
}

/// Accepts absolute `http`/`https` URLs with a host.
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new("url").with_message("Invalid URL format".into());

    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: &str) -> ShortenRequest {
        ShortenRequest {
            original_url: url.to_string(),
        }
    }

    #[test]
    fn test_accepts_http_and_https() {
        assert!(request("https://example.com/a?b=c").validate().is_ok());
        assert!(request("http://localhost:8080").validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_schemes() {
        assert!(request("ftp://example.com").validate().is_err());
        assert!(request("javascript:alert(1)").validate().is_err());
        assert!(request("mailto:a@b.c").validate().is_err());
    }

    #[test]
    fn test_rejects_relative_and_empty() {
        assert!(request("/just/a/path").validate().is_err());
        assert!(request("example.com").validate().is_err());
        assert!(request("").validate().is_err());
    }
}
