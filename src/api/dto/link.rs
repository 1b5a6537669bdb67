//! Public JSON shape of a short link.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::{OwnerId, ShortLink};

/// A short link as returned by the API.
///
/// `deleted_at` is omitted for active links.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: Uuid,
    pub code: String,
    pub original: String,
    pub owner_id: Option<OwnerId>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl From<ShortLink> for LinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            deleted_at: link.deleted_at(),
            id: link.id,
            code: link.code,
            original: link.original,
            owner_id: link.owner_id,
            click_count: link.click_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_link_omits_deleted_at() {
        let link = ShortLink::new(
            Uuid::new_v4(),
            "Ab1cD2".to_string(),
            "https://example.com".to_string(),
            None,
            Utc::now(),
        );

        let json = serde_json::to_value(LinkResponse::from(link)).unwrap();

        assert_eq!(json["code"], "Ab1cD2");
        assert!(json["owner_id"].is_null());
        assert_eq!(json["click_count"], 0);
        assert!(json.get("deleted_at").is_none());
    }
}
