//! DTOs for the click history endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pagination::PaginationMeta;
use crate::domain::entities::{Click, ShortLink};

/// Click history of one link, newest click first.
///
/// `total` equals the link's `click_count`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub pagination: PaginationMeta,
    pub code: String,
    pub original: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    pub items: Vec<ClickInfo>,
}

impl StatsResponse {
    pub fn new(link: ShortLink, clicks: Vec<Click>, page: u32, page_size: u32) -> Self {
        Self {
            pagination: PaginationMeta::new(page, page_size, link.click_count),
            deleted_at: link.deleted_at(),
            code: link.code,
            original: link.original,
            click_count: link.click_count,
            created_at: link.created_at,
            updated_at: link.updated_at,
            items: clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}

/// Individual click event information.
///
/// Optional fields are omitted from JSON when `None`.
#[derive(Debug, Serialize)]
pub struct ClickInfo {
    pub clicked_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

impl From<Click> for ClickInfo {
    fn from(click: Click) -> Self {
        Self {
            clicked_at: click.clicked_at,
            user_agent: click.user_agent,
            referer: click.referer,
            ip: click.ip,
        }
    }
}
