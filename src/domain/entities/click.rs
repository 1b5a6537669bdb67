//! Click entity representing a single resolved visit.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A visit recorded when a short link is resolved.
///
/// Clicks are append-only: created once, never updated or deleted, and kept
/// after their link is soft-deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Click {
    pub id: i64,
    pub link_id: Uuid,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// Request metadata captured on a visit.
///
/// Each field is independently optional. Absence is stored as NULL, never as
/// a placeholder string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickMeta {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClickMeta {
    /// Builds metadata from raw header values, dropping empty strings.
    pub fn new(ip: Option<String>, user_agent: Option<&str>, referer: Option<&str>) -> Self {
        fn non_empty(value: Option<&str>) -> Option<String> {
            value.filter(|v| !v.is_empty()).map(str::to_string)
        }

        Self {
            ip: non_empty(ip.as_deref()),
            user_agent: non_empty(user_agent),
            referer: non_empty(referer),
        }
    }
}

/// Input data for recording a click.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClick {
    pub link_id: Uuid,
    pub meta: ClickMeta,
}
