//! Short link entity and its lifecycle.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::owner::OwnerId;

/// Lifecycle of a short link.
///
/// `Active` is entered only by creation. `Deleted` is terminal: there is no
/// transition back, so no code path can undelete a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Active,
    Deleted { at: DateTime<Utc> },
}

impl LinkState {
    /// Builds the state from a nullable `deleted_at` column.
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted { at },
            None => Self::Active,
        }
    }

    /// Soft-deletes an active link. Returns `None` if already deleted.
    pub fn delete(self, at: DateTime<Utc>) -> Option<Self> {
        match self {
            Self::Active => Some(Self::Deleted { at }),
            Self::Deleted { .. } => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(*at),
        }
    }
}

/// A persisted mapping from a short code to a destination URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortLink {
    pub id: Uuid,
    pub code: String,
    pub original: String,
    /// `None` for links created anonymously. Never changes after creation.
    pub owner_id: Option<OwnerId>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: LinkState,
}

impl ShortLink {
    /// Creates a freshly inserted, active link with no clicks.
    pub fn new(
        id: Uuid,
        code: String,
        original: String,
        owner_id: Option<OwnerId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            original,
            owner_id,
            click_count: 0,
            created_at,
            updated_at: created_at,
            state: LinkState::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.state.deleted_at()
    }

    pub fn is_owned_by(&self, owner: &OwnerId) -> bool {
        self.owner_id.as_ref() == Some(owner)
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub original: String,
    pub owner_id: Option<OwnerId>,
}

/// Partial update for an owned link.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkPatch {
    pub original: Option<String>,
}

impl LinkPatch {
    /// Builds a patch, treating an empty destination as absent.
    pub fn new(original: Option<String>) -> Self {
        Self {
            original: original.filter(|url| !url.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_none()
    }
}
