//! Owner identity newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated identity that can own short links.
///
/// Values only come from the identity resolver; the core never authenticates.
/// Owner-restricted operations take `&OwnerId` rather than `Option`, so an
/// anonymous caller cannot reach them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
