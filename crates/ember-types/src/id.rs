use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

/// Unguessable identifier for a stored drop.
///
/// A `DropId` is 128 bits of randomness rendered in the hyphenated
/// lowercase form (URL-safe, no escaping needed in a path segment). The id
/// is the only handle a recipient ever holds; there is no enumeration
/// surface, so possession of the id is the capability to attempt retrieval.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DropId(Uuid);

impl DropId {
    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from the hyphenated string form.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| TypeError::InvalidId(e.to_string()))
    }

    /// The raw 16 bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Compact hex form without hyphens, used for blob file names.
    pub fn to_simple(&self) -> String {
        self.0.simple().to_string()
    }

    /// Short prefix for log lines (first 8 hex characters).
    pub fn short(&self) -> String {
        self.to_simple()[..8].to_string()
    }
}

impl fmt::Debug for DropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DropId({})", self.short())
    }
}

impl fmt::Display for DropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for DropId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
