//! Identifier newtypes for flow entities.
//!
//! Stage ids are human-chosen slugs ("lead", "proposal"); deal ids are ULIDs
//! minted at creation time. Both serialize as plain strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Slug identifier for a stage (e.g. "lead", "won")
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageId(String);

impl StageId {
    /// Create a stage id from an existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for StageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// ULID identifier for a deal
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealId(String);

impl DealId {
    /// Mint a fresh ULID-backed deal id
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Create a deal id from an existing string (e.g. a filename stem)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DealId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DealId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_ids_are_unique_ulids() {
        let a = DealId::new();
        let b = DealId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 26);
    }

    #[test]
    fn test_stage_id_round_trips_as_plain_string() {
        let id = StageId::from_string("proposal");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"proposal\"");
        let parsed: StageId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
