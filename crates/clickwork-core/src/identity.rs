//! Identity types for players and catalog definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a player, as assigned by the surrounding transport
/// (e.g. a chat user id). The engine never generates these itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// Create a new player ID
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player:{}", self.0)
    }
}

/// Identifier for a catalog definition (order template, boost, item,
/// team member, skill, achievement)
///
/// Uses a string-based code for easy reference from RON catalogs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefId(pub String);

impl DefId {
    /// Create a new definition ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DefId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DefId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id() {
        let id = PlayerId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "player:42");
    }

    #[test]
    fn test_def_id() {
        let id = DefId::new("laptop_t1");
        assert_eq!(id.as_str(), "laptop_t1");
        assert_eq!(format!("{}", id), "laptop_t1");
    }
}
