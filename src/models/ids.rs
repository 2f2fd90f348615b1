//! Opaque identifiers handed out by the upstream API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable player identifier, independent of display name changes.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Puuid(String);

impl Puuid {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `n` characters, for log lines and CLI output.
    pub fn short(&self, n: usize) -> &str {
        match self.0.char_indices().nth(n) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for Puuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Puuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Puuid({})", self.0)
    }
}

impl From<String> for Puuid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Puuid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Match identifier, e.g. `NA1_4876543210`.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl From<&str> for MatchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MatchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Side of the map a participant played on (100 = blue, 200 = red).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u16);

impl TeamId {
    pub const BLUE: TeamId = TeamId(100);
    pub const RED: TeamId = TeamId(200);
}

impl Default for TeamId {
    fn default() -> Self {
        Self::BLUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puuid_serializes_as_plain_string() {
        let id = Puuid::from("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");

        let parsed: Puuid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_puuid_short() {
        let id = Puuid::from("0123456789abcdef");
        assert_eq!(id.short(10), "0123456789");
        assert_eq!(Puuid::from("abc").short(10), "abc");
    }

    #[test]
    fn test_puuid_debug() {
        let id = Puuid::new("debug-test");
        assert_eq!(format!("{:?}", id), "Puuid(debug-test)");
    }

    #[test]
    fn test_match_id_display() {
        let id = MatchId::from("NA1_42");
        assert_eq!(id.to_string(), "NA1_42");
    }

    #[test]
    fn test_team_id_default_is_blue() {
        assert_eq!(TeamId::default(), TeamId(100));
        assert_eq!(serde_json::to_string(&TeamId::RED).unwrap(), "200");
    }
}
