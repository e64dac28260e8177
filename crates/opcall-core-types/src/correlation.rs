//! Correlation identifiers attached to log events
//!
//! A `DispatcherId` names one dispatcher instance for its whole lifetime; a
//! `RunId` names one pass of `Dispatcher::run` over an input source. Both are
//! UUIDv7 so that they sort by creation time in log output.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single dispatcher instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatcherId(String);

impl DispatcherId {
    /// Generate a new DispatcherId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for DispatcherId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DispatcherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of one `run` over an input source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new RunId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_id_generation() {
        let id1 = DispatcherId::new();
        let id2 = DispatcherId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_dispatcher_id_display() {
        let id = DispatcherId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_dispatcher_id_from_string() {
        let id = DispatcherId::from_string("d-1".to_string());
        assert_eq!(id.as_str(), "d-1");
    }

    #[test]
    fn test_run_id_generation() {
        let id1 = RunId::new();
        let id2 = RunId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_serialization() {
        let id = DispatcherId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: DispatcherId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
