//! Changelist revisions.

use serde::{Deserialize, Serialize};

/// Sentinel revision naming the backend's default changelist.
pub const DEFAULT_REVISION: &str = "-1";

/// Sentinel revision asking the backend to create a new changelist.
pub const NEW_REVISION: &str = "-2";

/// A backend-defined grouping of asset changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelist {
    pub revision: String,
    pub description: String,
    /// RFC 3339 timestamp, empty when the backend does not track one.
    pub timestamp: String,
    pub committer: String,
}

impl Changelist {
    pub fn new(revision: impl Into<String>, description: impl Into<String>) -> Self {
        Changelist {
            revision: revision.into(),
            description: description.into(),
            timestamp: String::new(),
            committer: String::new(),
        }
    }

    pub fn is_default(&self) -> bool {
        self.revision == DEFAULT_REVISION
    }

    pub fn is_new(&self) -> bool {
        self.revision == NEW_REVISION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert!(Changelist::new(DEFAULT_REVISION, "").is_default());
        assert!(Changelist::new(NEW_REVISION, "").is_new());
        assert!(!Changelist::new("42", "fix").is_default());
    }
}
