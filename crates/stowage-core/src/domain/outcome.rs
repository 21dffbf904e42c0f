//! Persist outcome.

use serde::{Deserialize, Serialize};

/// Result of persisting the uploads of one record.
///
/// Serialized as SCREAMING_SNAKE_CASE: SUCCESS / FAILURE / NOOP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PersistOutcome {
    /// The last attribute that had an upload was written.
    Success,

    /// The last attribute that had an upload could not be written.
    Failure,

    /// No tracked attribute had an upload.
    Noop,
}

impl PersistOutcome {
    pub fn from_saved(saved: bool) -> Self {
        if saved {
            PersistOutcome::Success
        } else {
            PersistOutcome::Failure
        }
    }

    /// Whether the host should reject the enclosing save.
    pub fn rejects_save(self) -> bool {
        self == PersistOutcome::Failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_as_screaming_snake_case() {
        let s = serde_json::to_string(&PersistOutcome::Success).unwrap();
        assert_eq!(s, "\"SUCCESS\"");

        let s = serde_json::to_string(&PersistOutcome::Noop).unwrap();
        assert_eq!(s, "\"NOOP\"");
    }

    #[test]
    fn only_failure_rejects_save() {
        assert!(PersistOutcome::from_saved(false).rejects_save());
        assert!(!PersistOutcome::from_saved(true).rejects_save());
        assert!(!PersistOutcome::Noop.rejects_save());
    }
}
