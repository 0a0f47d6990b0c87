//! Error types for the local test store and the test-taking flow.
//!
//! Store operations never swallow failures: callers that only want
//! best-effort behaviour use the `*_or_empty` helpers on the store.

use thiserror::Error;

/// Errors from reading or writing the local test store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not read or write a collection.
    #[error("storage unavailable for '{key}': {source}")]
    Io {
        key: String,
        source: std::io::Error,
    },

    /// A stored collection exists but is not valid JSON for its type.
    #[error("stored collection '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        source: serde_json::Error,
    },

    /// A collection could not be serialized.
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },

    /// The backend is in a state where it cannot be used at all.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns `true` if the stored data itself is bad, as opposed to the
    /// backend being unreachable.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}

/// Errors from candidate registration.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Name and at least one skill are required.")]
    MissingFields,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from opening, answering or submitting a test.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No test with that id, or it belongs to another candidate.
    #[error("Invalid or missing test.")]
    InvalidOrMissingTest,

    #[error("question '{0}' is not part of this test")]
    UnknownQuestion(String),

    #[error("option {option} is out of range for question '{question_id}' ({options} options)")]
    OptionOutOfRange {
        question_id: String,
        option: usize,
        options: usize,
    },

    /// Submission attempted before every question was answered.
    #[error("{unanswered} question(s) still unanswered")]
    Incomplete { unanswered: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(
            SessionError::InvalidOrMissingTest.to_string(),
            "Invalid or missing test."
        );
        assert_eq!(
            RegistrationError::MissingFields.to_string(),
            "Name and at least one skill are required."
        );
        assert_eq!(
            SessionError::Incomplete { unanswered: 2 }.to_string(),
            "2 question(s) still unanswered"
        );
    }

    #[test]
    fn corruption_classification() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = StoreError::Corrupt {
            key: "k".into(),
            source,
        };
        assert!(err.is_corruption());
        assert!(!StoreError::Unavailable("x".into()).is_corruption());
    }
}
