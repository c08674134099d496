//! Drill error types.
//!
//! These errors mark caller-contract violations in the engine. File and
//! parsing failures travel as `anyhow` errors with context; callers that need
//! to classify a failure can `downcast_ref::<DrillError>()` instead of
//! matching on message text.

use thiserror::Error;

/// Errors raised by the sampling and scoring engine and the profile store.
#[derive(Debug, Error, PartialEq)]
pub enum DrillError {
    /// More words were requested than the population holds.
    #[error("cannot draw {requested} words from a population of {available}")]
    SampleTooLarge { requested: usize, available: usize },

    /// Fewer rows carry positive weight than the number of words requested.
    #[error("cannot draw {requested} distinct words, only {drawable} have a positive weight")]
    InsufficientWeight { requested: usize, drawable: usize },

    /// A weight is negative, NaN or infinite.
    #[error("invalid weight {weight} at position {position}")]
    InvalidWeight { position: usize, weight: f64 },

    /// The selector names a category that has no rows in the store.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A rating was not an integer in 0..=3.
    #[error("invalid rating '{0}', expected 0, 1, 2 or 3")]
    InvalidRating(String),

    /// A profile name contains characters that cannot be used in a file name.
    #[error("invalid profile name '{0}', use letters, digits, '-' or '_'")]
    InvalidProfileName(String),

    /// No stored lexicon exists for the profile.
    #[error("profile not found: {0}")]
    ProfileNotFound(String),

    /// A profile with that name already exists.
    #[error("profile already exists: {0}")]
    ProfileExists(String),

    /// A whole-lexicon view no longer lines up with the store it came from.
    #[error("view has {view} rows but the store has {store}")]
    RowCountMismatch { view: usize, store: usize },
}

impl DrillError {
    /// Returns `true` if the error comes from the caller's session request
    /// (word count, category) rather than from stored data.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            DrillError::SampleTooLarge { .. }
                | DrillError::InsufficientWeight { .. }
                | DrillError::UnknownCategory(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_numbers() {
        let err = DrillError::SampleTooLarge {
            requested: 12,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "cannot draw 12 words from a population of 5"
        );
        assert!(err.is_request_error());
        assert!(!DrillError::ProfileNotFound("anna".into()).is_request_error());
    }

    #[test]
    fn downcast_through_anyhow() {
        let err: anyhow::Error = DrillError::UnknownCategory("verb".into()).into();
        let err = err.context("failed to build population");
        assert_eq!(
            err.downcast_ref::<DrillError>(),
            Some(&DrillError::UnknownCategory("verb".into()))
        );
    }
}
