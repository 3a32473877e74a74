//! Failure taxonomy for the intent pipeline.

use crate::tasks::StoreError;

/// Errors surfaced by the pipeline.
///
/// Parsing and classification never raise; everything here originates at
/// request validation, field extraction, action execution, or the oracle
/// boundary. An unclear classification is not an error and does not appear
/// here — it produces a clarification outcome instead.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    /// The inbound request itself was malformed (blank prompt or owner).
    #[error("{0}")]
    Validation(String),

    /// A required field could not be extracted from the oracle's text.
    #[error("could not determine the {0} from your request; please rephrase")]
    MissingField(&'static str),

    /// An extracted field value cannot be used.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// The named task does not exist for this owner.
    #[error("task \"{name}\" not found")]
    NotFound { name: String },

    /// Neither the oracle nor the fallback produced interpretable text.
    #[error("assistant unavailable: {0}")]
    AiUnavailable(String),

    /// Persistence failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
