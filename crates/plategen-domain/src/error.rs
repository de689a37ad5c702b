//! Error taxonomy for payload derivation and invocation validation.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while deriving a certificate payload from a vehicle record.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The vehicle record carried no technical record versions
    #[error("vehicle {vin} has no technical record")]
    MissingTechRecord { vin: String },

    /// More axles than the plate layout has slots for
    #[error("vehicle has {count} axles, plate layout supports at most {max}")]
    TooManyAxles { count: usize, max: usize },

    /// The plate issue date could not be interpreted as a calendar date
    #[error("invalid plate issue date: {0}")]
    InvalidIssueDate(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Classification of a failed remote document invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The invocation returned no usable payload.
    EmptyPayload,
    /// The payload could not be parsed, or parsed without a body.
    BadData,
    /// The payload's embedded status code reports a failure.
    InvocationError,
}

/// A classified invocation failure.
///
/// `status_code` is the status this service reports for the failure, not the
/// upstream one; the upstream status is embedded in `body`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{body}")]
pub struct InvocationFailure {
    pub kind: FailureKind,
    pub status_code: u16,
    pub body: String,
}

impl InvocationFailure {
    pub fn new(kind: FailureKind, status_code: u16, body: impl Into<String>) -> Self {
        Self {
            kind,
            status_code,
            body: body.into(),
        }
    }
}

/// Result type for payload derivation
pub type Result<T> = std::result::Result<T, PayloadError>;
