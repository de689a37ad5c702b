//! Error taxonomy surfaced to the batch caller.

use plategen_domain::{FailureKind, InvocationFailure, PayloadError};
use plategen_io::IoError;

/// Errors produced while processing a batch of technical record messages.
#[derive(Debug, thiserror::Error)]
pub enum PlateGenError {
    /// The batch carried no messages; raised before any record is touched.
    #[error("Event is empty")]
    EmptyBatch,

    #[error("message {index} is not a vehicle record: {source}")]
    MalformedMessage {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Invocation(#[from] InvocationFailure),

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("certificate body is not text")]
    NonTextDocument,

    #[error("certificate body is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlateGenError {
    /// Classified kind, for the failures that have one.
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            PlateGenError::EmptyBatch => Some("EMPTY_BATCH"),
            PlateGenError::Invocation(failure) => Some(match failure.kind {
                FailureKind::EmptyPayload => "EMPTY_PAYLOAD",
                FailureKind::BadData => "BAD_DATA",
                FailureKind::InvocationError => "INVOCATION_ERROR",
            }),
            _ => None,
        }
    }

    /// Classified status code of an invocation failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            PlateGenError::Invocation(failure) => Some(failure.status_code),
            _ => None,
        }
    }
}

/// Result type for plate generation
pub type Result<T> = std::result::Result<T, PlateGenError>;
