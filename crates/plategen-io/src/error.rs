//! Error types for plategen-io

use thiserror::Error;

/// Errors raised by the document service and object storage collaborators
#[derive(Error, Debug)]
pub enum IoError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Target bucket does not exist or is not accessible
    #[error("Bucket not found: {bucket}")]
    BucketNotFound { bucket: String },

    /// The object store rejected an upload
    #[error("Upload of {key} to {bucket} failed with status {status}")]
    Upload {
        bucket: String,
        key: String,
        status: u16,
    },

    /// Collaborator configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for IoError {
    fn from(err: reqwest::Error) -> Self {
        IoError::Transport(err.to_string())
    }
}
