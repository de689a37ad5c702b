//! Collaborator trait definitions
//!
//! - `DocumentInvoker`: request-response invocation of the document service
//! - `CertificateStore`: object storage for generated certificates
//!
//! Both traits are async and backend-agnostic. In-memory fakes live in the
//! `fakes` module, HTTP implementations in `http`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use plategen_domain::{InvocationRequest, InvocationResponse};

use crate::error::IoError;

/// Result type for collaborator operations
pub type IoResult<T> = std::result::Result<T, IoError>;

// ---------------------------------------------------------------------------
// DocumentInvoker
// ---------------------------------------------------------------------------

/// Remote document generation service.
///
/// Implementations report what the service answered, good or bad; only
/// failures to obtain an answer at all are errors. Classifying the answer is
/// the caller's job.
#[async_trait]
pub trait DocumentInvoker: Send + Sync {
    async fn invoke(&self, request: &InvocationRequest) -> IoResult<InvocationResponse>;
}

// ---------------------------------------------------------------------------
// CertificateStore
// ---------------------------------------------------------------------------

/// Metadata stored alongside a certificate object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectMetadata {
    pub vrm: String,
    pub vin: String,
    pub date_of_issue: String,
    pub cert_type: String,
    pub file_format: String,
    pub file_size: String,
    pub email: String,
}

impl ObjectMetadata {
    /// Metadata as `(key, value)` pairs using the stored key names.
    pub fn pairs(&self) -> [(&'static str, &str); 7] {
        [
            ("vrm", self.vrm.as_str()),
            ("vin", self.vin.as_str()),
            ("date-of-issue", self.date_of_issue.as_str()),
            ("cert-type", self.cert_type.as_str()),
            ("file-format", self.file_format.as_str()),
            ("file-size", self.file_size.as_str()),
            ("email", self.email.as_str()),
        ]
    }
}

/// Confirmation of a stored certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub bucket: String,
    pub key: String,
    /// Entity tag reported by the store, when it reports one.
    pub etag: Option<String>,
}

/// Object storage for generated certificates.
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Store `content` under `file_name` in `bucket`.
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        content: &[u8],
        metadata: &ObjectMetadata,
    ) -> IoResult<UploadReceipt>;
}

/// Join an optional key prefix and a file name into an object key.
pub fn object_key(prefix: Option<&str>, file_name: &str) -> String {
    match prefix.map(|p| p.trim_matches('/')) {
        Some(p) if !p.is_empty() => format!("{}/{}", p, file_name),
        _ => file_name.to_string(),
    }
}

/// SHA-256 hex digest of `content`.
pub fn content_digest(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
