//! Plategen-IO: collaborators of the plate generation pipeline
//!
//! Everything that leaves the process goes through the traits defined here,
//! so the orchestration in `plategen-core` can run against real services or
//! the in-memory fakes alike.
//!
//! ## Key Components
//!
//! - `DocumentInvoker`: invokes the document generation service
//! - `CertificateStore`: stores generated certificates with their metadata
//! - `HttpDocumentInvoker` / `HttpObjectStore`: HTTP implementations
//! - `fakes`: `StubDocumentInvoker` and `MemoryCertificateStore`

pub mod collaborators;
mod error;
pub mod fakes;
pub mod http;

pub use collaborators::{
    content_digest, object_key, CertificateStore, DocumentInvoker, IoResult, ObjectMetadata,
    UploadReceipt,
};
pub use error::IoError;
pub use http::{HttpDocumentInvoker, HttpObjectStore, InvokeConfig, StoreConfig};
