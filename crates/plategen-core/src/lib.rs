//! Plategen Core Library
//!
//! Orchestrates plate certificate generation for batches of vehicle
//! technical records: payload derivation, document service invocation,
//! certificate storage, and the ambient configuration and logging around them.

pub mod batch;
pub mod config;
mod error;
pub mod generator;
pub mod obs;
pub mod telemetry;
pub mod upload;

pub use batch::{BatchProcessor, QueueEvent, QueueMessage};
pub use config::PlateGenConfig;
pub use error::{PlateGenError, Result};
pub use generator::{CertificateGenerator, GeneratedCertificate, FILE_FORMAT};
pub use telemetry::{init_tracing, LogFormat};
pub use upload::CertificateUploader;

pub use plategen_domain::{Deployment, DocumentTemplate, VehicleRecord};
pub use plategen_io::{CertificateStore, DocumentInvoker, UploadReceipt};
