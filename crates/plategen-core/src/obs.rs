//! Structured observability hooks for the plate generation lifecycle.
//!
//! Every hook emits one event with an `event` field so log pipelines can
//! filter on it:
//!
//! - `batch.received`, `batch.completed`, `batch.failed`
//! - `certificate.payload_built`, `certificate.generated`,
//!   `certificate.uploaded`, `certificate.failed`

use tracing::{info, warn, Span};

/// Span covering one vehicle's generate-and-store chain.
pub fn certificate_span(index: usize, vin: &str) -> Span {
    tracing::info_span!("plategen.certificate", index = index, vin = %vin)
}

pub fn emit_batch_received(records: usize) {
    info!(event = "batch.received", records = records);
}

pub fn emit_batch_completed(uploaded: usize, duration_ms: u64) {
    info!(
        event = "batch.completed",
        uploaded = uploaded,
        duration_ms = duration_ms,
    );
}

/// Emit event: the batch was rejected with `error` (first failure only).
pub fn emit_batch_failed(failed: usize, error: &dyn std::fmt::Display) {
    warn!(event = "batch.failed", failed = failed, error = %error);
}

pub fn emit_payload_built(vin: &str, bytes: usize) {
    info!(event = "certificate.payload_built", vin = %vin, bytes = bytes);
}

pub fn emit_certificate_generated(vin: &str, file_name: &str, file_size: &str) {
    info!(
        event = "certificate.generated",
        vin = %vin,
        file_name = %file_name,
        file_size = %file_size,
    );
}

pub fn emit_certificate_uploaded(vin: &str, bucket: &str, key: &str) {
    info!(event = "certificate.uploaded", vin = %vin, bucket = %bucket, key = %key);
}

/// Emit event: one record's chain failed (warning level).
pub fn emit_certificate_failed(vin: &str, error: &dyn std::fmt::Display) {
    warn!(event = "certificate.failed", vin = %vin, error = %error);
}
