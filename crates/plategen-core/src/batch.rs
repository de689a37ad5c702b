//! Batch processing of queued technical record messages.
//!
//! Every message in a batch becomes one generate-and-store chain. All chains
//! run concurrently inside the calling task and are always driven to
//! completion; the batch reports the first failure observed, in completion
//! order, once every chain has finished.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::Instrument;

use plategen_domain::VehicleRecord;
use plategen_io::{CertificateStore, DocumentInvoker, UploadReceipt};

use crate::config::PlateGenConfig;
use crate::error::{PlateGenError, Result};
use crate::generator::CertificateGenerator;
use crate::obs;
use crate::upload::CertificateUploader;

/// One queued message; its body is a serialized vehicle record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMessage {
    #[serde(default)]
    pub message_id: Option<String>,
    pub body: String,
}

impl QueueMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            message_id: None,
            body: body.into(),
        }
    }
}

/// A batch of queued messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<QueueMessage>,
}

impl QueueEvent {
    pub fn new(records: Vec<QueueMessage>) -> Self {
        Self { records }
    }

    /// Read a batch from an arbitrary JSON value.
    ///
    /// An event whose `Records` is absent or not an array is an empty batch.
    pub fn from_value(value: Value) -> Result<Self> {
        match value.get("Records") {
            Some(Value::Array(_)) => Ok(serde_json::from_value(value)?),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deserialize every message body, failing on the first malformed one.
    pub fn vehicles(&self) -> Result<Vec<VehicleRecord>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, message)| {
                serde_json::from_str(&message.body)
                    .map_err(|source| PlateGenError::MalformedMessage { index, source })
            })
            .collect()
    }
}

/// Entry point for a batch of technical record messages.
pub struct BatchProcessor {
    generator: CertificateGenerator,
    uploader: CertificateUploader,
}

impl BatchProcessor {
    pub fn new(generator: CertificateGenerator, uploader: CertificateUploader) -> Self {
        Self {
            generator,
            uploader,
        }
    }

    pub fn from_config(
        config: &PlateGenConfig,
        invoker: Arc<dyn DocumentInvoker>,
        store: Arc<dyn CertificateStore>,
    ) -> Self {
        Self::new(
            CertificateGenerator::from_config(config, invoker),
            CertificateUploader::from_config(config, store),
        )
    }

    /// Generate and store a certificate for every message in `event`.
    ///
    /// Receipts are returned in message order. A failure is reported only once
    /// every sibling chain has settled, so a batch with an early failure takes
    /// as long as its slowest record.
    pub async fn process(&self, event: &QueueEvent) -> Result<Vec<UploadReceipt>> {
        if event.is_empty() {
            return Err(PlateGenError::EmptyBatch);
        }
        let vehicles = event.vehicles()?;
        obs::emit_batch_received(vehicles.len());
        let started = Instant::now();

        let mut chains: FuturesUnordered<_> = vehicles
            .iter()
            .enumerate()
            .map(|(index, vehicle)| {
                let span = obs::certificate_span(index, &vehicle.vin);
                async move { (index, self.generate_and_store(vehicle).await) }.instrument(span)
            })
            .collect();

        let mut receipts: Vec<Option<UploadReceipt>> = vec![None; vehicles.len()];
        let mut first_failure = None;
        let mut failed = 0;
        while let Some((index, outcome)) = chains.next().await {
            match outcome {
                Ok(receipt) => receipts[index] = Some(receipt),
                Err(err) => {
                    obs::emit_certificate_failed(&vehicles[index].vin, &err);
                    failed += 1;
                    first_failure.get_or_insert(err);
                }
            }
        }

        if let Some(err) = first_failure {
            obs::emit_batch_failed(failed, &err);
            return Err(err);
        }

        let receipts: Vec<UploadReceipt> = receipts.into_iter().flatten().collect();
        obs::emit_batch_completed(receipts.len(), started.elapsed().as_millis() as u64);
        Ok(receipts)
    }

    async fn generate_and_store(&self, vehicle: &VehicleRecord) -> Result<UploadReceipt> {
        let certificate = self.generator.generate(vehicle).await?;
        self.uploader.upload(&certificate).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_or_non_array_records_is_empty() {
        assert!(QueueEvent::from_value(json!({})).unwrap().is_empty());
        assert!(QueueEvent::from_value(json!({"Records": "nope"}))
            .unwrap()
            .is_empty());
        assert!(QueueEvent::from_value(json!(null)).unwrap().is_empty());
        assert!(QueueEvent::from_value(json!({"Records": []}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn reads_queue_messages() {
        let event = QueueEvent::from_json(
            r#"{"Records":[{"messageId":"m-1","body":"{}","receiptHandle":"r"}]}"#,
        )
        .unwrap();
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].message_id.as_deref(), Some("m-1"));
        assert_eq!(event.records[0].body, "{}");
    }

    #[test]
    fn malformed_body_names_its_index() {
        let event = QueueEvent::new(vec![
            QueueMessage::new(r#"{"vin":"A","techRecord":[]}"#),
            QueueMessage::new("not json"),
        ]);
        let err = event.vehicles().unwrap_err();
        assert!(matches!(err, PlateGenError::MalformedMessage { index: 1, .. }));
    }
}
