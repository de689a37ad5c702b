//! Storage of generated certificates.

use std::sync::Arc;

use plategen_io::{CertificateStore, UploadReceipt};

use crate::config::PlateGenConfig;
use crate::error::Result;
use crate::generator::GeneratedCertificate;
use crate::obs;

/// Uploads certificates into the configured bucket.
pub struct CertificateUploader {
    store: Arc<dyn CertificateStore>,
    bucket: String,
}

impl CertificateUploader {
    pub fn new(store: Arc<dyn CertificateStore>, bucket: &str) -> Self {
        Self {
            store,
            bucket: bucket.to_string(),
        }
    }

    pub fn from_config(config: &PlateGenConfig, store: Arc<dyn CertificateStore>) -> Self {
        Self::new(store, &config.bucket())
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub async fn upload(&self, certificate: &GeneratedCertificate) -> Result<UploadReceipt> {
        let receipt = self
            .store
            .upload(
                &self.bucket,
                &certificate.file_name,
                &certificate.certificate,
                &certificate.metadata(),
            )
            .await?;
        obs::emit_certificate_uploaded(&certificate.vin, &receipt.bucket, &receipt.key);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlateGenError;
    use plategen_io::fakes::MemoryCertificateStore;
    use plategen_io::IoError;

    fn certificate() -> GeneratedCertificate {
        GeneratedCertificate {
            file_name: "VIN0001_42.pdf".to_string(),
            vin: "VIN0001".to_string(),
            vrm: "AB12CDE".to_string(),
            date_of_issue: "02 January 2021".to_string(),
            certificate_type: "VTG6_VTG7".to_string(),
            file_format: "pdf".to_string(),
            file_size: "4".to_string(),
            certificate: b"%PDF".to_vec(),
            email: "owner@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn stores_content_and_metadata() {
        let store = Arc::new(MemoryCertificateStore::with_key_prefix("develop"));
        store.create_bucket("cvs-cert-develop");
        let uploader = CertificateUploader::new(store.clone(), "cvs-cert-develop");

        let receipt = uploader.upload(&certificate()).await.unwrap();
        assert_eq!(receipt.key, "develop/VIN0001_42.pdf");

        let stored = store.get("cvs-cert-develop", &receipt.key).unwrap();
        assert_eq!(stored.content, b"%PDF");
        assert_eq!(stored.metadata, certificate().metadata());
        assert_eq!(stored.metadata.cert_type, "VTG6_VTG7");
    }

    #[tokio::test]
    async fn missing_bucket_is_an_io_error() {
        let store = Arc::new(MemoryCertificateStore::new());
        let uploader = CertificateUploader::new(store, "cvs-cert-missing");

        let err = uploader.upload(&certificate()).await.unwrap_err();
        assert!(matches!(
            err,
            PlateGenError::Io(IoError::BucketNotFound { ref bucket }) if bucket == "cvs-cert-missing"
        ));
    }
}
