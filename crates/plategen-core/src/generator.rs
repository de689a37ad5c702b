//! Certificate generation: payload, document service call, result assembly.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

use plategen_domain::{
    validate_invocation_response, DocumentEnvelope, DocumentTemplate, InvocationRequest,
    PayloadBuilder, VehicleRecord,
};
use plategen_io::{DocumentInvoker, ObjectMetadata};

use crate::config::PlateGenConfig;
use crate::error::{PlateGenError, Result};
use crate::obs;

/// File format of every generated certificate.
pub const FILE_FORMAT: &str = "pdf";

/// A rendered plate certificate, ready for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCertificate {
    /// `<vin>_<plateSerialNumber>.pdf`
    pub file_name: String,
    pub vin: String,
    /// Primary VRM, or trailer id when the vehicle has no VRM.
    pub vrm: String,
    /// Plate issue date as `DD Month YYYY`.
    pub date_of_issue: String,
    pub certificate_type: String,
    pub file_format: String,
    /// Decoded document length in bytes, as text.
    pub file_size: String,
    #[serde(skip)]
    pub certificate: Vec<u8>,
    pub email: String,
}

impl GeneratedCertificate {
    pub fn metadata(&self) -> ObjectMetadata {
        ObjectMetadata {
            vrm: self.vrm.clone(),
            vin: self.vin.clone(),
            date_of_issue: self.date_of_issue.clone(),
            cert_type: self.certificate_type.clone(),
            file_format: self.file_format.clone(),
            file_size: self.file_size.clone(),
            email: self.email.clone(),
        }
    }
}

/// Generates plate certificates through the document service.
pub struct CertificateGenerator {
    invoker: Arc<dyn DocumentInvoker>,
    builder: PayloadBuilder,
    template: DocumentTemplate,
    function_name: String,
}

impl CertificateGenerator {
    pub fn new(
        invoker: Arc<dyn DocumentInvoker>,
        builder: PayloadBuilder,
        template: DocumentTemplate,
        function_name: &str,
    ) -> Self {
        Self {
            invoker,
            builder,
            template,
            function_name: function_name.to_string(),
        }
    }

    pub fn from_config(config: &PlateGenConfig, invoker: Arc<dyn DocumentInvoker>) -> Self {
        Self::new(
            invoker,
            PayloadBuilder::new(config.deployment()),
            config.template.clone(),
            &config.function_name,
        )
    }

    /// Wrap the vehicle's plate payload in the document service envelope.
    pub fn invocation_request(&self, vehicle: &VehicleRecord) -> Result<InvocationRequest> {
        let payload = self.builder.build_json(vehicle)?;
        obs::emit_payload_built(&vehicle.vin, payload.len());

        let envelope = DocumentEnvelope::post(&self.template, payload);
        Ok(InvocationRequest {
            function_name: self.function_name.clone(),
            payload: serde_json::to_string(&envelope)?,
        })
    }

    /// Render the certificate for `vehicle`.
    ///
    /// Invocation and validation failures are returned as they are.
    pub async fn generate(&self, vehicle: &VehicleRecord) -> Result<GeneratedCertificate> {
        let record = vehicle.current()?;
        let date_of_issue = record.plates.formatted_issue_date()?;
        let request = self.invocation_request(vehicle)?;

        let response = self.invoker.invoke(&request).await?;
        let body = validate_invocation_response(&response)?;
        let encoded = body.body_text().ok_or(PlateGenError::NonTextDocument)?;
        let certificate = BASE64.decode(encoded)?;

        let generated = GeneratedCertificate {
            file_name: format!("{}_{}.pdf", vehicle.vin, record.plates.plate_serial_number),
            vin: vehicle.vin.clone(),
            vrm: vehicle.registration_mark().unwrap_or_default().to_string(),
            date_of_issue,
            certificate_type: self.template.certificate_type().to_string(),
            file_format: FILE_FORMAT.to_string(),
            file_size: certificate.len().to_string(),
            certificate,
            email: record.plates.to_email_address.clone(),
        };
        obs::emit_certificate_generated(&generated.vin, &generated.file_name, &generated.file_size);
        Ok(generated)
    }
}
