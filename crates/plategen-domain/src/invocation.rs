//! Document service invocation: request envelope and response validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FailureKind, InvocationFailure};
use crate::vehicle::Scalar;

const INVOCATION_ERROR: &str = "Lambda invocation returned error:";
const EMPTY_PAYLOAD: &str = "with empty payload.";
const INVOCATION_BAD_DATA: &str = "Lambda invocation returned bad data:";

/// Document template rendered by the document service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    /// Directory holding the template, e.g. `CVS`.
    pub directory: String,
    /// Template file name, e.g. `VTG6_VTG7.pdf`.
    pub name: String,
}

impl DocumentTemplate {
    pub fn new(directory: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            name: name.into(),
        }
    }

    /// Template name up to its first `.`, e.g. `VTG6_VTG7`.
    pub fn certificate_type(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self::new("CVS", "VTG6_VTG7.pdf")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathParameters {
    pub document_name: String,
    pub document_directory: String,
}

/// Request envelope understood by the document service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEnvelope {
    pub http_method: String,
    pub path_parameters: PathParameters,
    pub json: bool,
    /// Serialized certificate payload.
    pub body: String,
}

impl DocumentEnvelope {
    pub fn post(template: &DocumentTemplate, body: String) -> Self {
        Self {
            http_method: "POST".to_string(),
            path_parameters: PathParameters {
                document_name: template.name.clone(),
                document_directory: template.directory.clone(),
            },
            json: true,
            body,
        }
    }
}

/// A request-response invocation of a named remote function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub function_name: String,
    pub payload: String,
}

/// Raw result of a remote invocation, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationResponse {
    pub status_code: u16,
    pub payload: Option<String>,
}

impl InvocationResponse {
    pub fn new(status_code: u16, payload: impl Into<String>) -> Self {
        Self {
            status_code,
            payload: Some(payload.into()),
        }
    }
}

/// Successfully validated invocation payload, exactly as parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationBody(Value);

impl InvocationBody {
    pub fn status_code(&self) -> Option<i64> {
        self.0.get("statusCode").and_then(Value::as_i64)
    }

    pub fn body(&self) -> &Value {
        &self.0["body"]
    }

    /// The body when it is text, as it is for rendered documents.
    pub fn body_text(&self) -> Option<&str> {
        self.body().as_str()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Classify an invocation result.
///
/// Checks run in a fixed order: empty payload, unparseable payload, failing
/// embedded status, missing body. A payload with a failing status is always
/// an invocation error, whether or not it carries a body.
pub fn validate_invocation_response(
    response: &InvocationResponse,
) -> Result<InvocationBody, InvocationFailure> {
    let raw = match response.payload.as_deref() {
        Some(raw) if !raw.is_empty() => raw,
        _ => {
            return Err(InvocationFailure::new(
                FailureKind::EmptyPayload,
                500,
                format!(
                    "{} {} {}",
                    INVOCATION_ERROR, response.status_code, EMPTY_PAYLOAD
                ),
            ))
        }
    };

    let parsed: Value = serde_json::from_str(raw).map_err(|_| {
        InvocationFailure::new(
            FailureKind::BadData,
            500,
            format!("{} {}", INVOCATION_BAD_DATA, raw),
        )
    })?;

    let embedded_status = parsed.get("statusCode");
    if embedded_status
        .and_then(status_number)
        .is_some_and(|status| status >= 400.0)
    {
        return Err(InvocationFailure::new(
            FailureKind::InvocationError,
            500,
            format!(
                "{} {} {}",
                INVOCATION_ERROR,
                status_text(embedded_status),
                body_text(parsed.get("body"))
            ),
        ));
    }

    if parsed.get("body").map_or(true, Value::is_null) {
        return Err(InvocationFailure::new(
            FailureKind::BadData,
            400,
            format!("{} {}.", INVOCATION_BAD_DATA, parsed),
        ));
    }

    Ok(InvocationBody(parsed))
}

/// Embedded status as a number; numeric strings count.
fn status_number(status: &Value) -> Option<f64> {
    match status {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn status_text(status: Option<&Value>) -> String {
    match status {
        Some(Value::Number(n)) => Scalar::Number(n.clone()).to_string(),
        other => body_text(other),
    }
}

fn body_text(body: Option<&Value>) -> String {
    match body {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}
