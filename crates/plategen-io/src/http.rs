//! HTTP collaborators
//!
//! `HttpDocumentInvoker` calls the document service through the function
//! invocation REST endpoint; `HttpObjectStore` writes certificates with
//! path-style object PUTs. Both are meant for endpoints reachable without
//! request signing (local emulators, VPC endpoints behind a signing proxy).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use plategen_domain::{InvocationRequest, InvocationResponse};

use crate::collaborators::{
    object_key, CertificateStore, DocumentInvoker, IoResult, ObjectMetadata, UploadReceipt,
};
use crate::error::IoError;

const USER_AGENT: &str = concat!("plategen/", env!("CARGO_PKG_VERSION"));

fn check_endpoint(endpoint: &str) -> IoResult<()> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(())
    } else {
        Err(IoError::Config(format!("endpoint is not an http(s) URL: {}", endpoint)))
    }
}

/// Document service invocation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeConfig {
    /// Base URL of the invocation API
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        InvokeConfig {
            endpoint: std::env::var("LAMBDA_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:3002".to_string()),
            timeout_secs: std::env::var("INVOKE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl InvokeConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn new(endpoint: &str) -> Self {
        InvokeConfig {
            endpoint: endpoint.to_string(),
            timeout_secs: 30,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// URL of the synchronous invocation endpoint for `function_name`.
    pub fn invocation_url(&self, function_name: &str) -> String {
        format!(
            "{}/2015-03-31/functions/{}/invocations",
            self.endpoint.trim_end_matches('/'),
            function_name
        )
    }
}

/// Document service client over HTTP
pub struct HttpDocumentInvoker {
    config: InvokeConfig,
    http_client: reqwest::Client,
}

impl HttpDocumentInvoker {
    pub fn new(config: InvokeConfig) -> IoResult<Self> {
        check_endpoint(&config.endpoint)?;
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpDocumentInvoker {
            config,
            http_client,
        })
    }

    pub fn from_env() -> IoResult<Self> {
        Self::new(InvokeConfig::from_env())
    }
}

#[async_trait]
impl DocumentInvoker for HttpDocumentInvoker {
    async fn invoke(&self, request: &InvocationRequest) -> IoResult<InvocationResponse> {
        let url = self.config.invocation_url(&request.function_name);
        debug!("Invoking {} at {}", request.function_name, url);

        let response = self
            .http_client
            .post(&url)
            .header("X-Amz-Invocation-Type", "RequestResponse")
            .header("X-Amz-Log-Type", "Tail")
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(request.payload.clone())
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let text = response.text().await?;

        Ok(InvocationResponse {
            status_code,
            payload: (!text.is_empty()).then_some(text),
        })
    }
}

/// Object store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the object store
    pub endpoint: String,
    /// Prefix prepended to every object key
    pub key_prefix: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            endpoint: std::env::var("S3_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:7000".to_string()),
            key_prefix: std::env::var("BRANCH").ok(),
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn new(endpoint: &str) -> Self {
        StoreConfig {
            endpoint: endpoint.to_string(),
            key_prefix: None,
        }
    }

    pub fn with_key_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = Some(prefix.to_string());
        self
    }

    /// Path-style URL of `key` in `bucket`.
    pub fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/{}/{}", self.endpoint.trim_end_matches('/'), bucket, key)
    }
}

/// Object store client over HTTP
pub struct HttpObjectStore {
    config: StoreConfig,
    http_client: reqwest::Client,
}

impl HttpObjectStore {
    pub fn new(config: StoreConfig) -> IoResult<Self> {
        check_endpoint(&config.endpoint)?;
        let http_client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(HttpObjectStore {
            config,
            http_client,
        })
    }

    pub fn from_env() -> IoResult<Self> {
        Self::new(StoreConfig::from_env())
    }
}

#[async_trait]
impl CertificateStore for HttpObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        content: &[u8],
        metadata: &ObjectMetadata,
    ) -> IoResult<UploadReceipt> {
        let key = object_key(self.config.key_prefix.as_deref(), file_name);
        let url = self.config.object_url(bucket, &key);

        let mut request = self
            .http_client
            .put(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(content.to_vec());
        for (name, value) in metadata.pairs() {
            request = request.header(format!("x-amz-meta-{}", name), value);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(IoError::BucketNotFound {
                bucket: bucket.to_string(),
            });
        }
        if !status.is_success() {
            warn!("Upload of {} rejected with {}", key, status);
            return Err(IoError::Upload {
                bucket: bucket.to_string(),
                key,
                status: status.as_u16(),
            });
        }

        let etag = response
            .headers()
            .get(reqwest::header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_matches('"').to_string());

        Ok(UploadReceipt {
            bucket: bucket.to_string(),
            key,
            etag,
        })
    }
}
