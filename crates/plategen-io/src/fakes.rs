//! In-memory fakes for the collaborator traits (testing only)
//!
//! Provides `StubDocumentInvoker` and `MemoryCertificateStore` that satisfy
//! the trait contracts without any network access.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use plategen_domain::{InvocationRequest, InvocationResponse};

use crate::collaborators::*;
use crate::error::IoError;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ---------------------------------------------------------------------------
// StubDocumentInvoker
// ---------------------------------------------------------------------------

type Handler = Box<dyn Fn(&InvocationRequest) -> IoResult<InvocationResponse> + Send + Sync>;
type Latency = Box<dyn Fn(&InvocationRequest) -> Duration + Send + Sync>;

/// Document service stub answering every request through a handler.
///
/// Every request is recorded before the handler runs.
pub struct StubDocumentInvoker {
    handler: Handler,
    latency: Option<Latency>,
    requests: Mutex<Vec<InvocationRequest>>,
}

impl StubDocumentInvoker {
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&InvocationRequest) -> IoResult<InvocationResponse> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            latency: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with the same response.
    pub fn always(response: InvocationResponse) -> Self {
        Self::with_handler(move |_| Ok(response.clone()))
    }

    /// Fail every request at the transport level.
    pub fn unreachable(message: &str) -> Self {
        let message = message.to_string();
        Self::with_handler(move |_| Err(IoError::Transport(message.clone())))
    }

    /// Delay each answer by a per-request duration.
    pub fn with_latency<F>(mut self, latency: F) -> Self
    where
        F: Fn(&InvocationRequest) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Box::new(latency));
        self
    }

    /// All requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<InvocationRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl DocumentInvoker for StubDocumentInvoker {
    async fn invoke(&self, request: &InvocationRequest) -> IoResult<InvocationResponse> {
        lock(&self.requests).push(request.clone());
        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency(request)).await;
        }
        (self.handler)(request)
    }
}

// ---------------------------------------------------------------------------
// MemoryCertificateStore
// ---------------------------------------------------------------------------

/// A certificate held by [`MemoryCertificateStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub content: Vec<u8>,
    pub metadata: ObjectMetadata,
}

/// In-memory object store backed by `HashMap<bucket, HashMap<key, object>>`.
///
/// Buckets must be created before uploading into them.
#[derive(Debug, Default)]
pub struct MemoryCertificateStore {
    key_prefix: Option<String>,
    buckets: Mutex<HashMap<String, HashMap<String, StoredObject>>>,
}

impl MemoryCertificateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_prefix(prefix: &str) -> Self {
        Self {
            key_prefix: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    pub fn create_bucket(&self, bucket: &str) {
        lock(&self.buckets).entry(bucket.to_string()).or_default();
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        lock(&self.buckets)
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
    }

    /// Keys stored in `bucket`, sorted.
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.buckets)
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CertificateStore for MemoryCertificateStore {
    async fn upload(
        &self,
        bucket: &str,
        file_name: &str,
        content: &[u8],
        metadata: &ObjectMetadata,
    ) -> IoResult<UploadReceipt> {
        let key = object_key(self.key_prefix.as_deref(), file_name);
        let mut buckets = lock(&self.buckets);
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| IoError::BucketNotFound {
                bucket: bucket.to_string(),
            })?;
        objects.insert(
            key.clone(),
            StoredObject {
                content: content.to_vec(),
                metadata: metadata.clone(),
            },
        );
        Ok(UploadReceipt {
            bucket: bucket.to_string(),
            key,
            etag: Some(content_digest(content)),
        })
    }
}
