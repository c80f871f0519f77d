// TestDependencies - in-memory implementations of the infrastructure traits
//
// Used by the integration tests to observe outbound mail and stored uploads
// without an SMTP server or a writable upload directory.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{BaseBlobStore, BaseNotifier};

// =============================================================================
// Recording Notifier
// =============================================================================

/// A message captured by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Notifier that records every message, optionally failing every send
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentMessage>>>,
    fail_with: Option<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every send fails with `message`
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Arc::default(),
            fail_with: Some(message.to_string()),
        }
    }

    /// Messages successfully sent so far
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseNotifier for RecordingNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{message}");
        }
        self.sent.lock().unwrap().push(SentMessage {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Memory Blob Store
// =============================================================================

/// Blob store keeping uploads in a map
#[derive(Default, Clone)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    counter: Arc<Mutex<u64>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BaseBlobStore for MemoryBlobStore {
    async fn put(&self, original_name: &str, bytes: &[u8]) -> Result<String> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        let key = super::blob_store::blob_key(*counter as i64, original_name);
        self.blobs.lock().unwrap().insert(key.clone(), bytes.to_vec());
        Ok(key)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.blobs.lock().unwrap().remove(key);
        Ok(())
    }
}
