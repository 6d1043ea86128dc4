//! In-memory storage backend.
//!
//! Keeps uploaded payloads in a map keyed by file name. Exists for
//! tests and demos; it also records call counts so end-to-end tests can
//! assert exactly when the gate did and did not reach storage.

use crate::backend::StorageBackend;
use crate::core::{BackendError, UploadFile};

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// A [`StorageBackend`] holding everything in memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    files: RwLock<HashMap<String, Vec<u8>>>,
    upload_count: AtomicU64,
    delete_count: AtomicU64,
    /// When set, uploads fail to exercise error passthrough.
    fail_uploads: RwLock<bool>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored payload for `name`, if any.
    pub fn stored(&self, name: &str) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(name).cloned()
    }

    /// Returns how many uploads reached this backend.
    pub fn upload_count(&self) -> u64 {
        self.upload_count.load(Ordering::Relaxed)
    }

    /// Returns how many deletes reached this backend.
    pub fn delete_count(&self) -> u64 {
        self.delete_count.load(Ordering::Relaxed)
    }

    /// Makes subsequent uploads fail.
    pub fn set_fail_uploads(&self, fail: bool) {
        *self.fail_uploads.write().unwrap() = fail;
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upload(&self, file: &UploadFile) -> Result<(), BackendError> {
        self.upload_count.fetch_add(1, Ordering::Relaxed);

        if *self.fail_uploads.read().unwrap() {
            return Err(BackendError::message("memory", "simulated storage failure"));
        }

        self.files
            .write()
            .unwrap()
            .insert(file.name.clone(), file.buffer.clone());
        Ok(())
    }

    async fn delete(&self, file: &UploadFile) -> Result<(), BackendError> {
        self.delete_count.fetch_add(1, Ordering::Relaxed);
        self.files.write().unwrap().remove(&file.name);
        Ok(())
    }
}
