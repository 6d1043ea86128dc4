//! Storage backends.
//!
//! The gate proxies a durable storage provider that it never inspects:
//! after a file has been sanitized and scanned clean, its bytes go to
//! the provider's `upload`; `delete` is forwarded directly. Providers
//! implement the [`StorageBackend`] trait and are resolved by string
//! identifier through the [`BackendRegistry`].
//!
//! ## Implementing a provider
//!
//! ```rust,ignore
//! use uploadgate::backend::StorageBackend;
//! use uploadgate::core::{BackendError, UploadFile};
//! use async_trait::async_trait;
//!
//! #[derive(Debug)]
//! struct S3Backend { /* client, bucket, ... */ }
//!
//! #[async_trait]
//! impl StorageBackend for S3Backend {
//!     fn name(&self) -> &str {
//!         "s3"
//!     }
//!
//!     async fn upload(&self, file: &UploadFile) -> Result<(), BackendError> {
//!         // Put file.buffer at file.path / file.name
//!         todo!()
//!     }
//!
//!     async fn delete(&self, file: &UploadFile) -> Result<(), BackendError> {
//!         todo!()
//!     }
//! }
//! ```

pub mod memory;
pub mod registry;

pub use memory::MemoryBackend;
pub use registry::BackendRegistry;

use crate::core::{BackendError, UploadFile};
use async_trait::async_trait;
use std::fmt::Debug;

/// A durable storage provider behind the gate.
///
/// Implementations receive already-sanitized, already-scanned bytes;
/// concurrency and idempotence of `upload`/`delete` are the provider's
/// own responsibility. Errors pass through the gate verbatim.
#[async_trait]
pub trait StorageBackend: Send + Sync + Debug {
    /// Returns the provider's identifier, e.g. "s3" or "local".
    fn name(&self) -> &str;

    /// Persists the file.
    async fn upload(&self, file: &UploadFile) -> Result<(), BackendError>;

    /// Removes the file.
    async fn delete(&self, file: &UploadFile) -> Result<(), BackendError>;
}

/// An arc-wrapped backend for shared ownership.
pub type ArcBackend = std::sync::Arc<dyn StorageBackend>;
