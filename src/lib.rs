//! # Uploadgate
//!
//! A content-safety gate that sits between an application's file-upload
//! entry point and its durable storage backend. Every uploaded file passes
//! two stages before it is persisted:
//!
//! 1. **Sanitization** — format-aware cleanup based on the file's declared
//!    extension and MIME type: SVG markup is rewritten to remove active
//!    content, JPEG metadata is stripped, and GIF polyglot exploits are
//!    rejected outright.
//! 2. **Virus scanning** — the buffer is streamed to a ClamAV daemon and
//!    the verdict decides whether the file may reach storage.
//!
//! Files that cannot be made safe, or that are flagged malicious, are
//! rejected with a typed error and never reach the backend.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use uploadgate::{UploadGate, UploadFile, SanitizeConfig};
//! use uploadgate::backend::MemoryBackend;
//! use uploadgate::scan::ClamdScanner;
//! use uploadgate::core::ClamdConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gate = UploadGate::builder()
//!         .backend(Arc::new(MemoryBackend::new()))
//!         .scanner(Arc::new(ClamdScanner::new(ClamdConfig::default())))
//!         .sanitize(SanitizeConfig::new().with_svg(true))
//!         .build()?;
//!
//!     let mut file = UploadFile::new("logo.svg", b"<svg></svg>".to_vec())
//!         .with_ext(".svg");
//!
//!     gate.upload(&mut file).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized into several layers:
//!
//! - **Core**: the `UploadFile` record, configuration types, and error handling
//! - **Sanitize**: the format router and the three sanitizers
//! - **Scan**: the `VirusScanner` trait and the clamd wire client
//! - **Backend**: the `StorageBackend` trait, provider registry, and an
//!   in-memory backend for tests
//! - **Gate**: the `UploadGate` orchestrator tying the pipeline together
//!
//! The pipeline is strictly linear: raw file → sanitization router →
//! (possibly rewritten) file → scan client → verdict → storage backend.
//! No stage is retried and no failure is swallowed.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod backend;
pub mod core;
pub mod gate;
pub mod sanitize;
pub mod scan;

// Re-export commonly used types at the crate root
pub use crate::core::{
    BackendError, ClamdConfig, GateConfig, GateError, SanitizeConfig, UploadFile,
};

pub use crate::backend::{BackendRegistry, MemoryBackend, StorageBackend};
pub use crate::gate::{UploadGate, UploadGateBuilder};
pub use crate::scan::{ClamdScanner, MockScanner, ScanVerdict, VirusScanner};

/// Prelude module for convenient imports.
///
/// ```rust
/// use uploadgate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backend::{BackendRegistry, MemoryBackend, StorageBackend};
    pub use crate::core::{
        BackendError, ClamdConfig, GateConfig, GateError, SanitizeConfig, UploadFile,
    };
    pub use crate::gate::{UploadGate, UploadGateBuilder};
    pub use crate::scan::{ClamdScanner, MockScanner, ScanVerdict, VirusScanner};
}
