//! Core types for the uploadgate library.
//!
//! This module provides the fundamental building blocks used throughout
//! the library:
//!
//! - [`file`] - The `UploadFile` record moving through the pipeline
//! - [`config`] - Gate, daemon, and sanitization configuration
//! - [`error`] - Structured error types

pub mod config;
pub mod error;
pub mod file;

// Re-export commonly used types at the core level
pub use config::{ClamdConfig, GateConfig, SanitizeConfig};
pub use error::{BackendError, GateError, GateResult};
pub use file::UploadFile;
