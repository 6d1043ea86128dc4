//! Virus scanning.
//!
//! This module defines the [`VirusScanner`] trait the gate depends on,
//! the [`ScanVerdict`] it produces, and two implementations:
//!
//! - [`clamd`] - a client for the ClamAV daemon's INSTREAM protocol
//! - [`mock`] - a configurable test double
//!
//! A scanner either produces a verdict or fails with a transport error;
//! it never maps transport failures onto a verdict, because proceeding
//! without a real verdict would break the safety contract.

pub mod clamd;
pub mod mock;

pub use clamd::ClamdScanner;
pub use mock::MockScanner;

use crate::core::GateError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The scanning daemon's determination for one buffer.
///
/// Derived transiently from the daemon's reply line; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanVerdict {
    /// No threats detected.
    Clean,

    /// A signature matched.
    Infected {
        /// Name of the detected signature.
        signature: String,
    },
}

impl ScanVerdict {
    /// Returns `true` if the verdict is clean.
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    /// Returns `true` if the verdict reports an infection.
    pub fn is_infected(&self) -> bool {
        matches!(self, Self::Infected { .. })
    }
}

/// A client for a malware scanning engine.
///
/// Implementations hold no per-call state and are safe to share behind
/// an `Arc` across concurrent uploads. The `scan` future must be
/// cancel-safe: dropping it abandons the round trip without side
/// effects.
#[async_trait]
pub trait VirusScanner: Send + Sync + Debug {
    /// Returns a stable, human-readable identifier like "clamd".
    fn name(&self) -> &str;

    /// Scans the buffer and returns the daemon's verdict.
    ///
    /// # Errors
    ///
    /// Returns a transport-kind [`GateError`] (`ConnectionFailed`,
    /// `ScanTimeout`, `AmbiguousReply`, `Io`) when no verdict could be
    /// obtained.
    async fn scan(&self, data: &[u8]) -> Result<ScanVerdict, GateError>;

    /// Lightweight liveness check against the engine.
    ///
    /// The default implementation reports healthy without contacting
    /// anything.
    async fn health_check(&self) -> Result<(), GateError> {
        Ok(())
    }
}

/// An arc-wrapped scanner for shared ownership.
pub type ArcScanner = std::sync::Arc<dyn VirusScanner>;
