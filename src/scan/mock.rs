//! Mock scanner for testing.
//!
//! A configurable test double that returns a fixed verdict, optionally
//! simulates a transport failure, and counts how often it was called.
//! Used by the gate's end-to-end tests and by the runnable demos so
//! neither needs a live daemon.

use crate::core::GateError;
use crate::scan::{ScanVerdict, VirusScanner};

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// A mock [`VirusScanner`].
///
/// # Examples
///
/// ```rust
/// use uploadgate::scan::MockScanner;
///
/// // Reports every buffer as clean
/// let scanner = MockScanner::new_clean();
///
/// // Reports every buffer as infected with the given signature
/// let scanner = MockScanner::new_infected("Eicar-Test-Signature");
/// ```
#[derive(Debug)]
pub struct MockScanner {
    /// Verdict returned for every scan.
    verdict: ScanVerdict,
    /// When set, scans fail with a simulated transport error instead.
    fail_transport: RwLock<bool>,
    /// Number of scans performed.
    scan_count: AtomicU64,
}

impl MockScanner {
    /// Creates a scanner that reports every buffer as clean.
    pub fn new_clean() -> Self {
        Self {
            verdict: ScanVerdict::Clean,
            fail_transport: RwLock::new(false),
            scan_count: AtomicU64::new(0),
        }
    }

    /// Creates a scanner that reports every buffer as infected.
    pub fn new_infected(signature: impl Into<String>) -> Self {
        Self {
            verdict: ScanVerdict::Infected {
                signature: signature.into(),
            },
            ..Self::new_clean()
        }
    }

    /// Makes subsequent scans fail with a transport error.
    pub fn set_fail_transport(&self, fail: bool) {
        *self.fail_transport.write().unwrap() = fail;
    }

    /// Returns the number of scans performed.
    pub fn scan_count(&self) -> u64 {
        self.scan_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl VirusScanner for MockScanner {
    fn name(&self) -> &str {
        "mock"
    }

    async fn scan(&self, _data: &[u8]) -> Result<ScanVerdict, GateError> {
        self.scan_count.fetch_add(1, Ordering::Relaxed);

        if *self.fail_transport.read().unwrap() {
            return Err(GateError::connection_failed("simulated transport failure"));
        }

        Ok(self.verdict.clone())
    }

    async fn health_check(&self) -> Result<(), GateError> {
        if *self.fail_transport.read().unwrap() {
            return Err(GateError::connection_failed("simulated transport failure"));
        }
        Ok(())
    }
}
