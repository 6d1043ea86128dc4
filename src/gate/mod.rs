//! The upload gate orchestrator.
//!
//! [`UploadGate`] runs the full pipeline for each upload call:
//! sanitization router, then virus scan, then storage. Each call is a
//! linear state machine — Received → Sanitized → Scanned → Stored —
//! with two absorbing failure states (rejected by a sanitizer, rejected
//! by the scan), either of which short-circuits before storage. No
//! stage is retried; dropping the upload future before the verdict
//! abandons the scan and nothing is stored.
//!
//! `delete` bypasses the pipeline entirely and forwards to the backend.

use crate::backend::{ArcBackend, BackendRegistry, StorageBackend};
use crate::core::{GateConfig, GateError, SanitizeConfig, UploadFile};
use crate::sanitize;
use crate::scan::{ArcScanner, ClamdScanner, ScanVerdict, VirusScanner};

use std::sync::Arc;

/// Builder for an [`UploadGate`].
///
/// Both a backend and a scanner are required; construction fails
/// without them. Sanitization is optional — when no
/// [`SanitizeConfig`] is supplied, files go straight to scanning.
#[derive(Default)]
pub struct UploadGateBuilder {
    backend: Option<ArcBackend>,
    scanner: Option<ArcScanner>,
    sanitize: Option<SanitizeConfig>,
}

impl UploadGateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage backend.
    pub fn backend(mut self, backend: ArcBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Sets the virus scanner.
    pub fn scanner(mut self, scanner: ArcScanner) -> Self {
        self.scanner = Some(scanner);
        self
    }

    /// Enables format sanitization with the given switches.
    pub fn sanitize(mut self, config: SanitizeConfig) -> Self {
        self.sanitize = Some(config);
        self
    }

    /// Builds the gate.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Configuration`] if the backend or the
    /// scanner is missing. There is no partial construction.
    pub fn build(self) -> Result<UploadGate, GateError> {
        let backend = self
            .backend
            .ok_or_else(|| GateError::configuration("missing uploadProvider setting"))?;
        let scanner = self
            .scanner
            .ok_or_else(|| GateError::configuration("missing clamav settings"))?;

        Ok(UploadGate {
            backend,
            scanner,
            sanitize: self.sanitize,
        })
    }
}

/// The content-safety gate in front of a storage backend.
///
/// Holds only immutable configuration and shared capabilities; safe for
/// concurrent use across upload calls.
#[derive(Debug)]
pub struct UploadGate {
    backend: ArcBackend,
    scanner: ArcScanner,
    sanitize: Option<SanitizeConfig>,
}

impl UploadGate {
    /// Creates a new builder.
    pub fn builder() -> UploadGateBuilder {
        UploadGateBuilder::new()
    }

    /// Builds a gate from the host's options object.
    ///
    /// Resolves the configured provider through `registry` with the
    /// gate's reserved keys stripped from its options, and wires a
    /// [`ClamdScanner`] from the `clamav` section.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Configuration`] if the provider identifier
    /// is unknown or the provider factory fails.
    pub fn from_config(
        config: &GateConfig,
        registry: &BackendRegistry,
    ) -> Result<Self, GateError> {
        let backend = registry.resolve(&config.provider, &config.provider_options())?;
        let scanner: ArcScanner = Arc::new(ClamdScanner::new(config.clamav.clone()));

        tracing::info!(
            provider = %config.provider,
            daemon = %config.clamav.address(),
            sanitize = ?config.sanitize,
            "upload gate initialized"
        );

        Ok(Self {
            backend,
            scanner,
            sanitize: config.sanitize,
        })
    }

    /// Returns the storage backend.
    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    /// Returns the virus scanner.
    pub fn scanner(&self) -> &dyn VirusScanner {
        self.scanner.as_ref()
    }

    /// Runs the file through the full pipeline and stores it.
    ///
    /// The payload may be rewritten in place by a sanitizer before it
    /// is scanned; what gets stored is exactly what was scanned.
    ///
    /// # Errors
    ///
    /// - Sanitizer rejections and parse failures abort before scanning.
    /// - An infected verdict aborts before storage with
    ///   [`GateError::Infected`].
    /// - Scan transport failures propagate unchanged; they are never
    ///   treated as a verdict.
    /// - Backend errors pass through verbatim.
    pub async fn upload(&self, file: &mut UploadFile) -> Result<(), GateError> {
        tracing::debug!(file = %file.name, size = file.size(), "upload received");

        if let Some(config) = &self.sanitize {
            sanitize::route(file, config).map_err(|e| {
                tracing::warn!(file = %file.name, error = %e, "rejected by sanitizer");
                e
            })?;
        }

        let verdict = self.scanner.scan(&file.buffer).await?;

        if let ScanVerdict::Infected { signature } = verdict {
            tracing::warn!(
                file = %file.name,
                signature = %signature,
                scanner = self.scanner.name(),
                "rejected by scan"
            );
            return Err(GateError::infected(signature));
        }

        tracing::debug!(
            file = %file.name,
            backend = self.backend.name(),
            "scan clean, forwarding to storage"
        );

        self.backend.upload(file).await?;
        Ok(())
    }

    /// Forwards directly to the backend's `delete`.
    ///
    /// No sanitization or scanning is involved.
    pub async fn delete(&self, file: &UploadFile) -> Result<(), GateError> {
        self.backend.delete(file).await?;
        Ok(())
    }
}
