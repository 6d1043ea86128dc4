//! Error types for the uploadgate library.
//!
//! This module provides structured, typed errors for all failure scenarios.
//! The library never panics; all errors are returned as `Result` values.
//!
//! Callers can branch on the error kind rather than string-matching
//! messages: [`GateError::is_rejection`] distinguishes "this file was
//! refused" from transport and backend failures.

use std::time::Duration;
use thiserror::Error;

/// The main error type for gate operations.
///
/// Every variant carries context about what failed and why, so upstream
/// systems can map rejections, transport failures, and storage failures
/// to different responses (e.g. HTTP 4xx vs 5xx).
#[derive(Debug, Error)]
pub enum GateError {
    /// A mandatory initialization field is missing or invalid.
    ///
    /// Raised at construction time only; the gate never becomes ready.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A sanitizer could not produce a safe output.
    ///
    /// Typically a parse failure, e.g. a file declared as JPEG whose
    /// buffer is not a valid JPEG container.
    #[error("sanitization failed: {reason}")]
    Sanitization {
        /// Description of what the sanitizer could not handle.
        reason: String,
    },

    /// A local signature check detected an uncorrectable exploit.
    ///
    /// Distinct from [`GateError::Infected`]: the match was made by this
    /// library, not reported by the scanning daemon.
    #[error("upload rejected: {description}")]
    RejectedContent {
        /// Description of the detected exploit.
        description: String,
    },

    /// Failed to connect to the scanning daemon.
    #[error("connection to scanning daemon failed: {message}")]
    ConnectionFailed {
        /// Error message describing the failure.
        message: String,
    },

    /// The scan round trip exceeded the configured timeout.
    #[error("virus scan timed out after {elapsed:?}")]
    ScanTimeout {
        /// How long the operation ran before timing out.
        elapsed: Duration,
    },

    /// The scanning daemon returned a reply this client cannot interpret.
    ///
    /// Never reinterpreted as a verdict; an unreadable reply means no
    /// verdict was obtained and the file must not be stored.
    #[error("unexpected reply from scanning daemon: {reply:?}")]
    AmbiguousReply {
        /// The raw reply line as received.
        reply: String,
    },

    /// The scanning daemon reported a positive match.
    ///
    /// The display format is part of the public contract; hosts surface
    /// it to end users as the upload rejection reason.
    #[error("This file is infected with a virus: {signature}")]
    Infected {
        /// Name of the detected signature.
        signature: String,
    },

    /// An I/O error occurred while talking to the scanning daemon.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The storage backend failed; passed through verbatim.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl GateError {
    /// Returns `true` if this error means the file was refused on safety
    /// grounds (as opposed to an operational failure).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Sanitization { .. } | Self::RejectedContent { .. } | Self::Infected { .. }
        )
    }

    /// Returns `true` if this error is a scan transport failure.
    ///
    /// Transport failures mean no verdict was obtained; they are never
    /// treated as "infected" and never as "clean".
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed { .. }
                | Self::ScanTimeout { .. }
                | Self::AmbiguousReply { .. }
                | Self::Io(_)
        )
    }

    /// Creates a `Configuration` error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a `Sanitization` error.
    pub fn sanitization(reason: impl Into<String>) -> Self {
        Self::Sanitization {
            reason: reason.into(),
        }
    }

    /// Creates a `RejectedContent` error.
    pub fn rejected_content(description: impl Into<String>) -> Self {
        Self::RejectedContent {
            description: description.into(),
        }
    }

    /// Creates a `ConnectionFailed` error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed {
            message: message.into(),
        }
    }

    /// Creates an `AmbiguousReply` error.
    pub fn ambiguous_reply(reply: impl Into<String>) -> Self {
        Self::AmbiguousReply {
            reply: reply.into(),
        }
    }

    /// Creates an `Infected` error.
    pub fn infected(signature: impl Into<String>) -> Self {
        Self::Infected {
            signature: signature.into(),
        }
    }
}

/// Error raised by a storage backend.
///
/// The gate adds no interpretation of its own; whatever the provider
/// reports is carried through to the caller unchanged.
#[derive(Debug, Error)]
#[error("storage backend '{backend}': {source}")]
pub struct BackendError {
    /// Name of the backend that failed.
    backend: String,
    /// The provider's own error.
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl BackendError {
    /// Wraps a provider error.
    pub fn new(
        backend: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            backend: backend.into(),
            source: source.into(),
        }
    }

    /// Creates a backend error from a plain message.
    pub fn message(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(backend, message.into())
    }

    /// Returns the name of the backend that failed.
    pub fn backend(&self) -> &str {
        &self.backend
    }
}

/// A specialized `Result` type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rejection() {
        assert!(GateError::infected("Eicar-Test-Signature").is_rejection());
        assert!(GateError::rejected_content("GIF polyglot").is_rejection());
        assert!(GateError::sanitization("not a JPEG").is_rejection());
        assert!(!GateError::connection_failed("refused").is_rejection());
        assert!(!GateError::configuration("missing clamav settings").is_rejection());
    }

    #[test]
    fn test_is_transport() {
        assert!(GateError::connection_failed("refused").is_transport());
        assert!(GateError::ambiguous_reply("???").is_transport());
        assert!(GateError::ScanTimeout {
            elapsed: Duration::from_secs(30)
        }
        .is_transport());
        assert!(!GateError::infected("Eicar-Test-Signature").is_transport());
    }

    #[test]
    fn test_infected_display_format() {
        let err = GateError::infected("Win.Trojan.Agent-12345");
        assert_eq!(
            err.to_string(),
            "This file is infected with a virus: Win.Trojan.Agent-12345"
        );
    }

    #[test]
    fn test_backend_error_passthrough() {
        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: GateError = BackendError::new("s3", inner).into();
        assert!(err.to_string().contains("s3"));
        assert!(!err.is_rejection());
        assert!(!err.is_transport());
    }
}
