//! Format-aware content sanitization.
//!
//! The router dispatches a file to at most one sanitizer based on its
//! declared extension and MIME type, gated by the per-format switches in
//! [`SanitizeConfig`]:
//!
//! - [`svg`] - rewrites SVG markup to a safe profile (no scripts, no
//!   event handlers, no foreign objects)
//! - [`jpeg`] - strips EXIF metadata from JPEG containers
//! - [`gif`] - rejects GIFs carrying a known polyglot exploit header
//!
//! Dispatch is priority-ordered and mutually exclusive; a file matching
//! no enabled family passes through unchanged. Once a file leaves the
//! router its payload is never re-inspected by format rules, only
//! scanned.

pub mod gif;
pub mod jpeg;
pub mod svg;

use crate::core::{GateError, SanitizeConfig, UploadFile};

/// Runs the first matching, enabled sanitizer against the file.
///
/// The payload is rewritten in place for SVG and JPEG; the GIF check
/// either passes the buffer untouched or rejects the upload.
///
/// # Errors
///
/// - [`GateError::Sanitization`] if a matched sanitizer cannot parse the
///   buffer (JPEG).
/// - [`GateError::RejectedContent`] if the GIF exploit signature is
///   present.
pub fn route(file: &mut UploadFile, config: &SanitizeConfig) -> Result<(), GateError> {
    if config.svg && (has_ext(file, &["svg"]) || has_mime(file, "image/svg+xml")) {
        let sanitized = svg::sanitize(&file.buffer);
        tracing::debug!(
            file = %file.name,
            before = file.buffer.len(),
            after = sanitized.len(),
            "SVG sanitized"
        );
        file.buffer = sanitized;
    } else if config.jpeg && (has_ext(file, &["jpg", "jpeg"]) || has_mime(file, "image/jpeg")) {
        let stripped = jpeg::strip_exif(&file.buffer)?;
        tracing::debug!(
            file = %file.name,
            before = file.buffer.len(),
            after = stripped.len(),
            "JPEG metadata stripped"
        );
        file.buffer = stripped;
    } else if config.gif && (has_ext(file, &["gif"]) || has_mime(file, "image/gif")) {
        gif::reject_polyglot(&file.buffer)?;
    }

    Ok(())
}

/// Case-insensitive extension match, tolerant of a leading dot.
fn has_ext(file: &UploadFile, candidates: &[&str]) -> bool {
    match &file.ext {
        Some(ext) => {
            let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
            candidates.contains(&normalized.as_str())
        }
        None => false,
    }
}

/// Case-insensitive MIME type match.
fn has_mime(file: &UploadFile, mime: &str) -> bool {
    match &file.mime {
        Some(declared) => declared.eq_ignore_ascii_case(mime),
        None => false,
    }
}
