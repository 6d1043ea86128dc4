//! GIF polyglot signature check.
//!
//! A GIF whose header reads `GIF89a/*` is simultaneously a valid GIF
//! version string and the opening of a JavaScript block comment, a trick
//! used to smuggle script past content-type checks and to crash legacy
//! viewers. The payload cannot be repaired, so a match rejects the file
//! outright; anything else passes through with the bytes uninspected
//! further.

use crate::core::GateError;

/// The malformed animation-header signature, compared byte for byte.
const POLYGLOT_SIGNATURE: &[u8; 8] = b"GIF89a/*";

/// Rejects a buffer whose first 8 bytes exactly match the polyglot
/// exploit signature.
///
/// The check is stateless: running it twice on the same buffer always
/// yields the same decision.
///
/// # Errors
///
/// Returns [`GateError::RejectedContent`] on a signature match.
pub fn reject_polyglot(data: &[u8]) -> Result<(), GateError> {
    if data.get(..POLYGLOT_SIGNATURE.len()) == Some(POLYGLOT_SIGNATURE.as_slice()) {
        return Err(GateError::rejected_content(
            "GIF contains an XSS attack (GIF89a/* polyglot header)",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_signature_is_rejected() {
        let err = reject_polyglot(b"GIF89a/*=alert(document.cookie)//*").unwrap_err();
        assert!(matches!(err, GateError::RejectedContent { .. }));
    }

    #[test]
    fn test_signature_alone_is_rejected() {
        // The remainder of the buffer is irrelevant, including no remainder.
        assert!(reject_polyglot(b"GIF89a/*").is_err());
    }

    #[test]
    fn test_ordinary_gif_passes() {
        assert!(reject_polyglot(b"GIF89a\x10\x00\x10\x00").is_ok());
        assert!(reject_polyglot(b"GIF87a\x10\x00\x10\x00").is_ok());
    }

    #[test]
    fn test_one_byte_mismatch_passes() {
        // Differs from the signature only in the final byte.
        assert!(reject_polyglot(b"GIF89a//").is_ok());
    }

    #[test]
    fn test_short_buffer_passes() {
        assert!(reject_polyglot(b"GIF89a/").is_ok());
        assert!(reject_polyglot(b"").is_ok());
    }

    #[test]
    fn test_decision_is_idempotent() {
        let infected = b"GIF89a/*payload";
        let clean = b"GIF89a payload";

        assert_eq!(
            reject_polyglot(infected).is_err(),
            reject_polyglot(infected).is_err()
        );
        assert_eq!(
            reject_polyglot(clean).is_ok(),
            reject_polyglot(clean).is_ok()
        );
    }
}
