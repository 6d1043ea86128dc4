//! JPEG metadata stripper.
//!
//! Parses the JPEG container and drops the EXIF segment, leaving the
//! container structure and entropy-coded image data untouched. EXIF
//! blocks routinely carry GPS coordinates, device serial numbers, and
//! editing history that uploaders rarely intend to publish.
//!
//! Unlike the SVG sanitizer this one can fail: a buffer declared as JPEG
//! that does not parse as one is a sanitization error, distinct from an
//! infection verdict.

use crate::core::GateError;
use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;

/// Removes EXIF metadata from a JPEG buffer.
///
/// # Errors
///
/// Returns [`GateError::Sanitization`] if the buffer is not a parseable
/// JPEG container.
pub fn strip_exif(data: &[u8]) -> Result<Vec<u8>, GateError> {
    let mut jpeg = Jpeg::from_bytes(data.to_vec().into())
        .map_err(|e| GateError::sanitization(format!("unsupported JPEG container: {e}")))?;

    jpeg.set_exif(None);

    Ok(jpeg.encoder().bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTROPY_DATA: &[u8] = &[0x12, 0x34, 0x56, 0x78, 0x9A];

    /// A structurally minimal JPEG: SOI, an APP1 EXIF segment, SOS, a
    /// few bytes of entropy-coded data, EOI.
    fn jpeg_with_exif() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];

        // APP1 segment: length covers itself plus the payload
        let exif_payload = b"Exif\0\0II*\0secret-gps-data";
        data.extend_from_slice(&[0xFF, 0xE1]);
        data.extend_from_slice(&((exif_payload.len() as u16 + 2).to_be_bytes()));
        data.extend_from_slice(exif_payload);

        // SOS with an empty parameter block, then image data
        data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02]);
        data.extend_from_slice(ENTROPY_DATA);
        data.extend_from_slice(&[0xFF, 0xD9]);
        data
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_strips_exif_segment() {
        let input = jpeg_with_exif();
        assert!(contains(&input, b"Exif"));

        let output = strip_exif(&input).unwrap();
        assert!(!contains(&output, b"Exif"));
        assert!(!contains(&output, b"secret-gps-data"));
    }

    #[test]
    fn test_preserves_image_data() {
        let output = strip_exif(&jpeg_with_exif()).unwrap();

        assert_eq!(&output[..2], &[0xFF, 0xD8]);
        assert!(contains(&output, ENTROPY_DATA));
        assert_eq!(&output[output.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_non_jpeg_buffer_is_rejected() {
        let err = strip_exif(b"GIF89a definitely not a jpeg").unwrap_err();
        assert!(matches!(err, GateError::Sanitization { .. }));
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        assert!(strip_exif(b"").is_err());
    }
}
