//! SVG markup sanitizer.
//!
//! Rewrites an SVG payload to a safe profile: structural and visual
//! elements plus filter primitives survive, while scripts, event-handler
//! attributes, and foreign/embedded objects are removed. The rewrite is
//! best-effort and silent: input that cannot be parsed yields an empty
//! buffer rather than an error, so sanitization never blocks an upload
//! on its own.

use svg_hush::{data_url_filter, Filter};

/// Sanitizes an SVG buffer.
///
/// Returns the rewritten document, or an empty buffer when the input is
/// not parseable as SVG.
pub fn sanitize(data: &[u8]) -> Vec<u8> {
    let mut input = data;
    let mut output = Vec::new();

    let mut filter = Filter::new();
    filter.set_data_url_filter(data_url_filter::allow_standard_images);

    if let Err(e) = filter.filter(&mut input, &mut output) {
        tracing::debug!(error = %e, input_len = data.len(), "SVG filter failed, emitting empty document");
        output.clear();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize_str(input: &str) -> String {
        String::from_utf8(sanitize(input.as_bytes())).unwrap()
    }

    #[test]
    fn test_removes_script_elements() {
        let output = sanitize_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script><rect width="10" height="10"/></svg>"#,
        );
        assert!(!output.contains("<script"));
        assert!(!output.contains("alert"));
        assert!(output.contains("rect"));
    }

    #[test]
    fn test_removes_event_handler_attributes() {
        let output = sanitize_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" onload="stealCookies()"><circle r="5" onclick="x()"/></svg>"#,
        );
        assert!(!output.contains("onload"));
        assert!(!output.contains("onclick"));
        assert!(output.contains("circle"));
    }

    #[test]
    fn test_removes_foreign_objects() {
        let output = sanitize_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><foreignObject><iframe src="https://evil.example"/></foreignObject></svg>"#,
        );
        assert!(!output.to_lowercase().contains("foreignobject"));
        assert!(!output.contains("iframe"));
    }

    #[test]
    fn test_preserves_filter_primitives() {
        let output = sanitize_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><filter id="b"><feGaussianBlur stdDeviation="2"/></filter></svg>"#,
        );
        assert!(output.contains("feGaussianBlur"));
    }

    #[test]
    fn test_unparseable_input_yields_empty_buffer() {
        assert!(sanitize(b"\x00\x01\x02 definitely not xml <<<").is_empty());
    }

    #[test]
    fn test_empty_input_never_errors() {
        assert!(sanitize(b"").is_empty());
    }
}
