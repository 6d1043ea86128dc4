//! The upload file record.
//!
//! [`UploadFile`] is the unit of work for the whole pipeline: an owned
//! binary payload plus the declared extension and MIME type used for
//! sanitizer dispatch, and whatever provider-specific fields the storage
//! backend needs. Sanitizers rewrite the payload in place; the gate
//! borrows the record for one call and retains nothing afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A file moving through the upload pipeline.
///
/// The `ext` and `mime` fields are the *declared* type; the gate never
/// sniffs content to second-guess them. Fields beyond the payload and
/// type declaration are opaque to this crate and carried through to the
/// storage backend untouched.
///
/// # Examples
///
/// ```rust
/// use uploadgate::UploadFile;
///
/// let file = UploadFile::new("photo.jpg", vec![0xFF, 0xD8, 0xFF])
///     .with_ext(".jpg")
///     .with_mime("image/jpeg");
///
/// assert_eq!(file.size(), 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadFile {
    /// The file's name, as presented by the uploader.
    pub name: String,

    /// The raw payload. Sanitizers replace this in place.
    pub buffer: Vec<u8>,

    /// Declared filename extension, with or without the leading dot.
    pub ext: Option<String>,

    /// Declared MIME type.
    pub mime: Option<String>,

    /// Backend-specific target path, if any.
    pub path: Option<String>,

    /// Additional provider-specific fields, opaque to the gate.
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl UploadFile {
    /// Creates a new upload file from a name and payload.
    pub fn new(name: impl Into<String>, buffer: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            buffer,
            ext: None,
            mime: None,
            path: None,
            extra: HashMap::new(),
        }
    }

    /// Sets the declared extension.
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    /// Sets the declared MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Sets the backend target path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attaches a provider-specific field.
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns the payload size in bytes.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let file = UploadFile::new("cat.gif", b"GIF89a".to_vec())
            .with_ext(".gif")
            .with_mime("image/gif")
            .with_path("uploads/cat.gif")
            .with_extra("tenant", serde_json::json!("acme"));

        assert_eq!(file.name, "cat.gif");
        assert_eq!(file.ext.as_deref(), Some(".gif"));
        assert_eq!(file.mime.as_deref(), Some("image/gif"));
        assert_eq!(file.path.as_deref(), Some("uploads/cat.gif"));
        assert_eq!(file.extra["tenant"], serde_json::json!("acme"));
        assert_eq!(file.size(), 6);
    }
}
