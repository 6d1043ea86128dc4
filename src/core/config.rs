//! Configuration types.
//!
//! The gate is configured from a single JSON options object in the shape
//! the host application provides:
//!
//! ```json
//! {
//!   "uploadProvider": "s3",
//!   "clamav": { "host": "127.0.0.1", "port": 3310, "timeout": 60000 },
//!   "sanitize": { "svg": true, "jpeg": true, "gif": true },
//!   "bucket": "my-bucket"
//! }
//! ```
//!
//! `uploadProvider` and `clamav` are mandatory; `sanitize` is optional
//! (absence disables all format sanitization, scanning still runs). Any
//! remaining keys belong to the storage provider and are handed to its
//! factory with the three reserved keys stripped out.

use crate::core::error::GateError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keys owned by the gate; never forwarded to the provider factory.
const RESERVED_KEYS: [&str; 3] = ["uploadProvider", "clamav", "sanitize"];

fn default_timeout_ms() -> u64 {
    60_000
}

fn default_chunk_size() -> usize {
    1024 * 1024
}

/// Connection parameters for the ClamAV daemon.
///
/// `timeout` is the upper bound on one full scan round trip (connect,
/// stream, reply), expressed in milliseconds in the wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClamdConfig {
    /// Daemon host.
    pub host: String,

    /// Daemon TCP port.
    pub port: u16,

    /// Round-trip timeout in milliseconds.
    #[serde(rename = "timeout", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum INSTREAM chunk size in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for ClamdConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3310,
            timeout_ms: default_timeout_ms(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl ClamdConfig {
    /// Creates a configuration for the given host and port with default
    /// timeout and chunk size.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Sets the round-trip timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Sets the maximum chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Returns the round-trip timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the daemon address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Per-format sanitization switches.
///
/// Each flag enables one format family in the sanitization router; a
/// disabled family is not inspected at all and its files pass through
/// to scanning unchanged.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SanitizeConfig {
    /// Rewrite SVG markup to remove active content.
    #[serde(default)]
    pub svg: bool,

    /// Strip EXIF metadata from JPEG images.
    #[serde(default)]
    pub jpeg: bool,

    /// Reject GIFs carrying the known polyglot exploit header.
    #[serde(default)]
    pub gif: bool,
}

impl SanitizeConfig {
    /// Creates a configuration with all families disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables SVG sanitization.
    pub fn with_svg(mut self, enabled: bool) -> Self {
        self.svg = enabled;
        self
    }

    /// Enables or disables JPEG metadata stripping.
    pub fn with_jpeg(mut self, enabled: bool) -> Self {
        self.jpeg = enabled;
        self
    }

    /// Enables or disables the GIF signature check.
    pub fn with_gif(mut self, enabled: bool) -> Self {
        self.gif = enabled;
        self
    }

    /// Returns `true` if any family is enabled.
    pub fn any_enabled(&self) -> bool {
        self.svg || self.jpeg || self.gif
    }
}

#[derive(Deserialize)]
struct RawGateConfig {
    #[serde(rename = "uploadProvider")]
    upload_provider: Option<String>,
    clamav: Option<ClamdConfig>,
    sanitize: Option<SanitizeConfig>,
}

/// The gate's full initialization input.
///
/// Built once from the host's options object via
/// [`GateConfig::from_value`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Identifier of the storage provider to proxy.
    pub provider: String,

    /// ClamAV daemon connection parameters.
    pub clamav: ClamdConfig,

    /// Optional sanitization switches.
    pub sanitize: Option<SanitizeConfig>,

    /// The original options object, kept for the provider factory.
    options: serde_json::Value,
}

impl GateConfig {
    /// Parses and validates the host's options object.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Configuration`] if `uploadProvider` or
    /// `clamav` is absent, or if any section fails to deserialize.
    pub fn from_value(options: serde_json::Value) -> Result<Self, GateError> {
        let raw: RawGateConfig = serde_json::from_value(options.clone())
            .map_err(|e| GateError::configuration(format!("invalid options object: {e}")))?;

        let provider = raw
            .upload_provider
            .ok_or_else(|| GateError::configuration("missing uploadProvider setting"))?;

        let clamav = raw
            .clamav
            .ok_or_else(|| GateError::configuration("missing clamav settings"))?;

        Ok(Self {
            provider,
            clamav,
            sanitize: raw.sanitize,
            options,
        })
    }

    /// Returns the provider's own configuration: the original options
    /// object with the gate's reserved keys stripped out.
    pub fn provider_options(&self) -> serde_json::Value {
        match &self.options {
            serde_json::Value::Object(map) => {
                let cleaned: serde_json::Map<String, serde_json::Value> = map
                    .iter()
                    .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                serde_json::Value::Object(cleaned)
            }
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_options() -> serde_json::Value {
        json!({
            "uploadProvider": "memory",
            "clamav": { "host": "clam.internal", "port": 3310, "timeout": 30000 },
            "sanitize": { "svg": true, "gif": true },
            "bucket": "media",
            "region": "eu-west-1"
        })
    }

    #[test]
    fn test_parse_full_config() {
        let config = GateConfig::from_value(full_options()).unwrap();
        assert_eq!(config.provider, "memory");
        assert_eq!(config.clamav.host, "clam.internal");
        assert_eq!(config.clamav.timeout(), Duration::from_secs(30));
        assert_eq!(config.clamav.chunk_size, 1024 * 1024);

        let sanitize = config.sanitize.unwrap();
        assert!(sanitize.svg);
        assert!(!sanitize.jpeg);
        assert!(sanitize.gif);
    }

    #[test]
    fn test_missing_provider_is_fatal() {
        let err = GateConfig::from_value(json!({
            "clamav": { "host": "localhost", "port": 3310 }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("uploadProvider"));
    }

    #[test]
    fn test_missing_clamav_is_fatal() {
        let err = GateConfig::from_value(json!({ "uploadProvider": "memory" })).unwrap_err();
        assert!(err.to_string().contains("clamav"));
    }

    #[test]
    fn test_sanitize_is_optional() {
        let config = GateConfig::from_value(json!({
            "uploadProvider": "memory",
            "clamav": { "host": "localhost", "port": 3310 }
        }))
        .unwrap();
        assert!(config.sanitize.is_none());
    }

    #[test]
    fn test_reserved_keys_stripped_from_provider_options() {
        let config = GateConfig::from_value(full_options()).unwrap();
        let options = config.provider_options();
        let map = options.as_object().unwrap();

        assert!(!map.contains_key("uploadProvider"));
        assert!(!map.contains_key("clamav"));
        assert!(!map.contains_key("sanitize"));
        assert_eq!(map["bucket"], json!("media"));
        assert_eq!(map["region"], json!("eu-west-1"));
    }

    #[test]
    fn test_clamd_config_builder() {
        let config = ClamdConfig::new("10.0.0.5", 3311)
            .with_timeout(Duration::from_secs(5))
            .with_chunk_size(64 * 1024);

        assert_eq!(config.address(), "10.0.0.5:3311");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.chunk_size, 64 * 1024);
    }
}
