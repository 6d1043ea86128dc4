//! Custom backend example demonstrating how to implement a provider.
//!
//! This example shows how to:
//! - Implement the StorageBackend trait for a custom provider
//! - Register it in a BackendRegistry and build the gate from a config
//!   object with provider-specific options
//!
//! Run with: cargo run --example custom_backend

use async_trait::async_trait;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use uploadgate::prelude::*;

/// A provider that writes uploads to a local directory.
///
/// This demonstrates how to implement a custom storage backend.
#[derive(Debug)]
struct LocalDirBackend {
    root: PathBuf,
}

impl LocalDirBackend {
    fn from_options(options: &serde_json::Value) -> Result<Self, GateError> {
        let root = options
            .get("directory")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GateError::configuration("local provider needs a 'directory'"))?;
        Ok(Self {
            root: PathBuf::from(root),
        })
    }

    fn target(&self, file: &UploadFile) -> PathBuf {
        self.root.join(&file.name)
    }
}

#[async_trait]
impl StorageBackend for LocalDirBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn upload(&self, file: &UploadFile) -> Result<(), BackendError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| BackendError::new("local", e))?;
        tokio::fs::write(self.target(file), &file.buffer)
            .await
            .map_err(|e| BackendError::new("local", e))
    }

    async fn delete(&self, file: &UploadFile) -> Result<(), BackendError> {
        tokio::fs::remove_file(self.target(file))
            .await
            .map_err(|e| BackendError::new("local", e))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Uploadgate Custom Backend Example ===\n");

    // Register the provider; the factory receives the options object
    // with the gate's reserved keys already stripped.
    let registry = BackendRegistry::new().with_provider("local", |options| {
        Ok(Arc::new(LocalDirBackend::from_options(options)?) as _)
    });

    let config = GateConfig::from_value(json!({
        "uploadProvider": "local",
        "clamav": { "host": "127.0.0.1", "port": 3310, "timeout": 30000 },
        "sanitize": { "svg": true, "jpeg": true, "gif": true },
        "directory": "/tmp/uploadgate-demo"
    }))?;

    // from_config wires a real ClamdScanner; this example therefore
    // needs a clamd listening on 127.0.0.1:3310 to get past scanning.
    let gate = UploadGate::from_config(&config, &registry)?;

    let mut file = UploadFile::new("hello.txt", b"hello from the gate".to_vec())
        .with_ext(".txt")
        .with_mime("text/plain");

    match gate.upload(&mut file).await {
        Ok(()) => println!("stored {}", file.name),
        Err(e) if e.is_rejection() => println!("rejected: {e}"),
        Err(e) if e.is_transport() => println!("scan unavailable (is clamd running?): {e}"),
        Err(e) => println!("storage failure: {e}"),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
