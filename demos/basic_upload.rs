//! Basic upload example demonstrating the full gate pipeline.
//!
//! This example shows how to:
//! - Register a storage provider and build a gate from a config object
//! - Upload a clean file, a malicious SVG, and a GIF polyglot
//! - Branch on the rejection category
//!
//! Run with: cargo run --example basic_upload

use std::sync::Arc;
use uploadgate::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Uploadgate Basic Upload Example ===\n");

    // In a real deployment the gate is built from the host's options
    // object via GateConfig::from_value + UploadGate::from_config, which
    // wires a ClamdScanner. Here a mock scanner stands in for the daemon
    // so the example runs without clamd.
    let backend = Arc::new(MemoryBackend::new());
    let gate = UploadGate::builder()
        .backend(Arc::clone(&backend) as _)
        .scanner(Arc::new(MockScanner::new_clean()) as _)
        .sanitize(SanitizeConfig::new().with_svg(true).with_gif(true))
        .build()?;

    // A clean file of an unconfigured format passes through untouched.
    let mut notes = UploadFile::new("notes.txt", b"nothing to see here".to_vec())
        .with_ext(".txt")
        .with_mime("text/plain");
    gate.upload(&mut notes).await?;
    println!("stored notes.txt ({} bytes)", backend.stored("notes.txt").unwrap().len());

    // A malicious SVG is rewritten before storage.
    let mut logo = UploadFile::new(
        "logo.svg",
        br#"<svg xmlns="http://www.w3.org/2000/svg" onload="alert(1)"><script>evil()</script><rect width="10" height="10"/></svg>"#
            .to_vec(),
    )
    .with_ext(".svg")
    .with_mime("image/svg+xml");
    gate.upload(&mut logo).await?;
    println!(
        "stored logo.svg, sanitized to: {}",
        String::from_utf8_lossy(&backend.stored("logo.svg").unwrap())
    );

    // A GIF polyglot is rejected outright and never reaches storage.
    let mut gif = UploadFile::new("banner.gif", b"GIF89a/*=alert(document.cookie)//*".to_vec())
        .with_ext(".gif");
    match gate.upload(&mut gif).await {
        Ok(()) => println!("banner.gif stored (unexpected)"),
        Err(e) if e.is_rejection() => println!("banner.gif rejected: {e}"),
        Err(e) => println!("banner.gif failed operationally: {e}"),
    }

    // Deletes bypass the pipeline entirely.
    gate.delete(&notes).await?;
    println!("deleted notes.txt");

    println!("\n=== Example Complete ===");
    Ok(())
}
