//! ClamAV daemon client.
//!
//! Talks to clamd over TCP using the INSTREAM command:
//!
//! 1. Send `zINSTREAM\0`.
//! 2. Stream the buffer as `[4-byte big-endian length][data]` frames, no
//!    frame larger than the configured chunk size.
//! 3. Send a zero-length frame to end the stream.
//! 4. Read the single reply line: `stream: OK` or
//!    `stream: <signature> FOUND`.
//!
//! The configured timeout bounds the entire round trip, connect through
//! reply. The client opens one connection per call and holds no state
//! between calls.

use crate::core::{ClamdConfig, GateError};
use crate::scan::{ScanVerdict, VirusScanner};

use async_trait::async_trait;
use std::future::Future;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// A [`VirusScanner`] backed by a ClamAV daemon.
///
/// # Example
///
/// ```rust,ignore
/// use uploadgate::core::ClamdConfig;
/// use uploadgate::scan::{ClamdScanner, VirusScanner};
///
/// let scanner = ClamdScanner::new(ClamdConfig::new("127.0.0.1", 3310));
/// let verdict = scanner.scan(b"file contents").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ClamdScanner {
    config: ClamdConfig,
}

impl ClamdScanner {
    /// Creates a new client for the configured daemon.
    pub fn new(config: ClamdConfig) -> Self {
        Self { config }
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &ClamdConfig {
        &self.config
    }

    /// Runs `operation` under the configured round-trip timeout.
    async fn with_timeout<T, F>(&self, operation: F) -> Result<T, GateError>
    where
        F: Future<Output = Result<T, GateError>>,
    {
        let timeout = self.config.timeout();
        match tokio::time::timeout(timeout, operation).await {
            Ok(result) => result,
            Err(_) => Err(GateError::ScanTimeout { elapsed: timeout }),
        }
    }

    async fn connect(&self) -> Result<TcpStream, GateError> {
        TcpStream::connect(self.config.address())
            .await
            .map_err(|e| {
                GateError::connection_failed(format!("{}: {e}", self.config.address()))
            })
    }

    /// Streams the buffer with INSTREAM and returns the raw reply.
    async fn instream(&self, data: &[u8]) -> Result<String, GateError> {
        let mut stream = self.connect().await?;

        stream.write_all(b"zINSTREAM\0").await?;

        let chunk_size = self.config.chunk_size.max(1);
        for chunk in data.chunks(chunk_size) {
            stream.write_all(&(chunk.len() as u32).to_be_bytes()).await?;
            stream.write_all(chunk).await?;
        }

        // Zero-length frame terminates the stream
        stream.write_all(&0u32.to_be_bytes()).await?;
        stream.flush().await?;

        let mut reply = String::new();
        stream.read_to_string(&mut reply).await?;
        Ok(reply)
    }

    /// Sends a single null-terminated command and returns the reply.
    async fn command(&self, command: &[u8]) -> Result<String, GateError> {
        let mut stream = self.connect().await?;
        stream.write_all(command).await?;
        stream.flush().await?;

        let mut reply = String::new();
        stream.read_to_string(&mut reply).await?;
        Ok(reply)
    }

    /// Pings the daemon.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the daemon is unreachable or does
    /// not answer `PONG`.
    pub async fn ping(&self) -> Result<(), GateError> {
        let reply = self.with_timeout(self.command(b"zPING\0")).await?;
        let line = trim_reply(&reply);
        if line == "PONG" {
            Ok(())
        } else {
            Err(GateError::ambiguous_reply(line))
        }
    }

    /// Returns the daemon's version string.
    pub async fn version(&self) -> Result<String, GateError> {
        let reply = self.with_timeout(self.command(b"zVERSION\0")).await?;
        Ok(trim_reply(&reply).to_string())
    }
}

#[async_trait]
impl VirusScanner for ClamdScanner {
    fn name(&self) -> &str {
        "clamd"
    }

    async fn scan(&self, data: &[u8]) -> Result<ScanVerdict, GateError> {
        tracing::debug!(
            daemon = %self.config.address(),
            size = data.len(),
            chunk_size = self.config.chunk_size,
            "streaming buffer to clamd"
        );

        let reply = self.with_timeout(self.instream(data)).await?;
        let verdict = parse_reply(&reply)?;

        tracing::debug!(
            daemon = %self.config.address(),
            verdict = ?verdict,
            "clamd verdict received"
        );

        Ok(verdict)
    }

    async fn health_check(&self) -> Result<(), GateError> {
        self.ping().await
    }
}

/// Strips the z-mode null terminator and surrounding whitespace.
fn trim_reply(reply: &str) -> &str {
    reply.trim_matches('\0').trim()
}

/// Interprets a clamd reply line.
///
/// A line ending in `OK` is clean; a line ending in `FOUND` names a
/// signature (the `stream:` prefix and the suffix are stripped, the rest
/// trimmed). Anything else, including an empty reply, is an
/// [`GateError::AmbiguousReply`]: no verdict was obtained.
fn parse_reply(reply: &str) -> Result<ScanVerdict, GateError> {
    let line = trim_reply(reply);

    if line.is_empty() {
        return Err(GateError::ambiguous_reply(reply));
    }

    if line.ends_with("OK") {
        return Ok(ScanVerdict::Clean);
    }

    if let Some(stripped) = line.strip_suffix("FOUND") {
        let signature = stripped
            .strip_prefix("stream:")
            .unwrap_or(stripped)
            .trim()
            .to_string();
        return Ok(ScanVerdict::Infected { signature });
    }

    Err(GateError::ambiguous_reply(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[test]
    fn test_parse_reply_clean() {
        assert_eq!(parse_reply("stream: OK\0").unwrap(), ScanVerdict::Clean);
        assert_eq!(parse_reply("stream: OK\n").unwrap(), ScanVerdict::Clean);
    }

    #[test]
    fn test_parse_reply_infected() {
        let verdict = parse_reply("stream: Eicar-Test-Signature FOUND\0").unwrap();
        assert_eq!(
            verdict,
            ScanVerdict::Infected {
                signature: "Eicar-Test-Signature".to_string()
            }
        );
    }

    #[test]
    fn test_parse_reply_infected_complex_name() {
        let verdict = parse_reply("stream: Win.Trojan.Agent-12345 FOUND").unwrap();
        assert_eq!(
            verdict,
            ScanVerdict::Infected {
                signature: "Win.Trojan.Agent-12345".to_string()
            }
        );
    }

    #[test]
    fn test_parse_reply_empty_is_transport_error() {
        let err = parse_reply("").unwrap_err();
        assert!(err.is_transport());

        let err = parse_reply("\0").unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_parse_reply_malformed_is_transport_error() {
        let err = parse_reply("stream: Size limit exceeded ERROR").unwrap_err();
        assert!(matches!(err, GateError::AmbiguousReply { .. }));
    }

    /// Accepts one INSTREAM exchange and answers with `reply`.
    async fn fake_daemon(reply: &'static [u8]) -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();

            let mut command = [0u8; 10];
            sock.read_exact(&mut command).await.unwrap();
            assert_eq!(&command, b"zINSTREAM\0");

            loop {
                let mut len = [0u8; 4];
                sock.read_exact(&mut len).await.unwrap();
                let n = u32::from_be_bytes(len) as usize;
                if n == 0 {
                    break;
                }
                let mut chunk = vec![0u8; n];
                sock.read_exact(&mut chunk).await.unwrap();
            }

            sock.write_all(reply).await.unwrap();
            sock.shutdown().await.unwrap();
        });

        addr
    }

    #[tokio::test]
    async fn test_scan_clean_roundtrip() {
        let addr = fake_daemon(b"stream: OK\0").await;
        let scanner = ClamdScanner::new(
            ClamdConfig::new("127.0.0.1", addr.port()).with_chunk_size(4),
        );

        let verdict = scanner.scan(b"hello clamd, more than one chunk").await.unwrap();
        assert!(verdict.is_clean());
    }

    #[tokio::test]
    async fn test_scan_infected_roundtrip() {
        let addr = fake_daemon(b"stream: Eicar-Test-Signature FOUND\0").await;
        let scanner = ClamdScanner::new(ClamdConfig::new("127.0.0.1", addr.port()));

        let verdict = scanner.scan(b"x").await.unwrap();
        assert_eq!(
            verdict,
            ScanVerdict::Infected {
                signature: "Eicar-Test-Signature".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_scan_empty_buffer_roundtrip() {
        let addr = fake_daemon(b"stream: OK\0").await;
        let scanner = ClamdScanner::new(ClamdConfig::new("127.0.0.1", addr.port()));

        assert!(scanner.scan(b"").await.unwrap().is_clean());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind to learn a free port, then release it.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let scanner = ClamdScanner::new(ClamdConfig::new("127.0.0.1", addr.port()));
        let err = scanner.scan(b"x").await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_silent_daemon_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            // Accept and then never reply.
            let (_sock, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(60)).await;
        });

        let scanner = ClamdScanner::new(
            ClamdConfig::new("127.0.0.1", addr.port())
                .with_timeout(Duration::from_millis(100)),
        );

        let err = scanner.scan(b"x").await.unwrap_err();
        assert!(matches!(err, GateError::ScanTimeout { .. }));
    }
}
