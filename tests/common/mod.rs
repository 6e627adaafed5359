/*!
 * Common test utilities for the comprehend test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use comprehend::app_config::{Config, Formality, PacingConfig, TranslationSettings};
use comprehend::client::Endpoint;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Settings pointing at an arbitrary endpoint
pub fn test_settings(base_url: &str) -> TranslationSettings {
    TranslationSettings::new("test-token:fx", "DE", Formality::Default, Endpoint::custom(base_url))
}

/// A valid configuration that never waits
pub fn test_config() -> Config {
    Config {
        token: "test-token:fx".to_string(),
        target_language: "de".to_string(),
        pacing: PacingConfig::immediate(),
        ..Config::default()
    }
}

/// HTTP server answering exactly one request with a canned response
pub struct OneShotServer {
    /// Base URL of the translate path, without query
    pub base_url: String,
    /// Resolves to the request line that was received
    pub request_line: JoinHandle<String>,
}

/// Start a local server that answers one request with `status` and `body`
pub async fn spawn_one_shot_server(status: u16, body: &str) -> Result<OneShotServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let body = body.to_string();

    let request_line = tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return String::new();
        };

        let mut received = Vec::new();
        let mut buffer = [0u8; 1024];
        while !received.windows(4).any(|window| window == b"\r\n\r\n") {
            match socket.read(&mut buffer).await {
                Ok(0) | Err(_) => break,
                Ok(n) => received.extend_from_slice(&buffer[..n]),
            }
        }

        let response = format!(
            "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&received)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    });

    Ok(OneShotServer {
        base_url: format!("http://{}/v2/translate", address),
        request_line,
    })
}
