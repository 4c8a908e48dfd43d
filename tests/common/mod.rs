//! Common utilities for gost CLI integration tests

use std::fs;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Address nothing listens on; runs that reach the network fail fast.
pub const UNREACHABLE_API_URL: &str = "http://127.0.0.1:9";

/// Test configuration for integration tests
pub struct TestConfig {
    pub temp_dir: TempDir,
    pub gost_binary: PathBuf,
}

impl TestConfig {
    /// Create a new test configuration with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        Self {
            temp_dir,
            gost_binary: PathBuf::from(env!("CARGO_BIN_EXE_gost")),
        }
    }

    /// Get the path to the temporary directory
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a temporary file with given content and return its path
    pub fn create_temp_file(&self, name: &str, content: &str) -> PathBuf {
        let file_path = self.temp_path().join(name);
        fs::write(&file_path, content).expect("Failed to write temp file");
        file_path
    }

    /// Command for the gost binary with a clean, isolated environment
    /// pointing at the given API base URL.
    pub fn gost_command(&self, api_url: &str) -> Command {
        let mut command = Command::new(&self.gost_binary);
        command
            .env("GOST_API_URL", api_url)
            .env("HOME", self.temp_path())
            .env("NO_PROXY", "127.0.0.1,localhost")
            .env_remove("GOST")
            .env_remove("GOST_LOG_TO_FILE")
            .env_remove("RUST_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("HTTPS_PROXY")
            .env_remove("https_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy");
        command
    }
}

/// A request received by [`MockGistApi`].
#[derive(Debug)]
pub struct CapturedRequest {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Request body should be JSON")
    }
}

/// One-shot HTTP responder standing in for the gist API: accepts a single
/// connection, records the request and answers with a canned response.
pub struct MockGistApi {
    pub base_url: String,
    handle: JoinHandle<Option<CapturedRequest>>,
}

impl MockGistApi {
    pub fn respond_with(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind mock API");
        listener
            .set_nonblocking(true)
            .expect("Failed to configure mock API");
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let body = body.to_string();

        let handle = thread::spawn(move || {
            let deadline = Instant::now() + Duration::from_secs(30);
            loop {
                match listener.accept() {
                    Ok((stream, _)) => return Some(handle_connection(stream, status, &body)),
                    Err(_) if Instant::now() < deadline => {
                        thread::sleep(Duration::from_millis(10));
                    }
                    Err(_) => return None,
                }
            }
        });

        Self { base_url, handle }
    }

    /// Wait for the single request and return it.
    pub fn captured(self) -> CapturedRequest {
        self.handle
            .join()
            .expect("Mock API thread panicked")
            .expect("Mock API received no request")
    }
}

fn handle_connection(mut stream: TcpStream, status: u16, body: &str) -> CapturedRequest {
    stream.set_nonblocking(false).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(10)))
        .unwrap();

    let mut raw = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find_header_end(&raw) {
            break pos;
        }
        let n = stream.read(&mut chunk).expect("Failed to read request");
        assert!(n > 0, "Connection closed before headers were complete");
        raw.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = header_end + 4;
    while raw.len() < body_start + content_length {
        let n = stream.read(&mut chunk).expect("Failed to read request body");
        assert!(n > 0, "Connection closed before body was complete");
        raw.extend_from_slice(&chunk[..n]);
    }
    let request_body =
        String::from_utf8_lossy(&raw[body_start..body_start + content_length]).to_string();

    let reason = if (200..300).contains(&status) { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream
        .write_all(response.as_bytes())
        .expect("Failed to write response");
    let _ = stream.flush();

    CapturedRequest {
        request_line,
        headers,
        body: request_body,
    }
}

fn find_header_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|window| window == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::new();
        assert!(config.temp_path().exists());
        assert!(config.gost_binary.file_name().is_some());
    }

    #[test]
    fn test_temp_file_creation() {
        let config = TestConfig::new();
        let file_path = config.create_temp_file("test.txt", "Hello, World!");

        assert!(file_path.exists());
        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "Hello, World!");
    }

    #[test]
    fn test_find_header_end() {
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some(14));
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n"), None);
    }
}
