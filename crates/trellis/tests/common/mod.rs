//! Common test utilities and helpers

use std::path::Path;
use std::time::Duration;

use trellis::Client;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Create a test API key
#[allow(dead_code)]
pub fn test_api_key() -> String {
    "0123456789abcdef0123456789abcdef".to_string()
}

/// Create a test user token
#[allow(dead_code)]
pub fn test_token() -> String {
    "ATTAfedcba9876543210fedcba9876543210".to_string()
}

/// Client pointed at a mock server, with millisecond retry delays
#[allow(dead_code)]
pub fn client_for(base_url: impl Into<String>) -> Client {
    Client::builder()
        .api_key(test_api_key())
        .token(test_token())
        .base_url(base_url)
        .retry_delay(Duration::from_millis(1), Duration::from_millis(5))
        .build()
        .expect("Failed to build client")
}
