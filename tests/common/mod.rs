//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests: slider documents, a resolver
//! wired to an in-memory option store and a wiremock remote endpoint.

#![allow(dead_code)]

use atera_compact_calculator::{
    config::Settings,
    resolver::{ConfigResolver, MemoryOptionStore, RemoteFetcher},
    utils::TransientCache,
};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::{NamedTempFile, TempDir};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test data factory
pub struct MockData;

impl MockData {
    /// The bundled three-slider document
    pub fn local_document() -> serde_json::Value {
        serde_json::json!({
            "prefix": "$",
            "sliders": [
                {"id": "technicians", "label": "Technicians", "min": 0, "max": 20, "step": 1, "default": 10},
                {"id": "endpoints", "label": "Endpoints", "min": 0, "max": 2500, "step": 100, "default": 1200},
                {"id": "endpointRate", "label": "Cost per endpoint", "min": 1, "max": 20, "step": 1, "default": 7}
            ]
        })
    }

    /// A remote override that changes one slider, adds one and sets a theme
    pub fn remote_document() -> serde_json::Value {
        serde_json::json!({
            "prefix": "€",
            "ctaHref": "https://www.atera.com/free-trial",
            "theme": "dark",
            "sliders": [
                {"id": "technicians", "max": 50},
                {"id": "endpoints"},
                {"id": "endpointRate"},
                {"id": "backupSeats", "label": "Backup seats", "min": 0, "max": 10}
            ]
        })
    }
}

/// Test configuration factory
pub struct TestConfig {
    pub dir: TempDir,
    pub settings: Settings,
}

impl TestConfig {
    /// Settings with the local document written to a temp dir and no remote
    pub fn with_local(document: &serde_json::Value) -> Self {
        let dir = TempDir::new().unwrap();
        let local_path = dir.path().join("calc-sliders.json");
        std::fs::write(&local_path, document.to_string()).unwrap();

        let mut settings = Settings::default();
        settings.calculator.local_config_path = local_path;
        settings.calculator.options_path = Some(dir.path().join("options.json"));
        Self { dir, settings }
    }

    /// Settings whose local document does not exist
    pub fn without_local() -> Self {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.calculator.local_config_path = dir.path().join("missing.json");
        settings.calculator.options_path = Some(dir.path().join("options.json"));
        Self { dir, settings }
    }

    /// Point the explicit remote URL override at `url`
    pub fn with_remote(mut self, url: impl Into<String>) -> Self {
        self.settings.calculator.remote_url = Some(url.into());
        self
    }

    /// Resolver over these settings with an in-memory option store
    pub fn resolver(&self) -> (ConfigResolver, Arc<MemoryOptionStore>) {
        let options = Arc::new(MemoryOptionStore::new());
        let resolver = ConfigResolver::with_parts(
            self.settings.clone(),
            Arc::new(TransientCache::new()),
            options.clone(),
            Arc::new(RemoteFetcher::new(&self.settings).unwrap()),
        );
        (resolver, options)
    }

    /// Write these settings as a TOML file for the binary
    pub fn write_toml(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new_in(self.dir.path()).unwrap();
        write!(file, "{}", toml::to_string(&self.settings).unwrap()).unwrap();
        file
    }
}

/// Mock server factory
pub struct MockServerFactory;

impl MockServerFactory {
    /// Serve `body` for every GET, expecting exactly `calls` requests
    pub async fn serving(body: serde_json::Value, calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(calls)
            .mount(&server)
            .await;
        server
    }

    /// Answer every GET with `status`
    pub async fn failing(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .mount(&server)
            .await;
        server
    }
}

/// Test utilities
pub struct TestUtils;

impl TestUtils {
    /// Initialize test logging
    pub fn init_logger() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("debug")
            .try_init();
    }

    /// Collect a response body as JSON
    pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Path of the document shipped at the repository root
    pub fn bundled_document() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/calc-sliders.json"))
    }
}
