//! Shared helpers for integration tests

use std::net::SocketAddr;
use sumi_linkrank::analysis::Analyzer;
use sumi_linkrank::config::{hash_config_content, Config};
use sumi_linkrank::server::{serve, AppState};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing to a database inside `dir`
pub fn create_test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.crawler.fetch_delay_ms = 0;
    config.crawler.max_pages = 50;
    config.storage.database_path = dir
        .path()
        .join("linkrank.db")
        .to_string_lossy()
        .into_owned();
    config
}

/// Creates an analyzer backed by a fresh database
pub fn create_test_analyzer() -> (Analyzer, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&dir);
    let analyzer =
        Analyzer::from_config(config, hash_config_content("")).expect("Failed to create analyzer");
    (analyzer, dir)
}

/// A running API server
pub struct TestApp {
    pub address: String,
    pub analyzer: Analyzer,
    pub client: reqwest::Client,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, route: &str) -> String {
        format!("{}{}", self.address, route)
    }

    /// POSTs a raw body and returns the status and the parsed JSON response
    pub async fn post(&self, route: &str, body: &str) -> (u16, serde_json::Value) {
        let response = self
            .client
            .post(self.url(route))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Failed to send request");

        let status = response.status().as_u16();
        let text = response.text().await.expect("Failed to read body");
        let json = serde_json::from_str(&text).expect("Response is not JSON");
        (status, json)
    }
}

/// Starts the API on an ephemeral port
pub async fn spawn_app() -> TestApp {
    let (analyzer, dir) = create_test_analyzer();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr: SocketAddr = listener.local_addr().expect("Failed to read address");

    tokio::spawn(serve(listener, AppState::new(analyzer.clone())));

    TestApp {
        address: format!("http://{}", addr),
        analyzer,
        client: reqwest::Client::new(),
        _dir: dir,
    }
}

/// Mounts an HTML page at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body.to_string(), "text/html"),
        )
        .mount(server)
        .await;
}
