//! End-to-end tests of the HTTP API

use crate::support::{mount_page, spawn_app};
use sumi_linkrank::graph::LinkGraph;
use sumi_linkrank::storage::Storage;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_graph() -> LinkGraph {
    vec![
        (
            "https://example.com/a",
            vec![
                "https://example.com/b".to_string(),
                "https://example.com/c".to_string(),
            ],
        ),
        ("https://example.com/b", vec!["https://example.com/c".to_string()]),
        ("https://example.com/c", vec![]),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_healthz() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/healthz"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_preflight_is_empty_ok_with_cors() {
    let app = spawn_app().await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/analyze-internal-links"))
        .header("origin", "https://dashboard.example.org")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert!(response.headers().contains_key("access-control-allow-methods"));
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_source_is_rejected() {
    let app = spawn_app().await;

    let (status, body) = app.post("/analyze-internal-links", "{}").await;

    assert_eq!(status, 400);
    assert_eq!(
        body,
        serde_json::json!({
            "success": false,
            "error": "Either crawlId or startUrl is required"
        })
    );
}

#[tokio::test]
async fn test_empty_body_is_rejected_as_missing_source() {
    let app = spawn_app().await;

    let (status, body) = app.post("/analyze-internal-links", "").await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Either crawlId or startUrl is required");
}

#[tokio::test]
async fn test_malformed_json_uses_error_shape() {
    let app = spawn_app().await;

    let (status, body) = app.post("/analyze-internal-links", "{\"crawlId\":").await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
}

#[tokio::test]
async fn test_unknown_crawl_id() {
    let app = spawn_app().await;

    let (status, body) = app
        .post("/analyze-internal-links", r#"{"crawlId":"does-not-exist"}"#)
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Crawl not found");
}

#[tokio::test]
async fn test_error_responses_carry_cors_headers() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/analyze-internal-links"))
        .body("{}")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_analyze_stored_crawl() {
    let app = spawn_app().await;
    let crawl_id = app
        .analyzer
        .store_graph("https://example.com/a", &sample_graph())
        .expect("Failed to store crawl");

    let (status, body) = app
        .post(
            "/analyze-internal-links",
            &format!(r#"{{"crawlId":"{}"}}"#, crawl_id),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Analyzed 3 pages with 3 internal links");

    let data = &body["data"];
    assert_eq!(data["summary"]["totalPages"], 3);
    assert_eq!(data["summary"]["totalLinks"], 3);
    assert_eq!(data["summary"]["orphanedPages"], 0);
    assert_eq!(data["summary"]["maxDepth"], 1);
    assert_eq!(data["orphanedPages"], serde_json::json!([]));
    assert_eq!(data["hubs"], serde_json::json!([]));
    assert_eq!(data["authorities"], serde_json::json!([]));

    assert_eq!(data["topPages"][0]["url"], "https://example.com/c");
    assert_eq!(data["topPages"][0]["linkScore"], 100);
    assert_eq!(data["topPages"][0]["inboundLinks"], 2);
    assert_eq!(data["topPages"][2]["url"], "https://example.com/a");
    assert_eq!(data["topPages"][2]["linkScore"], 0);

    let analysis_id = data["analysisId"].as_str().expect("analysisId missing");
    let stored = app
        .analyzer
        .with_storage(|s| s.get_analysis(analysis_id))
        .expect("Failed to read analysis")
        .expect("Analysis not stored");
    assert_eq!(stored.root_url, "https://example.com/a");
    assert_eq!(stored.pages.len(), 3);
    assert_eq!(stored.graph, sample_graph());
}

#[tokio::test]
async fn test_root_path_serves_the_same_endpoint() {
    let app = spawn_app().await;
    let crawl_id = app
        .analyzer
        .store_graph("https://example.com/a", &sample_graph())
        .expect("Failed to store crawl");

    let (status, body) = app
        .post("/", &format!(r#"{{"crawlId":"{}"}}"#, crawl_id))
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["summary"]["totalPages"], 3);
}

#[tokio::test]
async fn test_analyze_start_url_crawls_site() {
    let site = MockServer::start().await;
    mount_page(
        &site,
        "/",
        r#"<html><body><a href="/about">About</a><a href="/blog">Blog</a>
           <a href="https://elsewhere.example.net/">Out</a></body></html>"#,
    )
    .await;
    mount_page(&site, "/about", r#"<a href="/">Home</a>"#).await;
    mount_page(
        &site,
        "/blog",
        r#"<a href="/">Home</a><a href="/about">About</a>"#,
    )
    .await;

    let app = spawn_app().await;
    let start_url = format!("{}/", site.uri());

    let (status, body) = app
        .post(
            "/analyze-internal-links",
            &format!(r#"{{"startUrl":"{}","maxPages":10}}"#, start_url),
        )
        .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    let data = &body["data"];
    assert_eq!(data["summary"]["totalPages"], 3);
    assert_eq!(data["summary"]["totalLinks"], 5);
    assert_eq!(data["summary"]["orphanedPages"], 0);
    assert!(data["analysisId"].is_string());

    let crawls = app
        .analyzer
        .with_storage(|s| s.count_crawls())
        .expect("Failed to count crawls");
    assert_eq!(crawls, 1);
}

#[tokio::test]
async fn test_start_url_seed_failure() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&site)
        .await;

    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/analyze-internal-links",
            &format!(r#"{{"startUrl":"{}/"}}"#, site.uri()),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to fetch start URL"));
}

#[tokio::test]
async fn test_both_sources_rejected() {
    let app = spawn_app().await;

    let (status, body) = app
        .post(
            "/analyze-internal-links",
            r#"{"crawlId":"abc","startUrl":"https://example.com/"}"#,
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Provide either crawlId or startUrl, not both");
}
