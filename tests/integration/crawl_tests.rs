//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock sites and run the full
//! crawl → store → analyze cycle end-to-end.

use crate::support::{create_test_analyzer, create_test_config, mount_page};
use std::time::{Duration, Instant};
use sumi_linkrank::analysis::{analyze_graph, AnalysisParams};
use sumi_linkrank::crawler::crawl;
use sumi_linkrank::Depth;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a chain `/` → `/1` → `/2` → … → `/{len}`
async fn mount_chain(server: &MockServer, len: usize) {
    mount_page(server, "/", r#"<a href="/1">next</a>"#).await;
    for i in 1..=len {
        let body = if i < len {
            format!(r#"<a href="/{}">next</a>"#, i + 1)
        } else {
            "<p>end of the chain</p>".to_string()
        };
        mount_page(server, &format!("/{}", i), &body).await;
    }
}

#[tokio::test]
async fn test_full_crawl_and_analysis() {
    // Start a mock site
    let site = MockServer::start().await;
    let base_url = site.uri();

    mount_page(
        &site,
        "/",
        &format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{0}/docs">Docs</a>
            <a href="{0}/blog">Blog</a>
            <a href="{0}/blog#comments">Blog comments</a>
            <a href="mailto:team@example.com">Mail</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;
    mount_page(
        &site,
        "/docs",
        r#"<a href="/docs/install">Install</a><a href="/">Home</a>"#,
    )
    .await;
    mount_page(&site, "/docs/install", r#"<a href="/docs">Back</a>"#).await;
    mount_page(&site, "/blog", r#"<a href="/docs/install">Install</a>"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&dir);
    let start_url = format!("{}/", base_url);

    let graph = crawl(&config, &start_url, None).await.expect("Crawl failed");

    // Root, docs, blog, docs/install in BFS order
    let keys: Vec<&str> = graph.pages().map(|p| p.url.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            start_url.clone(),
            format!("{}/docs", base_url),
            format!("{}/blog", base_url),
            format!("{}/docs/install", base_url),
        ]
    );

    // The fragment link collapses onto /blog but still counts as an edge
    assert_eq!(graph.links(&start_url).map(|l| l.len()), Some(3));

    let analysis =
        analyze_graph(&graph, Some(&start_url), AnalysisParams::default()).expect("Analysis failed");
    let summary = &analysis.report.summary;

    assert_eq!(summary.total_pages, 4);
    assert_eq!(summary.total_links, 7);
    assert_eq!(summary.orphaned_pages, 0);
    assert_eq!(summary.max_depth, 2);

    let install = analysis
        .pages
        .iter()
        .find(|p| p.url.ends_with("/docs/install"))
        .expect("install page missing");
    assert_eq!(install.depth, Depth::Reachable(2));
    assert_eq!(install.inbound_count, 2);
}

#[tokio::test]
async fn test_stored_crawl_reanalyzes_identically() {
    let site = MockServer::start().await;
    mount_chain(&site, 3).await;

    let (analyzer, _dir) = create_test_analyzer();
    let start_url = format!("{}/", site.uri());

    let graph = analyzer.crawl(&start_url, 10).await.expect("Crawl failed");
    let crawl_id = analyzer
        .store_graph(&start_url, &graph)
        .expect("Failed to store crawl");

    let reloaded = analyzer.load_graph(&crawl_id).expect("Failed to load crawl");
    assert_eq!(reloaded, graph);

    let first = analyze_graph(&graph, None, AnalysisParams::default()).unwrap();
    let second = analyze_graph(&reloaded, None, AnalysisParams::default()).unwrap();
    assert_eq!(first.pages, second.pages);
    assert_eq!(first.report.summary.max_depth, 3);
}

#[tokio::test]
async fn test_crawl_clamped_to_page_limit() {
    let site = MockServer::start().await;
    mount_chain(&site, 20).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&dir);
    config.crawler.max_pages_limit = 5;

    let graph = crawl(&config, &format!("{}/", site.uri()), Some(500))
        .await
        .expect("Crawl failed");

    assert_eq!(graph.len(), 5);
}

#[tokio::test]
async fn test_crawl_pauses_after_each_fetch() {
    let site = MockServer::start().await;

    // Every response takes longer than the pacing delay
    for (route, next) in [("/", Some("/1")), ("/1", Some("/2")), ("/2", Some("/3")), ("/3", None)] {
        let body = match next {
            Some(next) => format!(r#"<a href="{}">next</a>"#, next),
            None => "<p>end of the chain</p>".to_string(),
        };
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(body, "text/html")
                    .set_delay(Duration::from_millis(150)),
            )
            .mount(&site)
            .await;
    }

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&dir);
    config.crawler.fetch_delay_ms = 100;

    let started = Instant::now();
    let graph = crawl(&config, &format!("{}/", site.uri()), None)
        .await
        .expect("Crawl failed");

    // Four slow fetches plus a full pause after each of the first three
    assert_eq!(graph.len(), 4);
    assert!(started.elapsed() >= Duration::from_millis(4 * 150 + 3 * 100));
}

#[tokio::test]
async fn test_broken_links_do_not_stop_crawl() {
    let site = MockServer::start().await;
    mount_page(
        &site,
        "/",
        r#"<a href="/missing">Missing</a><a href="/present">Present</a>"#,
    )
    .await;
    mount_page(&site, "/present", "<p>here</p>").await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&dir);
    let start_url = format!("{}/", site.uri());

    let graph = crawl(&config, &start_url, None).await.expect("Crawl failed");
    assert_eq!(graph.len(), 2);

    // The dangling edge still counts toward the root's outbound links
    let analysis = analyze_graph(&graph, Some(&start_url), AnalysisParams::default()).unwrap();
    assert_eq!(analysis.report.summary.total_links, 2);
    assert_eq!(analysis.pages[0].outbound_count(), 2);
}

#[tokio::test]
async fn test_www_and_bare_links_are_one_page() {
    let site = MockServer::start().await;
    let port = site.address().port();

    mount_page(
        &site,
        "/",
        &format!(
            r#"<a href="http://www.localhost:{0}/guide">Guide</a>
               <a href="http://localhost:{0}/guide">Guide again</a>"#,
            port
        ),
    )
    .await;
    mount_page(&site, "/guide", r#"<a href="/">Home</a>"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = create_test_config(&dir);
    let start_url = format!("http://localhost:{}/", port);

    let graph = crawl(&config, &start_url, None).await.expect("Crawl failed");

    let guide = format!("http://localhost:{}/guide", port);
    let keys: Vec<&str> = graph.pages().map(|p| p.url.as_str()).collect();
    assert_eq!(keys, vec![start_url.as_str(), guide.as_str()]);

    let analysis = analyze_graph(&graph, Some(&start_url), AnalysisParams::default()).unwrap();
    let guide_page = analysis
        .pages
        .iter()
        .find(|p| p.url == guide)
        .expect("guide page missing");
    assert_eq!(guide_page.inbound_count, 2);
    assert_eq!(analysis.report.summary.orphaned_pages, 0);
}
