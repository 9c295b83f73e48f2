//! Integration tests
//!
//! - `crawl_tests`: crawler and analysis against wiremock sites
//! - `api_tests`: the HTTP API end-to-end on an ephemeral port

mod api_tests;
mod crawl_tests;
mod support;
