//! Request handlers and response middleware

use crate::analysis::AnalyzeRequest;
use crate::server::types::{ErrorBody, SuccessBody};
use crate::server::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

const ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";
const ALLOW_METHODS: &str = "POST, OPTIONS";

pub(crate) async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Preflight requests get an empty 200; the CORS layer adds the headers
pub(crate) async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Runs one analysis
///
/// The body is decoded here rather than through the `Json` extractor so that
/// malformed input produces the same error shape as every other failure. An
/// empty body is read as `{}`.
pub(crate) async fn analyze(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(message) => return bad_request(message),
    };

    match state.analyzer.run(request).await {
        Ok(outcome) => (StatusCode::OK, Json(SuccessBody::from_outcome(outcome))).into_response(),
        Err(e) => {
            tracing::warn!("Analysis request failed: {}", e);
            bad_request(e.public_message())
        }
    }
}

fn parse_request(body: &[u8]) -> Result<AnalyzeRequest, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(AnalyzeRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| format!("Invalid JSON body: {}", e))
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
}

/// Adds permissive CORS headers to every response
pub(crate) async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    response
}
