use axum::body::{to_bytes, Body};
use serde_json::Value;

/// Helper function to extract JSON from an Axum response
///
/// This is useful in tests to easily parse and assert on JSON responses.
pub async fn response_to_json(response: axum::response::Response) -> Value {
    let body = response.into_body();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Builds a request, adding a JSON content type when a body is given
pub fn create_test_request(
    method: &str,
    path: &str,
    body: Option<Value>,
) -> http::Request<Body> {
    match body {
        Some(json_body) => create_raw_request(method, path, &json_body.to_string()),
        None => http::Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    }
}

/// Builds a request with a JSON content type and an arbitrary (possibly invalid) body
pub fn create_raw_request(method: &str, path: &str, body: &str) -> http::Request<Body> {
    http::Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
