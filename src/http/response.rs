//! HTTP response building module
//!
//! Builders for the JSON and status responses the server sends.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

/// Cache-Control sent with every JSON body
pub const NO_CACHE: &str = "no-cache, must-revalidate";

/// Build a pretty-printed JSON response with CORS and no-cache headers
///
/// HEAD requests get the same status and headers with an empty body.
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_500_response(is_head);
        }
    };
    json_with_headers(status, json, is_head)
}

/// Build 500 Internal Server Error response
pub fn build_500_response(is_head: bool) -> Response<Full<Bytes>> {
    json_with_headers(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"success":false,"error":"Internal server error"}"#.to_string(),
        is_head,
    )
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    json_with_headers(
        StatusCode::NOT_FOUND,
        r#"{"success":false,"error":"Not Found"}"#.to_string(),
        is_head,
    )
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health check response
pub fn build_health_response(status: &str, is_head: bool) -> Response<Full<Bytes>> {
    json_with_headers(
        StatusCode::OK,
        format!(r#"{{"status":"{status}"}}"#),
        is_head,
    )
}

fn json_with_headers(status: StatusCode, json: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .header("Cache-Control", NO_CACHE)
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_json_response_headers_and_unicode() {
        let resp = build_json_response(
            StatusCode::BAD_REQUEST,
            &serde_json::json!({"folder": "käfer"}),
            false,
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.headers()["Content-Type"], "application/json");
        assert_eq!(resp.headers()["Cache-Control"], NO_CACHE);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

        let body = body_string(resp).await;
        assert!(body.contains("käfer"));
        assert!(body.contains('\n'));
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let resp = build_json_response(StatusCode::OK, &serde_json::json!({"a": 1}), true);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_ne!(resp.headers()["Content-Length"], "0");
        assert!(body_string(resp).await.is_empty());
    }

    #[test]
    fn test_status_builders() {
        assert_eq!(build_404_response(false).status(), StatusCode::NOT_FOUND);
        assert_eq!(build_405_response().status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            build_500_response(false).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(build_health_response("ok", false).status(), StatusCode::OK);
    }

    #[test]
    fn test_options_cors() {
        let resp = build_options_response(true);
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");

        let resp = build_options_response(false);
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }
}
