//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, route matching,
//! dispatch and access logging.

use crate::config::{AppState, RoutesConfig};
use crate::handler::images;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    /// Raw query string, without the leading `?`
    pub query: Option<&'a str>,
    /// Path and query as requested
    pub request_uri: Option<&'a str>,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    let ctx = RequestContext {
        path: uri.path(),
        query: uri.query(),
        request_uri: uri.path_and_query().map(hyper::http::uri::PathAndQuery::as_str),
        is_head: *method == Method::HEAD,
    };

    let response = match check_http_method(method, state.config.http.enable_cors) {
        Some(resp) => resp,
        None => route_request(&ctx, &state.config.routes, &state).await,
    };

    if state.access_log() {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            ctx.path.to_string(),
        );
        entry.query = ctx.query.map(ToString::to_string);
        entry.http_version = http_version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Route request based on path and configuration
async fn route_request(
    ctx: &RequestContext<'_>,
    routes: &RoutesConfig,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // Health check endpoints
    if routes.health.enabled
        && (ctx.path == routes.health.liveness_path || ctx.path == routes.health.readiness_path)
    {
        return http::build_health_response("ok", ctx.is_head);
    }

    if routes.images_paths.iter().any(|p| ctx.path == p) {
        return images::serve_images(ctx, state).await;
    }

    http::build_404_response(ctx.is_head)
}

const fn http_version_label(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
