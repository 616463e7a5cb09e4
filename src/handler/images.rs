//! Image listing handler
//!
//! Adapts an HTTP request to `gallery::list_images`. The directory scan runs
//! on tokio's blocking pool.

use crate::config::AppState;
use crate::gallery::{self, DebugInfo, GalleryError, ListQuery, Listing};
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::sync::Arc;
use std::time::Instant;

/// Build the listing parameters from a raw query string
pub fn list_query(raw_query: Option<&str>) -> ListQuery {
    let mut params = http::parse_query(raw_query);
    ListQuery {
        folder: params.remove("folder"),
        month: params.remove("month"),
        debug: params.remove("debug"),
    }
}

/// Serve the image listing
pub async fn serve_images(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let query = list_query(ctx.query);
    let debug = query.debug_enabled();
    let gallery_config = Arc::clone(&state.gallery);
    let started = Instant::now();

    let result =
        tokio::task::spawn_blocking(move || gallery::list_images(&query, &gallery_config)).await;

    match result {
        Ok(Ok(mut listing)) => {
            logger::log_scan_complete(
                &listing.folder,
                &listing.month,
                listing.count,
                started.elapsed(),
            );
            if debug {
                listing.debug = Some(debug_info(ctx, state));
            }
            listing_response(&listing, ctx.is_head)
        }
        Ok(Err(err)) => error_response(&err, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Image scan task failed: {e}"));
            http::build_500_response(ctx.is_head)
        }
    }
}

fn debug_info(ctx: &RequestContext<'_>, state: &AppState) -> DebugInfo {
    DebugInfo::collect(
        ctx.request_uri,
        state.config.http.document_root.as_deref(),
        &state.gallery.allowed_folders,
    )
}

fn listing_response(listing: &Listing, is_head: bool) -> Response<Full<Bytes>> {
    http::build_json_response(StatusCode::OK, listing, is_head)
}

fn error_response(err: &GalleryError, is_head: bool) -> Response<Full<Bytes>> {
    match err {
        GalleryError::InvalidFolder { requested, .. } => {
            logger::log_warning(&format!("Rejected folder '{requested}'"));
        }
        GalleryError::DirectoryNotFound { base_path, .. } => {
            logger::log_warning(&format!("Listing directory missing: {base_path}"));
        }
    }

    http::build_json_response(err.status_code(), &err.to_json(), is_head)
}
