//! Image listing
//!
//! Resolves a request against the allowed folders, scans the resulting
//! directory and assembles the response body.

use chrono::{DateTime, Local, SecondsFormat};
use serde::Serialize;
use std::path::Path;

use super::record::format_local;
use super::scan::scan_images;
use super::{GalleryError, ImageRecord, MonthStats, API_VERSION, MONTH_ALL};
use crate::config::GalleryConfig;

/// Listing parameters as sent by the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub folder: Option<String>,
    /// `YYYY/MM`, `all`, or absent for the current month
    pub month: Option<String>,
    pub debug: Option<String>,
}

impl ListQuery {
    /// Only the exact value `1` enables the debug block
    pub fn debug_enabled(&self) -> bool {
        self.debug.as_deref() == Some("1")
    }
}

/// Successful listing body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub success: bool,
    pub images: Vec<ImageRecord>,
    pub count: usize,
    pub folder: String,
    pub month: String,
    pub base_path: String,
    pub month_stats: MonthStats,
    pub generated: String,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Diagnostics appended when `debug=1`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DebugInfo {
    pub package_version: String,
    pub server_time: String,
    pub request_uri: String,
    pub document_root: String,
    pub allowed_folders: Vec<String>,
}

impl DebugInfo {
    pub fn collect(
        request_uri: Option<&str>,
        document_root: Option<&str>,
        allowed_folders: &[String],
    ) -> Self {
        Self {
            package_version: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
            server_time: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            request_uri: request_uri.unwrap_or("unknown").to_string(),
            document_root: document_root.unwrap_or("unknown").to_string(),
            allowed_folders: allowed_folders.to_vec(),
        }
    }
}

/// List the images for a request, using the current local time for the default month
pub fn list_images(query: &ListQuery, gallery: &GalleryConfig) -> Result<Listing, GalleryError> {
    list_images_at(query, gallery, Local::now())
}

/// List the images for a request as of `now`
pub fn list_images_at(
    query: &ListQuery,
    gallery: &GalleryConfig,
    now: DateTime<Local>,
) -> Result<Listing, GalleryError> {
    let folder = query
        .folder
        .clone()
        .unwrap_or_else(|| gallery.default_folder.clone());

    if !gallery.is_allowed(&folder) {
        return Err(GalleryError::InvalidFolder {
            requested: folder,
            allowed: gallery.allowed_folders.clone(),
        });
    }

    let month = query
        .month
        .clone()
        .unwrap_or_else(|| now.format("%Y/%m").to_string());
    let base_path = resolve_base_path(&gallery.photo_root, &folder, &month);

    let resolvable = !is_scoped(&month) || is_safe_month(&month);
    if !resolvable || !Path::new(&base_path).is_dir() {
        return Err(GalleryError::DirectoryNotFound {
            base_path,
            folder,
            month,
        });
    }

    let mut images = scan_images(Path::new(&base_path), gallery);
    images.sort_by(|a, b| b.modified.cmp(&a.modified));
    let month_stats = MonthStats::from_images(&images);
    debug_assert_eq!(month_stats.total(), images.len());

    Ok(Listing {
        success: true,
        count: images.len(),
        images,
        folder,
        month,
        base_path,
        month_stats,
        generated: format_local(&now),
        version: API_VERSION,
        debug: None,
    })
}

/// `root/folder`, plus `/month` unless the month is `all` or empty
pub fn resolve_base_path(photo_root: &str, folder: &str, month: &str) -> String {
    let root = photo_root.trim_end_matches('/');
    if is_scoped(month) {
        format!("{root}/{folder}/{month}")
    } else {
        format!("{root}/{folder}")
    }
}

fn is_scoped(month: &str) -> bool {
    !month.is_empty() && month != MONTH_ALL
}

/// A month may only name a directory below the folder.
///
/// One trailing `/` is accepted.
fn is_safe_month(month: &str) -> bool {
    let month = month.strip_suffix('/').unwrap_or(month);
    !month.starts_with('/')
        && !month.contains('\\')
        && month
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}
