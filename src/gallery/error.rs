// Listing failures that are reported to the client

use hyper::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GalleryError {
    /// Requested folder is not in the allow-list
    #[error("Invalid folder")]
    InvalidFolder {
        requested: String,
        allowed: Vec<String>,
    },

    /// Resolved base path is not a directory
    #[error("Folder not found: {base_path}")]
    DirectoryNotFound {
        base_path: String,
        folder: String,
        month: String,
    },
}

impl GalleryError {
    /// HTTP status for the error envelope.
    ///
    /// A missing directory answers 200: photo-frame clients read `success`
    /// rather than the status line.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFolder { .. } => StatusCode::BAD_REQUEST,
            Self::DirectoryNotFound { .. } => StatusCode::OK,
        }
    }

    /// JSON envelope sent to the client
    pub fn to_json(&self) -> Value {
        match self {
            Self::InvalidFolder { requested, allowed } => json!({
                "success": false,
                "error": self.to_string(),
                "allowed": allowed,
                "requested": requested,
            }),
            Self::DirectoryNotFound { folder, month, .. } => json!({
                "success": false,
                "error": self.to_string(),
                "folder": folder,
                "month": month,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_folder_envelope() {
        let err = GalleryError::InvalidFolder {
            requested: "wespen".to_string(),
            allowed: vec!["käfer".to_string(), "bienen".to_string()],
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = err.to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid folder");
        assert_eq!(body["allowed"], json!(["käfer", "bienen"]));
        assert_eq!(body["requested"], "wespen");
    }

    #[test]
    fn test_not_found_envelope() {
        let err = GalleryError::DirectoryNotFound {
            base_path: "/srv/photos/bienen/2025/10".to_string(),
            folder: "bienen".to_string(),
            month: "2025/10".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::OK);

        let body = err.to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Folder not found: /srv/photos/bienen/2025/10");
        assert_eq!(body["folder"], "bienen");
        assert_eq!(body["month"], "2025/10");
        assert!(body.get("allowed").is_none());
    }
}
