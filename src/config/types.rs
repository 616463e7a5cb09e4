// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    pub gallery: GalleryConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub enable_cors: bool,
    /// Reported in the debug block of a listing
    #[serde(default)]
    pub document_root: Option<String>,
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone)]
pub struct RoutesConfig {
    /// Paths answered by the image listing handler
    #[serde(default = "default_images_paths")]
    pub images_paths: Vec<String>,
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

#[allow(clippy::missing_const_for_fn)]
fn default_images_paths() -> Vec<String> {
    vec!["/get_images.php".to_string(), "/api/images".to_string()]
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            images_paths: default_images_paths(),
            health: HealthConfig::default(),
        }
    }
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

/// Photo tree configuration, fixed at deployment time
#[derive(Debug, Deserialize, Clone)]
pub struct GalleryConfig {
    /// Directory holding one subdirectory per allowed folder
    pub photo_root: String,
    /// Folder used when the request names none
    pub default_folder: String,
    /// Folders a request may name (case-sensitive)
    pub allowed_folders: Vec<String>,
    /// Lowercase file extensions listed as images
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// File names never listed
    #[serde(default = "default_skip_files")]
    pub skip_files: Vec<String>,
    /// Deepest directory level below the base path that is still scanned
    pub max_depth: usize,
}

fn default_allowed_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "webp", "bmp"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_skip_files() -> Vec<String> {
    vec!["README.txt".to_string()]
}

impl GalleryConfig {
    /// Check a requested folder against the allow-list
    pub fn is_allowed(&self, folder: &str) -> bool {
        self.allowed_folders.iter().any(|f| f == folder)
    }

    pub fn is_allowed_extension(&self, ext: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }

    pub fn is_skipped(&self, name: &str) -> bool {
        self.skip_files.iter().any(|s| s == name)
    }
}
