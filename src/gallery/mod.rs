//! Gallery module
//!
//! Domain core of the image listing: discovers image files below a folder,
//! orders them newest first and summarizes them per month directory.
//! Only the error type knows its HTTP status.

mod error;
pub mod listing;
mod record;
pub mod scan;
mod stats;

pub use error::GalleryError;
pub use listing::{list_images, DebugInfo, ListQuery, Listing};
pub use record::ImageRecord;
pub use stats::MonthStats;

/// Month label of images lying directly in the base directory
pub const UNGROUPED: &str = "ungrouped";

/// Month value that disables month scoping
pub const MONTH_ALL: &str = "all";

/// Version reported in every listing
pub const API_VERSION: &str = "1.0.0";

/// Timestamp layout used for `date` and `generated`
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
