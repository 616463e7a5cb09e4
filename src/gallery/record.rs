use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::Metadata;
use std::io;

use super::{DATE_FORMAT, UNGROUPED};

/// One image file found during a scan
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImageRecord {
    /// Base file name
    pub name: String,
    /// Path relative to the scanned base directory, `/`-separated
    pub path: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification, seconds since the epoch
    pub modified: i64,
    /// Directory holding the file relative to the base, or `ungrouped`
    pub month: String,
    /// `modified` in local time
    pub date: String,
}

impl ImageRecord {
    /// Build a record for `name` found in `relative_dir` (empty for the base directory)
    pub fn from_metadata(name: String, relative_dir: &str, metadata: &Metadata) -> io::Result<Self> {
        let modified: DateTime<Local> = metadata.modified()?.into();

        let (path, month) = if relative_dir.is_empty() {
            (name.clone(), UNGROUPED.to_string())
        } else {
            (format!("{relative_dir}/{name}"), relative_dir.to_string())
        };

        Ok(Self {
            name,
            path,
            size: metadata.len(),
            modified: modified.timestamp(),
            month,
            date: format_local(&modified),
        })
    }
}

/// Render a local timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_local(time: &DateTime<Local>) -> String {
    time.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn test_record_in_month_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("photo.jpg");
        fs::write(&file, b"0123456789").unwrap();
        let mtime = UNIX_EPOCH + Duration::from_secs(1_760_000_000);
        File::options()
            .write(true)
            .open(&file)
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        let meta = fs::metadata(&file).unwrap();
        let record = ImageRecord::from_metadata("photo.jpg".to_string(), "2025/10", &meta).unwrap();

        assert_eq!(record.name, "photo.jpg");
        assert_eq!(record.path, "2025/10/photo.jpg");
        assert_eq!(record.month, "2025/10");
        assert_eq!(record.size, 10);
        assert_eq!(record.modified, 1_760_000_000);
        let expected: DateTime<Local> = mtime.into();
        assert_eq!(record.date, expected.format("%Y-%m-%d %H:%M:%S").to_string());
    }

    #[test]
    fn test_record_in_base_directory_is_ungrouped() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("cover.png");
        fs::write(&file, b"png").unwrap();

        let meta = fs::metadata(&file).unwrap();
        let record = ImageRecord::from_metadata("cover.png".to_string(), "", &meta).unwrap();

        assert_eq!(record.path, "cover.png");
        assert_eq!(record.month, UNGROUPED);
    }

    #[test]
    fn test_format_local_layout() {
        let now: DateTime<Local> = SystemTime::now().into();
        let text = format_local(&now);
        assert_eq!(text.len(), 19);
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[10..11], " ");
        assert_eq!(&text[13..14], ":");
    }
}
