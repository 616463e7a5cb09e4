//! Directory traversal
//!
//! Walks a base directory with an explicit stack instead of recursion, so an
//! adversarial or cyclic (symlinked) tree cannot grow the call stack. Depth is
//! bounded by `GalleryConfig::max_depth`.

use std::fs;
use std::path::{Path, PathBuf};

use super::ImageRecord;
use crate::config::GalleryConfig;
use crate::logger;

/// A directory waiting to be listed
struct PendingDir {
    path: PathBuf,
    /// `/`-joined path below the base, empty for the base itself
    relative: String,
    depth: usize,
}

/// Collect every allowed image below `base`.
///
/// Unreadable directories and entries are skipped; the result is unsorted.
pub fn scan_images(base: &Path, gallery: &GalleryConfig) -> Vec<ImageRecord> {
    let mut images = Vec::new();
    let mut pending = vec![PendingDir {
        path: base.to_path_buf(),
        relative: String::new(),
        depth: 0,
    }];

    while let Some(dir) = pending.pop() {
        let Some(names) = list_names(&dir.path) else {
            continue;
        };

        for name in names {
            if name == "." || name == ".." || gallery.is_skipped(&name) {
                continue;
            }

            let full_path = dir.path.join(&name);
            // Follows symlinks
            let metadata = match fs::metadata(&full_path) {
                Ok(m) => m,
                Err(e) => {
                    logger::log_warning(&format!(
                        "Skipping unreadable entry '{}': {e}",
                        full_path.display()
                    ));
                    continue;
                }
            };

            if metadata.is_dir() {
                if dir.depth < gallery.max_depth {
                    pending.push(PendingDir {
                        path: full_path,
                        relative: join_relative(&dir.relative, &name),
                        depth: dir.depth + 1,
                    });
                } else {
                    logger::log_warning(&format!(
                        "Not descending into '{}': depth limit {} reached",
                        full_path.display(),
                        gallery.max_depth
                    ));
                }
            } else if metadata.is_file() && has_image_extension(&name, gallery) {
                match ImageRecord::from_metadata(name, &dir.relative, &metadata) {
                    Ok(record) => images.push(record),
                    Err(e) => logger::log_warning(&format!(
                        "No modification time for '{}': {e}",
                        full_path.display()
                    )),
                }
            }
        }
    }

    images
}

/// List the UTF-8 entry names of one directory.
///
/// The directory handle is released before returning.
fn list_names(dir: &Path) -> Option<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            return None;
        }
    };

    let names = entries
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    Some(names)
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Text after the last `.` of a file name
pub fn extension_of(name: &str) -> Option<&str> {
    name.rsplit_once('.').map(|(_, ext)| ext)
}

fn has_image_extension(name: &str, gallery: &GalleryConfig) -> bool {
    extension_of(name).is_some_and(|ext| gallery.is_allowed_extension(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs::File;
    use tempfile::TempDir;

    fn test_gallery(root: &Path) -> GalleryConfig {
        let mut gallery = Config::load_from("does/not/exist/frame").unwrap().gallery;
        gallery.photo_root = root.display().to_string();
        gallery
    }

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }

    fn sorted_paths(images: &[ImageRecord]) -> Vec<String> {
        let mut paths: Vec<String> = images.iter().map(|i| i.path.clone()).collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_extension_filter() {
        let dir = TempDir::new().unwrap();
        for name in ["a.jpg", "b.png", "c.txt", "README.txt", "noext"] {
            touch(&dir.path().join(name));
        }

        let images = scan_images(dir.path(), &test_gallery(dir.path()));
        assert_eq!(sorted_paths(&images), vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_uppercase_extension_matches() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("IMG_0001.JPG"));
        touch(&dir.path().join("scan.WebP"));

        let images = scan_images(dir.path(), &test_gallery(dir.path()));
        assert_eq!(sorted_paths(&images), vec!["IMG_0001.JPG", "scan.WebP"]);
    }

    #[test]
    fn test_nested_month_directories() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("2025/10/photo.jpg"));
        touch(&dir.path().join("2025/09/older.jpeg"));
        touch(&dir.path().join("loose.gif"));
        touch(&dir.path().join("2025/10/README.txt"));

        let images = scan_images(dir.path(), &test_gallery(dir.path()));
        assert_eq!(
            sorted_paths(&images),
            vec!["2025/09/older.jpeg", "2025/10/photo.jpg", "loose.gif"]
        );

        let photo = images.iter().find(|i| i.name == "photo.jpg").unwrap();
        assert_eq!(photo.month, "2025/10");
        assert_eq!(photo.path, "2025/10/photo.jpg");

        let loose = images.iter().find(|i| i.name == "loose.gif").unwrap();
        assert_eq!(loose.month, "ungrouped");
    }

    #[test]
    fn test_directory_named_like_image_is_descended() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("album.jpg/inner.png"));

        let images = scan_images(dir.path(), &test_gallery(dir.path()));
        assert_eq!(sorted_paths(&images), vec!["album.jpg/inner.png"]);
        assert_eq!(images[0].month, "album.jpg");
    }

    #[test]
    fn test_depth_limit() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("top.jpg"));
        touch(&dir.path().join("a/one.jpg"));
        touch(&dir.path().join("a/b/two.jpg"));

        let mut gallery = test_gallery(dir.path());
        gallery.max_depth = 1;
        let images = scan_images(dir.path(), &gallery);
        assert_eq!(sorted_paths(&images), vec!["a/one.jpg", "top.jpg"]);

        gallery.max_depth = 0;
        let images = scan_images(dir.path(), &gallery);
        assert_eq!(sorted_paths(&images), vec!["top.jpg"]);
    }

    #[test]
    fn test_missing_base_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let images = scan_images(&dir.path().join("absent"), &test_gallery(dir.path()));
        assert!(images.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_cycle_terminates() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("2025/photo.jpg"));
        std::os::unix::fs::symlink(dir.path(), dir.path().join("2025/loop")).unwrap();

        let mut gallery = test_gallery(dir.path());
        gallery.max_depth = 3;
        let images = scan_images(dir.path(), &gallery);
        assert!(images.iter().any(|i| i.path == "2025/photo.jpg"));
        assert!(images.iter().all(|i| i.path.matches('/').count() <= 3));
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_entries_are_skipped() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("2025/10/a.jpg"));
        let month = dir.path().join("2025/10");
        let missing = dir.path().join("missing");
        std::os::unix::fs::symlink(missing.join("gone.jpg"), month.join("broken.jpg")).unwrap();
        std::os::unix::fs::symlink(&missing, month.join("brokendir")).unwrap();

        let images = scan_images(dir.path(), &test_gallery(dir.path()));
        assert_eq!(sorted_paths(&images), vec!["2025/10/a.jpg"]);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.jpg"), Some("jpg"));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz"));
        assert_eq!(extension_of(".png"), Some("png"));
        assert_eq!(extension_of("noext"), None);
    }
}
