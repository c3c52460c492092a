use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::models::{FileCategory, FileInfo};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count in human readable units ("0 B", "1.5 KB", "3.2 MB")
pub fn format_file_size(size_bytes: u64) -> String {
    if size_bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = size_bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, SIZE_UNITS[unit])
}

/// Best-effort MIME type from a lowercase extension (no leading dot)
pub fn guess_mime_type(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "odt" => "application/vnd.oasis.opendocument.text",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "rtf" => "application/rtf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "yaml" | "yml" => "application/yaml",
        "toml" => "application/toml",
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ods" => "application/vnd.oasis.opendocument.spreadsheet",
        "zip" => "application/zip",
        "tar" => "application/x-tar",
        "gz" | "tgz" => "application/gzip",
        "bz2" => "application/x-bzip2",
        "xz" => "application/x-xz",
        "7z" => "application/x-7z-compressed",
        "rar" => "application/vnd.rar",
        "zst" => "application/zstd",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        _ => return None,
    };
    Some(mime)
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Collect metadata for one selected path.
///
/// Never fails: a path that cannot be inspected is reported with
/// `exists: false` and the I/O error text.
pub async fn describe(path: &Path) -> FileInfo {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = lowercase_extension(&absolute);
    let extension = if ext.is_empty() {
        String::new()
    } else {
        format!(".{ext}")
    };
    let mime_type = guess_mime_type(&ext).map(str::to_string);

    match tokio::fs::metadata(&absolute).await {
        Ok(metadata) => {
            let is_directory = metadata.is_dir();
            let size = if is_directory { 0 } else { metadata.len() };
            let modified_time = metadata.modified().ok().map(DateTime::<Utc>::from);
            let category = if is_directory {
                FileCategory::Folder
            } else {
                FileCategory::from_extension(&ext)
            };

            FileInfo {
                name,
                path: absolute.to_string_lossy().into_owned(),
                size,
                size_human: format_file_size(size),
                modified_time,
                mime_type: if is_directory { None } else { mime_type },
                extension,
                category,
                exists: true,
                is_directory,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to read metadata for {}: {}", absolute.display(), e);
            FileInfo {
                name,
                path: absolute.to_string_lossy().into_owned(),
                size: 0,
                size_human: format_file_size(0),
                modified_time: None,
                mime_type,
                extension,
                category: FileCategory::from_extension(&ext),
                exists: false,
                is_directory: false,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Describe every path, preserving order (one entry per path)
pub async fn describe_all(paths: &[PathBuf]) -> Vec<FileInfo> {
    let mut infos = Vec::with_capacity(paths.len());
    for path in paths {
        infos.push(describe(path).await);
    }
    infos
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024 * 1024 * 1024), "3072.0 TB");
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type("png"), Some("image/png"));
        assert_eq!(guess_mime_type("csv"), Some("text/csv"));
        assert_eq!(guess_mime_type("unknownext"), None);
    }

    #[tokio::test]
    async fn test_describe_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Photo.PNG");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let info = describe(&path).await;
        assert!(info.exists);
        assert_eq!(info.name, "Photo.PNG");
        assert_eq!(info.size, 2048);
        assert_eq!(info.size_human, "2.0 KB");
        assert_eq!(info.extension, ".png");
        assert_eq!(info.category, FileCategory::Image);
        assert_eq!(info.mime_type.as_deref(), Some("image/png"));
        assert!(info.modified_time.is_some());
        assert!(info.error.is_none());
    }

    #[tokio::test]
    async fn test_describe_directory() {
        let dir = TempDir::new().unwrap();
        let info = describe(dir.path()).await;
        assert!(info.is_directory);
        assert_eq!(info.category, FileCategory::Folder);
        assert_eq!(info.size, 0);
        assert!(info.mime_type.is_none());
    }

    #[tokio::test]
    async fn test_describe_missing_file() {
        let dir = TempDir::new().unwrap();
        let info = describe(&dir.path().join("gone.pdf")).await;
        assert!(!info.exists);
        assert!(info.error.is_some());
        assert_eq!(info.category, FileCategory::Document);
    }

    proptest! {
        #[test]
        fn prop_size_format_has_known_unit(n in any::<u64>()) {
            let formatted = format_file_size(n);
            prop_assert!(
                SIZE_UNITS.iter().any(|u| formatted.ends_with(&format!(" {u}"))),
                "formatted size {:?} has no known unit",
                formatted
            );
        }
    }
}
