use chrono::{DateTime, Utc};
use serde::Serialize;

/// Coarse file category derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Document,
    Spreadsheet,
    Archive,
    Folder,
    Other,
}

impl FileCategory {
    /// Classify a lowercase extension without the leading dot
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "svg" | "ico" | "tif" | "tiff"
            | "heic" => FileCategory::Image,
            "pdf" | "doc" | "docx" | "txt" | "rtf" | "md" | "odt" | "ppt" | "pptx" | "odp"
            | "html" | "htm" => FileCategory::Document,
            "xls" | "xlsx" | "csv" | "tsv" | "ods" => FileCategory::Spreadsheet,
            "zip" | "tar" | "gz" | "tgz" | "bz2" | "xz" | "7z" | "rar" | "zst" => {
                FileCategory::Archive
            }
            _ => FileCategory::Other,
        }
    }
}

/// Metadata reported for every path a human selected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub size_human: String,
    pub modified_time: Option<DateTime<Utc>>,
    pub mime_type: Option<String>,
    /// Lowercase, including the leading dot (".png"); empty when there is none
    pub extension: String,
    pub category: FileCategory,
    pub exists: bool,
    pub is_directory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
