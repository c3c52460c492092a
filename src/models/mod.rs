//! Data models for the humanloop server.
//!
//! This module contains the core data structures passed between the tool layer,
//! the request bridge and the dialog presenter:
//! - [`Request`]: One human-interaction need (kind, prompt, constraints, timeout)
//! - [`Response`]: The terminal outcome of a request (answer, cancellation or failure)
//! - [`Palette`] / [`ThemeRegistry`]: Dialog colour themes
//! - [`FileInfo`]: Metadata reported for selected files and folders
//! - [`MAX_CONCURRENT_DIALOGS`]: Concurrency limit constant (always 1, one modal at a time)

pub mod file_info;
pub mod request;
pub mod response;
pub mod theme;

pub use file_info::{FileCategory, FileInfo};
pub use request::{
    DEFAULT_TIMEOUT, DialogId, IconType, InputType, MAX_CONCURRENT_DIALOGS, MAX_TIMEOUT,
    NumericBounds, Request, RequestKind, normalize_extension,
};
pub use response::{Answer, BridgeError, CancelReason, Response};
pub use theme::{DEFAULT_THEME, Palette, ThemeError, ThemeRegistry, parse_hex_color};
