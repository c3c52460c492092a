//! Services module - Pure logic behind the dialogs and tool responses.
//!
//! The services are **framework-agnostic**: no Slint, no MCP types, so they can be
//! exercised directly in tests.
//!
//! # Components
//!
//! - [`input`]: Parsing and validating what the human typed
//!   - [`parse_input`]: text/integer/float parsing with inclusive bounds
//!   - [`ValidationError`]: the inline message shown when input is refused
//!   - [`TextStats`]: character/line/word counts for multi-line input
//!
//! - [`file_info`]: Metadata for selected paths
//!   - [`describe`] / [`describe_all`]: size, modified time, category, MIME guess
//!   - [`format_file_size`]: human readable sizes ("1.5 KB")
//!
//! The dialog presenter calls [`parse_input`] on the UI thread before it accepts a
//! submission; the tool layer calls [`describe_all`] on the tokio runtime after a
//! file selection completes.

pub mod file_info;
pub mod input;

pub use file_info::{describe, describe_all, format_file_size, guess_mime_type};
pub use input::{TextStats, ValidationError, attachment_note, input_hint, parse_input};
