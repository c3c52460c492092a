use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::models::response::BridgeError;

/// Default time a human has to answer a dialog.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Longest time a dialog may wait for an answer (one day).
pub const MAX_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Maximum number of dialogs visible at the same time.
///
/// **IMPORTANT:** This is hardcoded to 1. The windowing toolkit is driven from a
/// single thread and a human can only sensibly answer one modal prompt at once.
/// Overlapping requests are queued behind the open dialog by the
/// [`RequestBridge`](crate::bridge::RequestBridge) using a `tokio::sync::Semaphore`.
pub const MAX_CONCURRENT_DIALOGS: usize = 1;

// ".txt", "txt", ".tar.gz", "*.png"
static EXTENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\*?\.?[A-Za-z0-9_+-]+(\.[A-Za-z0-9_+-]+)*$").expect("Invalid extension regex")
});

static NEXT_DIALOG_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one scheduled dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DialogId(u64);

impl DialogId {
    /// Allocate the next identifier
    pub fn next() -> Self {
        Self(NEXT_DIALOG_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{}", self.0)
    }
}

/// Kind of value a single-line input dialog accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Text,
    Integer,
    Float,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Integer => "integer",
            InputType::Float => "float",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, InputType::Text)
    }
}

/// Severity of an informational message; only changes the icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl IconType {
    pub fn as_str(self) -> &'static str {
        match self {
            IconType::Info => "info",
            IconType::Warning => "warning",
            IconType::Error => "error",
            IconType::Success => "success",
        }
    }
}

/// Optional inclusive bounds for numeric input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumericBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericBounds {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// What the human is being asked for
#[derive(Debug, Clone, PartialEq)]
pub enum RequestKind {
    Input {
        default_value: String,
        input_type: InputType,
        bounds: NumericBounds,
    },
    Multiline {
        default_value: String,
        allow_files: bool,
    },
    Choice {
        choices: Vec<String>,
        allow_multiple: bool,
        allow_files: bool,
    },
    FileSelection {
        file_types: Vec<String>,
        allow_multiple: bool,
        select_folders: bool,
    },
    Confirm,
    Message {
        icon: IconType,
    },
}

impl RequestKind {
    /// Short name used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Input { input_type, .. } => input_type.as_str(),
            RequestKind::Multiline { .. } => "multiline",
            RequestKind::Choice {
                allow_multiple: true,
                ..
            } => "multi-choice",
            RequestKind::Choice { .. } => "single-choice",
            RequestKind::FileSelection {
                select_folders: true,
                ..
            } => "folder",
            RequestKind::FileSelection { .. } => "file",
            RequestKind::Confirm => "confirm",
            RequestKind::Message { .. } => "message",
        }
    }
}

/// One human-interaction need.
///
/// Built by the tool layer, validated by [`Request::validate`] and then handed to
/// the [`RequestBridge`](crate::bridge::RequestBridge). Requests are never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub title: String,
    pub prompt: String,
    pub kind: RequestKind,
    pub timeout: Duration,
}

impl Request {
    pub fn new(title: impl Into<String>, prompt: impl Into<String>, kind: RequestKind) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            kind,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parameter-level validation, performed before anything reaches the UI
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.timeout.is_zero() {
            return Err(BridgeError::InvalidRequest(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.timeout > MAX_TIMEOUT {
            return Err(BridgeError::InvalidRequest(format!(
                "timeout must not exceed {} seconds (got {})",
                MAX_TIMEOUT.as_secs(),
                self.timeout.as_secs()
            )));
        }

        match &self.kind {
            RequestKind::Input {
                input_type, bounds, ..
            } => {
                if !bounds.is_unbounded() && !input_type.is_numeric() {
                    return Err(BridgeError::InvalidRequest(
                        "min_value/max_value only apply to integer or float input".to_string(),
                    ));
                }
                if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
                    if min > max {
                        return Err(BridgeError::InvalidRequest(format!(
                            "min_value ({min}) is greater than max_value ({max})"
                        )));
                    }
                }
            }
            RequestKind::Choice { choices, .. } => {
                if choices.is_empty() {
                    return Err(BridgeError::InvalidRequest(
                        "choices must contain at least one option".to_string(),
                    ));
                }
                if choices.iter().any(|c| c.trim().is_empty()) {
                    return Err(BridgeError::InvalidRequest(
                        "choices must not contain empty labels".to_string(),
                    ));
                }
            }
            RequestKind::FileSelection { file_types, .. } => {
                if let Some(bad) = file_types.iter().find(|ext| !EXTENSION_PATTERN.is_match(ext)) {
                    return Err(BridgeError::InvalidRequest(format!(
                        "unsupported file extension filter: {bad:?}"
                    )));
                }
            }
            RequestKind::Multiline { .. } | RequestKind::Confirm | RequestKind::Message { .. } => {}
        }

        Ok(())
    }
}

/// Normalise an extension filter entry (".TXT", "*.txt", "txt") to "txt"
pub fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('*')
        .trim_start_matches('.')
        .to_ascii_lowercase()
}
