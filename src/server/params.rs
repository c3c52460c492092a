// Tool parameters
//
// Each struct is the JSON argument object of one MCP tool.

use crate::models::{IconType, InputType, NumericBounds, Request, RequestKind};
use schemars::JsonSchema;
use serde::Deserialize;
use std::time::Duration;

fn default_file_title() -> String {
    "Select Files".to_string()
}

fn default_file_prompt() -> String {
    "Please select the files you need:".to_string()
}

fn default_true() -> bool {
    true
}

fn timeout(seconds: Option<u64>, default: Duration) -> Duration {
    seconds.map(Duration::from_secs).unwrap_or(default)
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserInputArgs {
    #[schemars(description = "Title of the input dialog window")]
    pub title: String,
    #[schemars(description = "The prompt/question to show to the user")]
    pub prompt: String,
    #[schemars(description = "Default value to pre-fill in the input field")]
    #[serde(default)]
    pub default_value: String,
    #[schemars(description = "Type of input expected: text, integer or float")]
    #[serde(default)]
    pub input_type: InputType,
    #[schemars(description = "Smallest accepted value (integer/float only)")]
    pub min_value: Option<f64>,
    #[schemars(description = "Largest accepted value (integer/float only)")]
    pub max_value: Option<f64>,
    #[schemars(description = "Seconds to wait for the user before giving up (default 300)")]
    pub timeout_seconds: Option<u64>,
}

impl UserInputArgs {
    pub fn into_request(self, default_timeout: Duration) -> Request {
        Request::new(
            self.title,
            self.prompt,
            RequestKind::Input {
                default_value: self.default_value,
                input_type: self.input_type,
                bounds: NumericBounds::new(self.min_value, self.max_value),
            },
        )
        .with_timeout(timeout(self.timeout_seconds, default_timeout))
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UserChoiceArgs {
    #[schemars(description = "Title of the choice dialog window")]
    pub title: String,
    #[schemars(description = "The prompt/question to show to the user")]
    pub prompt: String,
    #[schemars(description = "List of choices to present to the user")]
    pub choices: Vec<String>,
    #[schemars(description = "Whether user can select multiple choices")]
    #[serde(default)]
    pub allow_multiple: bool,
    #[schemars(description = "Whether to allow file selection in addition to choices")]
    #[serde(default)]
    pub allow_files: bool,
    #[schemars(description = "Seconds to wait for the user before giving up (default 300)")]
    pub timeout_seconds: Option<u64>,
}

impl UserChoiceArgs {
    pub fn into_request(self, default_timeout: Duration) -> Request {
        Request::new(
            self.title,
            self.prompt,
            RequestKind::Choice {
                choices: self.choices,
                allow_multiple: self.allow_multiple,
                allow_files: self.allow_files,
            },
        )
        .with_timeout(timeout(self.timeout_seconds, default_timeout))
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MultilineInputArgs {
    #[schemars(description = "Title of the input dialog window")]
    pub title: String,
    #[schemars(description = "The prompt/question to show to the user")]
    pub prompt: String,
    #[schemars(description = "Default text to pre-fill in the text area")]
    #[serde(default)]
    pub default_value: String,
    #[schemars(description = "Whether to allow file attachment")]
    #[serde(default)]
    pub allow_files: bool,
    #[schemars(description = "Seconds to wait for the user before giving up (default 300)")]
    pub timeout_seconds: Option<u64>,
}

impl MultilineInputArgs {
    pub fn into_request(self, default_timeout: Duration) -> Request {
        Request::new(
            self.title,
            self.prompt,
            RequestKind::Multiline {
                default_value: self.default_value,
                allow_files: self.allow_files,
            },
        )
        .with_timeout(timeout(self.timeout_seconds, default_timeout))
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FileSelectionArgs {
    #[schemars(description = "Title of the file selection dialog")]
    #[serde(default = "default_file_title")]
    pub title: String,
    #[schemars(description = "Instructions for the user")]
    #[serde(default = "default_file_prompt")]
    pub prompt: String,
    #[schemars(description = "Allowed file extensions (e.g., ['.txt', '.pdf'])")]
    #[serde(default)]
    pub file_types: Vec<String>,
    #[schemars(description = "Whether to allow multiple file selection")]
    #[serde(default = "default_true")]
    pub allow_multiple: bool,
    #[schemars(description = "Whether to select folders instead of files")]
    #[serde(default)]
    pub select_folders: bool,
    #[schemars(description = "Seconds to wait for the user before giving up (default 300)")]
    pub timeout_seconds: Option<u64>,
}

impl FileSelectionArgs {
    pub fn into_request(self, default_timeout: Duration) -> Request {
        Request::new(
            self.title,
            self.prompt,
            RequestKind::FileSelection {
                file_types: self.file_types,
                allow_multiple: self.allow_multiple,
                select_folders: self.select_folders,
            },
        )
        .with_timeout(timeout(self.timeout_seconds, default_timeout))
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConfirmationArgs {
    #[schemars(description = "Title of the confirmation dialog")]
    pub title: String,
    #[schemars(description = "The message to show to the user")]
    pub message: String,
    #[schemars(description = "Seconds to wait for the user before giving up (default 300)")]
    pub timeout_seconds: Option<u64>,
}

impl ConfirmationArgs {
    pub fn into_request(self, default_timeout: Duration) -> Request {
        Request::new(self.title, self.message, RequestKind::Confirm)
            .with_timeout(timeout(self.timeout_seconds, default_timeout))
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct InfoMessageArgs {
    #[schemars(description = "Title of the information dialog")]
    pub title: String,
    #[schemars(description = "The information message to show to the user")]
    pub message: String,
    #[schemars(description = "Type of icon to show: info, warning, error or success")]
    #[serde(default)]
    pub icon_type: IconType,
    #[schemars(description = "Seconds to wait for the user before giving up (default 300)")]
    pub timeout_seconds: Option<u64>,
}

impl InfoMessageArgs {
    pub fn into_request(self, default_timeout: Duration) -> Request {
        Request::new(
            self.title,
            self.message,
            RequestKind::Message {
                icon: self.icon_type,
            },
        )
        .with_timeout(timeout(self.timeout_seconds, default_timeout))
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SetThemeArgs {
    #[schemars(description = "Theme to apply (built-in: dark, light)")]
    pub theme: String,
}
