// Response envelopes
//
// Every dialog tool answers with one JSON object:
//   {success, cancelled, error?, reason?, ...payload}
// built only from a Response, so success, cancellation and error are mutually
// exclusive. Payload fields are always present (null/empty when there is no
// answer) so clients can read them without checking for them first.

use crate::models::{Answer, FileInfo, IconType, InputType, Response, ThemeError};
use crate::services::TextStats;
use crate::state::ThemeChange;
use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde_json::{Map, Value, json};
use std::path::PathBuf;

/// JSON body of one tool result plus whether it reports a failure
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub body: Value,
    pub is_error: bool,
}

impl Envelope {
    fn new(body: Map<String, Value>, is_error: bool) -> Self {
        Self {
            body: Value::Object(body),
            is_error,
        }
    }

    pub fn field(&self, name: &str) -> &Value {
        self.body.get(name).unwrap_or(&Value::Null)
    }

    pub fn is_success(&self) -> bool {
        self.field("success") == &Value::Bool(true)
    }

    pub fn is_cancelled(&self) -> bool {
        self.field("cancelled") == &Value::Bool(true)
    }

    /// Wrap as an MCP tool result; failures are flagged `is_error`
    pub fn into_result(self) -> Result<CallToolResult, McpError> {
        let content = vec![Content::json(self.body)?];
        Ok(if self.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}

/// `success`/`cancelled`/`error`/`reason` shared by every dialog tool
fn outcome(response: &Response) -> (Map<String, Value>, bool) {
    let mut body = Map::new();
    match response {
        Response::Answered(_) => {
            body.insert("success".into(), json!(true));
            body.insert("cancelled".into(), json!(false));
            (body, false)
        }
        Response::Cancelled(reason) => {
            body.insert("success".into(), json!(false));
            body.insert("cancelled".into(), json!(true));
            body.insert("reason".into(), json!(reason.as_str()));
            (body, false)
        }
        Response::Failed(err) => {
            body.insert("success".into(), json!(false));
            body.insert("cancelled".into(), json!(false));
            body.insert("error".into(), json!(err.to_string()));
            (body, true)
        }
    }
}

fn paths_json(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

pub fn user_input(response: &Response, input_type: InputType) -> Envelope {
    let (mut body, is_error) = outcome(response);
    let value = match response.answer() {
        Some(Answer::Text(text)) => json!(text),
        Some(Answer::Integer(n)) => json!(n),
        Some(Answer::Float(x)) => json!(x),
        _ => Value::Null,
    };
    body.insert("user_input".into(), value);
    body.insert("input_type".into(), json!(input_type.as_str()));
    Envelope::new(body, is_error)
}

/// `file_info` describes the paths when the human used the browse buttons
pub fn user_choice(response: &Response, allow_multiple: bool, file_info: &[FileInfo]) -> Envelope {
    let (mut body, is_error) = outcome(response);
    let selected: Vec<String> = match response.answer() {
        Some(Answer::Choices(choices)) => choices.clone(),
        Some(Answer::Files(paths)) => paths_json(paths),
        _ => Vec::new(),
    };

    let selected_choice = match selected.as_slice() {
        [] => Value::Null,
        [only] => json!(only),
        many => json!(many),
    };

    body.insert("selected_choice".into(), selected_choice);
    body.insert("selected_choices".into(), json!(selected));
    body.insert("allow_multiple".into(), json!(allow_multiple));
    body.insert("file_info".into(), json!(file_info));
    Envelope::new(body, is_error)
}

pub fn multiline_input(response: &Response) -> Envelope {
    let (mut body, is_error) = outcome(response);
    match response.answer() {
        Some(Answer::Text(text)) => {
            let stats = TextStats::of(text);
            body.insert("user_input".into(), json!(text));
            body.insert("character_count".into(), json!(stats.characters));
            body.insert("line_count".into(), json!(stats.lines));
            body.insert("word_count".into(), json!(stats.words));
        }
        _ => {
            body.insert("user_input".into(), Value::Null);
        }
    }
    Envelope::new(body, is_error)
}

pub fn file_selection(response: &Response, file_info: &[FileInfo]) -> Envelope {
    let (mut body, is_error) = outcome(response);
    let paths = match response.answer() {
        Some(Answer::Files(paths)) => paths_json(paths),
        _ => Vec::new(),
    };
    body.insert("count".into(), json!(paths.len()));
    body.insert("selected_paths".into(), json!(paths));
    body.insert("file_info".into(), json!(file_info));
    body.insert("files".into(), json!(file_info));
    Envelope::new(body, is_error)
}

pub fn confirmation(response: &Response) -> Envelope {
    let (mut body, is_error) = outcome(response);
    let confirmed = matches!(response.answer(), Some(Answer::Confirmed(true)));
    let reply = match response.answer() {
        Some(Answer::Confirmed(true)) => json!("yes"),
        Some(Answer::Confirmed(false)) => json!("no"),
        _ => Value::Null,
    };
    body.insert("confirmed".into(), json!(confirmed));
    body.insert("response".into(), reply);
    Envelope::new(body, is_error)
}

pub fn info_message(response: &Response, icon: IconType) -> Envelope {
    let (mut body, is_error) = outcome(response);
    let acknowledged = matches!(response.answer(), Some(Answer::Acknowledged));
    body.insert("acknowledged".into(), json!(acknowledged));
    body.insert("icon_type".into(), json!(icon.as_str()));
    Envelope::new(body, is_error)
}

pub fn theme_changed(change: &ThemeChange, available: &[String]) -> Envelope {
    let mut body = Map::new();
    body.insert("success".into(), json!(true));
    body.insert("theme".into(), json!(change.current));
    body.insert("previous_theme".into(), json!(change.previous));
    body.insert("available_themes".into(), json!(available));
    Envelope::new(body, false)
}

pub fn theme_rejected(err: &ThemeError, available: &[String]) -> Envelope {
    let mut body = Map::new();
    body.insert("success".into(), json!(false));
    body.insert("error".into(), json!(err.to_string()));
    body.insert("available_themes".into(), json!(available));
    Envelope::new(body, true)
}
