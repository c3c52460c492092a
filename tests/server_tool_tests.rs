//! End-to-end tool scenarios without a display
//!
//! Tool arguments arrive as JSON, go through the RequestBridge to a scripted
//! presenter standing in for the human, and come back as envelopes.

mod common;

use common::{ScriptedPresenter, Step, bridge_with};
use humanloop::models::{InputType, NumericBounds};
use humanloop::server::params::{
    ConfirmationArgs, FileSelectionArgs, InfoMessageArgs, MultilineInputArgs, SetThemeArgs,
    UserChoiceArgs, UserInputArgs,
};
use humanloop::services::parse_input;
use humanloop::{Answer, CancelReason, HumanLoopServer, RequestKind, Response};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn server_with(presenter: Arc<ScriptedPresenter>) -> HumanLoopServer {
    let (bridge, themes) = bridge_with(presenter);
    HumanLoopServer::new(bridge, themes, Duration::from_secs(300))
}

fn args<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_text_input_answered() {
    let presenter = ScriptedPresenter::answering([Response::Answered(Answer::Text("Ada".into()))]);
    let server = server_with(presenter);

    let envelope = server
        .ask_input(args::<UserInputArgs>(json!({"title": "Name", "prompt": "Your name?"})))
        .await;

    assert_eq!(envelope.field("success"), &json!(true));
    assert_eq!(envelope.field("user_input"), &json!("Ada"));
    assert_eq!(envelope.field("cancelled"), &json!(false));
}

#[tokio::test]
async fn test_integer_input_after_rejected_text() {
    // The dialog refuses "abc" inline and only reports the accepted value
    let bounds = NumericBounds::default();
    assert!(parse_input("abc", InputType::Integer, bounds).is_err());
    let accepted = parse_input("42", InputType::Integer, bounds).unwrap();

    let presenter = ScriptedPresenter::answering([Response::Answered(accepted)]);
    let server = server_with(presenter.clone());

    let envelope = server
        .ask_input(args::<UserInputArgs>(json!({
            "title": "Count",
            "prompt": "How many?",
            "input_type": "integer",
        })))
        .await;

    assert_eq!(envelope.field("user_input"), &json!(42));
    assert_eq!(envelope.field("input_type"), &json!("integer"));
    assert!(matches!(
        presenter.last_ticket().unwrap().request.kind,
        RequestKind::Input {
            input_type: InputType::Integer,
            ..
        }
    ));
}

#[tokio::test]
async fn test_confirmation_no() {
    let presenter = ScriptedPresenter::answering([Response::Answered(Answer::Confirmed(false))]);
    let server = server_with(presenter);

    let envelope = server
        .ask_confirmation(args::<ConfirmationArgs>(json!({
            "title": "Deploy",
            "message": "Ship it?",
        })))
        .await;

    assert_eq!(envelope.field("success"), &json!(true));
    assert_eq!(envelope.field("confirmed"), &json!(false));
    assert_eq!(envelope.field("response"), &json!("no"));
    assert_eq!(envelope.field("cancelled"), &json!(false));
}

#[tokio::test]
async fn test_window_closed_cancels() {
    let presenter =
        ScriptedPresenter::answering([Response::Cancelled(CancelReason::WindowClosed)]);
    let server = server_with(presenter);

    let envelope = server
        .ask_multiline(args::<MultilineInputArgs>(json!({
            "title": "Notes",
            "prompt": "Anything else?",
        })))
        .await;

    assert_eq!(envelope.field("success"), &json!(false));
    assert_eq!(envelope.field("cancelled"), &json!(true));
    assert!(!envelope.is_error);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_seconds_argument_applies() {
    let presenter = ScriptedPresenter::new([Step::Ignore]);
    let server = server_with(presenter.clone());

    let started = tokio::time::Instant::now();
    let envelope = server
        .show_message(args::<InfoMessageArgs>(json!({
            "title": "FYI",
            "message": "Build finished",
            "icon_type": "success",
            "timeout_seconds": 5,
        })))
        .await;

    assert!(started.elapsed() < Duration::from_secs(6));
    assert_eq!(envelope.field("reason"), &json!("timed_out"));
    assert_eq!(envelope.field("acknowledged"), &json!(false));
    assert_eq!(envelope.field("icon_type"), &json!("success"));
    assert_eq!(presenter.dismissed().len(), 1);
}

#[tokio::test]
async fn test_empty_choices_rejected_without_dialog() {
    let presenter = ScriptedPresenter::new([]);
    let server = server_with(presenter.clone());

    let envelope = server
        .ask_choice(args::<UserChoiceArgs>(json!({
            "title": "Pick",
            "prompt": "Which?",
            "choices": [],
        })))
        .await;

    assert!(envelope.is_error);
    assert!(envelope.field("error").as_str().unwrap().contains("choices"));
    assert_eq!(presenter.presented(), 0);
}

#[tokio::test]
async fn test_choice_answered_with_browsed_files() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("report.pdf");
    std::fs::write(&report, b"%PDF").unwrap();

    let presenter =
        ScriptedPresenter::answering([Response::Answered(Answer::Files(vec![report.clone()]))]);
    let server = server_with(presenter);

    let envelope = server
        .ask_choice(args::<UserChoiceArgs>(json!({
            "title": "Source",
            "prompt": "Which input?",
            "choices": ["Latest build", "Nightly"],
            "allow_files": true,
        })))
        .await;

    assert_eq!(envelope.field("success"), &json!(true));
    assert_eq!(envelope.field("selected_choice"), &json!(report.display().to_string()));
    assert_eq!(envelope.field("file_info")[0]["category"], json!("document"));
}

#[tokio::test]
async fn test_file_selection_reports_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let paths: Vec<_> = ["a.png", "b.csv", "c.txt"]
        .iter()
        .map(|name| {
            let path = temp_dir.path().join(name);
            std::fs::write(&path, b"x").unwrap();
            path
        })
        .collect();

    let presenter = ScriptedPresenter::answering([Response::Answered(Answer::Files(paths))]);
    let server = server_with(presenter.clone());

    let envelope = server
        .ask_files(args::<FileSelectionArgs>(json!({"file_types": [".png", ".csv", ".txt"]})))
        .await;

    assert_eq!(envelope.field("count"), &json!(3));
    let categories: Vec<&str> = envelope.field("file_info")
        .as_array()
        .unwrap()
        .iter()
        .map(|info| info["category"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["image", "spreadsheet", "document"]);
    assert_eq!(presenter.last_ticket().unwrap().request.title, "Select Files");
}

#[tokio::test]
async fn test_set_theme_then_dialog_uses_new_palette() {
    let presenter = ScriptedPresenter::answering([Response::Answered(Answer::Acknowledged)]);
    let server = server_with(presenter.clone());

    let rejected = server.change_theme(SetThemeArgs {
        theme: "neon".into(),
    });
    assert!(rejected.is_error);

    let changed = server.change_theme(SetThemeArgs {
        theme: "light".into(),
    });
    assert_eq!(changed.field("previous_theme"), &json!("dark"));
    assert_eq!(changed.field("theme"), &json!("light"));

    server
        .show_message(args::<InfoMessageArgs>(json!({"title": "T", "message": "M"})))
        .await;
    assert_eq!(
        presenter.last_ticket().unwrap().palette,
        humanloop::models::Palette::light()
    );
}

#[tokio::test]
async fn test_health_check_is_side_effect_free() {
    let presenter = ScriptedPresenter::new([]);
    let server = server_with(presenter.clone());

    let health = server.health();

    assert_eq!(health["status"], "healthy");
    assert_eq!(health["gui_available"], true);
    assert_eq!(health["gui_error"], Value::Null);
    assert_eq!(health["theme"], "dark");
    assert_eq!(health["busy"], false);
    assert_eq!(health["metrics"]["dialogs_presented"], 0);
    assert_eq!(presenter.presented(), 0);
}

#[tokio::test]
async fn test_huge_timeout_seconds_is_error_envelope() {
    let presenter = ScriptedPresenter::new([]);
    let server = server_with(presenter.clone());

    let envelope = server
        .ask_confirmation(args::<ConfirmationArgs>(json!({
            "title": "Deploy",
            "message": "Ship it?",
            "timeout_seconds": u64::MAX,
        })))
        .await;

    assert!(envelope.is_error);
    assert!(envelope.field("error").as_str().unwrap().contains("timeout"));
    assert_eq!(envelope.field("confirmed"), &json!(false));
    assert_eq!(presenter.presented(), 0);
}
