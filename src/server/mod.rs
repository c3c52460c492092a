// MCP server - Exposes the dialog tools over the Model Context Protocol
//
// Each tool converts its arguments into a Request, awaits the RequestBridge and
// turns the Response into a JSON envelope. The plain `ask_*` methods hold all of
// that logic so tests can drive the server without an MCP transport.

pub mod envelope;
pub mod params;

pub use envelope::Envelope;

use crate::bridge::RequestBridge;
use crate::models::{Answer, InputType};
use crate::services::describe_all;
use crate::state::ThemeManager;
use crate::{APP_NAME, VERSION};
use params::{
    ConfirmationArgs, FileSelectionArgs, InfoMessageArgs, MultilineInputArgs, SetThemeArgs,
    UserChoiceArgs, UserInputArgs,
};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt, tool, tool_handler, tool_router};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

/// Names of every tool the server registers, reported by the health check
pub const TOOL_NAMES: [&str; 8] = [
    "get_user_input",
    "get_user_choice",
    "get_multiline_input",
    "get_file_selection",
    "show_confirmation_dialog",
    "show_info_message",
    "set_theme",
    "health_check",
];

const INSTRUCTIONS: &str = "Human-in-the-loop tools. Use them to ask the person at this \
machine for text, a choice, a confirmation or a file selection, or to show them a message. \
Each call blocks until they answer, cancel or the timeout passes (default 300 seconds). \
Only one dialog is shown at a time; further calls wait their turn. Check `cancelled` before \
reading the answer and call health_check first if you are unsure a display is available.";

#[derive(Clone)]
pub struct HumanLoopServer {
    bridge: Arc<RequestBridge>,
    themes: ThemeManager,
    default_timeout: Duration,
    tool_router: ToolRouter<Self>,
}

impl HumanLoopServer {
    pub fn new(bridge: Arc<RequestBridge>, themes: ThemeManager, default_timeout: Duration) -> Self {
        Self {
            bridge,
            themes,
            default_timeout,
            tool_router: Self::tool_router(),
        }
    }

    pub async fn ask_input(&self, args: UserInputArgs) -> Envelope {
        let input_type = args.input_type;
        let response = self.bridge.submit(args.into_request(self.default_timeout)).await;
        envelope::user_input(&response, input_type)
    }

    pub async fn ask_choice(&self, args: UserChoiceArgs) -> Envelope {
        let allow_multiple = args.allow_multiple;
        let response = self.bridge.submit(args.into_request(self.default_timeout)).await;
        let file_info = match response.answer() {
            Some(Answer::Files(paths)) => describe_all(paths).await,
            _ => Vec::new(),
        };
        envelope::user_choice(&response, allow_multiple, &file_info)
    }

    pub async fn ask_multiline(&self, args: MultilineInputArgs) -> Envelope {
        let response = self.bridge.submit(args.into_request(self.default_timeout)).await;
        envelope::multiline_input(&response)
    }

    pub async fn ask_files(&self, args: FileSelectionArgs) -> Envelope {
        let response = self.bridge.submit(args.into_request(self.default_timeout)).await;
        let file_info = match response.answer() {
            Some(Answer::Files(paths)) => describe_all(paths).await,
            _ => Vec::new(),
        };
        envelope::file_selection(&response, &file_info)
    }

    pub async fn ask_confirmation(&self, args: ConfirmationArgs) -> Envelope {
        let response = self.bridge.submit(args.into_request(self.default_timeout)).await;
        envelope::confirmation(&response)
    }

    pub async fn show_message(&self, args: InfoMessageArgs) -> Envelope {
        let icon = args.icon_type;
        let response = self.bridge.submit(args.into_request(self.default_timeout)).await;
        envelope::info_message(&response, icon)
    }

    /// Only dialogs opened after the change use the new palette
    pub fn change_theme(&self, args: SetThemeArgs) -> Envelope {
        match self.themes.set_theme(&args.theme) {
            Ok(change) => {
                tracing::info!("Theme changed: {} -> {}", change.previous, change.current);
                envelope::theme_changed(&change, &self.themes.available())
            }
            Err(err) => {
                tracing::warn!("Theme change rejected: {}", err);
                envelope::theme_rejected(&err, &self.themes.available())
            }
        }
    }

    /// Status document; never touches the GUI
    pub fn health(&self) -> Value {
        let gui = self.bridge.availability();
        let input_types = [InputType::Text, InputType::Integer, InputType::Float]
            .map(InputType::as_str);

        json!({
            "status": if gui.is_ok() { "healthy" } else { "degraded" },
            "gui_available": gui.is_ok(),
            "gui_error": gui.err().map(|e| e.to_string()),
            "server_name": APP_NAME,
            "version": VERSION,
            "platform": format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
            "theme": self.themes.current_name(),
            "available_themes": self.themes.available(),
            "default_timeout_seconds": self.default_timeout.as_secs(),
            "busy": self.bridge.is_busy(),
            "features": {
                "input_types": input_types,
                "multiple_choice": true,
                "file_selection": true,
                "folder_selection": true,
                "file_attachments": true,
                "themes": true,
                "timeouts": true,
            },
            "tools_available": TOOL_NAMES,
            "metrics": self.bridge.metrics().snapshot(),
        })
    }
}

#[tool_router]
impl HumanLoopServer {
    #[tool(
        description = "Ask the user for a single line of input. The answer is validated in the \
        dialog: integer and float input must parse and respect min_value/max_value."
    )]
    pub async fn get_user_input(
        &self,
        Parameters(args): Parameters<UserInputArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.ask_input(args).await.into_result()
    }

    #[tool(
        description = "Ask the user to pick one (or several, with allow_multiple) of the given \
        choices. With allow_files the user may browse for files or a folder instead."
    )]
    pub async fn get_user_choice(
        &self,
        Parameters(args): Parameters<UserChoiceArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.ask_choice(args).await.into_result()
    }

    #[tool(
        description = "Ask the user for free-form multi-line text. Returns the text with \
        character, line and word counts."
    )]
    pub async fn get_multiline_input(
        &self,
        Parameters(args): Parameters<MultilineInputArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.ask_multiline(args).await.into_result()
    }

    #[tool(
        description = "Open a native file or folder picker. Returns the selected paths with \
        size, modification time, category and MIME type for each. The native picker cannot \
        be closed programmatically: after a timeout it may stay on screen, and a selection \
        made there is discarded."
    )]
    pub async fn get_file_selection(
        &self,
        Parameters(args): Parameters<FileSelectionArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.ask_files(args).await.into_result()
    }

    #[tool(description = "Ask the user a yes/no question.")]
    pub async fn show_confirmation_dialog(
        &self,
        Parameters(args): Parameters<ConfirmationArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.ask_confirmation(args).await.into_result()
    }

    #[tool(
        description = "Show the user a message (info, warning, error or success) and wait \
        until they acknowledge it."
    )]
    pub async fn show_info_message(
        &self,
        Parameters(args): Parameters<InfoMessageArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.show_message(args).await.into_result()
    }

    #[tool(description = "Change the colour theme used by dialogs opened from now on.")]
    pub async fn set_theme(
        &self,
        Parameters(args): Parameters<SetThemeArgs>,
    ) -> Result<CallToolResult, McpError> {
        self.change_theme(args).into_result()
    }

    #[tool(
        description = "Report whether dialogs can be shown, the active theme, the default \
        timeout and usage counters."
    )]
    pub async fn health_check(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::json(self.health())?]))
    }
}

#[tool_handler]
impl ServerHandler for HumanLoopServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Serve over stdin/stdout until the client disconnects
pub async fn serve_stdio(server: HumanLoopServer) -> anyhow::Result<()> {
    let service = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("MCP server ready on stdio");
    service.waiting().await?;
    tracing::info!("MCP client disconnected");
    Ok(())
}
