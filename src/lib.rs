// humanloop - Human-in-the-loop MCP server
//
// This is the library crate containing the request bridge, dialog presenter and
// tool layer. The binary crate (main.rs) wires them to the Slint event loop and
// the stdio transport.

pub mod bridge;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use bridge::{DialogPresenter, RequestBridge};
pub use config::Settings;
pub use models::{Answer, BridgeError, CancelReason, Request, RequestKind, Response};
pub use server::HumanLoopServer;
pub use state::{ThemeChange, ThemeManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
