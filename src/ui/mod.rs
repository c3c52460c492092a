// UI module - Slint dialogs and the event loop bridge
//
// This module contains:
// - EventLoopBridge: Queues work from tokio tasks onto the Slint event loop
// - SlintPresenter: DialogPresenter implementation that builds the dialogs
// - dialogs: Generated Slint components and the per-kind builders
// - picker: Native file/folder pickers (rfd)
// - registry: UI-thread table of open dialogs, used for dismissal
// - window: Sizing and placement

pub mod bridge;
pub mod dialogs;
pub mod picker;
pub mod presenter;
pub mod registry;
pub mod window;

pub use bridge::EventLoopBridge;
pub use presenter::SlintPresenter;
pub use window::DialogGeometry;

use crate::models::BridgeError;

/// Result of the startup GUI check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuiStatus {
    pub available: bool,
    /// Why the GUI is unavailable
    pub detail: Option<String>,
}

impl GuiStatus {
    pub fn available() -> Self {
        Self {
            available: true,
            detail: None,
        }
    }

    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self {
            available: false,
            detail: Some(detail.into()),
        }
    }

    /// `Err(GuiUnavailable)` carrying the startup detail when unavailable
    pub fn require(&self) -> Result<(), BridgeError> {
        if self.available {
            Ok(())
        } else {
            Err(BridgeError::GuiUnavailable(
                self.detail
                    .clone()
                    .unwrap_or_else(|| "windowing system did not initialise".to_string()),
            ))
        }
    }
}

/// Check that a Slint window can be created.
///
/// Must run on the thread that will own the event loop, before it starts.
/// The test component is dropped without ever being shown.
pub fn detect_gui() -> GuiStatus {
    match dialogs::MessageDialog::new() {
        Ok(component) => {
            drop(component);
            tracing::info!("GUI system initialized");
            GuiStatus::available()
        }
        Err(e) => {
            tracing::warn!("GUI system not available: {}", e);
            GuiStatus::unavailable(e.to_string())
        }
    }
}

/// Run the Slint event loop on the current thread until
/// [`EventLoopBridge::shutdown`] is called. Unlike `ComponentHandle::run`, the
/// loop keeps running while no dialog is visible.
pub fn run_event_loop() -> Result<(), slint::PlatformError> {
    tracing::info!("Starting UI event loop");
    slint::run_event_loop_until_quit()
}
