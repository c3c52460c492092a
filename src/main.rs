//! humanloop - Human-in-the-loop MCP server
//!
//! Main entry point. Serves the dialog tools over stdio and shows each request
//! as a native desktop dialog.
//!
//! # Threading
//!
//! - **Main thread**: Runs the Slint event loop; every window is created and
//!   destroyed here
//! - **Tokio workers**: MCP transport, tool handlers, bridge waits, file metadata
//!
//! # Execution Flow
//!
//! 1. Load `HITL_*` settings and set up logging (stderr; stdout is the transport)
//! 2. Build the theme registry and check the windowing system
//! 3. Wire EventLoopBridge → SlintPresenter → RequestBridge → HumanLoopServer
//! 4. Spawn the stdio server on the tokio runtime
//! 5. Run the Slint event loop until the client disconnects or Ctrl+C
//! 6. Log the metrics summary and shut the runtime down with a 5s timeout
//!
//! Without a display the server still runs: the main thread just waits for the
//! server task, and every dialog request fails with `GuiUnavailable`.

use anyhow::{Context, Result};
use humanloop::logging::{LogOptions, setup_logging};
use humanloop::metrics::Metrics;
use humanloop::server::{HumanLoopServer, serve_stdio};
use humanloop::ui::{self, DialogGeometry, EventLoopBridge, SlintPresenter};
use humanloop::{APP_NAME, RequestBridge, Settings, ThemeManager, VERSION};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    let settings = Settings::load()?;

    // Held until exit so buffered file logs are flushed
    let _log_guard = setup_logging(LogOptions {
        log_dir: settings.log_dir.as_deref(),
        log_prefix: APP_NAME,
        debug_mode: settings.debug,
        json: settings.log_json,
    })?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::debug!("Settings: {:?}", settings);

    let themes = ThemeManager::with_registry(settings.theme_registry()?, &settings.theme)
        .context("Failed to initialise themes")?;
    tracing::info!("Theme '{}' active ({} available)", settings.theme, themes.available().len());

    // Must run on the thread that will own the event loop
    let gui = ui::detect_gui();
    let gui_available = gui.available;

    let ui_bridge = EventLoopBridge::new();
    let presenter = SlintPresenter::new(
        gui,
        ui_bridge.clone(),
        DialogGeometry::new(settings.dialog_width, settings.dialog_height),
    );
    let metrics = Arc::new(Metrics::new());
    let bridge = Arc::new(RequestBridge::new(
        Arc::new(presenter),
        themes.clone(),
        metrics.clone(),
    ));
    let server = HumanLoopServer::new(bridge.clone(), themes, settings.default_timeout());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("humanloop-worker")
        .build()
        .context("Failed to create tokio runtime")?;

    let serve_ui = ui_bridge.clone();
    let serve_bridge = bridge.clone();
    let serving = runtime.spawn(async move {
        let result = tokio::select! {
            result = serve_stdio(server) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, shutting down");
                Ok(())
            }
        };
        serve_bridge.close();
        serve_ui.shutdown();
        result
    });

    let ui_result = if gui_available {
        ui::run_event_loop().context("UI event loop failed")
    } else {
        tracing::warn!("Running without a display; dialog requests will fail");
        Ok(())
    };

    if let Err(e) = &ui_result {
        tracing::error!("{:#}", e);
        serving.abort();
    }

    // The event loop returns once the server task asks it to; without a GUI
    // this is where the main thread waits
    let serve_result = match runtime.block_on(serving) {
        Ok(result) => result,
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => Err(anyhow::anyhow!("Server task panicked: {}", e)),
    };

    bridge.close();
    ui_bridge.close();
    metrics.log_summary();
    runtime.shutdown_timeout(Duration::from_secs(5));

    tracing::info!("Shutdown complete");

    ui_result?;
    serve_result.map_err(|e| {
        tracing::error!("Server error: {:#}", e);
        e
    })
}
