// EventLoopBridge - Hands work from tokio tasks to the Slint event loop
//
// Two event loops share the process:
// 1. Slint's single-threaded GUI event loop, which owns the main thread
// 2. Tokio's multi-threaded runtime, which serves MCP requests
//
// All Slint objects are created, changed and dropped on the event loop thread.
// Tokio code never touches them directly; it queues closures through this bridge.

use crate::models::BridgeError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cloneable handle for scheduling work on the Slint event loop thread
///
/// # Example
/// ```ignore
/// let ui = EventLoopBridge::new();
/// ui.run_on_ui(move || {
///     let dialog = MessageDialog::new()?;
///     // ...
/// })?;
/// ```
#[derive(Clone, Default)]
pub struct EventLoopBridge {
    /// Set once shutdown starts; later work is refused instead of queued
    closed: Arc<AtomicBool>,
}

impl EventLoopBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `work` to run on the event loop thread.
    ///
    /// Returns as soon as the closure is queued. If the loop has already quit,
    /// the closure is dropped unrun and an error is returned.
    pub fn run_on_ui<F>(&self, work: F) -> Result<(), BridgeError>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_closed() {
            return Err(BridgeError::ShuttingDown);
        }

        slint::invoke_from_event_loop(work).map_err(|e| {
            tracing::warn!("Failed to queue work on the UI event loop: {:?}", e);
            BridgeError::Toolkit(format!("UI event loop unavailable: {e}"))
        })
    }

    /// Refuse further work without stopping the event loop
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Refuse further work and ask the event loop to return
    pub fn shutdown(&self) {
        self.close();
        if let Err(e) = slint::quit_event_loop() {
            tracing::warn!("Failed to stop the UI event loop: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_closed_bridge_refuses_work() {
        let ui = EventLoopBridge::new();
        ui.close();

        let ran = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ran);
        let result = ui.run_on_ui(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(result, Err(BridgeError::ShuttingDown));
        assert_eq!(ran.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clones_share_closed_flag() {
        let ui = EventLoopBridge::new();
        let handle = ui.clone();
        assert!(!handle.is_closed());

        ui.close();
        assert!(handle.is_closed());
    }

    #[test]
    fn test_bridge_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EventLoopBridge>();
    }
}
