// Dialog window geometry and placement
//
// Sizes are chosen per request kind and never drop below the configured
// minimums. After a window is shown it is centred on its monitor and focused
// through the winit handle Slint exposes.

use crate::models::RequestKind;
use slint::LogicalSize;
use slint::winit_030::WinitWindowAccessor;
use slint::winit_030::winit::dpi::PhysicalPosition;

/// Minimum dialog size from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogGeometry {
    pub min_width: u32,
    pub min_height: u32,
}

impl Default for DialogGeometry {
    fn default() -> Self {
        Self {
            min_width: 450,
            min_height: 250,
        }
    }
}

impl DialogGeometry {
    pub fn new(min_width: u32, min_height: u32) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    /// Preferred size for `kind`, in logical pixels
    pub fn size_for(&self, kind: &RequestKind) -> (u32, u32) {
        let (width, height) = match kind {
            RequestKind::Input { .. } => (450, 250),
            RequestKind::Choice { .. } => (550, 450),
            RequestKind::Multiline { .. } => (650, 500),
            RequestKind::Confirm | RequestKind::Message { .. } => (400, 200),
            // Native picker, sized by the platform
            RequestKind::FileSelection { .. } => (0, 0),
        };
        (width.max(self.min_width), height.max(self.min_height))
    }

    pub fn logical_size_for(&self, kind: &RequestKind) -> LogicalSize {
        let (width, height) = self.size_for(kind);
        LogicalSize::new(width as f32, height as f32)
    }
}

/// Top-left corner that centres a window of `window` size on a monitor
pub fn centred(monitor_origin: (i32, i32), monitor_size: (u32, u32), window: (u32, u32)) -> (i32, i32) {
    let offset = |monitor: u32, window: u32| (monitor.saturating_sub(window) / 2) as i32;
    (
        monitor_origin.0 + offset(monitor_size.0, window.0),
        monitor_origin.1 + offset(monitor_size.1, window.1),
    )
}

/// Centre a shown window on its current monitor, keep it on top and focus it
pub fn raise(window: &slint::Window) {
    let placed = window.with_winit_window(|winit_window| {
        if let Some(monitor) = winit_window.current_monitor() {
            let origin = monitor.position();
            let size = monitor.size();
            let outer = winit_window.outer_size();
            let (x, y) = centred(
                (origin.x, origin.y),
                (size.width, size.height),
                (outer.width, outer.height),
            );
            winit_window.set_outer_position(PhysicalPosition::new(x, y));
        }
        winit_window.focus_window();
    });

    if placed.is_none() {
        tracing::debug!("No winit window available; leaving placement to the window manager");
    }
}
