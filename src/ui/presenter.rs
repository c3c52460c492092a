use crate::bridge::{Completion, DialogPresenter, DialogTicket};
use crate::models::{BridgeError, DialogId};
use crate::ui::bridge::EventLoopBridge;
use crate::ui::window::DialogGeometry;
use crate::ui::{GuiStatus, dialogs, registry};

/// [`DialogPresenter`] backed by Slint windows and `rfd` pickers.
///
/// Safe to call from any thread: every operation is queued onto the Slint
/// event loop through the [`EventLoopBridge`].
pub struct SlintPresenter {
    status: GuiStatus,
    ui: EventLoopBridge,
    geometry: DialogGeometry,
}

impl SlintPresenter {
    pub fn new(status: GuiStatus, ui: EventLoopBridge, geometry: DialogGeometry) -> Self {
        Self {
            status,
            ui,
            geometry,
        }
    }

    pub fn status(&self) -> &GuiStatus {
        &self.status
    }
}

impl DialogPresenter for SlintPresenter {
    fn availability(&self) -> Result<(), BridgeError> {
        self.status.require()
    }

    fn present(&self, ticket: DialogTicket, completion: Completion) -> Result<(), BridgeError> {
        let geometry = self.geometry;
        self.ui
            .run_on_ui(move || dialogs::open(ticket, completion, geometry))
    }

    fn dismiss(&self, id: DialogId) {
        let queued = self.ui.run_on_ui(move || {
            if !registry::dismiss(id) {
                tracing::debug!("{} was already closed", id);
            }
        });
        if let Err(e) = queued {
            tracing::warn!("Could not dismiss {}: {}", id, e);
        }
    }
}
