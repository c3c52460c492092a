use crate::bridge::Completion;
use crate::models::{BridgeError, DialogId, Palette, Request};

/// Everything a presenter needs to build one dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DialogTicket {
    pub id: DialogId,
    pub request: Request,
    /// Theme snapshot taken when the dialog is scheduled
    pub palette: Palette,
}

/// Renders dialogs on whatever thread owns the windowing toolkit.
///
/// Implementations must not block the caller: [`present`](Self::present)
/// schedules the dialog and returns. The outcome is reported later through the
/// [`Completion`], exactly once. If the presenter cannot schedule the dialog at
/// all it returns an error instead and must not touch the completion.
pub trait DialogPresenter: Send + Sync {
    /// `Err(BridgeError::GuiUnavailable)` if the windowing subsystem failed to initialise
    fn availability(&self) -> Result<(), BridgeError>;

    /// Schedule the dialog described by `ticket`
    fn present(&self, ticket: DialogTicket, completion: Completion) -> Result<(), BridgeError>;

    /// Tear down the dialog for `id` if it is still open (timeout path)
    fn dismiss(&self, id: DialogId);
}
