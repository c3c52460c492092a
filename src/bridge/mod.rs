// Request bridge - Coordinates between async tool calls and the dialog presenter
//
// Tool handlers run on the tokio runtime; dialogs live on the thread that owns the
// windowing toolkit. The bridge:
// - Serialises requests so only one dialog is visible at a time
// - Snapshots the theme for each new dialog
// - Suspends the calling task on a one-shot completion
// - Enforces the request deadline and dismisses the dialog when it passes

pub mod completion;
pub mod presenter;

pub use completion::{Completion, WeakCompletion};
pub use presenter::{DialogPresenter, DialogTicket};

use crate::metrics::Metrics;
use crate::models::{
    BridgeError, CancelReason, DialogId, MAX_CONCURRENT_DIALOGS, Request, Response,
};
use crate::state::ThemeManager;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Turns a [`Request`] into exactly one [`Response`].
///
/// `submit` never fails: validation problems, an unavailable GUI, toolkit
/// errors and timeouts all come back as a `Response`.
///
/// # Concurrency
///
/// Requests are queued on a semaphore with [`MAX_CONCURRENT_DIALOGS`] permits.
/// The request timeout starts at submission and covers time spent in the queue,
/// so a caller always gets an answer within its timeout plus scheduling slack.
///
/// # Example
/// ```ignore
/// let bridge = RequestBridge::new(presenter, themes, metrics);
/// let response = bridge
///     .submit(Request::new("Deploy", "Proceed?", RequestKind::Confirm))
///     .await;
/// ```
pub struct RequestBridge {
    presenter: Arc<dyn DialogPresenter>,
    themes: ThemeManager,
    metrics: Arc<Metrics>,
    slots: Semaphore,
}

impl RequestBridge {
    pub fn new(
        presenter: Arc<dyn DialogPresenter>,
        themes: ThemeManager,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            presenter,
            themes,
            metrics,
            slots: Semaphore::new(MAX_CONCURRENT_DIALOGS),
        }
    }

    /// Whether the presenter can show dialogs
    pub fn availability(&self) -> Result<(), BridgeError> {
        self.presenter.availability()
    }

    /// Whether a dialog currently holds the slot
    pub fn is_busy(&self) -> bool {
        self.slots.available_permits() == 0
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Stop accepting requests; queued and future submissions fail with
    /// [`BridgeError::ShuttingDown`]
    pub fn close(&self) {
        self.slots.close();
    }

    /// Present `request` to the human and wait for the outcome
    pub async fn submit(&self, request: Request) -> Response {
        let kind = request.kind.label();
        tracing::debug!("Request submitted: kind={}, title={:?}", kind, request.title);

        let response = self.run(request).await;
        self.metrics.record_outcome(&response);

        match &response {
            Response::Answered(_) => tracing::info!("{} request answered", kind),
            Response::Cancelled(reason) => {
                tracing::info!("{} request cancelled ({})", kind, reason.as_str())
            }
            Response::Failed(err) => tracing::warn!("{} request failed: {}", kind, err),
        }

        response
    }

    async fn run(&self, request: Request) -> Response {
        if let Err(err) = request.validate() {
            return err.into();
        }
        if let Err(err) = self.presenter.availability() {
            return err.into();
        }

        let submitted = Instant::now();
        let Some(deadline) = tokio::time::Instant::now().checked_add(request.timeout) else {
            return BridgeError::InvalidRequest(format!(
                "timeout of {} seconds is out of range",
                request.timeout.as_secs()
            ))
            .into();
        };

        // Wait for the single dialog slot
        let permit = match tokio::time::timeout_at(deadline, self.slots.acquire()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return BridgeError::ShuttingDown.into(),
            Err(_) => {
                tracing::warn!(
                    "Request timed out after {:?} while waiting for the open dialog",
                    request.timeout
                );
                return Response::Cancelled(CancelReason::TimedOut);
            }
        };
        self.metrics.record_queue_wait(submitted.elapsed());

        let id = DialogId::next();
        let ticket = DialogTicket {
            id,
            request,
            palette: self.themes.current_palette(),
        };

        let (completion, mut rx) = Completion::new();
        let timeout_handle = completion.downgrade();

        if let Err(err) = self.presenter.present(ticket, completion) {
            return err.into();
        }
        self.metrics.record_presented();
        let opened = Instant::now();

        let response = match tokio::time::timeout_at(deadline, &mut rx).await {
            Ok(received) => received.unwrap_or_else(|_| abandoned(id)),
            Err(_) => {
                if timeout_handle.resolve(Response::Cancelled(CancelReason::TimedOut)) {
                    tracing::warn!("{} timed out, dismissing", id);
                }
                // Whichever outcome won is already in (or on its way to) the channel
                self.presenter.dismiss(id);
                rx.await.unwrap_or_else(|_| abandoned(id))
            }
        };

        self.metrics.record_dialog_time(opened.elapsed());
        drop(permit);
        response
    }
}

fn abandoned(id: DialogId) -> Response {
    tracing::error!("{} was dropped without reporting an outcome", id);
    Response::Failed(BridgeError::Toolkit(
        "dialog closed without reporting an outcome".to_string(),
    ))
}
