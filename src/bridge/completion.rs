use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::sync::oneshot;

use crate::models::Response;

struct Inner {
    resolved: AtomicBool,
    sender: Mutex<Option<oneshot::Sender<Response>>>,
}

/// Exactly-once handle for reporting the outcome of one dialog.
///
/// Cloned freely between the UI thread (submit/cancel/close callbacks) and the
/// bridge (timeout). The first [`resolve`](Self::resolve) wins; every later call
/// is a no-op that returns `false`.
#[derive(Clone)]
pub struct Completion {
    inner: Arc<Inner>,
}

impl Completion {
    /// Create a completion and the receiver the bridge awaits
    pub fn new() -> (Self, oneshot::Receiver<Response>) {
        let (tx, rx) = oneshot::channel();
        let completion = Self {
            inner: Arc::new(Inner {
                resolved: AtomicBool::new(false),
                sender: Mutex::new(Some(tx)),
            }),
        };
        (completion, rx)
    }

    /// Deliver `response` if nothing has been delivered yet.
    ///
    /// Returns `true` if this call won.
    pub fn resolve(&self, response: Response) -> bool {
        if self.inner.resolved.swap(true, Ordering::AcqRel) {
            tracing::trace!("Discarding late dialog outcome: {:?}", response);
            return false;
        }

        let sender = self
            .inner
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(tx) = sender {
            // The bridge may have stopped waiting (shutdown); nothing to do then
            let _ = tx.send(response);
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.resolved.load(Ordering::Acquire)
    }

    /// Handle that can resolve without keeping the channel open
    pub fn downgrade(&self) -> WeakCompletion {
        WeakCompletion {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Non-owning [`Completion`].
///
/// The bridge keeps one of these for its timeout so that a presenter dropping
/// every strong handle still closes the receiver.
#[derive(Clone)]
pub struct WeakCompletion {
    inner: Weak<Inner>,
}

impl WeakCompletion {
    /// Resolve if any strong handle is still alive; `false` otherwise or if already resolved
    pub fn resolve(&self, response: Response) -> bool {
        match self.inner.upgrade() {
            Some(inner) => Completion { inner }.resolve(response),
            None => false,
        }
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, CancelReason};
    use std::sync::atomic::AtomicUsize;

    #[tokio::test]
    async fn test_first_resolve_wins() {
        let (completion, rx) = Completion::new();

        assert!(completion.resolve(Response::Answered(Answer::Text("Ada".into()))));
        assert!(!completion.resolve(Response::Cancelled(CancelReason::TimedOut)));
        assert!(completion.is_resolved());

        assert_eq!(
            rx.await.unwrap(),
            Response::Answered(Answer::Text("Ada".into()))
        );
    }

    #[tokio::test]
    async fn test_dropped_without_resolve_closes_channel() {
        let (completion, rx) = Completion::new();
        drop(completion);
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn test_weak_handle_does_not_keep_channel_open() {
        let (completion, rx) = Completion::new();
        let weak = completion.downgrade();
        drop(completion);

        assert!(rx.await.is_err());
        assert!(!weak.resolve(Response::Cancelled(CancelReason::TimedOut)));
    }

    #[tokio::test]
    async fn test_weak_handle_resolves_while_strong_alive() {
        let (completion, rx) = Completion::new();
        let weak = completion.downgrade();

        assert!(weak.resolve(Response::Cancelled(CancelReason::TimedOut)));
        assert!(!completion.resolve(Response::Answered(Answer::Confirmed(true))));
        assert_eq!(rx.await.unwrap(), Response::Cancelled(CancelReason::TimedOut));
    }

    #[test]
    fn test_resolve_after_receiver_dropped() {
        let (completion, rx) = Completion::new();
        drop(rx);
        assert!(completion.resolve(Response::Answered(Answer::Acknowledged)));
    }

    #[test]
    fn test_racing_resolvers_deliver_once() {
        for _ in 0..50 {
            let (completion, mut rx) = Completion::new();
            let winners = Arc::new(AtomicUsize::new(0));

            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let completion = completion.clone();
                    let winners = Arc::clone(&winners);
                    std::thread::spawn(move || {
                        let response = if i % 2 == 0 {
                            Response::Answered(Answer::Integer(i))
                        } else {
                            Response::Cancelled(CancelReason::TimedOut)
                        };
                        if completion.resolve(response) {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(winners.load(Ordering::SeqCst), 1);
            assert!(rx.try_recv().is_ok());
        }
    }
}
