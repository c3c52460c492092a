//! Scripted dialog presenter shared by the integration tests.
//!
//! Stands in for the Slint presenter so the bridge and the tool layer can be
//! driven without a display.

#![allow(dead_code)]

use humanloop::bridge::{Completion, DialogPresenter, DialogTicket};
use humanloop::metrics::Metrics;
use humanloop::models::{BridgeError, DialogId};
use humanloop::{RequestBridge, Response, ThemeManager};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the scripted human does with the next dialog
#[derive(Debug, Clone)]
pub enum Step {
    /// Reply after `delay`
    Reply(Duration, Response),
    /// Never touch the dialog
    Ignore,
    /// Drop the completion without resolving it
    Abandon,
    /// Refuse to schedule the dialog
    Refuse(BridgeError),
}

#[derive(Default)]
pub struct ScriptedPresenter {
    steps: Mutex<VecDeque<Step>>,
    pub tickets: Mutex<Vec<DialogTicket>>,
    pub dismissed: Mutex<Vec<DialogId>>,
    held: Mutex<Vec<Completion>>,
    open: Arc<AtomicUsize>,
    pub max_open: Arc<AtomicUsize>,
}

impl ScriptedPresenter {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into_iter().collect()),
            ..Self::default()
        })
    }

    /// Answer every dialog immediately with the given responses, in order
    pub fn answering(responses: impl IntoIterator<Item = Response>) -> Arc<Self> {
        Self::new(
            responses
                .into_iter()
                .map(|r| Step::Reply(Duration::ZERO, r)),
        )
    }

    pub fn presented(&self) -> usize {
        self.tickets.lock().unwrap().len()
    }

    pub fn dismissed(&self) -> Vec<DialogId> {
        self.dismissed.lock().unwrap().clone()
    }

    pub fn last_ticket(&self) -> Option<DialogTicket> {
        self.tickets.lock().unwrap().last().cloned()
    }
}

impl DialogPresenter for ScriptedPresenter {
    fn availability(&self) -> Result<(), BridgeError> {
        Ok(())
    }

    fn present(&self, ticket: DialogTicket, completion: Completion) -> Result<(), BridgeError> {
        let step = match self.steps.lock().unwrap().pop_front() {
            Some(Step::Refuse(err)) => return Err(err),
            Some(step) => step,
            None => Step::Ignore,
        };

        self.tickets.lock().unwrap().push(ticket);
        let now_open = self.open.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_open.fetch_max(now_open, Ordering::SeqCst);

        match step {
            Step::Reply(delay, response) => {
                let open = self.open.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    open.fetch_sub(1, Ordering::SeqCst);
                    completion.resolve(response);
                });
            }
            Step::Ignore => self.held.lock().unwrap().push(completion),
            Step::Abandon => {
                self.open.fetch_sub(1, Ordering::SeqCst);
                drop(completion);
            }
            Step::Refuse(_) => unreachable!(),
        }
        Ok(())
    }

    fn dismiss(&self, id: DialogId) {
        self.dismissed.lock().unwrap().push(id);
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn bridge_with(presenter: Arc<ScriptedPresenter>) -> (Arc<RequestBridge>, ThemeManager) {
    let themes = ThemeManager::new();
    let bridge = RequestBridge::new(presenter, themes.clone(), Arc::new(Metrics::new()));
    (Arc::new(bridge), themes)
}
