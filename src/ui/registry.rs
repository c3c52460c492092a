// Open dialog registry
//
// Lives on the UI thread only. Each entry holds the closers of one open dialog:
// the strong handle of its window and the abort handles of any native picker
// tasks it started. A timeout finds and releases them by id.

use crate::models::DialogId;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

type Closer = Box<dyn FnOnce()>;

thread_local! {
    static OPEN: RefCell<HashMap<DialogId, Vec<Closer>>> = RefCell::new(HashMap::new());
}

/// Attach a closer to dialog `id`; closers run newest first on dismissal
pub fn register(id: DialogId, close: impl FnOnce() + 'static) {
    OPEN.with(|open| {
        open.borrow_mut()
            .entry(id)
            .or_default()
            .push(Box::new(close))
    });
}

/// Close and release `id` now. Must not be called from one of that dialog's
/// own callbacks; use [`close_later`] there.
pub fn dismiss(id: DialogId) -> bool {
    // Take the closer out first so it runs without the registry borrowed
    let closers = OPEN.with(|open| open.borrow_mut().remove(&id));
    match closers {
        Some(closers) => {
            for close in closers.into_iter().rev() {
                close();
            }
            tracing::debug!("{} closed", id);
            true
        }
        None => false,
    }
}

/// Close and release `id` on the next event loop iteration
pub fn close_later(id: DialogId) {
    slint::Timer::single_shot(Duration::ZERO, move || {
        dismiss(id);
    });
}

pub fn is_open(id: DialogId) -> bool {
    OPEN.with(|open| open.borrow().contains_key(&id))
}

pub fn open_count() -> usize {
    OPEN.with(|open| open.borrow().len())
}
