//! Grouping several mutations into one notification step.
//!
//! While a [`BatchScope`] is alive on the current thread, observables still
//! update their values immediately, but their notifications are queued.
//! When the outermost scope drops, each queued observable notifies once,
//! in the order it first changed, with the value it holds at that moment.
//! Derived values are invalidated at write time, not at flush.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

type Deferred = Box<dyn FnOnce()>;

#[derive(Default)]
struct BatchState {
    depth: usize,
    pending: Vec<(u64, Deferred)>,
}

thread_local! {
    static BATCH: RefCell<BatchState> = RefCell::new(BatchState::default());
}

/// RAII guard deferring observable notifications.
///
/// Scopes nest; only the outermost one flushes.
#[must_use = "notifications flush when the scope is dropped"]
pub struct BatchScope {
    _not_send: PhantomData<Rc<()>>,
}

impl BatchScope {
    pub fn new() -> Self {
        BATCH.with(|state| state.borrow_mut().depth += 1);
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let pending = BATCH.with(|state| {
            let mut state = state.borrow_mut();
            state.depth = state.depth.saturating_sub(1);
            if state.depth == 0 {
                std::mem::take(&mut state.pending)
            } else {
                Vec::new()
            }
        });

        if !pending.is_empty() {
            tracing::trace!(count = pending.len(), "Flushing batched notifications");
        }
        for (_, deliver) in pending {
            deliver();
        }
    }
}

/// Run `f` inside a batch scope.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    let _scope = BatchScope::new();
    f()
}

/// Whether a batch scope is open on this thread.
pub fn in_batch() -> bool {
    BATCH.with(|state| state.borrow().depth > 0)
}

/// Queue `deliver` under the cell id `key` if batching. Returns `false` when
/// no scope is open, in which case the caller must deliver immediately.
pub(crate) fn defer(key: u64, deliver: impl FnOnce() + 'static) -> bool {
    BATCH.with(|state| {
        let mut state = state.borrow_mut();
        if state.depth == 0 {
            return false;
        }
        if !state.pending.iter().any(|(queued, _)| *queued == key) {
            state.pending.push((key, Box::new(deliver)));
        }
        true
    })
}
