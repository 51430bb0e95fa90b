//! Observable value cells with synchronous change notification.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::batch;

type Listener<T> = Rc<dyn Fn(&T)>;
type Invalidator = Rc<dyn Fn()>;

thread_local! {
    static NEXT_CELL_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_cell_id() -> u64 {
    NEXT_CELL_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    })
}

struct Inner<T> {
    /// Identifies the cell in the batch queue; never reused on this thread.
    cell_id: u64,
    value: T,
    version: u64,
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
    invalidators: Vec<(u64, Invalidator)>,
}

/// A shared, version-tracked value.
///
/// Cloning an `Observable` yields another handle to the **same** cell.
/// Equality is decided by `PartialEq`; wrap shared handles (callbacks,
/// `Rc` payloads) in a type whose `PartialEq` is `Rc::ptr_eq` to get
/// reference semantics.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                cell_id: next_cell_id(),
                value,
                version: 0,
                next_id: 0,
                listeners: Vec::new(),
                invalidators: Vec::new(),
            })),
        }
    }

    /// Current value, cloned.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    ///
    /// The closure must not call `set` on this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value, notifying subscribers if it changed.
    ///
    /// Invalidators run before this returns, even inside a batch; only
    /// listener delivery is deferred.
    pub fn set(&self, value: T) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                false
            } else {
                inner.value = value;
                inner.version += 1;
                true
            }
        };
        if changed {
            self.invalidate_dependents();
            self.notify();
        }
    }

    /// Mutate the value in place, notifying subscribers if it changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let before = inner.value.clone();
            f(&mut inner.value);
            if inner.value == before {
                false
            } else {
                inner.version += 1;
                true
            }
        };
        if changed {
            self.invalidate_dependents();
            self.notify();
        }
    }

    /// Register a listener called with the new value after every change.
    ///
    /// The listener stays registered until the returned [`Subscription`]
    /// is dropped or explicitly unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    /// Register a hook run synchronously on every change, ahead of all
    /// listeners and never deferred by a batch. Derived values use this to
    /// drop their cache.
    pub(crate) fn on_invalidate(&self, hook: impl Fn() + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.invalidators.push((id, Rc::new(hook)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().invalidators.retain(|(hid, _)| *hid != id);
                }
            })),
        }
    }

    /// Number of value-changing mutations so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// A view of this cell that cannot write.
    pub fn read_only(&self) -> ReadOnly<T> {
        ReadOnly {
            source: self.clone(),
        }
    }

    fn invalidate_dependents(&self) {
        let hooks: Vec<Invalidator> = self
            .inner
            .borrow()
            .invalidators
            .iter()
            .map(|(_, hook)| Rc::clone(hook))
            .collect();
        for hook in &hooks {
            hook();
        }
    }

    fn notify(&self) {
        let key = self.inner.borrow().cell_id;
        let weak = Rc::downgrade(&self.inner);
        let deferred = batch::defer(key, move || {
            if let Some(inner) = weak.upgrade() {
                deliver(&inner);
            }
        });
        if !deferred {
            deliver(&self.inner);
        }
    }
}

/// Snapshot value and listeners, release the borrow, then call out.
///
/// A listener removed by an earlier one in the same pass is skipped.
fn deliver<T: Clone>(inner: &Rc<RefCell<Inner<T>>>) {
    let (value, listeners) = {
        let inner = inner.borrow();
        let listeners: Vec<(u64, Listener<T>)> = inner
            .listeners
            .iter()
            .map(|(id, l)| (*id, Rc::clone(l)))
            .collect();
        (inner.value.clone(), listeners)
    };
    for (id, listener) in &listeners {
        let registered = inner.borrow().listeners.iter().any(|(lid, _)| lid == id);
        if registered {
            listener(&value);
        }
    }
}

/// Read and subscribe access to an [`Observable`] owned elsewhere.
pub struct ReadOnly<T> {
    source: Observable<T>,
}

impl<T> Clone for ReadOnly<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadOnly").field(&self.source).finish()
    }
}

impl<T: Clone + PartialEq + 'static> ReadOnly<T> {
    #[must_use]
    pub fn get(&self) -> T {
        self.source.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(listener)
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.source.version()
    }
}

/// Listener registration guard.
///
/// Dropping the guard removes the listener. If the observable is already
/// gone, removal is a no-op.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    fn detach_now(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn get_returns_last_set() {
        let field = Observable::new(1);
        field.set(2);
        field.set(3);
        assert_eq!(field.get(), 3);
        assert_eq!(field.version(), 2);
    }

    #[test]
    fn equal_value_is_noop() {
        let field = Observable::new("a".to_string());
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _sub = field.subscribe(move |_| counter.set(counter.get() + 1));

        field.set("a".to_string());
        assert_eq!(hits.get(), 0);
        assert_eq!(field.version(), 0);

        field.set("b".to_string());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn subscribers_run_in_registration_order() {
        let field = Observable::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let subs: Vec<Subscription> = (0..3)
            .map(|i| {
                let sink = Rc::clone(&order);
                field.subscribe(move |_| sink.borrow_mut().push(i))
            })
            .collect();

        field.set(1);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        drop(subs);
    }

    #[test]
    fn listener_can_read_during_notification() {
        let field = Observable::new(0);
        let reader = field.clone();
        let seen = Rc::new(Cell::new(-1));
        let sink = Rc::clone(&seen);
        let _sub = field.subscribe(move |_| sink.set(reader.get()));

        field.set(7);
        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn drop_unsubscribes() {
        let field = Observable::new(0);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let sub = field.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(field.subscriber_count(), 1);

        drop(sub);
        field.set(1);
        assert_eq!(hits.get(), 0);
        assert_eq!(field.subscriber_count(), 0);
    }

    #[test]
    fn listener_dropped_mid_delivery_is_skipped() {
        let field = Observable::new(0);
        let b_hits = Rc::new(Cell::new(0));

        let b_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&b_slot);
        let _a = field.subscribe(move |_| {
            slot.borrow_mut().take();
        });
        let counter = Rc::clone(&b_hits);
        *b_slot.borrow_mut() = Some(field.subscribe(move |_| counter.set(counter.get() + 1)));

        field.set(1);
        assert_eq!(b_hits.get(), 0);
        assert_eq!(field.subscriber_count(), 1);

        field.set(2);
        assert_eq!(b_hits.get(), 0);
    }

    #[test]
    fn invalidators_run_inside_batch() {
        let field = Observable::new(0);
        let hooks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hooks);
        let _hook = field.on_invalidate(move || counter.set(counter.get() + 1));

        super::batch::batch(|| {
            field.set(1);
            assert_eq!(hooks.get(), 1);
            field.set(1);
            assert_eq!(hooks.get(), 1);
        });
        assert_eq!(field.subscriber_count(), 0);
    }

    #[test]
    fn replacement_cell_in_batch_still_notifies() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let (_second, _sub) = super::batch::batch(|| {
            let first = Observable::new(0);
            first.set(1);
            drop(first);

            let second = Observable::new(0);
            let sub = second.subscribe(move |_| counter.set(counter.get() + 1));
            second.set(1);
            (second, sub)
        });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_after_owner_dropped_is_noop() {
        let field = Observable::new(0);
        let sub = field.subscribe(|_| {});
        drop(field);
        sub.unsubscribe();
    }

    #[test]
    fn update_in_place() {
        let list = Observable::new(vec![1, 2]);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _sub = list.subscribe(move |_| counter.set(counter.get() + 1));

        list.update(|v| v.push(3));
        list.update(|_| {});

        assert_eq!(list.get(), vec![1, 2, 3]);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn read_only_sees_writes() {
        let field = Observable::new(false);
        let view = field.read_only();
        field.set(true);
        assert!(view.get());
        assert_eq!(view.version(), 1);
    }
}
