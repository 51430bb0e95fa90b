//! Memoized values derived from declared [`Observable`] dependencies.
//!
//! A [`Computed`] registers an invalidation hook on each dependency at
//! construction. The hook runs inside the write itself, before any listener
//! and regardless of batching, so the compute function reruns lazily on the
//! next `get()` and never serves a stale cache.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::observable::{Observable, Subscription};

struct ComputedInner<T> {
    compute: Box<dyn Fn() -> T>,
    cached: Option<T>,
    dirty: Cell<bool>,
    version: u64,
    /// Invalidation hooks, kept for the lifetime of the computed.
    _subscriptions: Vec<Subscription>,
}

/// A lazily evaluated, memoized derived value.
///
/// Cloning a `Computed` yields another handle to the same cache.
pub struct Computed<T> {
    inner: Rc<RefCell<ComputedInner<T>>>,
}

impl<T> Clone for Computed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Computed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Computed")
            .field("cached", &inner.cached)
            .field("dirty", &inner.dirty.get())
            .field("version", &inner.version)
            .finish()
    }
}

fn mark_dirty<T>(weak: Weak<RefCell<ComputedInner<T>>>) -> impl Fn() {
    move || {
        if let Some(strong) = weak.upgrade() {
            strong.borrow().dirty.set(true);
        }
    }
}

impl<T: Clone + 'static> Computed<T> {
    fn with_compute(compute: Box<dyn Fn() -> T>) -> Rc<RefCell<ComputedInner<T>>> {
        Rc::new(RefCell::new(ComputedInner {
            compute,
            cached: None,
            dirty: Cell::new(true),
            version: 0,
            _subscriptions: Vec::new(),
        }))
    }

    /// Derive from a single observable.
    pub fn from_observable<S: Clone + PartialEq + 'static>(
        source: &Observable<S>,
        map: impl Fn(&S) -> T + 'static,
    ) -> Self {
        let source_clone = source.clone();
        let inner = Self::with_compute(Box::new(move || source_clone.with(|v| map(v))));

        let dirty = mark_dirty(Rc::downgrade(&inner));
        let sub = source.on_invalidate(dirty);
        inner.borrow_mut()._subscriptions.push(sub);

        Self { inner }
    }

    /// Derive from two observables.
    pub fn from2<S1, S2>(
        s1: &Observable<S1>,
        s2: &Observable<S2>,
        map: impl Fn(&S1, &S2) -> T + 'static,
    ) -> Self
    where
        S1: Clone + PartialEq + 'static,
        S2: Clone + PartialEq + 'static,
    {
        let s1_clone = s1.clone();
        let s2_clone = s2.clone();
        let inner = Self::with_compute(Box::new(move || {
            s1_clone.with(|v1| s2_clone.with(|v2| map(v1, v2)))
        }));

        let dirty1 = mark_dirty(Rc::downgrade(&inner));
        let sub1 = s1.on_invalidate(dirty1);
        let dirty2 = mark_dirty(Rc::downgrade(&inner));
        let sub2 = s2.on_invalidate(dirty2);

        {
            let mut inner_mut = inner.borrow_mut();
            inner_mut._subscriptions.push(sub1);
            inner_mut._subscriptions.push(sub2);
        }

        Self { inner }
    }

    /// Derive from any number of observables of one type.
    ///
    /// Used for aggregates such as "every form field is error-free".
    pub fn from_all<S: Clone + PartialEq + 'static>(
        sources: &[Observable<S>],
        map: impl Fn(&[Observable<S>]) -> T + 'static,
    ) -> Self {
        let owned: Vec<Observable<S>> = sources.to_vec();
        let inner = Self::with_compute(Box::new(move || map(owned.as_slice())));

        let subs: Vec<Subscription> = sources
            .iter()
            .map(|source| {
                let dirty = mark_dirty(Rc::downgrade(&inner));
                source.on_invalidate(dirty)
            })
            .collect();
        inner.borrow_mut()._subscriptions = subs;

        Self { inner }
    }

    /// Current value, recomputed first if any dependency changed.
    #[must_use]
    pub fn get(&self) -> T {
        let mut inner = self.inner.borrow_mut();
        if !inner.dirty.get() {
            if let Some(cached) = inner.cached.as_ref() {
                return cached.clone();
            }
        }

        let value = (inner.compute)();
        inner.cached = Some(value.clone());
        inner.dirty.set(false);
        inner.version += 1;
        value
    }

    /// Whether the cached value is stale.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.inner.borrow().dirty.get()
    }

    /// Force recomputation on the next `get()`.
    pub fn invalidate(&self) {
        self.inner.borrow().dirty.set(true);
    }

    /// Incremented once per recomputation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }
}
