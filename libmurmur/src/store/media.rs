//! Media picker state

use std::fmt;
use std::rc::Rc;

use super::Store;
use crate::reactive::{Computed, Observable, ReadOnly};
use crate::types::MediaItem;

/// Completion callback registered by the screen that opened the picker.
///
/// Compared by identity: replacing a callback with a clone of itself is
/// not a change.
#[derive(Clone)]
pub struct OnFinish(Rc<dyn Fn(&[MediaItem])>);

impl OnFinish {
    pub fn new(callback: impl Fn(&[MediaItem]) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn call(&self, items: &[MediaItem]) {
        (self.0)(items)
    }
}

impl PartialEq for OnFinish {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for OnFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnFinish(..)")
    }
}

/// Visibility, current selection and completion callback of the picker.
///
/// Closing keeps the selection so reopening resumes where the user left
/// off. The store only holds the callback; the presentation layer takes
/// it with [`MediaStore::take_on_finish`] and calls it.
pub struct MediaStore {
    media_open: Observable<bool>,
    media_result: Observable<Vec<MediaItem>>,
    on_finish: Observable<Option<OnFinish>>,
    has_selection: Computed<bool>,
    max_selection: usize,
}

impl Store for MediaStore {
    const NAME: &'static str = "media";
}

impl MediaStore {
    pub fn new(max_selection: usize) -> Self {
        let media_result = Observable::new(Vec::new());
        let has_selection = Computed::from_observable(&media_result, |items| !items.is_empty());
        Self {
            media_open: Observable::new(false),
            media_result,
            on_finish: Observable::new(None),
            has_selection,
            max_selection,
        }
    }

    pub fn open(&self) {
        tracing::debug!(store = Self::NAME, "Opening media picker");
        self.media_open.set(true);
    }

    pub fn close(&self) {
        tracing::debug!(store = Self::NAME, "Closing media picker");
        self.media_open.set(false);
    }

    /// Replace the selection, keeping at most `max_selection` items in order.
    pub fn set_selection(&self, mut items: Vec<MediaItem>) {
        if items.len() > self.max_selection {
            tracing::warn!(
                store = Self::NAME,
                selected = items.len(),
                max = self.max_selection,
                "Selection exceeds limit, truncating"
            );
            items.truncate(self.max_selection);
        }
        tracing::debug!(store = Self::NAME, count = items.len(), "Selection replaced");
        self.media_result.set(items);
    }

    /// Store the completion callback, replacing any previous one.
    pub fn set_on_finish(&self, callback: OnFinish) {
        tracing::debug!(store = Self::NAME, "Completion callback replaced");
        self.on_finish.set(Some(callback));
    }

    /// Hand the callback to the caller and forget it, so a selection
    /// session completes at most once.
    pub fn take_on_finish(&self) -> Option<OnFinish> {
        let callback = self.on_finish.get();
        if callback.is_some() {
            tracing::debug!(store = Self::NAME, "Completion callback taken");
            self.on_finish.set(None);
        }
        callback
    }

    pub fn has_on_finish(&self) -> bool {
        self.on_finish.with(Option::is_some)
    }

    pub fn is_open(&self) -> bool {
        self.media_open.get()
    }

    pub fn media_open(&self) -> ReadOnly<bool> {
        self.media_open.read_only()
    }

    pub fn media_result(&self) -> ReadOnly<Vec<MediaItem>> {
        self.media_result.read_only()
    }

    pub fn selection(&self) -> Vec<MediaItem> {
        self.media_result.get()
    }

    pub fn has_selection(&self) -> bool {
        self.has_selection.get()
    }

    pub fn max_selection(&self) -> usize {
        self.max_selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaKind;
    use std::cell::Cell;

    fn items(n: usize) -> Vec<MediaItem> {
        (0..n)
            .map(|i| MediaItem::new(format!("m{}", i), format!("file:///m{}.jpg", i), MediaKind::Image))
            .collect()
    }

    #[test]
    fn close_keeps_selection() {
        let store = MediaStore::new(10);
        store.open();
        store.set_selection(items(2));
        store.close();
        store.open();

        assert!(store.is_open());
        assert_eq!(store.selection(), items(2));
        assert!(store.has_selection());
    }

    #[test]
    fn selection_is_truncated_in_order() {
        let store = MediaStore::new(3);
        store.set_selection(items(5));
        assert_eq!(store.selection(), items(3));
    }

    #[test]
    fn selection_notifies_subscribers() {
        let store = MediaStore::new(4);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _sub = store
            .media_result()
            .subscribe(move |_| counter.set(counter.get() + 1));

        store.set_selection(items(1));
        store.set_selection(items(1));
        store.set_selection(Vec::new());

        assert_eq!(hits.get(), 2);
        assert!(!store.has_selection());
    }

    #[test]
    fn on_finish_last_writer_wins_and_taken_once() {
        let store = MediaStore::new(4);
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let f = Rc::clone(&first);
        store.set_on_finish(OnFinish::new(move |_| f.set(f.get() + 1)));
        let s = Rc::clone(&second);
        store.set_on_finish(OnFinish::new(move |items| s.set(s.get() + items.len())));

        store.set_selection(items(2));
        let callback = store.take_on_finish().unwrap();
        callback.call(&store.selection());

        assert!(store.take_on_finish().is_none());
        assert!(!store.has_on_finish());
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn store_never_invokes_callback() {
        let store = MediaStore::new(4);
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        store.set_on_finish(OnFinish::new(move |_| c.set(c.get() + 1)));

        store.open();
        store.set_selection(items(1));
        store.close();

        assert_eq!(calls.get(), 0);
        assert!(store.has_on_finish());
    }

    #[test]
    fn same_callback_is_not_a_change() {
        let store = MediaStore::new(4);
        let callback = OnFinish::new(|_| {});
        store.set_on_finish(callback.clone());
        let version = store.on_finish.version();
        store.set_on_finish(callback);
        assert_eq!(store.on_finish.version(), version);
    }
}
