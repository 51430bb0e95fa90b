//! Modal and sheet visibility with a target payload

use crate::reactive::{Observable, ReadOnly};

/// Whether a modal is shown and what it acts on.
///
/// Flag and target share one observable cell, so a subscriber never sees
/// the modal open with the previous target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState<Id> {
    pub open: bool,
    pub target: Option<Id>,
}

impl<Id> Default for ModalState<Id> {
    fn default() -> Self {
        Self {
            open: false,
            target: None,
        }
    }
}

/// One modal of a given kind. Opening it again retargets it.
pub(crate) struct TargetedModal<Id> {
    state: Observable<ModalState<Id>>,
}

impl<Id: Clone + PartialEq + 'static> TargetedModal<Id> {
    pub(crate) fn new() -> Self {
        Self {
            state: Observable::new(ModalState::default()),
        }
    }

    pub(crate) fn open(&self, target: Id) {
        self.state.set(ModalState {
            open: true,
            target: Some(target),
        });
    }

    /// Hide and drop the target so a later confirm cannot act on it.
    pub(crate) fn close(&self) {
        self.state.set(ModalState::default());
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state.with(|s| s.open)
    }

    pub(crate) fn target(&self) -> Option<Id> {
        self.state.with(|s| s.target.clone())
    }

    pub(crate) fn read_only(&self) -> ReadOnly<ModalState<Id>> {
        self.state.read_only()
    }
}
