//! Comment interactions: delete modal, options sheet, reply target

use super::modal::{ModalState, TargetedModal};
use super::Store;
use crate::reactive::{Observable, ReadOnly};
use crate::types::CommentId;

pub struct CommentStore {
    delete: TargetedModal<CommentId>,
    options: TargetedModal<CommentId>,
    reply_to: Observable<Option<CommentId>>,
}

impl Store for CommentStore {
    const NAME: &'static str = "comment";
}

impl CommentStore {
    pub fn new() -> Self {
        Self {
            delete: TargetedModal::new(),
            options: TargetedModal::new(),
            reply_to: Observable::new(None),
        }
    }

    pub fn open_delete(&self, comment: CommentId) {
        tracing::debug!(store = Self::NAME, comment = %comment, "Delete modal opened");
        self.delete.open(comment);
    }

    pub fn close_delete(&self) {
        tracing::debug!(store = Self::NAME, "Delete modal closed");
        self.delete.close();
    }

    pub fn delete_modal(&self) -> ReadOnly<ModalState<CommentId>> {
        self.delete.read_only()
    }

    pub fn delete_target(&self) -> Option<CommentId> {
        self.delete.target()
    }

    pub fn open_options(&self, comment: CommentId) {
        tracing::debug!(store = Self::NAME, comment = %comment, "Options sheet opened");
        self.options.open(comment);
    }

    pub fn close_options(&self) {
        tracing::debug!(store = Self::NAME, "Options sheet closed");
        self.options.close();
    }

    pub fn options_sheet(&self) -> ReadOnly<ModalState<CommentId>> {
        self.options.read_only()
    }

    pub fn is_options_open(&self) -> bool {
        self.options.is_open()
    }

    /// Point the comment input at `comment`.
    pub fn reply_to(&self, comment: CommentId) {
        tracing::debug!(store = Self::NAME, comment = %comment, "Replying");
        self.reply_to.set(Some(comment));
    }

    pub fn cancel_reply(&self) {
        tracing::debug!(store = Self::NAME, "Reply cancelled");
        self.reply_to.set(None);
    }

    pub fn reply_target(&self) -> ReadOnly<Option<CommentId>> {
        self.reply_to.read_only()
    }
}

impl Default for CommentStore {
    fn default() -> Self {
        Self::new()
    }
}
