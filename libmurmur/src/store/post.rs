//! Post interactions: delete and report modals, and the composer session

use std::rc::Rc;

use super::modal::{ModalState, TargetedModal};
use super::Store;
use crate::config::ComposerConfig;
use crate::error::SchemaError;
use crate::i18n::{keys, Localizer};
use crate::reactive::{batch, Computed, Observable, ReadOnly};
use crate::types::{Notice, PostId};
use crate::validation::forms::post_composer;
use crate::validation::Schema;

pub struct PostStore {
    delete: TargetedModal<PostId>,
    report: TargetedModal<PostId>,
    composer_open: Observable<bool>,
    composer: Schema,
    composer_valid: Computed<bool>,
}

impl Store for PostStore {
    const NAME: &'static str = "post";
}

impl PostStore {
    pub fn new(config: &ComposerConfig, localizer: Rc<dyn Localizer>) -> Result<Self, SchemaError> {
        let composer = post_composer(config, localizer)?;
        let composer_valid = composer.validity();
        Ok(Self {
            delete: TargetedModal::new(),
            report: TargetedModal::new(),
            composer_open: Observable::new(false),
            composer,
            composer_valid,
        })
    }

    /// Ask for confirmation before deleting `post`. A delete modal that is
    /// already open is retargeted rather than stacked.
    pub fn open_delete(&self, post: PostId) {
        tracing::debug!(store = Self::NAME, post = %post, "Delete modal opened");
        self.delete.open(post);
    }

    pub fn close_delete(&self) {
        tracing::debug!(store = Self::NAME, "Delete modal closed");
        self.delete.close();
    }

    pub fn delete_modal(&self) -> ReadOnly<ModalState<PostId>> {
        self.delete.read_only()
    }

    pub fn is_delete_open(&self) -> bool {
        self.delete.is_open()
    }

    pub fn delete_target(&self) -> Option<PostId> {
        self.delete.target()
    }

    pub fn open_report(&self, post: PostId) {
        tracing::debug!(store = Self::NAME, post = %post, "Report sheet opened");
        self.report.open(post);
    }

    pub fn close_report(&self) {
        tracing::debug!(store = Self::NAME, "Report sheet closed");
        self.report.close();
    }

    pub fn report_sheet(&self) -> ReadOnly<ModalState<PostId>> {
        self.report.read_only()
    }

    pub fn report_target(&self) -> Option<PostId> {
        self.report.target()
    }

    pub fn open_composer(&self) {
        tracing::debug!(store = Self::NAME, "Composer opened");
        self.composer_open.set(true);
    }

    /// Close the composer and discard the edit session.
    pub fn close_composer(&self) {
        tracing::debug!(store = Self::NAME, "Composer closed, discarding draft");
        batch(|| {
            self.composer_open.set(false);
            self.composer.reset();
        });
    }

    pub fn composer_open(&self) -> ReadOnly<bool> {
        self.composer_open.read_only()
    }

    pub fn is_composer_open(&self) -> bool {
        self.composer_open.get()
    }

    /// Form state of the composer; input goes through `Schema::set_value`.
    pub fn composer(&self) -> &Schema {
        &self.composer
    }

    /// Whether the submit action is enabled
    pub fn can_submit(&self) -> bool {
        self.composer_valid.get()
    }

    /// Run every composer rule, surfacing errors on untouched fields, and
    /// report whether the draft may be sent.
    pub fn validate_for_submit(&self) -> bool {
        let valid = self.composer.validate_all();
        if !valid {
            tracing::debug!(store = Self::NAME, errors = ?self.composer.errors(), "Submit blocked");
        }
        valid
    }

    /// Confirmation text for the pending delete, if the modal is open
    pub fn delete_notice(&self, localizer: &dyn Localizer) -> Option<Notice> {
        if !self.delete.is_open() {
            return None;
        }
        let post = self.delete.target()?;
        let post_id = post.to_string();
        Some(Notice {
            title: localizer.translate(keys::POST_DELETE_TITLE, &[]),
            message: localizer.translate(keys::POST_DELETE_MESSAGE, &[("post_id", post_id.as_str())]),
        })
    }
}
