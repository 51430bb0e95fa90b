//! Interaction stores for Murmur
//!
//! Each store owns its observables privately and exposes mutation only
//! through its own methods; presentation code reads values, subscribes to
//! [`ReadOnly`](crate::reactive::ReadOnly) views and calls those methods.
//!
//! # Architecture
//!
//! [`AppStores`] is the composition root: it builds one instance of every
//! store from a [`Config`] and hands out shared references. Nothing is
//! global, so tests construct as many isolated roots as they need.
//!
//! - `MediaStore`: media picker visibility, selection and completion callback
//! - `ContextMenuStore`: long-press menu placement
//! - `PostStore`: delete/report modals and the post composer
//! - `CommentStore`: delete modal, options sheet and reply target
//! - `SubscriptionStore`: premium status and the paywall
//! - `SessionStore`: signed-in user and logout confirmation
//!
//! # Example
//!
//! ```
//! use libmurmur::store::AppStores;
//! use libmurmur::types::PostId;
//! use libmurmur::Config;
//!
//! # fn example() -> libmurmur::Result<()> {
//! let stores = AppStores::from_config(&Config::default())?;
//!
//! let modal = stores.post().delete_modal();
//! let _sub = modal.subscribe(|state| println!("delete modal open: {}", state.open));
//!
//! stores.post().open_delete(PostId::from("A"));
//! stores.post().open_delete(PostId::from("B"));
//! assert_eq!(stores.post().delete_target(), Some(PostId::from("B")));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod comment;
pub mod context_menu;
pub mod media;
pub mod modal;
pub mod post;
pub mod session;
pub mod subscription;

use std::rc::Rc;

pub use comment::CommentStore;
pub use context_menu::{ContextMenuState, ContextMenuStore};
pub use media::{MediaStore, OnFinish};
pub use modal::ModalState;
pub use post::PostStore;
pub use session::SessionStore;
pub use subscription::SubscriptionStore;

use crate::i18n::{Catalog, Localizer};
use crate::reactive::batch;
use crate::validation::forms::profile_editor;
use crate::validation::Schema;
use crate::{Config, Result};

/// A named container of observable state
pub trait Store {
    /// Identifies the store in structured logs
    const NAME: &'static str;
}

/// One instance of every store, built from configuration
///
/// Stores never reach into each other; the few actions that span several
/// stores (such as [`AppStores::sign_out`]) live here.
pub struct AppStores {
    localizer: Rc<dyn Localizer>,
    media: MediaStore,
    context_menu: ContextMenuStore,
    post: PostStore,
    comment: CommentStore,
    subscription: SubscriptionStore,
    session: SessionStore,
    profile_form: Schema,
}

impl AppStores {
    /// Build every store with the given localizer
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a form schema
    /// cannot be built from it.
    pub fn new(config: &Config, localizer: Rc<dyn Localizer>) -> Result<Self> {
        config.validate()?;

        let post = PostStore::new(&config.composer, Rc::clone(&localizer))?;
        let profile_form = profile_editor(&config.profile, Rc::clone(&localizer))?;

        tracing::debug!(
            language = %localizer.current_language(),
            max_selection = config.media.max_selection,
            "Stores initialized"
        );

        Ok(Self {
            media: MediaStore::new(config.media.max_selection),
            context_menu: ContextMenuStore::new(),
            post,
            comment: CommentStore::new(),
            subscription: SubscriptionStore::new(),
            session: SessionStore::new(),
            profile_form,
            localizer,
        })
    }

    /// Build every store with a built-in [`Catalog`] for the configured
    /// language
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = Catalog::with_builtin(&config.locale.language, &config.locale.fallback);
        Self::new(config, Rc::new(catalog))
    }

    pub fn localizer(&self) -> &dyn Localizer {
        self.localizer.as_ref()
    }

    pub fn media(&self) -> &MediaStore {
        &self.media
    }

    pub fn context_menu(&self) -> &ContextMenuStore {
        &self.context_menu
    }

    pub fn post(&self) -> &PostStore {
        &self.post
    }

    pub fn comment(&self) -> &CommentStore {
        &self.comment
    }

    pub fn subscription(&self) -> &SubscriptionStore {
        &self.subscription
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Form state of the profile editor
    pub fn profile_form(&self) -> &Schema {
        &self.profile_form
    }

    /// Re-resolve visible validation messages after the localizer switched
    /// language.
    pub fn refresh_messages(&self) {
        batch(|| {
            self.post.composer().refresh_messages();
            self.profile_form.refresh_messages();
        });
    }

    /// End the session: forget the user and premium status and discard the
    /// composer and profile drafts. Subscribers see the final state only.
    pub fn sign_out(&self) {
        tracing::info!("Signing out");
        batch(|| {
            self.session.sign_out();
            self.subscription.set_premium(false);
            self.subscription.close_paywall();
            self.post.close_composer();
            self.profile_form.reset();
            self.comment.cancel_reply();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PostId, PremiumFeature, SessionUser};
    use crate::validation::forms::{composer, profile};

    #[test]
    fn roots_are_isolated() {
        let a = AppStores::from_config(&Config::default()).unwrap();
        let b = AppStores::from_config(&Config::default()).unwrap();

        a.post().open_delete(PostId::from("A"));
        a.media().open();

        assert!(!b.post().is_delete_open());
        assert!(!b.media().is_open());
    }

    #[test]
    fn config_bounds_reach_stores() {
        let mut config = Config::default();
        config.media.max_selection = 4;
        config.composer.title_min = 5;

        let stores = AppStores::from_config(&config).unwrap();
        assert_eq!(stores.media().max_selection(), 4);

        stores.post().composer().set_value(composer::TITLE, "abcd").unwrap();
        assert_eq!(
            stores.post().composer().error(composer::TITLE).unwrap(),
            Some("Must be at least 5 characters".to_string())
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = Config::default();
        config.composer.title_min = 200;
        assert!(AppStores::from_config(&config).is_err());
    }

    #[test]
    fn sign_out_clears_session_state() {
        let stores = AppStores::from_config(&Config::default()).unwrap();
        stores.session().sign_in(SessionUser {
            id: "u1".to_string(),
            handle: "ada".to_string(),
        });
        stores.subscription().set_premium(true);
        stores.post().open_composer();
        stores.post().composer().set_value(composer::TITLE, "Draft").unwrap();
        stores
            .profile_form()
            .set_value(profile::DISPLAY_NAME, "Ada")
            .unwrap();

        stores.sign_out();

        assert!(!stores.session().signed_in());
        assert!(!stores.subscription().is_premium());
        assert!(!stores.subscription().request(PremiumFeature::LongVideo));
        assert!(!stores.post().is_composer_open());
        assert!(!stores.post().composer().is_dirty());
        assert!(!stores.profile_form().is_dirty());
    }

    #[test]
    fn refresh_messages_follows_language() {
        let mut catalog = Catalog::with_builtin("en", "en");
        catalog.insert("fr", "validation.required", "Ce champ est obligatoire");
        let catalog = Rc::new(catalog);
        let stores = AppStores::new(&Config::default(), catalog.clone()).unwrap();

        stores.post().composer().set_value(composer::TITLE, "").unwrap();
        assert_eq!(
            stores.post().composer().error(composer::TITLE).unwrap(),
            Some("This field is required".to_string())
        );

        catalog.set_language("fr");
        stores.refresh_messages();
        assert_eq!(
            stores.post().composer().error(composer::TITLE).unwrap(),
            Some("Ce champ est obligatoire".to_string())
        );
        assert_eq!(stores.localizer().current_language(), "fr");
    }
}
