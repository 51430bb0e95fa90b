//! Murmur - reactive state for a social media client
//!
//! This library provides the client core behind Murmur's screens: observable
//! interaction stores (modals, media picker, context menu, premium gating,
//! session) and declarative form validation with localized messages.
//!
//! Everything is single-threaded and synchronous. Platform concerns such as
//! rendering, networking and the device media picker stay outside; they
//! read store state and call store methods.

pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod reactive;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{MurmurError, Result};
pub use i18n::{Catalog, Localizer};
pub use reactive::{Computed, Observable, ReadOnly, Subscription};
pub use store::AppStores;
pub use types::{CommentId, MediaItem, MediaKind, PostId, PremiumFeature, PressEvent};
pub use validation::Schema;
