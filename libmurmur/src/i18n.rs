//! Localization boundary
//!
//! The core never loads translation resources. It asks a [`Localizer`] for
//! text by key, and the client shell decides where that text comes from.
//! [`Catalog`] is an in-memory implementation filled programmatically; it
//! ships English strings for every key the core itself uses.

use std::collections::HashMap;

use crate::reactive::{Observable, ReadOnly};

/// Message keys used by the core
pub mod keys {
    pub const REQUIRED: &str = "validation.required";
    pub const MIN_LENGTH: &str = "validation.min_length";
    pub const MAX_LENGTH: &str = "validation.max_length";
    pub const TYPE_IS: &str = "validation.type";

    pub const POST_DELETE_TITLE: &str = "post.delete.title";
    pub const POST_DELETE_MESSAGE: &str = "post.delete.message";

    pub const PAYWALL_TITLE: &str = "subscription.paywall.title";
    pub const PAYWALL_MESSAGE: &str = "subscription.paywall.message";
}

/// Source of translated text
pub trait Localizer {
    /// Translate `key`, substituting `{name}` placeholders from `params`.
    ///
    /// Never fails: implementations return something displayable (usually
    /// the key itself) when no translation exists.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;

    /// Language tag currently in effect, e.g. `"en"`
    fn current_language(&self) -> String;
}

const BUILTIN_EN: &[(&str, &str)] = &[
    (keys::REQUIRED, "This field is required"),
    (keys::MIN_LENGTH, "Must be at least {min} characters"),
    (keys::MAX_LENGTH, "Must be at most {max} characters"),
    (keys::TYPE_IS, "Must be a {kind}"),
    (keys::POST_DELETE_TITLE, "Delete post?"),
    (
        keys::POST_DELETE_MESSAGE,
        "Post {post_id} will be removed for everyone.",
    ),
    (keys::PAYWALL_TITLE, "Go premium"),
    (
        keys::PAYWALL_MESSAGE,
        "{feature} is available with a premium subscription.",
    ),
    ("subscription.feature.long_video", "Long videos"),
    ("subscription.feature.post_scheduling", "Post scheduling"),
    ("subscription.feature.profile_badge", "Profile badge"),
    ("subscription.feature.advanced_search", "Advanced search"),
];

/// In-memory translation table with an observable active language
pub struct Catalog {
    tables: HashMap<String, HashMap<String, String>>,
    language: Observable<String>,
    fallback: String,
}

impl Catalog {
    /// Empty catalog; every lookup echoes its key until entries are added.
    pub fn new(language: &str, fallback: &str) -> Self {
        Self {
            tables: HashMap::new(),
            language: Observable::new(language.to_string()),
            fallback: fallback.to_string(),
        }
    }

    /// Catalog preloaded with the core's English strings
    pub fn with_builtin(language: &str, fallback: &str) -> Self {
        let mut catalog = Self::new(language, fallback);
        for (key, text) in BUILTIN_EN {
            catalog.insert("en", key, text);
        }
        catalog
    }

    /// Add or replace a translation.
    pub fn insert(&mut self, language: &str, key: &str, text: &str) {
        self.tables
            .entry(language.to_string())
            .or_default()
            .insert(key.to_string(), text.to_string());
    }

    /// Switch the active language. Subscribers of [`Catalog::language`]
    /// are notified when the tag changes.
    pub fn set_language(&self, language: &str) {
        tracing::debug!(language, "Switching active language");
        self.language.set(language.to_string());
    }

    pub fn language(&self) -> ReadOnly<String> {
        self.language.read_only()
    }

    fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.tables
            .get(language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
    }
}

impl Localizer for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let language = self.language.get();
        let template = self
            .lookup(&language, key)
            .or_else(|| self.lookup(&self.fallback, key));

        match template {
            Some(template) => interpolate(template, params),
            None => {
                tracing::debug!(key, language = %language, "Missing translation");
                key.to_string()
            }
        }
    }

    fn current_language(&self) -> String {
        self.language.get()
    }
}

/// Replace `{name}` placeholders in one left-to-right pass. Unknown
/// placeholders are left as-is and substituted text is never rescanned.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };

        let name = &after[..close];
        match params.iter().find(|(param, _)| *param == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
