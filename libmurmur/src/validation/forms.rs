//! Schemas for the client's editing screens, bounded by configuration.

use std::rc::Rc;

use serde_json::Value;

use super::rule::{max_length, min_length, required, type_is, ValueKind};
use super::schema::Schema;
use crate::config::{ComposerConfig, ProfileConfig};
use crate::error::SchemaError;
use crate::i18n::Localizer;

pub mod composer {
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
}

pub mod profile {
    pub const DISPLAY_NAME: &str = "display_name";
    pub const BIO: &str = "bio";
    pub const WEBSITE: &str = "website";
}

/// "Create post" composer: a required, bounded title and an optional body.
pub fn post_composer(
    config: &ComposerConfig,
    localizer: Rc<dyn Localizer>,
) -> Result<Schema, SchemaError> {
    Schema::builder(localizer)
        .field(
            composer::TITLE,
            "",
            vec![
                required(),
                min_length(config.title_min),
                max_length(config.title_max),
            ],
        )
        .field(composer::BODY, "", vec![max_length(config.body_max)])
        .build()
}

/// Profile editor. The website starts out null and, when given, must be text.
pub fn profile_editor(
    config: &ProfileConfig,
    localizer: Rc<dyn Localizer>,
) -> Result<Schema, SchemaError> {
    Schema::builder(localizer)
        .field(
            profile::DISPLAY_NAME,
            "",
            vec![
                required(),
                min_length(config.display_name_min),
                max_length(config.display_name_max),
            ],
        )
        .field(profile::BIO, "", vec![max_length(config.bio_max)])
        .field(profile::WEBSITE, Value::Null, vec![type_is(ValueKind::String)])
        .build()
}
