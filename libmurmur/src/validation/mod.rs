//! Declarative form validation
//!
//! A [`Schema`] owns named fields, each with an ordered chain of
//! [`Rule`]s. Chains stop at the first failing rule, so the declared order
//! decides which message a user sees. Failures are data: they show up in
//! [`Schema::errors`] and never as an `Err`.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use libmurmur::i18n::Catalog;
//! use libmurmur::validation::{min_length, required, Schema};
//!
//! let schema = Schema::builder(Rc::new(Catalog::with_builtin("en", "en")))
//!     .field("title", "", vec![required(), min_length(3)])
//!     .build()
//!     .unwrap();
//!
//! schema.set_value("title", "ab").unwrap();
//! assert!(!schema.is_valid());
//! schema.reset();
//! assert!(schema.is_valid());
//! ```

pub mod field;
pub mod forms;
pub mod rule;
pub mod schema;

pub use field::{FieldState, ValidationField};
pub use rule::{
    first_failure, max_length, min_length, required, type_is, MaxLength, Message, MinLength,
    Required, Rule, RuleKind, RuleRef, TypeIs, ValueKind,
};
pub use schema::{Schema, SchemaBuilder};
