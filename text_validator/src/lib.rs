//! Validation rules for editable text fields.
//!
//! A [`TextValidator`] is fed every change of a field's content, evaluates its
//! [`ValidationRule`] against the trimmed text and shows or clears an error
//! message on the field. Fields are anything implementing [`TextField`]; the
//! validator only ever borrows them.
//!
//! ```
//! use text_validator::prelude::*;
//!
//! let validator = TextValidator::range_int(1, 10).unwrap();
//! let mut field = MemoryField::new();
//!
//! field.set_text("11", &[&validator]);
//! assert_eq!(field.error(), Some("Please enter a value between 1 and 10."));
//!
//! field.set_text(" 7 ", &[&validator]);
//! assert_eq!(field.error(), None);
//! ```

extern crate self as text_validator;

pub use prelude::*;

pub mod prelude;

mod errors;
mod field;
mod registry;
mod validators;
mod watcher;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
