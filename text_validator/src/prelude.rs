//! The `text_validator` prelude.

pub use crate::errors::{RuleError, ValidationError};
pub use crate::field::{MemoryField, TextField};
pub use crate::registry::{FieldRules, ValidatorSet, ValidatorSetBuilder};
pub use crate::validators::{
    ValidationRule,
    range_int::{NO_MAX, NO_MIN},
};
pub use crate::watcher::{BoundValidator, TextChange, TextValidator, TextWatcher};
pub use text_validator_macros::FieldRules;
