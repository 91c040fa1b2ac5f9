/// The outcome of a failed validation. The `Display` output is the message
/// shown on the field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter the required information.")]
    EmptyInput,
    #[error("Please enter a value between {min} and {max}.")]
    OutOfRange { min: i32, max: i32 },
}

/// Errors raised while configuring validators or dispatching to them.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidBounds { min: i32, max: i32 },
    #[error("Failed to parse rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },
    #[error("Field '{0}' is defined twice.")]
    DuplicateField(String),
    #[error("No validator is defined for field: '{0}'")]
    UnknownField(String),
}
