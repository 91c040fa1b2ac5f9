use crate::ValidationError;

pub(crate) const KEYWORD: &str = "required";

/// Passes non-null, non-empty text through unchanged.
pub(crate) fn check(text: Option<&str>) -> Result<&str, ValidationError> {
    match text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ValidationError::EmptyInput),
    }
}
