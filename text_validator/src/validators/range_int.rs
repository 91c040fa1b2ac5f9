use crate::{RuleError, ValidationError};

/// Lower bound meaning "no lower bound".
pub const NO_MIN: i32 = i32::MIN;
/// Upper bound meaning "no upper bound".
pub const NO_MAX: i32 = i32::MAX;

pub(crate) const KEYWORD: &str = "range_int";

/// Parses `text` as an `i32` and checks it against the inclusive `[min, max]`.
///
/// Text that is not a number, or does not fit in an `i32`, is reported the
/// same way as an out-of-range value.
pub(crate) fn check(text: &str, min: i32, max: i32) -> Result<i32, ValidationError> {
    text.parse::<i32>()
        .ok()
        .filter(|value| (min..=max).contains(value))
        .ok_or(ValidationError::OutOfRange { min, max })
}

/// Parses the bracketed part of `range_int[MIN,MAX]`. An empty side means
/// that bound is absent.
pub(crate) fn parse_bounds(rule: &str, bounds: &str) -> Result<(i32, i32), RuleError> {
    let invalid = |message: String| RuleError::InvalidRule {
        rule: rule.to_string(),
        message,
    };

    let inner = bounds
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| invalid("Bounds must be written as [MIN,MAX]".to_string()))?;
    let (min, max) = inner
        .split_once(',')
        .ok_or_else(|| invalid("Bounds must be separated by a comma".to_string()))?;

    let parse_side = |side: &str, absent: i32| -> Result<i32, RuleError> {
        let side = side.trim();
        if side.is_empty() {
            return Ok(absent);
        }
        side.parse()
            .map_err(|e| invalid(format!("Bound '{}' is not a valid integer: {}", side, e)))
    };

    Ok((parse_side(min, NO_MIN)?, parse_side(max, NO_MAX)?))
}
