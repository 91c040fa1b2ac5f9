use crate::{RuleError, ValidationError};
use range_int::{NO_MAX, NO_MIN};
use std::fmt::{self, Display};
use std::str::FromStr;

pub(crate) mod range_int;
pub(crate) mod required;

/// A rule deciding whether the text of a field is acceptable.
///
/// `RangeInt` includes the `Required` check: empty text fails with
/// [`ValidationError::EmptyInput`] before any parsing is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationRule {
    /// The text must be present and non-empty.
    Required,
    /// The text must be an `i32` in the inclusive range `[min, max]`.
    /// [`NO_MIN`] and [`NO_MAX`] stand for a missing bound.
    RangeInt { min: i32, max: i32 },
}

impl ValidationRule {
    pub fn required() -> Self {
        Self::Required
    }

    /// A range with both bounds. Fails if `min` is greater than `max`.
    pub fn range_int(min: i32, max: i32) -> Result<Self, RuleError> {
        if min > max {
            return Err(RuleError::InvalidBounds { min, max });
        }
        Ok(Self::RangeInt { min, max })
    }

    pub fn at_least(min: i32) -> Self {
        Self::RangeInt { min, max: NO_MAX }
    }

    pub fn at_most(max: i32) -> Self {
        Self::RangeInt { min: NO_MIN, max }
    }

    /// Any integer is accepted, but the text must still be one.
    pub fn any_int() -> Self {
        Self::RangeInt {
            min: NO_MIN,
            max: NO_MAX,
        }
    }

    /// Evaluates the rule against already trimmed text. `None` stands for a
    /// null field content.
    pub fn evaluate(&self, text: Option<&str>) -> Result<(), ValidationError> {
        match *self {
            ValidationRule::Required => required::check(text).map(|_| ()),
            ValidationRule::RangeInt { min, max } => {
                let text = required::check(text)?;
                range_int::check(text, min, max).map(|_| ())
            }
        }
    }
}

impl Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValidationRule::Required => write!(f, "{}", required::KEYWORD),
            ValidationRule::RangeInt { min, max } => {
                write!(f, "{}[", range_int::KEYWORD)?;
                if min != NO_MIN {
                    write!(f, "{}", min)?;
                }
                write!(f, ",")?;
                if max != NO_MAX {
                    write!(f, "{}", max)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Parses `required`, `range_int` or `range_int[MIN,MAX]`, where either
/// bound may be left empty.
impl FromStr for ValidationRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = s.trim();
        let lowered = rule.to_ascii_lowercase();

        if lowered == required::KEYWORD {
            return Ok(Self::Required);
        }

        match lowered.strip_prefix(range_int::KEYWORD).map(str::trim) {
            Some("") => Ok(Self::any_int()),
            Some(bounds) => {
                let (min, max) = range_int::parse_bounds(rule, bounds)?;
                Self::range_int(min, max)
            }
            None => Err(RuleError::InvalidRule {
                rule: rule.to_string(),
                message: format!(
                    "Rule must be one of: {}, {}",
                    required::KEYWORD,
                    range_int::KEYWORD
                ),
            }),
        }
    }
}
