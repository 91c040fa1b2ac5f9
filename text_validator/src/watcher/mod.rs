use crate::{RuleError, TextField, ValidationRule};
use getset::CopyGetters;

/// One edit of a field's content, as reported by the host.
///
/// In `before_text_changed` the text is the content about to be edited; in
/// `on_text_changed` it is the content after the edit. Positions count chars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextChange<'a> {
    pub text: &'a str,
    pub start: usize,
    pub removed: usize,
    pub inserted: usize,
}

impl<'a> TextChange<'a> {
    /// An edit that replaced the whole previous content, `removed` chars
    /// long, with `text`.
    pub fn full(text: &'a str, removed: usize) -> Self {
        Self {
            text,
            start: 0,
            removed,
            inserted: text.chars().count(),
        }
    }
}

/// Change notifications delivered by a text field to its subscribers.
///
/// The host owns the subscription and passes the field to every callback.
pub trait TextWatcher<F: TextField + ?Sized> {
    fn before_text_changed(&self, _field: &F, _change: &TextChange<'_>) {}

    fn on_text_changed(&self, field: &mut F, change: &TextChange<'_>);

    fn after_text_changed(&self, _field: &mut F) {}
}

/// Re-evaluates a [`ValidationRule`] each time a field changes and keeps the
/// field's error display in sync with the outcome.
///
/// A failing evaluation shows the error message on the field; a passing one
/// clears whatever was shown before. The validator carries no state besides
/// its rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
pub struct TextValidator {
    #[getset(get_copy = "pub")]
    rule: ValidationRule,
}

impl TextValidator {
    pub fn new(rule: ValidationRule) -> Self {
        Self { rule }
    }

    pub fn required() -> Self {
        Self::new(ValidationRule::Required)
    }

    pub fn range_int(min: i32, max: i32) -> Result<Self, RuleError> {
        ValidationRule::range_int(min, max).map(Self::new)
    }

    /// Entry point for change notifications: trims `new_text` and validates it.
    pub fn notify_changed<F: TextField + ?Sized>(&self, field: &mut F, new_text: &str) {
        self.validate(field, Some(new_text.trim()));
    }

    /// Evaluates the rule against `text` as given and updates the field's
    /// error display. Returns whether the text passed.
    pub fn validate<F: TextField + ?Sized>(&self, field: &mut F, text: Option<&str>) -> bool {
        tracing::trace!(rule = %self.rule, text = ?text, "evaluating field text");
        match self.rule.evaluate(text) {
            Ok(()) => {
                field.set_error(None);
                true
            }
            Err(e) => {
                tracing::debug!(rule = %self.rule, error = %e, "validation failed");
                field.set_error(Some(e.to_string().as_str()));
                false
            }
        }
    }

    /// Ties this validator to a single field for as long as the borrow lasts.
    pub fn attach<F: TextField + ?Sized>(self, field: &mut F) -> BoundValidator<'_, F> {
        BoundValidator {
            validator: self,
            field,
        }
    }
}

impl<F: TextField + ?Sized> TextWatcher<F> for TextValidator {
    fn on_text_changed(&self, field: &mut F, change: &TextChange<'_>) {
        self.notify_changed(field, change.text);
    }
}

/// A [`TextValidator`] bound to exactly one borrowed field.
#[derive(Debug)]
pub struct BoundValidator<'f, F: TextField + ?Sized> {
    validator: TextValidator,
    field: &'f mut F,
}

impl<'f, F: TextField + ?Sized> BoundValidator<'f, F> {
    pub fn validator(&self) -> TextValidator {
        self.validator
    }

    pub fn field(&self) -> &F {
        &*self.field
    }

    pub fn notify_changed(&mut self, new_text: &str) {
        self.validator.notify_changed(&mut *self.field, new_text);
    }

    /// Validates the field's current content.
    pub fn validate(&mut self) -> bool {
        let text = self.field.text().trim().to_string();
        self.validator.validate(&mut *self.field, Some(&text))
    }

    /// Releases the field borrow.
    pub fn detach(self) -> &'f mut F {
        self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryField;
    use tracing_test::traced_test;

    const REQUIRED_MSG: &str = "Please enter the required information.";

    #[test]
    fn test_required_sets_message() {
        let validator = TextValidator::required();
        let mut field = MemoryField::new();

        assert!(!validator.validate(&mut field, None));
        assert_eq!(field.error(), Some(REQUIRED_MSG));

        assert!(validator.validate(&mut field, Some("x")));
    }

    #[test]
    fn test_success_clears_stale_error() {
        let validator = TextValidator::range_int(1, 10).unwrap();
        let mut field = MemoryField::new();

        validator.notify_changed(&mut field, "11");
        assert_eq!(
            field.error(),
            Some("Please enter a value between 1 and 10.")
        );

        validator.notify_changed(&mut field, "7");
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_range_int_reports_required_message_for_empty_text() {
        let validator = TextValidator::range_int(1, 10).unwrap();
        let mut field = MemoryField::new();

        validator.notify_changed(&mut field, "");
        assert_eq!(field.error(), Some(REQUIRED_MSG));
    }

    #[test]
    fn test_notify_changed_trims() {
        let validator = TextValidator::range_int(1, 10).unwrap();
        let mut field = MemoryField::new();

        validator.notify_changed(&mut field, "  5  ");
        assert_eq!(field.error(), None);

        // Whitespace alone trims down to nothing.
        validator.notify_changed(&mut field, " \t ");
        assert_eq!(field.error(), Some(REQUIRED_MSG));
    }

    #[test]
    fn test_watcher_on_memory_field() {
        let validator = TextValidator::range_int(1, 10).unwrap();
        let mut field = MemoryField::new();

        field.set_text("1", &[&validator]);
        assert_eq!(field.error(), None);

        field.splice(1, 0, "1", &[&validator]);
        assert_eq!(field.content(), "11");
        assert_eq!(
            field.error(),
            Some("Please enter a value between 1 and 10.")
        );

        field.splice(1, 1, "", &[&validator]);
        assert_eq!(field.error(), None);
    }

    #[test]
    fn test_bound_validator() {
        let mut field = MemoryField::with_text(" abc ");
        let mut bound = TextValidator::required().attach(&mut field);

        assert!(bound.validate());
        bound.notify_changed("   ");
        assert_eq!(bound.field().error(), Some(REQUIRED_MSG));
        assert_eq!(bound.validator().rule(), ValidationRule::Required);

        let field = bound.detach();
        assert_eq!(field.content(), " abc ");
    }

    #[test]
    fn test_bound_validator_on_trait_object() {
        let mut field = MemoryField::with_text("x");
        let dyn_field: &mut dyn TextField = &mut field;
        let mut bound = TextValidator::new(ValidationRule::any_int()).attach(dyn_field);

        bound.notify_changed("x");
        assert!(!bound.validate());
        assert_eq!(
            field.error(),
            Some("Please enter a value between -2147483648 and 2147483647.")
        );
    }

    #[test]
    fn test_text_change_full() {
        let change = TextChange::full("héé", 5);
        assert_eq!(
            change,
            TextChange {
                text: "héé",
                start: 0,
                removed: 5,
                inserted: 3,
            }
        );

        // Equivalent to what a watcher sees from `MemoryField::set_text`.
        let validator = TextValidator::required();
        let mut field = MemoryField::with_text("hello");
        validator.on_text_changed(&mut field, &TextChange::full("", 5));
        assert_eq!(field.error(), Some(REQUIRED_MSG));
    }

    #[test]
    fn test_trim_uses_unicode_whitespace() {
        let validator = TextValidator::range_int(1, 10).unwrap();
        let mut field = MemoryField::new();

        validator.notify_changed(&mut field, "\u{3000}5\u{a0}");
        assert_eq!(field.error(), None);

        // Control characters are content, not whitespace.
        validator.notify_changed(&mut field, "\u{1}5\u{1}");
        assert_eq!(
            field.error(),
            Some("Please enter a value between 1 and 10.")
        );
    }

    #[traced_test]
    #[test]
    fn test_failure_is_logged() {
        let validator = TextValidator::required();
        let mut field = MemoryField::new();

        validator.notify_changed(&mut field, "");

        assert!(logs_contain("validation failed"));
        assert!(logs_contain(REQUIRED_MSG));
    }
}
