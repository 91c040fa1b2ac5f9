use crate::{RuleError, TextField, TextValidator, ValidationError, ValidationRule};
use getset::Getters;
use indexmap::IndexMap;
use std::collections::HashMap;

/// The validators of a form, keyed by field name.
///
/// Hosts that identify fields by name rather than by handle dispatch their
/// change notifications through this set. An `IndexMap` keeps the fields in
/// declaration order, which is the order `check_props` reports failures in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Getters)]
pub struct ValidatorSet {
    #[getset(get = "pub")]
    validators: IndexMap<String, TextValidator>,
}

#[derive(Debug, Default)]
pub struct ValidatorSetBuilder {
    validators: IndexMap<String, TextValidator>,
}

impl ValidatorSetBuilder {
    /// Adds a rule for `name`. Every name may be defined only once.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        rule: ValidationRule,
    ) -> Result<&mut Self, RuleError> {
        let name = name.into();
        if self.validators.contains_key(&name) {
            return Err(RuleError::DuplicateField(name));
        }
        self.validators.insert(name, TextValidator::new(rule));
        Ok(self)
    }

    pub fn build(self) -> ValidatorSet {
        ValidatorSet {
            validators: self.validators,
        }
    }
}

impl ValidatorSet {
    pub fn builder() -> ValidatorSetBuilder {
        ValidatorSetBuilder::default()
    }

    /// Builds a set from `(field name, rule)` pairs, where each rule uses the
    /// textual form accepted by [`ValidationRule`]'s `FromStr`, e.g.
    /// `range_int[1,10]`.
    pub fn from_rules<I, K, V>(rules: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut builder = Self::builder();
        for (name, rule) in rules {
            builder.define(name, rule.as_ref().parse()?)?;
        }
        Ok(builder.build())
    }

    pub fn find(&self, name: &str) -> Option<&TextValidator> {
        self.validators.get(name)
    }

    /// Forwards a change notification of the field called `name` to its
    /// validator.
    pub fn notify_changed<F: TextField + ?Sized>(
        &self,
        name: &str,
        field: &mut F,
        new_text: &str,
    ) -> Result<(), RuleError> {
        let Some(validator) = self.find(name) else {
            tracing::warn!(field = name, "change notification for unknown field");
            return Err(RuleError::UnknownField(name.to_string()));
        };
        tracing::trace!(field = name, "dispatching change notification");
        validator.notify_changed(field, new_text);
        Ok(())
    }

    /// Checks a snapshot of field contents without touching any widget.
    ///
    /// Contents are trimmed first; a missing entry counts as a null content.
    /// Only failing fields appear in the result.
    pub fn check_props(
        &self,
        props: &HashMap<String, String>,
    ) -> IndexMap<String, ValidationError> {
        self.validators
            .iter()
            .filter_map(|(name, validator)| {
                let text = props.get(name).map(|s| s.trim());
                validator
                    .rule()
                    .evaluate(text)
                    .err()
                    .map(|e| (name.clone(), e))
            })
            .collect()
    }
}

impl TryFrom<Vec<(String, ValidationRule)>> for ValidatorSet {
    type Error = RuleError;

    fn try_from(rules: Vec<(String, ValidationRule)>) -> Result<Self, Self::Error> {
        let mut builder = Self::builder();
        for (name, rule) in rules {
            builder.define(name, rule)?;
        }
        Ok(builder.build())
    }
}

/// Implemented by structs deriving `FieldRules`: a form whose fields carry
/// `#[rule(...)]` attributes.
pub trait FieldRules {
    /// The validators declared on the struct, built once per type.
    fn validator_set() -> Result<&'static ValidatorSet, RuleError>;

    /// The field registered under `name`, if it has a rule.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn TextField>;

    /// Handles a change notification of the field called `name`.
    fn notify_changed(&mut self, name: &str, new_text: &str) -> Result<(), RuleError> {
        let set = Self::validator_set()?;
        let field = self
            .field_mut(name)
            .ok_or_else(|| RuleError::UnknownField(name.to_string()))?;
        set.notify_changed(name, field, new_text)
    }

    /// Validates the current content of every field with a rule, updating
    /// each field's error display. Returns whether all of them passed.
    fn validate_all(&mut self) -> Result<bool, RuleError> {
        let set = Self::validator_set()?;
        let mut all_valid = true;
        for (name, validator) in set.validators() {
            let field = self
                .field_mut(name)
                .ok_or_else(|| RuleError::UnknownField(name.clone()))?;
            let text = field.text().trim().to_string();
            all_valid &= validator.validate(field, Some(&text));
        }
        Ok(all_valid)
    }
}
