//! Field validation rules for editing sessions.
//!
//! A rule pairs a field with a predicate over the field's text and the message
//! shown when the predicate fails. The default rule set only requires a name;
//! more rules are added by pushing further [`ValidationRule`] values.

use crate::domain::field::PetField;
use crate::domain::pet::Pet;
use serde::{Deserialize, Serialize};

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field that failed validation.
    pub field: PetField,
    /// Inline message for the field (e.g. "Name is required.").
    pub message: String,
}

/// A validation rule over one field.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    field: PetField,
    message: &'static str,
    check: fn(&str) -> bool,
}

impl ValidationRule {
    /// Creates a rule that passes when `check` returns `true` for the field text.
    #[must_use]
    pub const fn new(field: PetField, message: &'static str, check: fn(&str) -> bool) -> Self {
        Self { field, message, check }
    }

    /// Creates a rule requiring the field to be non-empty.
    #[must_use]
    pub const fn required(field: PetField, message: &'static str) -> Self {
        Self::new(field, message, is_present)
    }

    /// Field this rule inspects.
    #[must_use]
    pub const fn field(&self) -> PetField {
        self.field
    }

    /// Evaluates the rule against a record.
    #[must_use]
    pub fn evaluate(&self, pet: &Pet) -> Option<Violation> {
        if (self.check)(&pet.field(self.field)) {
            None
        } else {
            Some(Violation {
                field: self.field,
                message: self.message.to_string(),
            })
        }
    }
}

fn is_present(value: &str) -> bool {
    !value.is_empty()
}

/// The rule set applied to every editing session.
#[must_use]
pub fn default_rules() -> Vec<ValidationRule> {
    vec![ValidationRule::required(PetField::Name, "Name is required.")]
}

/// Runs every rule against a record, in rule order.
#[must_use]
pub fn validate(rules: &[ValidationRule], pet: &Pet) -> Vec<Violation> {
    rules.iter().filter_map(|rule| rule.evaluate(pet)).collect()
}
