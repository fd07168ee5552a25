//! Filter state: one rule per filter key.
//!
//! The state always holds a `global` rule plus exactly one rule for each
//! filterable field. Rules are only ever updated in place, never added or
//! removed, so the set of keys is fixed for the life of the console.

use crate::domain::error::{PetdeskError, Result};
use crate::domain::PetField;
use crate::filter::mode::MatchMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fields that carry their own column filter.
pub const FILTERABLE_FIELDS: [PetField; 2] = [PetField::Name, PetField::Description];

/// Fields searched by the global rule.
pub const GLOBAL_FIELDS: [PetField; 3] = [PetField::Id, PetField::Name, PetField::Description];

/// Addresses one rule in a [`FilterState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKey {
    /// The search-everything rule.
    Global,
    /// A per-column rule.
    Field(PetField),
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Field(field) => write!(f, "{field}"),
        }
    }
}

impl FromStr for FilterKey {
    type Err = PetdeskError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("global") {
            return Ok(Self::Global);
        }
        s.parse::<PetField>().map(Self::Field)
    }
}

/// A single filter rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    /// Rule value; `None` means the rule matches everything.
    pub value: Option<String>,
    pub match_mode: MatchMode,
}

impl FilterRule {
    #[must_use]
    pub const fn new(match_mode: MatchMode) -> Self {
        Self {
            value: None,
            match_mode,
        }
    }

    /// The rule value, if the rule constrains anything.
    #[must_use]
    pub fn active_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

/// All filter rules of the console.
///
/// # Example
///
/// ```
/// use petdesk::filter::{FilterKey, FilterState};
/// use petdesk::domain::PetField;
///
/// let mut filters = FilterState::default();
/// filters.set(FilterKey::Field(PetField::Name), Some("R".to_string()))?;
/// filters.clear();
/// assert!(filters.global().value.is_none());
/// # Ok::<(), petdesk::PetdeskError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    global: FilterRule,
    fields: BTreeMap<PetField, FilterRule>,
}

impl Default for FilterState {
    /// Global rule matches by `Contains`, column rules by `StartsWith`.
    fn default() -> Self {
        Self {
            global: FilterRule::new(MatchMode::Contains),
            fields: FILTERABLE_FIELDS
                .iter()
                .map(|field| (*field, FilterRule::new(MatchMode::StartsWith)))
                .collect(),
        }
    }
}

impl FilterState {
    #[must_use]
    pub const fn global(&self) -> &FilterRule {
        &self.global
    }

    /// Per-column rules in field order.
    pub fn field_rules(&self) -> impl Iterator<Item = (PetField, &FilterRule)> {
        self.fields.iter().map(|(field, rule)| (*field, rule))
    }

    /// Looks up the rule for `key`.
    #[must_use]
    pub fn rule(&self, key: FilterKey) -> Option<&FilterRule> {
        match key {
            FilterKey::Global => Some(&self.global),
            FilterKey::Field(field) => self.fields.get(&field),
        }
    }

    fn rule_mut(&mut self, key: FilterKey) -> Result<&mut FilterRule> {
        match key {
            FilterKey::Global => Ok(&mut self.global),
            FilterKey::Field(field) => self
                .fields
                .get_mut(&field)
                .ok_or_else(|| PetdeskError::UnknownField(format!("{field} is not filterable"))),
        }
    }

    /// Sets the value of one rule. An empty value clears the rule.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::UnknownField`] if `key` names a field without
    /// a column filter.
    pub fn set(&mut self, key: FilterKey, value: Option<String>) -> Result<()> {
        let value = value.filter(|v| !v.is_empty());
        tracing::debug!(key = %key, value = ?value, "filter rule updated");
        self.rule_mut(key)?.value = value;
        Ok(())
    }

    /// Sets only the global rule value.
    pub fn set_global(&mut self, value: Option<String>) {
        self.global.value = value.filter(|v| !v.is_empty());
    }

    /// Changes how a column rule compares values.
    ///
    /// The global rule always matches by `Contains`.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::UnknownField`] for the global key or for a
    /// field without a column filter.
    pub fn set_match_mode(&mut self, key: FilterKey, mode: MatchMode) -> Result<()> {
        if key == FilterKey::Global {
            return Err(PetdeskError::UnknownField(
                "global match mode is fixed to contains".to_string(),
            ));
        }
        self.rule_mut(key)?.match_mode = mode;
        Ok(())
    }

    /// Resets every rule value to `None`, including the global rule.
    /// Match modes are kept.
    pub fn clear(&mut self) {
        self.global.value = None;
        for rule in self.fields.values_mut() {
            rule.value = None;
        }
    }

    /// Returns `true` if no rule constrains anything.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.global.active_value().is_none()
            && self.fields.values().all(|rule| rule.active_value().is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_has_one_rule_per_filterable_field() {
        let filters = FilterState::default();

        assert_eq!(filters.global().match_mode, MatchMode::Contains);
        let keys: Vec<PetField> = filters.field_rules().map(|(field, _)| field).collect();
        assert_eq!(keys, vec![PetField::Name, PetField::Description]);
        assert!(filters.is_inactive());
    }

    #[test]
    fn set_normalizes_empty_values() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Field(PetField::Name), Some(String::new())).unwrap();

        assert_eq!(filters.rule(FilterKey::Field(PetField::Name)).unwrap().value, None);
    }

    #[test]
    fn id_has_no_column_filter() {
        let mut filters = FilterState::default();
        let err = filters.set(FilterKey::Field(PetField::Id), Some("1".to_string()));

        assert!(matches!(err, Err(PetdeskError::UnknownField(_))));
        assert!(filters.rule(FilterKey::Field(PetField::Id)).is_none());
    }

    #[test]
    fn set_global_leaves_column_rules_alone() {
        let mut filters = FilterState::default();
        filters.set(FilterKey::Field(PetField::Name), Some("R".to_string())).unwrap();
        filters.set_global(Some("do".to_string()));

        assert_eq!(filters.global().value.as_deref(), Some("do"));
        assert_eq!(
            filters.rule(FilterKey::Field(PetField::Name)).unwrap().value.as_deref(),
            Some("R")
        );
    }

    #[test]
    fn clear_resets_values_but_keeps_modes() {
        let mut filters = FilterState::default();
        filters.set_global(Some("do".to_string()));
        filters.set_match_mode(FilterKey::Field(PetField::Name), MatchMode::Equals).unwrap();
        filters.set(FilterKey::Field(PetField::Name), Some("Rex".to_string())).unwrap();

        filters.clear();

        assert!(filters.is_inactive());
        assert_eq!(
            filters.rule(FilterKey::Field(PetField::Name)).unwrap().match_mode,
            MatchMode::Equals
        );
    }

    #[test]
    fn global_match_mode_cannot_change() {
        let mut filters = FilterState::default();
        let err = filters.set_match_mode(FilterKey::Global, MatchMode::StartsWith);

        assert!(matches!(err, Err(PetdeskError::UnknownField(_))));
        assert_eq!(filters.global().match_mode, MatchMode::Contains);
    }

    #[test]
    fn parses_filter_keys() {
        assert_eq!("GLOBAL".parse::<FilterKey>().unwrap(), FilterKey::Global);
        assert_eq!("name".parse::<FilterKey>().unwrap(), FilterKey::Field(PetField::Name));
        assert!("owner".parse::<FilterKey>().is_err());
    }
}
