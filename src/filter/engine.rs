//! Filter evaluation over the record store.
//!
//! The engine is read-only: it decides which records are visible and which
//! characters to highlight, and never touches the store itself.

use crate::domain::{Pet, PetField};
use crate::filter::state::{FilterState, GLOBAL_FIELDS};

/// Highlight ranges of one record, per field, in characters (end exclusive).
pub type Highlights = Vec<(PetField, (usize, usize))>;

/// Evaluates a [`FilterState`] against records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEngine {
    global_fields: Vec<PetField>,
    case_sensitive: bool,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl FilterEngine {
    /// Creates an engine searching `id`, `name` and `description` globally.
    #[must_use]
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            global_fields: GLOBAL_FIELDS.to_vec(),
            case_sensitive,
        }
    }

    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns `true` if `pet` passes every active rule.
    ///
    /// The global rule passes if ANY global field matches; column rules must
    /// all pass.
    #[must_use]
    pub fn matches(&self, filters: &FilterState, pet: &Pet) -> bool {
        let global = filters.global();
        let global_ok = global.active_value().map_or(true, |needle| {
            self.global_fields.iter().any(|field| {
                global
                    .match_mode
                    .matches(&pet.field(*field), needle, self.case_sensitive)
            })
        });

        global_ok
            && filters.field_rules().all(|(field, rule)| {
                rule.active_value().map_or(true, |needle| {
                    rule.match_mode
                        .matches(&pet.field(field), needle, self.case_sensitive)
                })
            })
    }

    /// Per-record match flags, in record order.
    #[must_use]
    pub fn apply(&self, filters: &FilterState, pets: &[Pet]) -> Vec<bool> {
        let _span = tracing::debug_span!("apply_filters", total_pets = pets.len()).entered();

        if filters.is_inactive() {
            return vec![true; pets.len()];
        }

        let flags: Vec<bool> = pets.iter().map(|pet| self.matches(filters, pet)).collect();

        tracing::debug!(
            visible_count = flags.iter().filter(|flag| **flag).count(),
            "filters applied"
        );
        flags
    }

    /// Indices of the visible records, in record order.
    #[must_use]
    pub fn visible(&self, filters: &FilterState, pets: &[Pet]) -> Vec<usize> {
        self.apply(filters, pets)
            .into_iter()
            .enumerate()
            .filter_map(|(index, visible)| visible.then_some(index))
            .collect()
    }

    /// Character ranges matched by the global rule in each global field.
    #[must_use]
    pub fn highlights(&self, filters: &FilterState, pet: &Pet) -> Highlights {
        let global = filters.global();
        let Some(needle) = global.active_value() else {
            return Vec::new();
        };

        self.global_fields
            .iter()
            .filter_map(|field| {
                global
                    .match_mode
                    .match_range(&pet.field(*field), needle, self.case_sensitive)
                    .map(|range| (*field, range))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::state::FilterKey;

    fn pets() -> Vec<Pet> {
        vec![
            Pet::new("Fido", "dog").with_id(1),
            Pet::new("Rex", "cat").with_id(2),
        ]
    }

    #[test]
    fn inactive_rules_show_everything() {
        let engine = FilterEngine::default();
        assert_eq!(engine.visible(&FilterState::default(), &pets()), vec![0, 1]);
    }

    #[test]
    fn global_rule_searches_any_field() {
        let engine = FilterEngine::default();
        let mut filters = FilterState::default();
        filters.set_global(Some("do".to_string()));

        assert_eq!(engine.apply(&filters, &pets()), vec![true, false]);

        filters.set_global(Some("2".to_string()));
        assert_eq!(engine.visible(&filters, &pets()), vec![1]);
    }

    #[test]
    fn column_rule_uses_its_own_mode() {
        let engine = FilterEngine::default();
        let mut filters = FilterState::default();
        filters
            .set(FilterKey::Field(PetField::Name), Some("R".to_string()))
            .unwrap();

        assert_eq!(engine.visible(&filters, &pets()), vec![1]);
    }

    #[test]
    fn clear_restores_full_visibility() {
        let engine = FilterEngine::default();
        let mut filters = FilterState::default();
        filters.set_global(Some("do".to_string()));
        filters
            .set(FilterKey::Field(PetField::Description), Some("c".to_string()))
            .unwrap();
        assert!(engine.visible(&filters, &pets()).is_empty());

        filters.clear();

        assert_eq!(engine.visible(&filters, &pets()), vec![0, 1]);
        assert!(filters.global().value.is_none());
    }

    #[test]
    fn case_insensitive_engine_folds_both_sides() {
        let mut filters = FilterState::default();
        filters.set_global(Some("FIDO".to_string()));

        assert!(FilterEngine::new(true).visible(&filters, &pets()).is_empty());
        assert_eq!(FilterEngine::new(false).visible(&filters, &pets()), vec![0]);
    }

    #[test]
    fn highlights_cover_global_matches() {
        let engine = FilterEngine::default();
        let mut filters = FilterState::default();
        filters.set_global(Some("o".to_string()));

        let highlights = engine.highlights(&filters, &pets()[0]);
        assert_eq!(
            highlights,
            vec![(PetField::Name, (3, 4)), (PetField::Description, (1, 2))]
        );
    }
}
