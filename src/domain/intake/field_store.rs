//! FieldStore - holds and mutates the wizard's form data.
//!
//! The store is constructed from the step configuration, so every declared
//! field is present (empty-valued) from the start and exit gates never
//! observe missing keys. Derived fields are recomputed synchronously inside
//! `set`, so the state is never left with a stale derived value.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::foundation::WizardError;
use crate::domain::intake::{FieldKind, FieldValue, StepGraph};

/// The full form data: field name -> value.
///
/// Equality is structural, which the retreat/advance idempotence guarantee
/// relies on in tests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FormState(BTreeMap<String, FieldValue>);

impl FormState {
    /// Looks up a field's value.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    /// Returns true if the field exists and holds a non-empty value.
    pub fn is_filled(&self, field: &str) -> bool {
        self.0.get(field).map(|v| !v.is_empty()).unwrap_or(false)
    }

    /// Iterates over all fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no fields are declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: String, value: FieldValue) {
        self.0.insert(field, value);
    }

    fn get_mut(&mut self, field: &str) -> Option<&mut FieldValue> {
        self.0.get_mut(field)
    }
}

/// A registered derived-field rule: whenever `source` changes, recompute
/// `target` from it.
#[derive(Clone)]
pub struct Derivation {
    pub source: &'static str,
    pub target: &'static str,
    pub derive: fn(&FieldValue) -> Result<FieldValue, WizardError>,
}

/// Holds the form state plus the field schema it was declared with.
#[derive(Clone)]
pub struct FieldStore {
    state: FormState,
    kinds: BTreeMap<String, FieldKind>,
    derivations: Vec<Derivation>,
}

impl FieldStore {
    /// Builds a store covering every field declared anywhere in the graph,
    /// each initialized to its empty value.
    pub fn for_graph(graph: &StepGraph, derivations: Vec<Derivation>) -> Self {
        let mut state = FormState::default();
        let mut kinds = BTreeMap::new();
        for decl in graph.declared_fields() {
            state.insert(decl.name.to_string(), FieldValue::empty(decl.kind));
            kinds.insert(decl.name.to_string(), decl.kind);
        }
        Self {
            state,
            kinds,
            derivations,
        }
    }

    /// Read-only view of the current form state.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Sets a user-writable field to a new value.
    ///
    /// Text fields take the value verbatim; single-choice fields treat an
    /// empty string as "cleared". Registered dependents of the field are
    /// recomputed before returning, so the state is fully consistent
    /// afterwards. If a derivation fails (e.g. a half-typed date), the source
    /// keeps what the user typed, the dependent is cleared, and the error is
    /// surfaced.
    ///
    /// # Errors
    ///
    /// - `UnknownField` if no step declares the field
    /// - `TypeMismatch` for multi-choice (use `toggle_multi`) or derived fields
    /// - `InvalidDate` propagated from a failed derivation
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), WizardError> {
        let kind = *self
            .kinds
            .get(field)
            .ok_or_else(|| WizardError::unknown_field(field))?;

        let value = value.into();
        let new_value = match kind {
            FieldKind::Text => FieldValue::Text(value),
            FieldKind::SingleChoice => {
                if value.is_empty() {
                    FieldValue::SingleChoice(None)
                } else {
                    FieldValue::SingleChoice(Some(value))
                }
            }
            FieldKind::MultiChoice => {
                return Err(WizardError::type_mismatch(field, "text or single-choice"));
            }
            FieldKind::Derived => {
                return Err(WizardError::type_mismatch(field, "user-writable"));
            }
        };

        self.state.insert(field.to_string(), new_value);
        self.recompute_dependents(field)
    }

    /// Toggles an option on a multi-choice field (set semantics).
    ///
    /// # Errors
    ///
    /// - `UnknownField` if no step declares the field
    /// - `TypeMismatch` if the field is not multi-choice
    pub fn toggle_multi(&mut self, field: &str, option: &str) -> Result<(), WizardError> {
        if !self.kinds.contains_key(field) {
            return Err(WizardError::unknown_field(field));
        }
        match self.state.get_mut(field) {
            Some(FieldValue::MultiChoice(set)) => {
                if !set.remove(option) {
                    set.insert(option.to_string());
                }
                Ok(())
            }
            _ => Err(WizardError::type_mismatch(field, "multi-choice")),
        }
    }

    /// Resets every field back to its empty value.
    pub fn reset(&mut self) {
        for (name, kind) in &self.kinds {
            self.state.insert(name.clone(), FieldValue::empty(*kind));
        }
    }

    fn recompute_dependents(&mut self, changed: &str) -> Result<(), WizardError> {
        // Derivations are a single hop (dob -> age); no chaining needed.
        let rules: Vec<Derivation> = self
            .derivations
            .iter()
            .filter(|d| d.source == changed)
            .cloned()
            .collect();

        for rule in rules {
            let source_value = self
                .state
                .get(rule.source)
                .cloned()
                .unwrap_or(FieldValue::Text(String::new()));
            match (rule.derive)(&source_value) {
                Ok(derived) => {
                    self.state.insert(rule.target.to_string(), derived);
                }
                Err(e) => {
                    // Clear the dependent so no stale value survives, then
                    // surface the derivation failure.
                    if let Some(kind) = self.kinds.get(rule.target) {
                        self.state
                            .insert(rule.target.to_string(), FieldValue::empty(*kind));
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{derive_age, StepGraph};

    fn store() -> FieldStore {
        FieldStore::for_graph(
            &StepGraph::dental_intake(),
            vec![Derivation {
                source: "date_of_birth",
                target: "age",
                derive: derive_age,
            }],
        )
    }

    #[test]
    fn all_declared_fields_start_empty() {
        let store = store();
        assert!(store.state().get("first_name").is_some());
        assert!(store.state().get("age").is_some());
        assert!(!store.state().is_filled("first_name"));
        assert!(!store.state().is_filled("age"));
    }

    #[test]
    fn set_unknown_field_fails() {
        let mut store = store();
        let err = store.set("shoe_size", "42").unwrap_err();
        assert!(matches!(err, WizardError::UnknownField { .. }));
    }

    #[test]
    fn set_updates_text_field() {
        let mut store = store();
        store.set("first_name", "Mona").unwrap();
        assert_eq!(
            store.state().get("first_name"),
            Some(&FieldValue::Text("Mona".to_string()))
        );
    }

    #[test]
    fn setting_dob_recomputes_age() {
        let mut store = store();
        store.set("date_of_birth", "1990-01-01").unwrap();
        assert!(store.state().is_filled("age"));
    }

    #[test]
    fn clearing_dob_clears_age() {
        let mut store = store();
        store.set("date_of_birth", "1990-01-01").unwrap();
        store.set("date_of_birth", "").unwrap();
        assert!(!store.state().is_filled("age"));
    }

    #[test]
    fn invalid_dob_surfaces_error_and_clears_age() {
        let mut store = store();
        store.set("date_of_birth", "1990-01-01").unwrap();
        let err = store.set("date_of_birth", "1990-13-45").unwrap_err();
        assert!(matches!(err, WizardError::InvalidDate { .. }));
        // No stale derived value survives the failure.
        assert!(!store.state().is_filled("age"));
        // The user's typed text is preserved for correction.
        assert_eq!(
            store.state().get("date_of_birth").and_then(|v| v.as_text()),
            Some("1990-13-45")
        );
    }

    #[test]
    fn age_is_not_directly_writable() {
        let mut store = store();
        let err = store.set("age", "99").unwrap_err();
        assert!(matches!(err, WizardError::TypeMismatch { .. }));
    }

    #[test]
    fn toggle_adds_then_removes_option() {
        let mut store = store();
        store.toggle_multi("medical_conditions", "diabetes").unwrap();
        assert!(store.state().is_filled("medical_conditions"));
        store.toggle_multi("medical_conditions", "diabetes").unwrap();
        assert!(!store.state().is_filled("medical_conditions"));
    }

    #[test]
    fn toggle_on_text_field_is_type_mismatch() {
        let mut store = store();
        let err = store.toggle_multi("first_name", "x").unwrap_err();
        assert!(matches!(err, WizardError::TypeMismatch { .. }));
    }

    #[test]
    fn toggle_on_unknown_field_fails() {
        let mut store = store();
        let err = store.toggle_multi("shoe_size", "x").unwrap_err();
        assert!(matches!(err, WizardError::UnknownField { .. }));
    }

    #[test]
    fn reset_empties_every_field() {
        let mut store = store();
        store.set("first_name", "Mona").unwrap();
        store.toggle_multi("allergies", "penicillin").unwrap();
        store.reset();
        assert!(!store.state().is_filled("first_name"));
        assert!(!store.state().is_filled("allergies"));
    }
}
