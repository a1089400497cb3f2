//! StepGraph - the ordered two-tier step sequence and its gates.
//!
//! Navigation is split query-from-mutation: `can_advance` answers whether the
//! current gate passes and has no side effects; `next_position` /
//! `previous_position` are pure transition functions that never validate.
//! Callers (the controller) check the gate before transitioning.

use crate::domain::foundation::{Tier, WizardPosition};
use crate::domain::intake::{
    FieldDecl, FieldKind, FormState, Selection, SelectionRequirement, Step,
};

/// The ordered steps per tier.
///
/// Immutable once constructed; a session navigates over it but never changes
/// it.
#[derive(Debug, Clone)]
pub struct StepGraph {
    main: Vec<Step>,
    detail: Vec<Step>,
}

impl StepGraph {
    /// Builds a graph from explicit step lists. Both tiers must be non-empty.
    pub fn new(main: Vec<Step>, detail: Vec<Step>) -> Self {
        assert!(!main.is_empty(), "Main tier must have at least one step");
        assert!(!detail.is_empty(), "FormDetail tier must have at least one step");
        Self { main, detail }
    }

    /// The canonical dental intake configuration:
    /// specialty -> form-type/clinic -> personal info -> medical history ->
    /// exam -> review.
    pub fn dental_intake() -> Self {
        Self::new(
            vec![
                Step::selection("specialty", vec![SelectionRequirement::Specialty]),
                Step::selection(
                    "form_setup",
                    vec![SelectionRequirement::FormType, SelectionRequirement::Clinic],
                ),
            ],
            vec![
                Step::form(
                    "personal_info",
                    vec![
                        FieldDecl::new("first_name", FieldKind::Text),
                        FieldDecl::new("last_name", FieldKind::Text),
                        FieldDecl::new("date_of_birth", FieldKind::Text),
                        FieldDecl::new("age", FieldKind::Derived),
                        FieldDecl::new("gender", FieldKind::SingleChoice),
                        FieldDecl::new("phone", FieldKind::Text),
                        FieldDecl::new("email", FieldKind::Text),
                        FieldDecl::new("address", FieldKind::Text),
                    ],
                    vec!["first_name", "last_name", "date_of_birth", "gender", "phone"],
                )
                .with_predicate(age_is_plausible),
                Step::form(
                    "medical_history",
                    vec![
                        FieldDecl::new("medical_conditions", FieldKind::MultiChoice),
                        FieldDecl::new("allergies", FieldKind::MultiChoice),
                        FieldDecl::new("current_medications", FieldKind::Text),
                        FieldDecl::new("smoking_status", FieldKind::SingleChoice),
                    ],
                    vec!["smoking_status"],
                ),
                Step::form(
                    "exam",
                    vec![
                        FieldDecl::new("chief_complaint", FieldKind::Text),
                        FieldDecl::new("oral_hygiene", FieldKind::SingleChoice),
                        FieldDecl::new("teeth_condition", FieldKind::MultiChoice),
                        FieldDecl::new("xray_taken", FieldKind::SingleChoice),
                        FieldDecl::new("exam_notes", FieldKind::Text),
                    ],
                    vec!["chief_complaint", "oral_hygiene"],
                ),
                Step::form(
                    "review",
                    vec![
                        FieldDecl::new("consent", FieldKind::SingleChoice),
                        FieldDecl::new("additional_notes", FieldKind::Text),
                    ],
                    vec!["consent"],
                )
                .with_predicate(consent_given),
            ],
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Looks up the step at a position, if it exists.
    pub fn step(&self, position: WizardPosition) -> Option<&Step> {
        match position.tier {
            Tier::Main => self.main.get(position.index),
            Tier::FormDetail => self.detail.get(position.index),
        }
    }

    /// Index of the last Main-tier step.
    pub fn last_main_index(&self) -> usize {
        self.main.len() - 1
    }

    /// Index of the last FormDetail-tier step.
    pub fn last_detail_index(&self) -> usize {
        self.detail.len() - 1
    }

    /// The position submission happens from.
    pub fn final_position(&self) -> WizardPosition {
        WizardPosition::new(Tier::FormDetail, self.last_detail_index())
    }

    /// True if this is the final FormDetail step.
    pub fn is_final(&self, position: WizardPosition) -> bool {
        position == self.final_position()
    }

    /// Every field declared anywhere in the configuration.
    pub fn declared_fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.main
            .iter()
            .chain(self.detail.iter())
            .flat_map(|s| s.fields().iter())
    }

    /// Evaluates the exit gate for a position. No side effects.
    pub fn can_advance(
        &self,
        position: WizardPosition,
        state: &FormState,
        selection: &Selection,
    ) -> bool {
        self.missing_requirements(position, state, selection)
            .is_empty()
    }

    /// The names of every unmet requirement at a position.
    ///
    /// For Main-tier steps these are unsatisfied selections; for
    /// FormDetail-tier steps, empty required fields. A failed custom
    /// predicate reports the step's own name. Unknown positions report
    /// themselves as unmet, so a drifted caller can never advance.
    pub fn missing_requirements(
        &self,
        position: WizardPosition,
        state: &FormState,
        selection: &Selection,
    ) -> Vec<String> {
        let step = match self.step(position) {
            Some(step) => step,
            None => return vec![format!("{}", position)],
        };

        let mut missing: Vec<String> = Vec::new();

        for requirement in step.required_selections() {
            let satisfied = match requirement {
                SelectionRequirement::Specialty => selection.specialty.is_some(),
                SelectionRequirement::FormType => selection.form_type.is_some(),
                SelectionRequirement::Clinic => selection.clinic.is_some(),
            };
            if !satisfied {
                missing.push(requirement.name().to_string());
            }
        }

        for field in step.required_fields() {
            if !state.is_filled(field) {
                missing.push((*field).to_string());
            }
        }

        if missing.is_empty() {
            if let Some(predicate) = step.predicate() {
                if !predicate(state) {
                    missing.push(step.name().to_string());
                }
            }
        }

        missing
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions (pure; callers gate with can_advance first)
    // ─────────────────────────────────────────────────────────────────────────

    /// The position after `position`, or `None` at the final step.
    ///
    /// The last Main step transitions into `(FormDetail, 0)`.
    pub fn next_position(&self, position: WizardPosition) -> Option<WizardPosition> {
        match position.tier {
            Tier::Main if position.index < self.last_main_index() => {
                Some(WizardPosition::new(Tier::Main, position.index + 1))
            }
            Tier::Main => Some(WizardPosition::new(Tier::FormDetail, 0)),
            Tier::FormDetail if position.index < self.last_detail_index() => {
                Some(WizardPosition::new(Tier::FormDetail, position.index + 1))
            }
            Tier::FormDetail => None,
        }
    }

    /// The position before `position`, or `None` at the very first step.
    ///
    /// `(FormDetail, 0)` transitions back to the last Main step, re-entering
    /// the Main-tier view.
    pub fn previous_position(&self, position: WizardPosition) -> Option<WizardPosition> {
        match position.tier {
            Tier::Main if position.index == 0 => None,
            Tier::Main => Some(WizardPosition::new(Tier::Main, position.index - 1)),
            Tier::FormDetail if position.index == 0 => {
                Some(WizardPosition::new(Tier::Main, self.last_main_index()))
            }
            Tier::FormDetail => Some(WizardPosition::new(Tier::FormDetail, position.index - 1)),
        }
    }
}

/// Personal-info predicate: a derived age, once present, must not be negative
/// (a future date of birth).
fn age_is_plausible(state: &FormState) -> bool {
    match state.get("age").and_then(|v| v.as_text()) {
        Some(text) => text.parse::<i32>().map(|age| age >= 0).unwrap_or(false),
        None => false,
    }
}

/// Review predicate: the consent choice must be an explicit "yes".
fn consent_given(state: &FormState) -> bool {
    state.get("consent").and_then(|v| v.as_text()) == Some("yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::{derive_age, Derivation, FieldStore, FormType, Specialty};

    fn graph() -> StepGraph {
        StepGraph::dental_intake()
    }

    fn store(graph: &StepGraph) -> FieldStore {
        FieldStore::for_graph(
            graph,
            vec![Derivation {
                source: "date_of_birth",
                target: "age",
                derive: derive_age,
            }],
        )
    }

    fn main(i: usize) -> WizardPosition {
        WizardPosition::new(Tier::Main, i)
    }

    fn detail(i: usize) -> WizardPosition {
        WizardPosition::new(Tier::FormDetail, i)
    }

    // Gate tests

    #[test]
    fn main_zero_requires_specialty() {
        let graph = graph();
        let state = FormState::default();
        let mut selection = Selection::default();
        assert!(!graph.can_advance(main(0), &state, &selection));

        selection.specialty = Some(Specialty::Orthodontic);
        assert!(graph.can_advance(main(0), &state, &selection));
    }

    #[test]
    fn last_main_requires_form_type_and_clinic() {
        let graph = graph();
        let state = FormState::default();
        let mut selection = Selection {
            specialty: Some(Specialty::Orthodontic),
            ..Selection::default()
        };
        assert!(!graph.can_advance(main(1), &state, &selection));

        selection.form_type = Some(FormType::Registration);
        assert!(!graph.can_advance(main(1), &state, &selection));

        selection.clinic = Some("Main Clinic".to_string());
        assert!(graph.can_advance(main(1), &state, &selection));
    }

    #[test]
    fn missing_requirements_names_unmet_selections() {
        let graph = graph();
        let missing =
            graph.missing_requirements(main(1), &FormState::default(), &Selection::default());
        assert_eq!(missing, vec!["form_type".to_string(), "clinic".to_string()]);
    }

    #[test]
    fn personal_info_gate_requires_all_required_fields() {
        let graph = graph();
        let mut store = store(&graph);
        let selection = Selection::default();

        assert!(!graph.can_advance(detail(0), store.state(), &selection));

        store.set("first_name", "Mona").unwrap();
        store.set("last_name", "Hassan").unwrap();
        store.set("date_of_birth", "1990-04-12").unwrap();
        store.set("gender", "female").unwrap();
        assert!(!graph.can_advance(detail(0), store.state(), &selection));

        store.set("phone", "0100000000").unwrap();
        assert!(graph.can_advance(detail(0), store.state(), &selection));
    }

    #[test]
    fn future_date_of_birth_fails_personal_info_predicate() {
        let graph = graph();
        let mut store = store(&graph);
        store.set("first_name", "Mona").unwrap();
        store.set("last_name", "Hassan").unwrap();
        store.set("date_of_birth", "2090-01-01").unwrap();
        store.set("gender", "female").unwrap();
        store.set("phone", "0100000000").unwrap();

        let missing =
            graph.missing_requirements(detail(0), store.state(), &Selection::default());
        assert_eq!(missing, vec!["personal_info".to_string()]);
    }

    #[test]
    fn review_gate_requires_explicit_consent() {
        let graph = graph();
        let mut store = store(&graph);
        let selection = Selection::default();
        let review = graph.final_position();

        store.set("consent", "no").unwrap();
        assert!(!graph.can_advance(review, store.state(), &selection));

        store.set("consent", "yes").unwrap();
        assert!(graph.can_advance(review, store.state(), &selection));
    }

    #[test]
    fn unknown_position_never_advances() {
        let graph = graph();
        assert!(!graph.can_advance(detail(99), &FormState::default(), &Selection::default()));
    }

    // Transition tests

    #[test]
    fn next_walks_main_then_crosses_into_form_detail() {
        let graph = graph();
        assert_eq!(graph.next_position(main(0)), Some(main(1)));
        assert_eq!(graph.next_position(main(1)), Some(detail(0)));
        assert_eq!(graph.next_position(detail(0)), Some(detail(1)));
        assert_eq!(graph.next_position(detail(3)), None);
    }

    #[test]
    fn previous_crosses_back_from_form_detail_zero() {
        let graph = graph();
        assert_eq!(graph.previous_position(detail(0)), Some(main(1)));
        assert_eq!(graph.previous_position(detail(2)), Some(detail(1)));
        assert_eq!(graph.previous_position(main(1)), Some(main(0)));
        assert_eq!(graph.previous_position(main(0)), None);
    }

    #[test]
    fn next_then_previous_is_identity_off_the_edges() {
        let graph = graph();
        for pos in [main(0), main(1), detail(0), detail(1), detail(2)] {
            let there = graph.next_position(pos).unwrap();
            assert_eq!(graph.previous_position(there), Some(pos));
        }
    }

    #[test]
    fn final_position_is_last_detail_step() {
        let graph = graph();
        assert_eq!(graph.final_position(), detail(3));
        assert!(graph.is_final(detail(3)));
        assert!(!graph.is_final(detail(2)));
    }

    #[test]
    fn declared_fields_cover_every_detail_step() {
        let graph = graph();
        let names: Vec<&str> = graph.declared_fields().map(|d| d.name).collect();
        assert!(names.contains(&"first_name"));
        assert!(names.contains(&"smoking_status"));
        assert!(names.contains(&"chief_complaint"));
        assert!(names.contains(&"consent"));
    }
}
