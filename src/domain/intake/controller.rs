//! WizardController - end-to-end sequencing of one intake session.
//!
//! The controller is the only writer of `WizardPosition` and mediates every
//! FormState mutation; nothing else touches the store once a session is
//! active. That exclusivity is what makes the validation gates trustworthy.

use crate::domain::foundation::{CaseSessionId, Timestamp, WizardError, WizardPosition};
use crate::domain::intake::{
    derive_age, CasePayload, Derivation, FieldStore, FormState, FormType, Selection, Specialty,
    StepGraph,
};
use crate::ports::UserProfile;

/// Drives a single case-intake session over a `StepGraph`.
pub struct WizardController {
    session_id: CaseSessionId,
    graph: StepGraph,
    store: FieldStore,
    selection: Selection,
    position: WizardPosition,
    profile: UserProfile,
    started_at: Timestamp,
}

impl WizardController {
    /// Starts a session over the canonical dental-intake graph.
    ///
    /// If the profile's specialty maps to a supported value it is pre-filled.
    /// The one fully-supported specialty additionally skips the
    /// specialty-choice step (see [`Specialty::skips_choice_step`]); all
    /// others leave the user at step 0 with the choice pre-filled and still
    /// editable.
    pub fn start(profile: UserProfile) -> Self {
        Self::with_graph(StepGraph::dental_intake(), profile)
    }

    /// Starts a session over a custom graph. The standard date-of-birth ->
    /// age derivation is always wired in.
    pub fn with_graph(graph: StepGraph, profile: UserProfile) -> Self {
        let store = FieldStore::for_graph(&graph, standard_derivations());
        let mut controller = Self {
            session_id: CaseSessionId::new(),
            graph,
            store,
            selection: Selection::default(),
            position: WizardPosition::initial(),
            profile,
            started_at: Timestamp::now(),
        };
        controller.apply_profile();
        controller
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> CaseSessionId {
        self.session_id
    }

    pub fn position(&self) -> WizardPosition {
        self.position
    }

    pub fn form(&self) -> &FormState {
        self.store.state()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    /// True when the session sits on the final FormDetail step.
    pub fn at_final_step(&self) -> bool {
        self.graph.is_final(self.position)
    }

    /// Evaluates the current step's exit gate. No side effects.
    pub fn can_advance(&self) -> bool {
        self.graph
            .can_advance(self.position, self.store.state(), &self.selection)
    }

    /// Names of the requirements currently blocking `advance`.
    pub fn missing_requirements(&self) -> Vec<String> {
        self.graph
            .missing_requirements(self.position, self.store.state(), &self.selection)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection intents
    // ─────────────────────────────────────────────────────────────────────────

    pub fn select_specialty(&mut self, specialty: Specialty) {
        self.selection.specialty = Some(specialty);
    }

    pub fn select_form_type(&mut self, form_type: FormType) {
        self.selection.form_type = Some(form_type);
    }

    /// Selects the clinic for this case.
    ///
    /// # Errors
    ///
    /// - `UnknownClinic` if the profile carries a clinic list and the choice
    ///   is not on it
    pub fn select_clinic(&mut self, clinic: impl Into<String>) -> Result<(), WizardError> {
        let clinic = clinic.into();
        if !self.profile.clinics.is_empty() && !self.profile.clinics.iter().any(|c| c == &clinic) {
            return Err(WizardError::unknown_clinic(clinic));
        }
        self.selection.clinic = Some(clinic);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Field intents
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets a form field, recomputing any derived dependents.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<(), WizardError> {
        self.store.set(field, value)
    }

    /// Toggles an option on a multi-choice field.
    pub fn toggle_multi(&mut self, field: &str, option: &str) -> Result<(), WizardError> {
        self.store.toggle_multi(field, option)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Advances to the next step if the current gate passes.
    ///
    /// The position change is atomic: on any error the position is untouched.
    ///
    /// # Errors
    ///
    /// - `GateNotSatisfied` with the unmet requirement names, or with
    ///   `end_of_wizard` when already at the final step (submission is the
    ///   only way forward from there)
    pub fn advance(&mut self) -> Result<WizardPosition, WizardError> {
        let missing = self.missing_requirements();
        if !missing.is_empty() {
            return Err(WizardError::gate_not_satisfied(self.position, missing));
        }
        match self.graph.next_position(self.position) {
            Some(next) => {
                self.position = next;
                Ok(next)
            }
            None => Err(WizardError::gate_not_satisfied(
                self.position,
                vec!["end_of_wizard".to_string()],
            )),
        }
    }

    /// Moves back one step. Ungated; a no-op at the very first step.
    ///
    /// Never discards form state: everything already entered survives, so
    /// going forward again needs no re-entry.
    pub fn retreat(&mut self) -> WizardPosition {
        if let Some(previous) = self.graph.previous_position(self.position) {
            self.position = previous;
        }
        self.position
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submission support
    // ─────────────────────────────────────────────────────────────────────────

    /// Assembles the submission payload (`Selection ∪ FormState`, flattened).
    ///
    /// Permitted only at the final FormDetail step with that step's gate
    /// satisfied.
    ///
    /// # Errors
    ///
    /// - `GateNotSatisfied` if not at the final step or its requirements are
    ///   unmet
    pub fn assemble_payload(&self) -> Result<CasePayload, WizardError> {
        if !self.at_final_step() {
            return Err(WizardError::gate_not_satisfied(
                self.position,
                vec!["final_step".to_string()],
            ));
        }
        let missing = self.missing_requirements();
        if !missing.is_empty() {
            return Err(WizardError::gate_not_satisfied(self.position, missing));
        }
        Ok(CasePayload::assemble(
            self.session_id,
            &self.selection,
            self.store.state(),
        ))
    }

    /// Full session reset after a successful submission (or abandonment):
    /// fresh session id, empty form and selection, initial position, with the
    /// profile shortcut re-applied. One case at a time.
    pub fn reset(&mut self) {
        self.session_id = CaseSessionId::new();
        self.store.reset();
        self.selection = Selection::default();
        self.position = WizardPosition::initial();
        self.started_at = Timestamp::now();
        self.apply_profile();
    }

    fn apply_profile(&mut self) {
        let mapped = self
            .profile
            .specialty
            .as_deref()
            .and_then(Specialty::from_profile_label);
        if let Some(specialty) = mapped {
            self.selection.specialty = Some(specialty);
            if specialty.skips_choice_step() && self.graph.last_main_index() >= 1 {
                self.position = WizardPosition::new(self.position.tier, 1);
            }
        }
    }
}

/// The derivations every intake session carries.
fn standard_derivations() -> Vec<Derivation> {
    vec![Derivation {
        source: "date_of_birth",
        target: "age",
        derive: derive_age,
    }]
}
