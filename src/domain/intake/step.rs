//! Step definitions - what each wizard step declares and requires.
//!
//! Steps are configured once at wizard construction and never change during a
//! session. The declarative required-field table decouples "what must be
//! filled" from how any of it is rendered.

use crate::domain::intake::{FieldKind, FormState};

/// A field declared by a step: name plus shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDecl {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Session-scoped choice a Main-tier step requires before it can be left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRequirement {
    Specialty,
    FormType,
    Clinic,
}

impl SelectionRequirement {
    /// The name reported in gate errors and view snapshots.
    pub fn name(&self) -> &'static str {
        match self {
            SelectionRequirement::Specialty => "specialty",
            SelectionRequirement::FormType => "form_type",
            SelectionRequirement::Clinic => "clinic",
        }
    }
}

/// Custom validation beyond "required fields are non-empty".
pub type StepPredicate = fn(&FormState) -> bool;

/// One wizard step.
///
/// Main-tier steps gate on selection requirements; FormDetail-tier steps gate
/// on their required fields plus an optional predicate.
#[derive(Debug, Clone)]
pub struct Step {
    name: &'static str,
    fields: Vec<FieldDecl>,
    required_fields: Vec<&'static str>,
    required_selections: Vec<SelectionRequirement>,
    predicate: Option<StepPredicate>,
}

impl Step {
    /// A Main-tier step gated by session-scoped choices.
    pub fn selection(name: &'static str, required: Vec<SelectionRequirement>) -> Self {
        Self {
            name,
            fields: Vec::new(),
            required_fields: Vec::new(),
            required_selections: required,
            predicate: None,
        }
    }

    /// A FormDetail-tier step declaring fields, of which `required` must be
    /// non-empty before the step can be left.
    pub fn form(
        name: &'static str,
        fields: Vec<FieldDecl>,
        required: Vec<&'static str>,
    ) -> Self {
        debug_assert!(
            required
                .iter()
                .all(|r| fields.iter().any(|f| f.name == *r)),
            "required fields must be declared by the step"
        );
        Self {
            name,
            fields,
            required_fields: required,
            required_selections: Vec::new(),
            predicate: None,
        }
    }

    /// Attaches a custom validation predicate.
    pub fn with_predicate(mut self, predicate: StepPredicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn required_fields(&self) -> &[&'static str] {
        &self.required_fields
    }

    pub fn required_selections(&self) -> &[SelectionRequirement] {
        &self.required_selections
    }

    pub fn predicate(&self) -> Option<StepPredicate> {
        self.predicate
    }
}
