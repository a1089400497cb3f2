//! FieldValue - the tagged union behind every form field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// The shape a field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text entered by the user.
    Text,
    /// Exactly one option from an enumerated set, or none yet.
    SingleChoice,
    /// Any subset of an enumerated set.
    MultiChoice,
    /// Computed from another field; never user-writable.
    Derived,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldKind::Text => "text",
            FieldKind::SingleChoice => "single-choice",
            FieldKind::MultiChoice => "multi-choice",
            FieldKind::Derived => "derived",
        };
        write!(f, "{}", s)
    }
}

/// A single form field's value.
///
/// # Invariants
///
/// - `Derived` values are only written by the derivation machinery in
///   `FieldStore`, never directly by user input.
/// - `MultiChoice` has set semantics; insertion order is not significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    SingleChoice(Option<String>),
    MultiChoice(BTreeSet<String>),
    Derived(Option<String>),
}

impl FieldValue {
    /// The empty value for a given kind. Every declared field starts here.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::SingleChoice => FieldValue::SingleChoice(None),
            FieldKind::MultiChoice => FieldValue::MultiChoice(BTreeSet::new()),
            FieldKind::Derived => FieldValue::Derived(None),
        }
    }

    /// Returns the kind this value belongs to.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::SingleChoice(_) => FieldKind::SingleChoice,
            FieldValue::MultiChoice(_) => FieldKind::MultiChoice,
            FieldValue::Derived(_) => FieldKind::Derived,
        }
    }

    /// A field counts as empty until the user (or a derivation) has put
    /// something meaningful in it. Gates treat empty as "not filled".
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::SingleChoice(v) => v.is_none(),
            FieldValue::MultiChoice(set) => set.is_empty(),
            FieldValue::Derived(v) => v.is_none(),
        }
    }

    /// Returns the text content for text-like values, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            FieldValue::SingleChoice(v) | FieldValue::Derived(v) => v.as_deref(),
            FieldValue::MultiChoice(_) => None,
        }
    }

    /// Flattens the value for payload assembly.
    ///
    /// Text and choices become JSON strings (or null when unset); multi-choice
    /// becomes a sorted JSON array.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::SingleChoice(v) | FieldValue::Derived(v) => match v {
                Some(s) => Value::String(s.clone()),
                None => Value::Null,
            },
            FieldValue::MultiChoice(set) => {
                Value::Array(set.iter().cloned().map(Value::String).collect())
            }
        }
    }
}
