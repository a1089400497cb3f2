//! CasePayload - the flattened submission payload.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::foundation::{CaseSessionId, Timestamp};
use crate::domain::intake::{FormState, Selection};

/// The assembled case: session metadata plus the flattened union of the
/// session-scoped selections and every form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CasePayload {
    pub session_id: CaseSessionId,
    pub assembled_at: Timestamp,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl CasePayload {
    /// Flattens `Selection ∪ FormState` into a single JSON object.
    ///
    /// Selection entries come first; field names are disjoint from selection
    /// names by construction of the step table.
    pub fn assemble(session_id: CaseSessionId, selection: &Selection, state: &FormState) -> Self {
        let mut fields = Map::new();
        for (name, value) in selection.to_json_entries() {
            fields.insert(name.to_string(), value);
        }
        for (name, value) in state.iter() {
            fields.insert(name.to_string(), value.to_json());
        }
        Self {
            session_id,
            assembled_at: Timestamp::now(),
            fields,
        }
    }

    /// Looks up a flattened entry by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Number of flattened entries.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the payload carries no entries.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
