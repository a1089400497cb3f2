//! In-memory submission gateway for testing.
//!
//! Provides synchronous, deterministic submission capture for unit and
//! integration tests. Not for production use.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::WizardError;
use crate::domain::intake::CasePayload;
use crate::ports::SubmissionGateway;

/// Capturing gateway stub.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. Acceptable for test
/// code; this adapter should NOT be used in production.
#[derive(Default)]
pub struct MockSubmissionGateway {
    submitted: Mutex<Vec<CasePayload>>,
    fail_with: Mutex<Option<String>>,
}

impl MockSubmissionGateway {
    /// Creates a gateway that accepts every submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway that rejects every submission with the given detail.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
            fail_with: Mutex::new(Some(detail.into())),
        }
    }

    /// Switches the scripted outcome: `None` accepts, `Some` rejects.
    pub fn set_failure(&self, detail: Option<String>) {
        *self
            .fail_with
            .lock()
            .expect("MockSubmissionGateway: fail_with lock poisoned") = detail;
    }

    /// Returns all captured payloads (for test assertions).
    pub fn submitted_payloads(&self) -> Vec<CasePayload> {
        self.submitted
            .lock()
            .expect("MockSubmissionGateway: submitted lock poisoned")
            .clone()
    }

    /// Number of accepted submissions.
    pub fn submission_count(&self) -> usize {
        self.submitted_payloads().len()
    }
}

#[async_trait]
impl SubmissionGateway for MockSubmissionGateway {
    async fn submit(&self, payload: &CasePayload) -> Result<(), WizardError> {
        let scripted = self
            .fail_with
            .lock()
            .expect("MockSubmissionGateway: fail_with lock poisoned")
            .clone();
        if let Some(detail) = scripted {
            return Err(WizardError::submission_failed(detail));
        }
        self.submitted
            .lock()
            .expect("MockSubmissionGateway: submitted lock poisoned")
            .push(payload.clone());
        Ok(())
    }
}
