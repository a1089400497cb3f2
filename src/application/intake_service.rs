//! IntakeService - async orchestration of a wizard session.
//!
//! The domain controller is synchronous; the service wraps it behind the
//! rendering-layer intent contract (`set_field`, `toggle_multi`, `advance`,
//! `retreat`, `submit`) and owns the single async boundary: the call into
//! the submission gateway. A reentrancy guard keeps submissions to one
//! outstanding request at a time; the UI surfaces the guard as a
//! disabled/loading state via `WizardView::submitting`.

use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::FeatureFlags;
use crate::domain::foundation::{CaseSessionId, UserId, WizardError, WizardPosition};
use crate::domain::intake::{FormState, FormType, Selection, Specialty, WizardController};
use crate::ports::{SubmissionGateway, UserProfileSource};

/// Snapshot consumed by the rendering layer to draw the current step.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub position: WizardPosition,
    pub can_advance: bool,
    pub submitting: bool,
    /// Names of the requirements blocking forward navigation. The UI uses
    /// these to disable the "Next" control rather than waiting for a failed
    /// click.
    pub errors: Vec<String>,
    pub form: FormState,
    pub selection: Selection,
}

/// Orchestrates one practitioner's intake session end-to-end.
pub struct IntakeService {
    controller: Mutex<WizardController>,
    gateway: Arc<dyn SubmissionGateway>,
    in_flight: AtomicBool,
}

impl IntakeService {
    /// Starts a session for a user, fetching their profile for the
    /// specialty/clinic pre-fill. With `auto_select_specialty` disabled the
    /// profile specialty is ignored entirely (no pre-fill, no skip).
    ///
    /// # Errors
    ///
    /// - `Infrastructure` if the profile source is unavailable
    pub async fn begin(
        user_id: &UserId,
        profiles: &dyn UserProfileSource,
        gateway: Arc<dyn SubmissionGateway>,
        features: &FeatureFlags,
    ) -> Result<Self, WizardError> {
        let mut profile = profiles.profile(user_id).await?;
        if !features.auto_select_specialty {
            profile.specialty = None;
        }

        let controller = WizardController::start(profile);
        tracing::info!(
            user_id = %user_id,
            session_id = %controller.session_id(),
            position = %controller.position(),
            "intake session started"
        );

        Ok(Self {
            controller: Mutex::new(controller),
            gateway,
            in_flight: AtomicBool::new(false),
        })
    }

    /// The current session id.
    pub async fn session_id(&self) -> CaseSessionId {
        self.controller.lock().await.session_id()
    }

    /// Snapshot for the rendering layer.
    pub async fn view(&self) -> WizardView {
        let controller = self.controller.lock().await;
        let errors = controller.missing_requirements();
        WizardView {
            position: controller.position(),
            can_advance: errors.is_empty(),
            submitting: self.in_flight.load(Ordering::Acquire),
            errors,
            form: controller.form().clone(),
            selection: controller.selection().clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // User intents
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn set_field(
        &self,
        field: &str,
        value: impl Into<String> + Send,
    ) -> Result<(), WizardError> {
        let result = self.controller.lock().await.set_field(field, value);
        self.log_outcome("set_field", &result);
        result
    }

    pub async fn toggle_multi(&self, field: &str, option: &str) -> Result<(), WizardError> {
        let result = self.controller.lock().await.toggle_multi(field, option);
        self.log_outcome("toggle_multi", &result);
        result
    }

    pub async fn select_specialty(&self, specialty: Specialty) {
        self.controller.lock().await.select_specialty(specialty);
    }

    pub async fn select_form_type(&self, form_type: FormType) {
        self.controller.lock().await.select_form_type(form_type);
    }

    pub async fn select_clinic(&self, clinic: impl Into<String> + Send) -> Result<(), WizardError> {
        self.controller.lock().await.select_clinic(clinic)
    }

    pub async fn advance(&self) -> Result<WizardPosition, WizardError> {
        let result = self.controller.lock().await.advance();
        match &result {
            Ok(position) => tracing::debug!(position = %position, "advanced"),
            Err(e) => tracing::debug!(error = %e, "advance blocked"),
        }
        result
    }

    pub async fn retreat(&self) -> WizardPosition {
        self.controller.lock().await.retreat()
    }

    /// Submits the assembled case.
    ///
    /// On success the session fully resets (one case at a time). On failure
    /// the form state and position are left untouched for retry, and the
    /// gateway's detail is surfaced. Never retried automatically.
    ///
    /// # Errors
    ///
    /// - `SubmissionInFlight` if a submission is already outstanding
    /// - `GateNotSatisfied` if the session is not at a submittable state
    /// - `SubmissionFailed` with the gateway's detail
    pub async fn submit(&self) -> Result<(), WizardError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(WizardError::SubmissionInFlight);
        }

        let result = self.submit_once().await;
        self.in_flight.store(false, Ordering::Release);
        result
    }

    async fn submit_once(&self) -> Result<(), WizardError> {
        // Assemble under the lock, then release it for the gateway call so
        // the rendering layer can keep querying the view meanwhile.
        let payload = self.controller.lock().await.assemble_payload()?;
        let session_id = payload.session_id;
        tracing::info!(session_id = %session_id, entries = payload.len(), "submitting case");

        match self.gateway.submit(&payload).await {
            Ok(()) => {
                self.controller.lock().await.reset();
                tracing::info!(session_id = %session_id, "case submitted; session reset");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    error = %e,
                    "submission failed; session preserved for retry"
                );
                Err(e)
            }
        }
    }

    fn log_outcome(&self, intent: &str, result: &Result<(), WizardError>) {
        if let Err(e) = result {
            if e.is_configuration_bug() {
                // Step table and input layer have drifted apart.
                tracing::error!(intent, error = %e, code = %e.code(), "configuration bug");
            } else {
                tracing::debug!(intent, error = %e, "rejected input");
            }
        }
    }
}
