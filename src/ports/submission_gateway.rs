//! SubmissionGateway port - Interface for delivering assembled cases.
//!
//! The core treats the gateway as opaque: it does not retry, batch, or cache.
//! A failed submission is reported with its cause and left to the operator,
//! since the payload may need correction before resubmitting.

use async_trait::async_trait;

use crate::domain::foundation::WizardError;
use crate::domain::intake::CasePayload;

/// Port for submitting an assembled case payload.
///
/// Implementations must ensure:
/// - A single attempt per call; no automatic retry
/// - Rejections and transport failures both surface as `SubmissionFailed`
///   with the underlying detail
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Submits the payload. `Ok(())` means the backend accepted the case.
    async fn submit(&self, payload: &CasePayload) -> Result<(), WizardError>;
}
