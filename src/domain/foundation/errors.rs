//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

use super::WizardPosition;

/// Error codes organized by category.
///
/// The screaming-snake form (`Display`) is what the rendering layer and any
/// transport surface use to key user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Configuration bugs (step table and input layer drifted apart)
    UnknownField,
    TypeMismatch,

    // Expected, recoverable conditions
    InvalidDate,
    GateNotSatisfied,
    UnknownClinic,

    // Submission
    SubmissionFailed,
    SubmissionInFlight,

    // Infrastructure
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::UnknownField => "UNKNOWN_FIELD",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::GateNotSatisfied => "GATE_NOT_SATISFIED",
            ErrorCode::UnknownClinic => "UNKNOWN_CLINIC",
            ErrorCode::SubmissionFailed => "SUBMISSION_FAILED",
            ErrorCode::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised by the wizard core.
///
/// `UnknownField` and `TypeMismatch` indicate the step configuration and the
/// input layer have drifted apart; they are logged as errors and not
/// recovered. The rest are expected conditions surfaced inline to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    /// A field was referenced that no step declares.
    #[error("Field '{field}' is not declared by any step")]
    UnknownField { field: String },

    /// A field was used with the wrong value type.
    #[error("Field '{field}' is not a {expected} field")]
    TypeMismatch {
        field: String,
        expected: &'static str,
    },

    /// An unparseable date was fed to age derivation.
    #[error("'{input}' is not a valid ISO date: {reason}")]
    InvalidDate { input: String, reason: String },

    /// Advance was attempted without meeting the current step's requirements.
    #[error("Cannot advance from {position}: unmet requirements {missing:?}")]
    GateNotSatisfied {
        position: WizardPosition,
        missing: Vec<String>,
    },

    /// A clinic was selected that the user's profile does not list.
    #[error("Clinic '{clinic}' is not available for this user")]
    UnknownClinic { clinic: String },

    /// The gateway rejected the payload or the request failed.
    #[error("Submission failed: {detail}")]
    SubmissionFailed { detail: String },

    /// A submission is already in flight for this session.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// Failure in an external collaborator other than the gateway.
    #[error("Infrastructure error: {detail}")]
    Infrastructure { detail: String },
}

impl WizardError {
    pub fn unknown_field(field: impl Into<String>) -> Self {
        WizardError::UnknownField {
            field: field.into(),
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        WizardError::TypeMismatch {
            field: field.into(),
            expected,
        }
    }

    pub fn invalid_date(input: impl Into<String>, reason: impl Into<String>) -> Self {
        WizardError::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn gate_not_satisfied(position: WizardPosition, missing: Vec<String>) -> Self {
        WizardError::GateNotSatisfied { position, missing }
    }

    pub fn unknown_clinic(clinic: impl Into<String>) -> Self {
        WizardError::UnknownClinic {
            clinic: clinic.into(),
        }
    }

    pub fn submission_failed(detail: impl Into<String>) -> Self {
        WizardError::SubmissionFailed {
            detail: detail.into(),
        }
    }

    pub fn infrastructure(detail: impl Into<String>) -> Self {
        WizardError::Infrastructure {
            detail: detail.into(),
        }
    }

    /// Maps the error to its wire code.
    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::UnknownField { .. } => ErrorCode::UnknownField,
            WizardError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            WizardError::InvalidDate { .. } => ErrorCode::InvalidDate,
            WizardError::GateNotSatisfied { .. } => ErrorCode::GateNotSatisfied,
            WizardError::UnknownClinic { .. } => ErrorCode::UnknownClinic,
            WizardError::SubmissionFailed { .. } => ErrorCode::SubmissionFailed,
            WizardError::SubmissionInFlight => ErrorCode::SubmissionInFlight,
            WizardError::Infrastructure { .. } => ErrorCode::InternalError,
        }
    }

    /// Returns true for errors that mean the step table and the input layer
    /// disagree. These are programmer errors, not user mistakes.
    pub fn is_configuration_bug(&self) -> bool {
        matches!(
            self,
            WizardError::UnknownField { .. } | WizardError::TypeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Tier;

    #[test]
    fn unknown_field_displays_field_name() {
        let err = WizardError::unknown_field("shoe_size");
        assert_eq!(
            format!("{}", err),
            "Field 'shoe_size' is not declared by any step"
        );
    }

    #[test]
    fn gate_not_satisfied_lists_missing_requirements() {
        let err = WizardError::gate_not_satisfied(
            WizardPosition::new(Tier::FormDetail, 0),
            vec!["first_name".to_string()],
        );
        let text = format!("{}", err);
        assert!(text.contains("FormDetail[0]"));
        assert!(text.contains("first_name"));
    }

    #[test]
    fn codes_map_to_screaming_snake() {
        assert_eq!(
            WizardError::unknown_field("x").code().to_string(),
            "UNKNOWN_FIELD"
        );
        assert_eq!(
            WizardError::SubmissionInFlight.code().to_string(),
            "SUBMISSION_IN_FLIGHT"
        );
    }

    #[test]
    fn configuration_bugs_are_flagged() {
        assert!(WizardError::unknown_field("x").is_configuration_bug());
        assert!(WizardError::type_mismatch("x", "multi-choice").is_configuration_bug());
        assert!(!WizardError::SubmissionInFlight.is_configuration_bug());
        assert!(!WizardError::invalid_date("x", "bad").is_configuration_bug());
    }
}
