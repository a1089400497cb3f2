//! Session-scoped choices that gate entry into the form-detail tier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dental specialties selectable on the first wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialty {
    Orthodontic,
    Pediatric,
    Endodontic,
    Periodontic,
    Prosthodontic,
    OralSurgery,
    General,
}

impl Specialty {
    /// Maps a user-profile specialty label to a supported value.
    ///
    /// The profile carries free-form labels from the identity provider;
    /// unknown labels simply leave the specialty unselected.
    pub fn from_profile_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "orthodontics" | "orthodontic" => Some(Specialty::Orthodontic),
            "pediatric dentistry" | "pediatric" => Some(Specialty::Pediatric),
            "endodontics" | "endodontic" => Some(Specialty::Endodontic),
            "periodontics" | "periodontic" => Some(Specialty::Periodontic),
            "prosthodontics" | "prosthodontic" => Some(Specialty::Prosthodontic),
            "oral surgery" => Some(Specialty::OralSurgery),
            "general dentistry" | "general" => Some(Specialty::General),
            _ => None,
        }
    }

    /// The auto-select shortcut rule.
    ///
    /// Orthodontics is the one fully-supported specialty: a profile carrying
    /// it skips the specialty-choice step entirely. Every other mapped
    /// specialty only pre-fills the field and leaves the step visible. This
    /// deliberately mirrors the product behavior and is not generalized.
    pub fn skips_choice_step(&self) -> bool {
        matches!(self, Specialty::Orthodontic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Specialty::Orthodontic => "orthodontic",
            Specialty::Pediatric => "pediatric",
            Specialty::Endodontic => "endodontic",
            Specialty::Periodontic => "periodontic",
            Specialty::Prosthodontic => "prosthodontic",
            Specialty::OralSurgery => "oral_surgery",
            Specialty::General => "general",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Specialty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_profile_label(s).ok_or(())
    }
}

/// The kind of case form being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Registration,
    Treatment,
    Referral,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Registration => "registration",
            FormType::Treatment => "treatment",
            FormType::Referral => "referral",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FormType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "registration" => Ok(FormType::Registration),
            "treatment" => Ok(FormType::Treatment),
            "referral" => Ok(FormType::Referral),
            _ => Err(()),
        }
    }
}

/// The session-scoped choices gating the Main -> FormDetail transition.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub specialty: Option<Specialty>,
    pub form_type: Option<FormType>,
    pub clinic: Option<String>,
}

impl Selection {
    /// True when nothing has been chosen yet.
    pub fn is_empty(&self) -> bool {
        self.specialty.is_none() && self.form_type.is_none() && self.clinic.is_none()
    }

    /// Flattened entries for payload assembly.
    pub fn to_json_entries(&self) -> Vec<(&'static str, serde_json::Value)> {
        use serde_json::Value;
        vec![
            (
                "specialty",
                self.specialty
                    .map(|s| Value::String(s.as_str().to_string()))
                    .unwrap_or(Value::Null),
            ),
            (
                "form_type",
                self.form_type
                    .map(|t| Value::String(t.as_str().to_string()))
                    .unwrap_or(Value::Null),
            ),
            (
                "clinic",
                self.clinic
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            ),
        ]
    }
}
