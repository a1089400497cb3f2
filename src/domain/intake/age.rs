//! Age derivation from date of birth.
//!
//! The intake form shows a read-only age field that tracks the date-of-birth
//! input. The computation uses "last birthday occurred" semantics: the year
//! difference is decremented when today's month/day precedes the birth
//! month/day.

use chrono::{Datelike, NaiveDate, Utc};

use crate::domain::foundation::WizardError;
use crate::domain::intake::FieldValue;

/// ISO date format accepted by the date-of-birth field.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Computes whole-year age as of `today`.
///
/// Empty input is a valid mid-entry state and yields `Ok(None)`, not an
/// error. Unparseable input yields `InvalidDate`.
///
/// # Example
///
/// ```
/// use case_intake::domain::intake::compute_age;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(compute_age("2008-06-15", today).unwrap(), Some(16));
/// assert_eq!(compute_age("2008-05-15", today).unwrap(), Some(17));
/// assert_eq!(compute_age("", today).unwrap(), None);
/// ```
pub fn compute_age(date_of_birth: &str, today: NaiveDate) -> Result<Option<i32>, WizardError> {
    let trimmed = date_of_birth.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let born = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|e| WizardError::invalid_date(trimmed, e.to_string()))?;

    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    Ok(Some(age))
}

/// Derivation function wired into the FieldStore for date_of_birth -> age.
///
/// Reads the source as text and produces a `Derived` value holding the age as
/// a decimal string, or an empty derived value when the source is empty.
pub fn derive_age(source: &FieldValue) -> Result<FieldValue, WizardError> {
    let text = source.as_text().unwrap_or("");
    let age = compute_age(text, Utc::now().date_naive())?;
    Ok(FieldValue::Derived(age.map(|a| a.to_string())))
}
