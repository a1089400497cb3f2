//! Property-based tests for the wizard core invariants.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use std::collections::BTreeSet;

use case_intake::domain::foundation::{Tier, WizardPosition};
use case_intake::domain::intake::{
    compute_age, derive_age, Derivation, FieldStore, FieldValue, FormType, Selection, Specialty,
    StepGraph, WizardController,
};
use case_intake::ports::UserProfile;

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn intake_store() -> FieldStore {
    FieldStore::for_graph(
        &StepGraph::dental_intake(),
        vec![Derivation {
            source: "date_of_birth",
            target: "age",
            derive: derive_age,
        }],
    )
}

proptest! {
    /// Age is monotonically non-increasing as the birth date moves later.
    #[test]
    fn age_never_increases_for_later_birth_dates(
        year in 1900..=2010i32,
        month in 1..=12u32,
        day in 1..=28u32,
        shift_days in 0..3650i64,
    ) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let born = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let born_later = born + Duration::days(shift_days);

        let earlier_age = compute_age(&iso(born), today).unwrap().unwrap();
        let later_age = compute_age(&iso(born_later), today).unwrap().unwrap();
        prop_assert!(later_age <= earlier_age);
    }

    /// The last-birthday-occurred formula holds exactly.
    #[test]
    fn age_matches_last_birthday_formula(
        year in 1900..=2024i32,
        month in 1..=12u32,
        day in 1..=28u32,
    ) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let born = NaiveDate::from_ymd_opt(year, month, day).unwrap();

        let expected = if (6, 1) < (month, day) {
            2025 - year - 1
        } else {
            2025 - year
        };
        let age = compute_age(&iso(born), today).unwrap().unwrap();
        prop_assert_eq!(age, expected);
    }

    /// Toggling the same option twice restores the original set contents.
    #[test]
    fn toggle_twice_is_identity(
        preset in prop::collection::btree_set("[a-z]{1,8}", 0..5),
        option in "[a-z]{1,8}",
    ) {
        let mut store = intake_store();
        for value in &preset {
            store.toggle_multi("medical_conditions", value).unwrap();
        }
        let before = store.state().clone();

        store.toggle_multi("medical_conditions", &option).unwrap();
        store.toggle_multi("medical_conditions", &option).unwrap();

        prop_assert_eq!(store.state(), &before);
        match store.state().get("medical_conditions") {
            Some(FieldValue::MultiChoice(set)) => {
                let expected: BTreeSet<String> = preset;
                prop_assert_eq!(set, &expected);
            }
            other => prop_assert!(false, "unexpected value {:?}", other),
        }
    }

    /// Once a gate passes, filling more optional fields never closes it.
    #[test]
    fn gate_stays_open_under_form_state_supersets(
        fill_email in any::<bool>(),
        fill_address in any::<bool>(),
        extra_conditions in prop::collection::vec("[a-z]{1,6}", 0..3),
    ) {
        let graph = StepGraph::dental_intake();
        let mut store = intake_store();
        let selection = Selection::default();
        let personal_info = WizardPosition::new(Tier::FormDetail, 0);

        store.set("first_name", "Mona").unwrap();
        store.set("last_name", "Hassan").unwrap();
        store.set("date_of_birth", "1990-04-12").unwrap();
        store.set("gender", "female").unwrap();
        store.set("phone", "0100000000").unwrap();
        prop_assert!(graph.can_advance(personal_info, store.state(), &selection));

        // Superset: add to fields the gate never asked about.
        if fill_email {
            store.set("email", "mona@example.com").unwrap();
        }
        if fill_address {
            store.set("address", "12 Nile St").unwrap();
        }
        for condition in &extra_conditions {
            store.toggle_multi("medical_conditions", condition).unwrap();
        }
        prop_assert!(graph.can_advance(personal_info, store.state(), &selection));
    }
}

/// Retreat-then-advance from any non-initial, non-terminal position lands on
/// the same position with the form state byte-for-byte unchanged.
#[test]
fn retreat_then_advance_is_identity_at_every_position() {
    let mut controller = WizardController::start(UserProfile::default());
    controller.select_specialty(Specialty::Orthodontic);
    controller.select_form_type(FormType::Registration);
    controller.select_clinic("Main Clinic").unwrap();
    controller.set_field("first_name", "Mona").unwrap();
    controller.set_field("last_name", "Hassan").unwrap();
    controller.set_field("date_of_birth", "1990-04-12").unwrap();
    controller.set_field("gender", "female").unwrap();
    controller.set_field("phone", "0100000000").unwrap();
    controller.set_field("smoking_status", "never").unwrap();
    controller.set_field("chief_complaint", "toothache").unwrap();
    controller.set_field("oral_hygiene", "good").unwrap();
    controller.set_field("consent", "yes").unwrap();

    // Walk forward through every gate; after each advance, verify the
    // round trip.
    loop {
        let position = match controller.advance() {
            Ok(position) => position,
            // Final step reached; advancing further is gated off.
            Err(_) => break,
        };
        let form_before = controller.form().clone();

        controller.retreat();
        let back = controller.advance().expect("previously satisfied gate");

        assert_eq!(back, position);
        assert_eq!(controller.form(), &form_before);

        if controller.at_final_step() {
            break;
        }
    }
    assert!(controller.at_final_step());
}
