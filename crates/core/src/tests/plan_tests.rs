// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EditableField, Step, entry_plan};

#[test]
fn test_new_report_plan_has_no_changeover_and_asks_address() {
    let plan: Vec<Step> = entry_plan(false, false);
    assert!(!plan.contains(&Step::AskChangeover));
    assert!(plan.contains(&Step::EnterMunicipality));
    assert!(plan.contains(&Step::EnterStreet));
    assert!(plan.contains(&Step::PickIncidentType));
    assert_eq!(plan.first(), Some(&Step::PickDepartureDate));
    assert_eq!(plan.last(), Some(&Step::Review));
}

#[test]
fn test_follow_up_plan_asks_changeover_after_vehicle() {
    let plan: Vec<Step> = entry_plan(true, false);
    let vehicle: usize = plan.iter().position(|s| *s == Step::PickVehicle).unwrap();
    assert_eq!(plan[vehicle + 1], Step::AskChangeover);
    assert_eq!(plan[vehicle + 2], Step::PickTeamLeader);
}

#[test]
fn test_carried_over_plan_skips_address_and_type() {
    let plan: Vec<Step> = entry_plan(true, true);
    assert_eq!(
        plan,
        vec![
            Step::PickDepartureDate,
            Step::EnterDepartureTime,
            Step::PickReturnDate,
            Step::EnterReturnTime,
            Step::PickVehicle,
            Step::AskChangeover,
            Step::PickTeamLeader,
            Step::PickDriver,
            Step::RosterTraversal,
            Step::EnterFinalOdometer,
            Step::EnterFuelLiters,
            Step::Review,
        ]
    );
}

#[test]
fn test_custom_incident_type_is_never_planned() {
    for (follow_up, carried_over) in [(false, false), (true, false), (true, true)] {
        assert!(!entry_plan(follow_up, carried_over).contains(&Step::EnterCustomIncidentType));
    }
}

#[test]
fn test_editable_fields_reuse_entry_steps() {
    assert_eq!(
        EditableField::Address.steps(),
        vec![Step::EnterMunicipality, Step::EnterStreet]
    );
    assert_eq!(
        EditableField::Departure.steps(),
        vec![Step::PickDepartureDate, Step::EnterDepartureTime]
    );
    for field in EditableField::ALL {
        let steps: Vec<Step> = field.steps();
        assert!(!steps.is_empty());
        assert!(!steps.contains(&Step::Review));
        assert!(!steps.contains(&Step::RosterTraversal));
    }
}
