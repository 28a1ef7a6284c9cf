// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DisplayId, DomainError, Draft, IncidentId, IncidentRecord, MemberId, MemberRef, NewIncident,
    ReportNumber, SequenceNumber, VehicleRef,
};
use time::macros::{date, datetime};

fn create_test_record(sequence: &str) -> IncidentRecord {
    IncidentRecord {
        id: IncidentId::new(1),
        display_id: DisplayId::new(9),
        report_number: ReportNumber::new("100"),
        sequence_number: SequenceNumber::new(sequence),
        departure: datetime!(2024-03-10 21:15),
        return_at: None,
        vehicle: VehicleRef {
            tag: String::from("EF456GH"),
            kind: String::from("ABP"),
        },
        team_leader: MemberRef {
            id: MemberId::new(1),
            label: String::from("Rossi Mario"),
        },
        driver: MemberRef {
            id: MemberId::new(2),
            label: String::from("Bianchi Luca"),
        },
        participants: vec![MemberId::new(1), MemberId::new(2)],
        municipality: String::from("Como"),
        street: String::from("Via Roma"),
        incident_type: String::from("Flooding"),
        personnel_changeover: true,
        final_odometer: None,
        fuel_liters: None,
    }
}

fn create_complete_draft() -> Draft {
    Draft {
        report_number: Some(ReportNumber::new("42")),
        sequence_number: Some(SequenceNumber::first()),
        display_id: Some(DisplayId::new(1)),
        departure_date: Some(date!(2024 - 05 - 01)),
        departure: Some(datetime!(2024-05-01 08:00)),
        return_date: Some(date!(2024 - 05 - 01)),
        return_at: Some(datetime!(2024-05-01 10:00)),
        vehicle: Some(VehicleRef {
            tag: String::from("V1"),
            kind: String::from("APS"),
        }),
        team_leader: Some(MemberRef {
            id: MemberId::new(1),
            label: String::from("A"),
        }),
        driver: Some(MemberRef {
            id: MemberId::new(2),
            label: String::from("B"),
        }),
        municipality: Some(String::from("Como")),
        street: Some(String::from("Via Roma")),
        incident_type: Some(String::from("Fire")),
        final_odometer: Some(520),
        fuel_liters: Some(30),
        ..Draft::default()
    }
}

#[test]
fn test_complete_draft_converts_to_new_incident() {
    let incident: NewIncident = create_complete_draft().to_new_incident().unwrap();
    assert_eq!(incident.sequence_number.as_str(), "01");
    assert_eq!(incident.final_odometer, Some(520));
    assert_eq!(incident.fuel_liters, Some(30));
    assert!(!incident.personnel_changeover);
}

#[test]
fn test_skipped_fuel_is_not_required() {
    let mut draft: Draft = create_complete_draft();
    draft.fuel_liters = None;
    let incident: NewIncident = draft.to_new_incident().unwrap();
    assert_eq!(incident.fuel_liters, None);
}

#[test]
fn test_missing_field_is_named() {
    let mut draft: Draft = create_complete_draft();
    draft.vehicle = None;
    assert_eq!(
        draft.to_new_incident(),
        Err(DomainError::MissingField("vehicle"))
    );
}

#[test]
fn test_carry_over_copies_address_and_type() {
    let record: IncidentRecord = create_test_record("01");
    let mut draft: Draft = Draft::default();
    draft.carry_over_from(&record);

    assert!(draft.carried_over);
    assert_eq!(draft.municipality.as_deref(), Some("Como"));
    assert_eq!(draft.street.as_deref(), Some("Via Roma"));
    assert_eq!(draft.incident_type.as_deref(), Some("Flooding"));
}

#[test]
fn test_from_record_projects_every_field() {
    let record: IncidentRecord = create_test_record("03");
    let draft: Draft = Draft::from_record(&record);

    assert!(draft.is_follow_up());
    assert!(!draft.carried_over);
    assert_eq!(draft.departure_date, Some(date!(2024 - 03 - 10)));
    assert_eq!(draft.return_date, None);
    assert!(draft.personnel_changeover);
    assert_eq!(draft.display_id, Some(DisplayId::new(9)));
}

#[test]
fn test_empty_draft_is_not_follow_up() {
    assert!(!Draft::default().is_follow_up());
}
