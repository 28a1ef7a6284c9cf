// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    BIANCHI, ROSSI, VERDI, create_test_incident, create_test_persistence, member_ref,
};
use crate::Persistence;
use time::macros::datetime;
use vvf_log::IncidentStore;
use vvf_log_domain::{
    FieldUpdate, IncidentKey, IncidentRecord, ReportNumber, SequenceNumber, VehicleRef,
};

fn key(year: i32, report: &str, sequence: &str) -> IncidentKey {
    IncidentKey {
        year,
        report_number: ReportNumber::new(report),
        sequence_number: SequenceNumber::new(sequence),
    }
}

/// A database holding report 42/01 of 2024.
fn persistence_with_report() -> Persistence {
    let mut persistence = create_test_persistence();
    persistence
        .commit_incident(
            &create_test_incident("42", "01", datetime!(2024-05-01 08:00), 520),
            &[ROSSI, BIANCHI, VERDI],
        )
        .unwrap();
    persistence
}

fn reload(persistence: &mut Persistence, year: i32) -> IncidentRecord {
    persistence
        .find_incident(&key(year, "42", "01"))
        .unwrap()
        .unwrap()
}

#[test]
fn test_update_simple_fields() {
    let mut persistence = persistence_with_report();
    let key = key(2024, "42", "01");

    for update in [
        FieldUpdate::Return(datetime!(2024-05-01 12:30)),
        FieldUpdate::Vehicle(VehicleRef {
            tag: String::from("EF456GH"),
            kind: String::from("ABP"),
        }),
        FieldUpdate::PersonnelChangeover(true),
        FieldUpdate::Address {
            municipality: String::from("Erba"),
            street: String::from("Via Milano 3"),
        },
        FieldUpdate::IncidentType(String::from("Flooding")),
        FieldUpdate::FinalOdometer(600),
    ] {
        persistence.update_field(&key, &update).unwrap();
    }

    let record: IncidentRecord = reload(&mut persistence, 2024);
    assert_eq!(record.return_at, Some(datetime!(2024-05-01 12:30)));
    assert_eq!(record.vehicle.tag, "EF456GH");
    assert_eq!(record.vehicle.kind, "ABP");
    assert!(record.personnel_changeover);
    assert_eq!(record.municipality, "Erba");
    assert_eq!(record.street, "Via Milano 3");
    assert_eq!(record.incident_type, "Flooding");
    assert_eq!(record.final_odometer, Some(600));
}

#[test]
fn test_update_fuel_can_clear_the_value() {
    let mut persistence = persistence_with_report();

    persistence
        .update_field(&key(2024, "42", "01"), &FieldUpdate::FuelLiters(None))
        .unwrap();
    assert_eq!(reload(&mut persistence, 2024).fuel_liters, None);

    persistence
        .update_field(&key(2024, "42", "01"), &FieldUpdate::FuelLiters(Some(45)))
        .unwrap();
    assert_eq!(reload(&mut persistence, 2024).fuel_liters, Some(45));
}

#[test]
fn test_update_team_leader_swaps_participant() {
    let mut persistence = create_test_persistence();
    persistence
        .commit_incident(
            &create_test_incident("42", "01", datetime!(2024-05-01 08:00), 520),
            &[ROSSI, BIANCHI],
        )
        .unwrap();

    persistence
        .update_field(
            &key(2024, "42", "01"),
            &FieldUpdate::TeamLeader(member_ref(VERDI, "Verdi Giuseppe")),
        )
        .unwrap();

    let record = reload(&mut persistence, 2024);
    assert_eq!(record.team_leader.id, VERDI);
    assert_eq!(record.team_leader.label, "Verdi Giuseppe");
    assert_eq!(record.participants, vec![BIANCHI, VERDI]);
}

#[test]
fn test_update_driver_to_existing_participant_keeps_single_link() {
    let mut persistence = persistence_with_report();

    persistence
        .update_field(
            &key(2024, "42", "01"),
            &FieldUpdate::Driver(member_ref(VERDI, "Verdi Giuseppe")),
        )
        .unwrap();

    let record = reload(&mut persistence, 2024);
    assert_eq!(record.driver.id, VERDI);
    assert_eq!(record.participants, vec![ROSSI, VERDI]);
}

#[test]
fn test_update_departure_moves_record_to_new_year() {
    let mut persistence = persistence_with_report();

    persistence
        .update_field(
            &key(2024, "42", "01"),
            &FieldUpdate::Departure(datetime!(2023-12-31 23:00)),
        )
        .unwrap();

    assert!(
        persistence
            .find_incident(&key(2024, "42", "01"))
            .unwrap()
            .is_none()
    );
    let moved = reload(&mut persistence, 2023);
    assert_eq!(moved.departure, datetime!(2023-12-31 23:00));
}

#[test]
fn test_update_departure_colliding_with_other_year_is_rejected() {
    let mut persistence = persistence_with_report();
    persistence
        .commit_incident(
            &create_test_incident("42", "01", datetime!(2023-05-01 08:00), 300),
            &[ROSSI, BIANCHI],
        )
        .unwrap();

    let result = persistence.update_field(
        &key(2024, "42", "01"),
        &FieldUpdate::Departure(datetime!(2023-06-01 08:00)),
    );

    assert!(result.is_err());
    assert_eq!(
        reload(&mut persistence, 2024).departure,
        datetime!(2024-05-01 08:00)
    );
}

#[test]
fn test_update_unknown_key_is_an_error() {
    let mut persistence = persistence_with_report();

    let result =
        persistence.update_field(&key(2024, "43", "01"), &FieldUpdate::FinalOdometer(700));

    let err = result.unwrap_err();
    assert!(err.message().contains("Not found"), "{err}");
}

#[test]
fn test_update_to_unknown_vehicle_is_rejected() {
    let mut persistence = persistence_with_report();

    let result = persistence.update_field(
        &key(2024, "42", "01"),
        &FieldUpdate::Vehicle(VehicleRef {
            tag: String::from("XX000XX"),
            kind: String::from("APS"),
        }),
    );

    assert!(result.is_err());
    assert_eq!(reload(&mut persistence, 2024).vehicle.tag, "AB123CD");
}
