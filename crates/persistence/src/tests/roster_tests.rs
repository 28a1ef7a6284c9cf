// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{BIANCHI, ROSSI, VERDI, create_test_persistence};
use crate::{NewMember, PersistenceError};
use vvf_log::ReferenceData;
use vvf_log_domain::{Member, MemberId, Vehicle};

#[test]
fn test_active_members_are_in_roster_order() {
    let mut persistence = create_test_persistence();

    let members: Vec<Member> = persistence.list_active_members().unwrap();
    let surnames: Vec<&str> = members.iter().map(|m| m.surname.as_str()).collect();

    assert_eq!(surnames, vec!["Bianchi", "Rossi", "Verdi"]);
}

#[test]
fn test_inactive_members_are_hidden_from_the_wizard_but_kept() {
    let mut persistence = create_test_persistence();
    persistence.set_member_active(VERDI, false).unwrap();

    let active: Vec<MemberId> = persistence
        .list_active_members()
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(active, vec![BIANCHI, ROSSI]);

    let verdi: Member = persistence.get_member(VERDI).unwrap().unwrap();
    assert!(!verdi.active);
    assert_eq!(persistence.list_members().unwrap().len(), 3);
}

#[test]
fn test_set_member_active_unknown_member() {
    let mut persistence = create_test_persistence();
    let result = persistence.set_member_active(MemberId::new(99), false);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_get_member_unknown_is_none() {
    let mut persistence = create_test_persistence();
    assert!(persistence.get_member(MemberId::new(99)).unwrap().is_none());
}

#[test]
fn test_inserted_member_keeps_flags() {
    let mut persistence = create_test_persistence();
    let mut member: NewMember = NewMember::new("Sara", "Neri", "VV", "I");
    member.flags.saf = true;
    member.flags.atp = true;

    let id: MemberId = persistence.insert_member(&member).unwrap();
    let stored: Member = persistence.get_member(id).unwrap().unwrap();

    assert_eq!(stored.display_name(), "Neri Sara");
    assert!(stored.flags.saf);
    assert!(stored.flags.atp);
    assert!(!stored.flags.tpss);
    assert!(stored.active);
}

#[test]
fn test_vehicles_are_ordered_by_kind_then_tag() {
    let mut persistence = create_test_persistence();
    persistence.insert_vehicle("ZZ999ZZ", "ABP").unwrap();

    let vehicles: Vec<Vehicle> = persistence.list_active_vehicles().unwrap();
    let tags: Vec<&str> = vehicles.iter().map(|v| v.tag.as_str()).collect();

    assert_eq!(tags, vec!["EF456GH", "ZZ999ZZ", "AB123CD"]);
}

#[test]
fn test_duplicate_vehicle_is_rejected() {
    let mut persistence = create_test_persistence();
    let result = persistence.insert_vehicle("AB123CD", "AS");
    assert!(matches!(result, Err(PersistenceError::Duplicate(_))));
}
