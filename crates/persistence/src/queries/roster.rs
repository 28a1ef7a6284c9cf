// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Member and vehicle queries.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;
use vvf_log_domain::{Member, MemberId, QualificationFlags, Vehicle, sort_roster};

use crate::diesel_schema::{members, vehicles};
use crate::error::PersistenceError;

/// Diesel Queryable struct for member rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct MemberRow {
    member_id: i64,
    name: String,
    surname: String,
    qualification: String,
    land_license_grade: String,
    nautical_license: i32,
    saf: i32,
    tpss: i32,
    atp: i32,
    is_active: i32,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            id: MemberId::new(row.member_id),
            name: row.name,
            surname: row.surname,
            qualification: row.qualification,
            land_license_grade: row.land_license_grade,
            flags: QualificationFlags {
                nautical_license: row.nautical_license != 0,
                saf: row.saf != 0,
                tpss: row.tpss != 0,
                atp: row.atp != 0,
            },
            active: row.is_active != 0,
        }
    }
}

/// Diesel Queryable struct for vehicle rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = vehicles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct VehicleRow {
    tag: String,
    kind: String,
    is_active: i32,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            tag: row.tag,
            kind: row.kind,
            active: row.is_active != 0,
        }
    }
}

/// Lists every member, active or not, in roster order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_members(conn: &mut SqliteConnection) -> Result<Vec<Member>, PersistenceError> {
    let rows: Vec<MemberRow> = members::table
        .select(MemberRow::as_select())
        .load(conn)?;
    let mut roster: Vec<Member> = rows.into_iter().map(Member::from).collect();
    sort_roster(&mut roster);
    Ok(roster)
}

/// Lists active members in roster order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_members(conn: &mut SqliteConnection) -> Result<Vec<Member>, PersistenceError> {
    let rows: Vec<MemberRow> = members::table
        .filter(members::is_active.eq(1))
        .select(MemberRow::as_select())
        .load(conn)?;
    let mut roster: Vec<Member> = rows.into_iter().map(Member::from).collect();
    sort_roster(&mut roster);
    debug!(count = roster.len(), "Loaded active members");
    Ok(roster)
}

/// Retrieves a member by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the member is not found.
pub fn get_member(
    conn: &mut SqliteConnection,
    member_id: MemberId,
) -> Result<Option<Member>, PersistenceError> {
    let row: Option<MemberRow> = members::table
        .find(member_id.value())
        .select(MemberRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(Member::from))
}

/// Resolves member ids to their "Surname Name" labels.
///
/// Ids that do not exist are left out of the map.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn member_labels(
    conn: &mut SqliteConnection,
    member_ids: &[i64],
) -> Result<HashMap<i64, String>, PersistenceError> {
    let rows: Vec<MemberRow> = members::table
        .filter(members::member_id.eq_any(member_ids))
        .select(MemberRow::as_select())
        .load(conn)?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let member: Member = Member::from(row);
            (member.id.value(), member.display_name())
        })
        .collect())
}

/// Counts roster entries.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_members(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(members::table.count().get_result(conn)?)
}

/// Lists active vehicles ordered by kind, then tag.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_active_vehicles(conn: &mut SqliteConnection) -> Result<Vec<Vehicle>, PersistenceError> {
    let rows: Vec<VehicleRow> = vehicles::table
        .filter(vehicles::is_active.eq(1))
        .select(VehicleRow::as_select())
        .load(conn)?;
    let mut fleet: Vec<Vehicle> = rows.into_iter().map(Vehicle::from).collect();
    fleet.sort_by(Vehicle::fleet_cmp);
    Ok(fleet)
}

/// Retrieves the kind of a vehicle by tag.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the vehicle is not found.
pub fn vehicle_kind(
    conn: &mut SqliteConnection,
    tag: &str,
) -> Result<Option<String>, PersistenceError> {
    Ok(vehicles::table
        .find(tag)
        .select(vehicles::kind)
        .first(conn)
        .optional()?)
}
