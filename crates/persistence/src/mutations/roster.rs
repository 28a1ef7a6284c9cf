// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster and fleet registration.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use vvf_log_domain::MemberId;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewMember;
use crate::diesel_schema::{members, vehicles};
use crate::error::PersistenceError;
use crate::queries::roster::count_members;

/// Starter fleet: tag and kind.
const DEMO_VEHICLES: &[(&str, &str)] = &[
    ("AB123CD", "APS"),
    ("EF456GH", "ABP"),
    ("IL789JK", "AS"),
    ("MN012PQ", "AU"),
];

/// Starter roster: name, surname, qualification, land license grade and
/// nautical license, SAF, TPSS, ATP flags.
const DEMO_MEMBERS: &[(&str, &str, &str, &str, [bool; 4])] = &[
    ("Mario", "Rossi", "CSV", "III", [true, false, true, false]),
    ("Luca", "Bianchi", "VV", "II", [false, true, false, true]),
    ("Giuseppe", "Verdi", "CSV", "IIIE", [true, true, false, false]),
    ("Andrea", "Neri", "VV", "I", [false, false, true, false]),
    ("Paolo", "Gialli", "CSV", "II", [true, false, false, true]),
];

/// Adds a member to the roster.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_member(
    conn: &mut SqliteConnection,
    member: &NewMember,
) -> Result<MemberId, PersistenceError> {
    diesel::insert_into(members::table)
        .values((
            members::name.eq(&member.name),
            members::surname.eq(&member.surname),
            members::qualification.eq(&member.qualification),
            members::land_license_grade.eq(&member.land_license_grade),
            members::nautical_license.eq(i32::from(member.flags.nautical_license)),
            members::saf.eq(i32::from(member.flags.saf)),
            members::tpss.eq(i32::from(member.flags.tpss)),
            members::atp.eq(i32::from(member.flags.atp)),
        ))
        .execute(conn)?;

    let member_id: i64 = get_last_insert_rowid(conn)?;
    info!(member_id, surname = %member.surname, "Member added to roster");
    Ok(MemberId::new(member_id))
}

/// Marks a member active or inactive.
///
/// Inactive members stay on historical records but are no longer offered
/// by the wizards.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the member does not exist.
pub fn set_member_active(
    conn: &mut SqliteConnection,
    member_id: MemberId,
    active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(members::table.find(member_id.value()))
        .set(members::is_active.eq(i32::from(active)))
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("member {member_id}")));
    }
    info!(member_id = member_id.value(), active, "Member status changed");
    Ok(())
}

/// Adds a vehicle to the fleet.
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if the tag is already registered.
pub fn insert_vehicle(
    conn: &mut SqliteConnection,
    tag: &str,
    kind: &str,
) -> Result<(), PersistenceError> {
    diesel::insert_into(vehicles::table)
        .values((vehicles::tag.eq(tag), vehicles::kind.eq(kind)))
        .execute(conn)?;
    info!(tag, kind, "Vehicle added to fleet");
    Ok(())
}

/// Seeds the starter roster and fleet into an empty database.
///
/// Returns `false` without touching anything if members already exist.
///
/// # Errors
///
/// Returns an error if any insert fails; nothing is kept in that case.
pub fn seed_demo_data(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        if count_members(conn)? > 0 {
            info!("Roster already populated, skipping demo data");
            return Ok(false);
        }

        for (tag, kind) in DEMO_VEHICLES {
            diesel::insert_or_ignore_into(vehicles::table)
                .values((vehicles::tag.eq(*tag), vehicles::kind.eq(*kind)))
                .execute(conn)?;
        }

        for (name, surname, qualification, grade, flags) in DEMO_MEMBERS {
            let [nautical_license, saf, tpss, atp] = *flags;
            let mut member: NewMember = NewMember::new(name, surname, qualification, grade);
            member.flags.nautical_license = nautical_license;
            member.flags.saf = saf;
            member.flags.tpss = tpss;
            member.flags.atp = atp;
            insert_member(conn, &member)?;
        }

        info!(
            members = DEMO_MEMBERS.len(),
            vehicles = DEMO_VEHICLES.len(),
            "Demo roster and fleet seeded"
        );
        Ok(true)
    })
}
