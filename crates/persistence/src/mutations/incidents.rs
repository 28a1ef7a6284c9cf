// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident commit and single-field updates.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;
use vvf_log_domain::{FieldUpdate, IncidentId, IncidentKey, MemberId, NewIncident};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{incident_participants, incidents};
use crate::error::PersistenceError;
use crate::queries::{format_timestamp, storable_i32};

/// Persists a new incident leg and its participant links in one transaction.
///
/// Duplicate participant ids are stored once.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `incident` - The record to insert
/// * `participants` - Everyone on board, team leader and driver included
///
/// # Errors
///
/// Returns `PersistenceError::Duplicate` if a leg with the same year, report
/// number and sequence number exists, `PersistenceError::ForeignKeyViolation`
/// if a member or the vehicle is unknown, and any other database error.
/// Nothing is written on error.
pub fn commit_incident(
    conn: &mut SqliteConnection,
    incident: &NewIncident,
    participants: &[MemberId],
) -> Result<IncidentId, PersistenceError> {
    let departure: String = format_timestamp(incident.departure)?;
    let return_at: Option<String> = incident.return_at.map(format_timestamp).transpose()?;
    let final_odometer: Option<i32> = incident
        .final_odometer
        .map(|v| storable_i32("final_odometer", v))
        .transpose()?;
    let fuel_liters: Option<i32> = incident
        .fuel_liters
        .map(|v| storable_i32("fuel_liters", v))
        .transpose()?;

    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(incidents::table)
            .values((
                incidents::display_id.eq(incident.display_id.value()),
                incidents::report_number.eq(incident.report_number.as_str()),
                incidents::sequence_number.eq(incident.sequence_number.as_str()),
                incidents::departure.eq(&departure),
                incidents::departure_year.eq(incident.departure.year()),
                incidents::return_at.eq(&return_at),
                incidents::vehicle_tag.eq(&incident.vehicle.tag),
                incidents::team_leader_id.eq(incident.team_leader.id.value()),
                incidents::driver_id.eq(incident.driver.id.value()),
                incidents::municipality.eq(&incident.municipality),
                incidents::street.eq(&incident.street),
                incidents::incident_type.eq(&incident.incident_type),
                incidents::personnel_changeover.eq(i32::from(incident.personnel_changeover)),
                incidents::final_odometer.eq(final_odometer),
                incidents::fuel_liters.eq(fuel_liters),
            ))
            .execute(conn)?;

        let incident_id: i64 = get_last_insert_rowid(conn)?;

        for member in participants {
            diesel::insert_or_ignore_into(incident_participants::table)
                .values((
                    incident_participants::incident_id.eq(incident_id),
                    incident_participants::member_id.eq(member.value()),
                ))
                .execute(conn)?;
        }

        info!(
            incident_id,
            report = %incident.report_number,
            sequence = %incident.sequence_number,
            participants = participants.len(),
            "Incident committed"
        );
        Ok(IncidentId::new(incident_id))
    })
}

/// Swaps one participant link for another.
fn replace_participant(
    conn: &mut SqliteConnection,
    incident_id: i64,
    old_member: i64,
    new_member: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(
        incident_participants::table
            .filter(incident_participants::incident_id.eq(incident_id))
            .filter(incident_participants::member_id.eq(old_member)),
    )
    .execute(conn)?;
    diesel::insert_or_ignore_into(incident_participants::table)
        .values((
            incident_participants::incident_id.eq(incident_id),
            incident_participants::member_id.eq(new_member),
        ))
        .execute(conn)?;
    Ok(())
}

/// Applies a single-field change to the record with the given key.
///
/// Changing the team leader or driver also swaps the participant link of the
/// member being replaced. Changing the departure moves the record to the
/// year of the new departure.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no record has that key,
/// `PersistenceError::Duplicate` if a departure change collides with another
/// leg of the same report in the new year, and any other database error.
/// Nothing is written on error.
pub fn update_field(
    conn: &mut SqliteConnection,
    key: &IncidentKey,
    update: &FieldUpdate,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let located: Option<(i64, i64, i64)> = incidents::table
            .filter(incidents::departure_year.eq(key.year))
            .filter(incidents::report_number.eq(key.report_number.as_str()))
            .filter(incidents::sequence_number.eq(key.sequence_number.as_str()))
            .select((
                incidents::incident_id,
                incidents::team_leader_id,
                incidents::driver_id,
            ))
            .first(conn)
            .optional()?;
        let Some((incident_id, team_leader_id, driver_id)) = located else {
            return Err(PersistenceError::NotFound(format!("incident {key}")));
        };

        let target = incidents::table.find(incident_id);
        match update {
            FieldUpdate::Departure(at) => {
                diesel::update(target)
                    .set((
                        incidents::departure.eq(format_timestamp(*at)?),
                        incidents::departure_year.eq(at.year()),
                    ))
                    .execute(conn)?;
            }
            FieldUpdate::Return(at) => {
                diesel::update(target)
                    .set(incidents::return_at.eq(Some(format_timestamp(*at)?)))
                    .execute(conn)?;
            }
            FieldUpdate::Vehicle(vehicle) => {
                diesel::update(target)
                    .set(incidents::vehicle_tag.eq(&vehicle.tag))
                    .execute(conn)?;
            }
            FieldUpdate::PersonnelChangeover(flag) => {
                diesel::update(target)
                    .set(incidents::personnel_changeover.eq(i32::from(*flag)))
                    .execute(conn)?;
            }
            FieldUpdate::TeamLeader(member) => {
                diesel::update(target)
                    .set(incidents::team_leader_id.eq(member.id.value()))
                    .execute(conn)?;
                replace_participant(conn, incident_id, team_leader_id, member.id.value())?;
            }
            FieldUpdate::Driver(member) => {
                diesel::update(target)
                    .set(incidents::driver_id.eq(member.id.value()))
                    .execute(conn)?;
                replace_participant(conn, incident_id, driver_id, member.id.value())?;
            }
            FieldUpdate::Address {
                municipality,
                street,
            } => {
                diesel::update(target)
                    .set((
                        incidents::municipality.eq(municipality),
                        incidents::street.eq(street),
                    ))
                    .execute(conn)?;
            }
            FieldUpdate::IncidentType(label) => {
                diesel::update(target)
                    .set(incidents::incident_type.eq(label))
                    .execute(conn)?;
            }
            FieldUpdate::FinalOdometer(value) => {
                diesel::update(target)
                    .set(incidents::final_odometer.eq(Some(storable_i32("final_odometer", *value)?)))
                    .execute(conn)?;
            }
            FieldUpdate::FuelLiters(value) => {
                let stored: Option<i32> = value
                    .map(|v| storable_i32("fuel_liters", v))
                    .transpose()?;
                diesel::update(target)
                    .set(incidents::fuel_liters.eq(stored))
                    .execute(conn)?;
            }
        }

        info!(incident_id, %key, field = update.field_name(), "Incident updated");
        Ok(())
    })
}
