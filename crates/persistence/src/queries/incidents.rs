// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Incident log queries.
//!
//! Rows are hydrated into `IncidentRecord`s by resolving the vehicle kind,
//! the member labels and the participant links.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::dsl::max;
use diesel::prelude::*;
use tracing::debug;
use vvf_log_domain::{
    DisplayId, IncidentId, IncidentKey, IncidentRecord, MemberId, MemberRef, ReportNumber,
    SequenceNumber, VehicleRef,
};

use super::roster::{member_labels, vehicle_kind};
use super::{format_timestamp, parse_timestamp, stored_u32};
use crate::data_models::IncidentSummary;
use crate::diesel_schema::{incident_participants, incidents};
use crate::error::PersistenceError;

/// Diesel Queryable struct for incident rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct IncidentRow {
    incident_id: i64,
    display_id: i64,
    report_number: String,
    sequence_number: String,
    departure: String,
    return_at: Option<String>,
    vehicle_tag: String,
    team_leader_id: i64,
    driver_id: i64,
    municipality: String,
    street: String,
    incident_type: String,
    personnel_changeover: i32,
    final_odometer: Option<i32>,
    fuel_liters: Option<i32>,
}

/// A hydrated record plus the labels of everyone on board.
struct Hydrated {
    record: IncidentRecord,
    participant_labels: Vec<String>,
}

fn participant_ids(
    conn: &mut SqliteConnection,
    incident_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(incident_participants::table
        .filter(incident_participants::incident_id.eq(incident_id))
        .select(incident_participants::member_id)
        .order(incident_participants::member_id.asc())
        .load(conn)?)
}

fn hydrate(conn: &mut SqliteConnection, row: IncidentRow) -> Result<Hydrated, PersistenceError> {
    let participants: Vec<i64> = participant_ids(conn, row.incident_id)?;

    let mut wanted: Vec<i64> = participants.clone();
    wanted.push(row.team_leader_id);
    wanted.push(row.driver_id);
    let labels: HashMap<i64, String> = member_labels(conn, &wanted)?;
    let label_of = |member_id: i64| -> Result<String, PersistenceError> {
        labels
            .get(&member_id)
            .cloned()
            .ok_or_else(|| PersistenceError::CorruptRow {
                table: "incidents",
                detail: format!(
                    "incident {} references unknown member {member_id}",
                    row.incident_id
                ),
            })
    };

    let team_leader: MemberRef = MemberRef {
        id: MemberId::new(row.team_leader_id),
        label: label_of(row.team_leader_id)?,
    };
    let driver: MemberRef = MemberRef {
        id: MemberId::new(row.driver_id),
        label: label_of(row.driver_id)?,
    };
    let mut participant_labels: Vec<String> = participants
        .iter()
        .map(|id| label_of(*id))
        .collect::<Result<_, _>>()?;
    participant_labels.sort();

    let kind: String =
        vehicle_kind(conn, &row.vehicle_tag)?.ok_or_else(|| PersistenceError::CorruptRow {
            table: "incidents",
            detail: format!(
                "incident {} references unknown vehicle {}",
                row.incident_id, row.vehicle_tag
            ),
        })?;

    let record: IncidentRecord = IncidentRecord {
        id: IncidentId::new(row.incident_id),
        display_id: DisplayId::new(row.display_id),
        report_number: ReportNumber::new(&row.report_number),
        sequence_number: SequenceNumber::new(&row.sequence_number),
        departure: parse_timestamp(&row.departure)?,
        return_at: row.return_at.as_deref().map(parse_timestamp).transpose()?,
        vehicle: VehicleRef {
            tag: row.vehicle_tag,
            kind,
        },
        team_leader,
        driver,
        participants: participants.into_iter().map(MemberId::new).collect(),
        municipality: row.municipality,
        street: row.street,
        incident_type: row.incident_type,
        personnel_changeover: row.personnel_changeover != 0,
        final_odometer: row
            .final_odometer
            .map(|v| stored_u32("final_odometer", v))
            .transpose()?,
        fuel_liters: row
            .fuel_liters
            .map(|v| stored_u32("fuel_liters", v))
            .transpose()?,
    };

    Ok(Hydrated {
        record,
        participant_labels,
    })
}

fn summarize(hydrated: Hydrated) -> Result<IncidentSummary, PersistenceError> {
    let Hydrated {
        record,
        participant_labels,
    } = hydrated;
    Ok(IncidentSummary {
        incident_id: record.id.value(),
        display_id: record.display_id.value(),
        report_number: record.report_number.to_string(),
        sequence_number: record.sequence_number.to_string(),
        departure: format_timestamp(record.departure)?,
        return_at: record.return_at.map(format_timestamp).transpose()?,
        vehicle: record.vehicle.to_string(),
        team_leader: record.team_leader.label,
        driver: record.driver.label,
        participants: participant_labels,
        municipality: record.municipality,
        street: record.street,
        incident_type: record.incident_type,
        personnel_changeover: record.personnel_changeover,
        final_odometer: record.final_odometer,
        fuel_liters: record.fuel_liters,
    })
}

fn query_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn load_recent_rows(
    conn: &mut SqliteConnection,
    limit: usize,
) -> Result<Vec<IncidentRow>, PersistenceError> {
    Ok(incidents::table
        .select(IncidentRow::as_select())
        .order((incidents::departure.desc(), incidents::incident_id.desc()))
        .limit(query_limit(limit))
        .load(conn)?)
}

/// Retrieves one record by id.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
/// Returns `Ok(None)` if the record is not found.
pub fn get_incident(
    conn: &mut SqliteConnection,
    incident_id: IncidentId,
) -> Result<Option<IncidentRecord>, PersistenceError> {
    let row: Option<IncidentRow> = incidents::table
        .find(incident_id.value())
        .select(IncidentRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| hydrate(conn, row).map(|h| h.record))
        .transpose()
}

/// Locates a record by year of departure, report number and sequence number.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is corrupt.
/// Returns `Ok(None)` if no record has that key.
pub fn find_incident(
    conn: &mut SqliteConnection,
    key: &IncidentKey,
) -> Result<Option<IncidentRecord>, PersistenceError> {
    debug!(%key, "Looking up incident");
    let row: Option<IncidentRow> = incidents::table
        .filter(incidents::departure_year.eq(key.year))
        .filter(incidents::report_number.eq(key.report_number.as_str()))
        .filter(incidents::sequence_number.eq(key.sequence_number.as_str()))
        .select(IncidentRow::as_select())
        .first(conn)
        .optional()?;
    row.map(|row| hydrate(conn, row).map(|h| h.record))
        .transpose()
}

/// Returns the most recent records, newest departure first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn recent_incidents(
    conn: &mut SqliteConnection,
    limit: usize,
) -> Result<Vec<IncidentRecord>, PersistenceError> {
    load_recent_rows(conn, limit)?
        .into_iter()
        .map(|row| hydrate(conn, row).map(|h| h.record))
        .collect()
}

/// Returns display-ready views of the most recent records.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn recent_summaries(
    conn: &mut SqliteConnection,
    limit: usize,
) -> Result<Vec<IncidentSummary>, PersistenceError> {
    load_recent_rows(conn, limit)?
        .into_iter()
        .map(|row| hydrate(conn, row).and_then(summarize))
        .collect()
}

/// Returns every leg of one report in one year, in sequence order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn incidents_for_report(
    conn: &mut SqliteConnection,
    year: i32,
    report_number: &ReportNumber,
) -> Result<Vec<IncidentSummary>, PersistenceError> {
    let rows: Vec<IncidentRow> = incidents::table
        .filter(incidents::departure_year.eq(year))
        .filter(incidents::report_number.eq(report_number.as_str()))
        .select(IncidentRow::as_select())
        .order(incidents::sequence_number.asc())
        .load(conn)?;
    rows.into_iter()
        .map(|row| hydrate(conn, row).and_then(summarize))
        .collect()
}

/// Returns the highest stored sequence number of a report in one year.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn highest_sequence_number(
    conn: &mut SqliteConnection,
    year: i32,
    report_number: &ReportNumber,
) -> Result<Option<String>, PersistenceError> {
    Ok(incidents::table
        .filter(incidents::departure_year.eq(year))
        .filter(incidents::report_number.eq(report_number.as_str()))
        .select(max(incidents::sequence_number))
        .get_result(conn)?)
}

/// Returns the highest display id in use.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn highest_display_id(
    conn: &mut SqliteConnection,
) -> Result<Option<DisplayId>, PersistenceError> {
    let highest: Option<i64> = incidents::table
        .select(max(incidents::display_id))
        .get_result(conn)?;
    Ok(highest.map(DisplayId::new))
}

/// Returns the highest odometer recorded for a vehicle, 0 if none.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `vehicle_tag` - The vehicle's license plate
/// * `excluding` - A record left out of the computation
///
/// # Errors
///
/// Returns an error if the database query fails or the stored value is negative.
pub fn last_odometer(
    conn: &mut SqliteConnection,
    vehicle_tag: &str,
    excluding: Option<IncidentId>,
) -> Result<u32, PersistenceError> {
    let mut query = incidents::table
        .filter(incidents::vehicle_tag.eq(vehicle_tag))
        .select(max(incidents::final_odometer))
        .into_boxed();
    if let Some(excluded) = excluding {
        query = query.filter(incidents::incident_id.ne(excluded.value()));
    }
    let highest: Option<i32> = query.get_result(conn)?;
    highest.map_or(Ok(0), |value| stored_u32("final_odometer", value))
}
