// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the fire-brigade incident log.
//!
//! This crate stores the roster, the fleet and the incident log in `SQLite`
//! through Diesel, and plugs them into the wizard engine by implementing
//! [`vvf_log::ReferenceData`] and [`vvf_log::IncidentStore`].
//!
//! ## Schema
//!
//! - `members`: the roster, with qualification flags and an active flag
//! - `vehicles`: the fleet, keyed by license plate
//! - `incidents`: one row per leg; `(departure_year, report_number,
//!   sequence_number)` is unique
//! - `incident_participants`: who was on board each leg
//!
//! Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text.
//!
//! ## Migrations
//!
//! Migrations are embedded with `diesel_migrations` and applied every time a
//! connection is opened.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use tracing::info;
use vvf_log::{IncidentStore, ReferenceData, StoreError};
use vvf_log_domain::{
    DisplayId, FieldUpdate, IncidentId, IncidentKey, IncidentRecord, Member, MemberId,
    NewIncident, ReportNumber, Vehicle, next_display_id,
};

/// Global counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` increments this counter, so concurrently
/// running tests never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{IncidentSummary, MonthCount, NewMember, TypeCount, YearStatistics};
pub use error::PersistenceError;

/// `SQLite` adapter for the roster, the fleet and the incident log.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file, created if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        info!(path = path_str, "Incident log database ready");
        Ok(Self { conn })
    }

    // ========================================================================
    // Roster & Fleet
    // ========================================================================

    /// Adds a member to the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_member(&mut self, member: &NewMember) -> Result<MemberId, PersistenceError> {
        mutations::roster::insert_member(&mut self.conn, member)
    }

    /// Marks a member active or inactive.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the member does not exist.
    pub fn set_member_active(
        &mut self,
        member_id: MemberId,
        active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::roster::set_member_active(&mut self.conn, member_id, active)
    }

    /// Adds a vehicle to the fleet.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Duplicate` if the tag is already registered.
    pub fn insert_vehicle(&mut self, tag: &str, kind: &str) -> Result<(), PersistenceError> {
        mutations::roster::insert_vehicle(&mut self.conn, tag, kind)
    }

    /// Lists the whole roster, inactive members included, in roster order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_members(&mut self) -> Result<Vec<Member>, PersistenceError> {
        queries::roster::list_members(&mut self.conn)
    }

    /// Seeds the starter roster and fleet if the roster is empty.
    ///
    /// Returns whether anything was inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding fails.
    pub fn seed_demo_data(&mut self) -> Result<bool, PersistenceError> {
        mutations::roster::seed_demo_data(&mut self.conn)
    }

    // ========================================================================
    // Incident Log Views
    // ========================================================================

    /// Returns display-ready views of the most recent legs.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent_summaries(
        &mut self,
        limit: usize,
    ) -> Result<Vec<IncidentSummary>, PersistenceError> {
        queries::incidents::recent_summaries(&mut self.conn, limit)
    }

    /// Returns every leg of a report in a given year, in sequence order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn incidents_for_report(
        &mut self,
        year: i32,
        report_number: &ReportNumber,
    ) -> Result<Vec<IncidentSummary>, PersistenceError> {
        queries::incidents::incidents_for_report(&mut self.conn, year, report_number)
    }

    /// Computes activity totals for a year.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn statistics_for_year(&mut self, year: i32) -> Result<YearStatistics, PersistenceError> {
        queries::statistics::statistics_for_year(&mut self.conn, year)
    }
}

impl ReferenceData for Persistence {
    fn list_active_members(&mut self) -> Result<Vec<Member>, StoreError> {
        Ok(queries::roster::list_active_members(&mut self.conn)?)
    }

    fn get_member(&mut self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(queries::roster::get_member(&mut self.conn, id)?)
    }

    fn list_active_vehicles(&mut self) -> Result<Vec<Vehicle>, StoreError> {
        Ok(queries::roster::list_active_vehicles(&mut self.conn)?)
    }

    fn last_odometer(
        &mut self,
        vehicle_tag: &str,
        excluding: Option<IncidentId>,
    ) -> Result<u32, StoreError> {
        Ok(queries::incidents::last_odometer(
            &mut self.conn,
            vehicle_tag,
            excluding,
        )?)
    }
}

impl IncidentStore for Persistence {
    fn next_display_id(&mut self) -> Result<DisplayId, StoreError> {
        let highest: Option<DisplayId> = queries::incidents::highest_display_id(&mut self.conn)?;
        Ok(next_display_id(highest))
    }

    fn highest_sequence_number(
        &mut self,
        year: i32,
        report_number: &ReportNumber,
    ) -> Result<Option<String>, StoreError> {
        Ok(queries::incidents::highest_sequence_number(
            &mut self.conn,
            year,
            report_number,
        )?)
    }

    fn recent_incidents(&mut self, limit: usize) -> Result<Vec<IncidentRecord>, StoreError> {
        Ok(queries::incidents::recent_incidents(&mut self.conn, limit)?)
    }

    fn get_incident(&mut self, id: IncidentId) -> Result<Option<IncidentRecord>, StoreError> {
        Ok(queries::incidents::get_incident(&mut self.conn, id)?)
    }

    fn commit_incident(
        &mut self,
        incident: &NewIncident,
        participants: &[MemberId],
    ) -> Result<IncidentId, StoreError> {
        Ok(mutations::incidents::commit_incident(
            &mut self.conn,
            incident,
            participants,
        )?)
    }

    fn find_incident(&mut self, key: &IncidentKey) -> Result<Option<IncidentRecord>, StoreError> {
        Ok(queries::incidents::find_incident(&mut self.conn, key)?)
    }

    fn update_field(&mut self, key: &IncidentKey, update: &FieldUpdate) -> Result<(), StoreError> {
        Ok(mutations::incidents::update_field(
            &mut self.conn,
            key,
            update,
        )?)
    }
}
