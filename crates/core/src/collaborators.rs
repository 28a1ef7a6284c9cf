// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use time::{Date, OffsetDateTime};
use vvf_log_domain::{
    DisplayId, FieldUpdate, IncidentId, IncidentKey, IncidentRecord, Member, MemberId,
    NewIncident, ReportNumber, Vehicle,
};

/// Read-only roster and fleet queries.
pub trait ReferenceData {
    /// Returns every active member, in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn list_active_members(&mut self) -> Result<Vec<Member>, StoreError>;

    /// Returns the member with the given id, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn get_member(&mut self, id: MemberId) -> Result<Option<Member>, StoreError>;

    /// Returns every active vehicle, in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn list_active_vehicles(&mut self) -> Result<Vec<Vehicle>, StoreError>;

    /// Returns the highest odometer recorded for a vehicle, 0 if none.
    ///
    /// # Arguments
    ///
    /// * `vehicle_tag` - The vehicle's license plate
    /// * `excluding` - A record to leave out (the one being edited)
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn last_odometer(
        &mut self,
        vehicle_tag: &str,
        excluding: Option<IncidentId>,
    ) -> Result<u32, StoreError>;
}

/// Incident record persistence.
pub trait IncidentStore {
    /// Returns the display id a brand-new intervention should get.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn next_display_id(&mut self) -> Result<DisplayId, StoreError>;

    /// Returns the highest sequence number recorded for a report in one
    /// departure year, as stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn highest_sequence_number(
        &mut self,
        year: i32,
        report_number: &ReportNumber,
    ) -> Result<Option<String>, StoreError>;

    /// Returns the most recent records, newest departure first.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn recent_incidents(&mut self, limit: usize) -> Result<Vec<IncidentRecord>, StoreError>;

    /// Returns one record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn get_incident(&mut self, id: IncidentId) -> Result<Option<IncidentRecord>, StoreError>;

    /// Persists a record and its participant links as one unit.
    ///
    /// # Errors
    ///
    /// Returns an error if anything was not persisted; nothing is kept in
    /// that case.
    fn commit_incident(
        &mut self,
        incident: &NewIncident,
        participants: &[MemberId],
    ) -> Result<IncidentId, StoreError>;

    /// Locates a record by year, report number and sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    fn find_incident(&mut self, key: &IncidentKey) -> Result<Option<IncidentRecord>, StoreError>;

    /// Applies a single-field change to a persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not exist or the update fails.
    fn update_field(&mut self, key: &IncidentKey, update: &FieldUpdate) -> Result<(), StoreError>;
}

/// Everything the wizard engine needs from the outside world.
pub trait Backend: ReferenceData + IncidentStore {}

impl<T: ReferenceData + IncidentStore> Backend for T {}

/// Source of the current date for the "today" and "yesterday" shortcuts.
pub trait Clock {
    /// Returns today's date.
    fn today(&self) -> Date;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_utc().date()
    }
}
