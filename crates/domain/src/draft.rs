// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{
    DisplayId, IncidentId, IncidentRecord, MemberRef, NewIncident, ReportNumber, SequenceNumber,
    VehicleRef,
};
use time::{Date, PrimitiveDateTime};

/// An incident record under construction.
///
/// Fields are filled one at a time by the step handlers. A draft is never
/// visible to the store until it is turned into a [`NewIncident`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Paper report number.
    pub report_number: Option<ReportNumber>,
    /// Leg number within the report.
    pub sequence_number: Option<SequenceNumber>,
    /// Intervention number.
    pub display_id: Option<DisplayId>,
    /// The record this leg was linked to, if any.
    pub linked_from: Option<IncidentId>,
    /// Departure date, picked before the departure time.
    pub departure_date: Option<Date>,
    /// Full departure timestamp.
    pub departure: Option<PrimitiveDateTime>,
    /// Return date, picked before the return time.
    pub return_date: Option<Date>,
    /// Full return timestamp.
    pub return_at: Option<PrimitiveDateTime>,
    /// The vehicle used.
    pub vehicle: Option<VehicleRef>,
    /// Whether the crew changed since the previous leg.
    pub personnel_changeover: bool,
    /// Team leader.
    pub team_leader: Option<MemberRef>,
    /// Driver.
    pub driver: Option<MemberRef>,
    /// Municipality of the incident.
    pub municipality: Option<String>,
    /// Street of the incident.
    pub street: Option<String>,
    /// Incident type label.
    pub incident_type: Option<String>,
    /// Address and incident type were copied from the linked record.
    pub carried_over: bool,
    /// Odometer reading at return.
    pub final_odometer: Option<u32>,
    /// Fuel added, in liters.
    pub fuel_liters: Option<u32>,
}

impl Draft {
    /// Projects a persisted record into a draft so the step handlers can
    /// work on it.
    #[must_use]
    pub fn from_record(record: &IncidentRecord) -> Self {
        Self {
            report_number: Some(record.report_number.clone()),
            sequence_number: Some(record.sequence_number.clone()),
            display_id: Some(record.display_id),
            linked_from: None,
            departure_date: Some(record.departure.date()),
            departure: Some(record.departure),
            return_date: record.return_at.map(|at| at.date()),
            return_at: record.return_at,
            vehicle: Some(record.vehicle.clone()),
            personnel_changeover: record.personnel_changeover,
            team_leader: Some(record.team_leader.clone()),
            driver: Some(record.driver.clone()),
            municipality: Some(record.municipality.clone()),
            street: Some(record.street.clone()),
            incident_type: Some(record.incident_type.clone()),
            carried_over: false,
            final_odometer: record.final_odometer,
            fuel_liters: record.fuel_liters,
        }
    }

    /// Copies the address and incident type of an earlier leg.
    pub fn carry_over_from(&mut self, record: &IncidentRecord) {
        self.municipality = Some(record.municipality.clone());
        self.street = Some(record.street.clone());
        self.incident_type = Some(record.incident_type.clone());
        self.carried_over = true;
    }

    /// Returns whether the draft describes a follow-up leg.
    #[must_use]
    pub fn is_follow_up(&self) -> bool {
        self.sequence_number
            .as_ref()
            .is_some_and(SequenceNumber::is_follow_up)
    }

    /// Converts the draft into a commit-ready record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingField` naming the first required field
    /// that has not been filled in.
    pub fn to_new_incident(&self) -> Result<NewIncident, DomainError> {
        Ok(NewIncident {
            display_id: required(self.display_id, "display id")?,
            report_number: required(self.report_number.clone(), "report number")?,
            sequence_number: required(self.sequence_number.clone(), "sequence number")?,
            departure: required(self.departure, "departure")?,
            return_at: Some(required(self.return_at, "return")?),
            vehicle: required(self.vehicle.clone(), "vehicle")?,
            team_leader: required(self.team_leader.clone(), "team leader")?,
            driver: required(self.driver.clone(), "driver")?,
            municipality: required(self.municipality.clone(), "municipality")?,
            street: required(self.street.clone(), "street")?,
            incident_type: required(self.incident_type.clone(), "incident type")?,
            personnel_changeover: self.personnel_changeover,
            final_odometer: Some(required(self.final_odometer, "final odometer")?),
            fuel_liters: self.fuel_liters,
        })
    }
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, DomainError> {
    value.ok_or(DomainError::MissingField(field))
}
