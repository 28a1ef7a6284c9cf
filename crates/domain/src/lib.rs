// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod catalogue;
mod draft;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use catalogue::{
    CATALOGUE_PAGE_SIZE, CUSTOM_INCIDENT_TYPE_MAX_LEN, INCIDENT_TYPES, catalogue_page,
    catalogue_page_count, incident_type_label,
};
pub use draft::Draft;
pub use error::DomainError;
pub use types::{
    DisplayId, FieldUpdate, IncidentId, IncidentKey, IncidentRecord, Member, MemberId, MemberRef,
    NewIncident, QualificationFlags, ReportNumber, SequenceNumber, Vehicle, VehicleRef,
    sort_roster,
};
pub use validation::{
    ADDRESS_MAX_LEN, MAX_FUEL_LITERS, MAX_ODOMETER, MAX_YEAR, MIN_YEAR, next_display_id,
    next_sequence_number, parse_date, parse_fuel_liters, parse_odometer, parse_report_number,
    parse_sequence_number, parse_time_of_day, parse_year, validate_date_order,
    validate_distinct_members, validate_free_text, validate_odometer,
    validate_return_after_departure,
};
