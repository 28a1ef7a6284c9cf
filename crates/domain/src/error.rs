// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, PrimitiveDateTime};

/// Errors that can occur during domain validation.
///
/// `MalformedInput` means the raw input did not have the expected shape at all;
/// every other variant names a business rule the (well-formed) value broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input does not parse as the expected shape.
    MalformedInput {
        /// The field being entered.
        field: &'static str,
        /// A description of the accepted format.
        expected: &'static str,
    },
    /// Hour or minute outside the valid range.
    InvalidTime {
        /// Hours as entered.
        hours: u8,
        /// Minutes as entered.
        minutes: u8,
    },
    /// Calendar date that does not exist (e.g. 31/02).
    InvalidDate(String),
    /// Return timestamp is not strictly after the departure timestamp.
    ReturnNotAfterDeparture {
        /// The departure timestamp.
        departure: PrimitiveDateTime,
        /// The rejected return timestamp.
        return_at: PrimitiveDateTime,
    },
    /// Return date lies before the departure date.
    ReturnDateBeforeDeparture {
        /// The departure date.
        departure: Date,
        /// The rejected return date.
        return_date: Date,
    },
    /// Odometer reading is lower than the last value recorded for the vehicle.
    OdometerBelowLast {
        /// The vehicle tag.
        vehicle: String,
        /// The last recorded reading.
        last: u32,
        /// The rejected reading.
        entered: u32,
    },
    /// A numeric value is outside its allowed range.
    OutOfRange {
        /// The field being entered.
        field: &'static str,
        /// Minimum accepted value.
        min: u32,
        /// Maximum accepted value.
        max: u32,
        /// The rejected value.
        value: u64,
    },
    /// Every two-digit sequence number of the report is already used.
    SequenceExhausted {
        /// The report and sequence number, as `report/sequence`.
        report_number: String,
    },
    /// Year outside the accepted calendar range.
    InvalidYear(i32),
    /// Free-text field is empty or too long.
    InvalidText {
        /// The field being entered.
        field: &'static str,
        /// Maximum length in characters.
        max_len: usize,
    },
    /// Team leader and driver must be different members.
    SameTeamLeaderAndDriver {
        /// The member picked twice.
        member: String,
    },
    /// Vehicle tag not among the active vehicles.
    UnknownVehicle(String),
    /// Member id not among the active members.
    UnknownMember(i64),
    /// Catalogue index outside the incident-type catalogue.
    UnknownIncidentType(usize),
    /// No previous incident exists to link a new leg to.
    NoLinkableIncidents,
    /// Another record already uses this report and sequence number in the
    /// departure year.
    ReportAlreadyExists {
        /// The departure year.
        year: i32,
        /// The report and sequence number, as `report/sequence`.
        report_number: String,
    },
    /// A required field has not been filled in yet.
    MissingField(&'static str),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput { field, expected } => {
                write!(f, "Invalid {field}: expected {expected}")
            }
            Self::InvalidTime { hours, minutes } => {
                write!(f, "Invalid time {hours:02}:{minutes:02}: hours must be 00-23 and minutes 00-59")
            }
            Self::InvalidDate(msg) => write!(f, "Invalid date: {msg}"),
            Self::ReturnNotAfterDeparture {
                departure,
                return_at,
            } => {
                write!(
                    f,
                    "Return time {return_at} must be after departure time {departure}"
                )
            }
            Self::ReturnDateBeforeDeparture {
                departure,
                return_date,
            } => {
                write!(
                    f,
                    "Return date {return_date} cannot be before departure date {departure}"
                )
            }
            Self::OdometerBelowLast {
                vehicle,
                last,
                entered,
            } => {
                write!(
                    f,
                    "Odometer {entered} is below the last recorded value {last} for vehicle {vehicle}"
                )
            }
            Self::OutOfRange {
                field,
                min,
                max,
                value,
            } => {
                write!(f, "Invalid {field}: {value} is not between {min} and {max}")
            }
            Self::SequenceExhausted { report_number } => {
                write!(
                    f,
                    "Report {report_number} has no sequence numbers left (maximum 99)"
                )
            }
            Self::InvalidYear(year) => {
                write!(f, "Invalid year {year}: must be between 1900 and 2200")
            }
            Self::InvalidText { field, max_len } => {
                write!(f, "Invalid {field}: must be 1 to {max_len} characters")
            }
            Self::SameTeamLeaderAndDriver { member } => {
                write!(f, "{member} cannot be both team leader and driver")
            }
            Self::UnknownVehicle(tag) => write!(f, "Vehicle '{tag}' is not an active vehicle"),
            Self::UnknownMember(id) => write!(f, "Member {id} is not an active member"),
            Self::UnknownIncidentType(index) => {
                write!(f, "Incident type {index} is not in the catalogue")
            }
            Self::NoLinkableIncidents => {
                write!(f, "No previous incidents exist; start a new report instead")
            }
            Self::ReportAlreadyExists {
                year,
                report_number,
            } => {
                write!(
                    f,
                    "Report {report_number} already exists in {year}; pick another date or link to it"
                )
            }
            Self::MissingField(field) => write!(f, "Required field '{field}' is missing"),
        }
    }
}

impl std::error::Error for DomainError {}
