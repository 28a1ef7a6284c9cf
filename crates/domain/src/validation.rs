// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level parsers and rule checks shared by both wizards.
//!
//! Every function here is pure. A parser reports `MalformedInput` when the
//! raw text has the wrong shape and a rule-specific variant when the shape is
//! right but the value is not acceptable.

use crate::error::DomainError;
use crate::types::{DisplayId, MemberRef, ReportNumber, SequenceNumber};
use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

/// Highest odometer reading accepted.
pub const MAX_ODOMETER: u32 = 9_999_999;

/// Highest amount of fuel, in liters, accepted for one leg.
pub const MAX_FUEL_LITERS: u32 = 1000;

/// Maximum length of municipality and street.
pub const ADDRESS_MAX_LEN: usize = 100;

/// Earliest year accepted by the edit wizard.
pub const MIN_YEAR: i32 = 1900;

/// Latest year accepted by the edit wizard.
pub const MAX_YEAR: i32 = 2200;

const MAX_REPORT_NUMBER_LEN: usize = 10;

/// Parses a time of day typed as `HHMM` or `HH:MM`.
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` if the text has neither shape, and
/// `DomainError::InvalidTime` if hours exceed 23 or minutes exceed 59.
pub fn parse_time_of_day(input: &str) -> Result<Time, DomainError> {
    let malformed = || DomainError::MalformedInput {
        field: "time",
        expected: "HHMM or HH:MM",
    };
    let trimmed: &str = input.trim();

    let (hours_text, minutes_text): (&str, &str) = match trimmed.split_once(':') {
        Some((h, m)) if (1..=2).contains(&h.len()) && m.len() == 2 => (h, m),
        Some(_) => return Err(malformed()),
        None if trimmed.len() == 4 && trimmed.is_ascii() => trimmed.split_at(2),
        None => return Err(malformed()),
    };

    if !hours_text.bytes().all(|b| b.is_ascii_digit())
        || !minutes_text.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }

    let hours: u8 = hours_text.parse().map_err(|_| malformed())?;
    let minutes: u8 = minutes_text.parse().map_err(|_| malformed())?;

    if hours > 23 || minutes > 59 {
        return Err(DomainError::InvalidTime { hours, minutes });
    }

    Time::from_hms(hours, minutes, 0).map_err(|_| DomainError::InvalidTime { hours, minutes })
}

/// Parses a calendar date typed as `DD/MM/YYYY`.
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` if the text does not have the
/// `DD/MM/YYYY` shape, and `DomainError::InvalidDate` if the day does not
/// exist in the given month.
pub fn parse_date(input: &str) -> Result<Date, DomainError> {
    let format = format_description!("[day]/[month]/[year]");
    Date::parse(input.trim(), &format).map_err(|err| match err {
        time::error::Parse::TryFromParsed(inner) => DomainError::InvalidDate(inner.to_string()),
        _ => DomainError::MalformedInput {
            field: "date",
            expected: "DD/MM/YYYY",
        },
    })
}

/// Checks that the return timestamp is strictly after the departure.
///
/// # Errors
///
/// Returns `DomainError::ReturnNotAfterDeparture` otherwise.
pub fn validate_return_after_departure(
    departure: PrimitiveDateTime,
    return_at: PrimitiveDateTime,
) -> Result<(), DomainError> {
    if return_at <= departure {
        return Err(DomainError::ReturnNotAfterDeparture {
            departure,
            return_at,
        });
    }
    Ok(())
}

/// Checks that the return date is not before the departure date.
///
/// # Errors
///
/// Returns `DomainError::ReturnDateBeforeDeparture` otherwise.
pub fn validate_date_order(departure: Date, return_date: Date) -> Result<(), DomainError> {
    if return_date < departure {
        return Err(DomainError::ReturnDateBeforeDeparture {
            departure,
            return_date,
        });
    }
    Ok(())
}

/// Parses an odometer reading.
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` for anything but digits, and
/// `DomainError::OutOfRange` above [`MAX_ODOMETER`].
pub fn parse_odometer(input: &str) -> Result<u32, DomainError> {
    let value: u64 = parse_digits(input, "final odometer", "a whole number of kilometers")?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_ODOMETER)
        .ok_or(DomainError::OutOfRange {
            field: "final odometer",
            min: 0,
            max: MAX_ODOMETER,
            value,
        })
}

/// Checks odometer monotonicity for one vehicle.
///
/// # Arguments
///
/// * `vehicle` - The vehicle tag, used in the error message
/// * `entered` - The reading being recorded
/// * `last` - The last reading recorded for the vehicle (0 if none)
///
/// # Errors
///
/// Returns `DomainError::OdometerBelowLast` when `entered < last`.
pub fn validate_odometer(vehicle: &str, entered: u32, last: u32) -> Result<(), DomainError> {
    if entered < last {
        return Err(DomainError::OdometerBelowLast {
            vehicle: vehicle.to_string(),
            last,
            entered,
        });
    }
    Ok(())
}

/// Parses the liters of fuel added.
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` for anything but digits, and
/// `DomainError::OutOfRange` above [`MAX_FUEL_LITERS`].
pub fn parse_fuel_liters(input: &str) -> Result<u32, DomainError> {
    let value: u64 = parse_digits(input, "fuel liters", "a whole number of liters")?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= MAX_FUEL_LITERS)
        .ok_or(DomainError::OutOfRange {
            field: "fuel liters",
            min: 0,
            max: MAX_FUEL_LITERS,
            value,
        })
}

/// Computes the sequence number of a new leg linked to an existing report.
///
/// * no existing leg: `01`
/// * numeric highest value `n`: `n + 1`, zero-padded to two digits
///   (never below `02`, a linked leg is always a follow-up)
/// * non-numeric highest value: `02`
///
/// # Errors
///
/// Returns `DomainError::SequenceExhausted` when the report already has leg `99`.
pub fn next_sequence_number(
    report_number: &ReportNumber,
    highest: Option<&str>,
) -> Result<SequenceNumber, DomainError> {
    let Some(highest) = highest else {
        return Ok(SequenceNumber::first());
    };

    let trimmed: &str = highest.trim();
    let current: Option<u32> = if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
    {
        trimmed.parse().ok()
    } else {
        None
    };

    let next: u32 = current.map_or(2, |n| n.saturating_add(1).max(2));

    u8::try_from(next)
        .ok()
        .and_then(SequenceNumber::from_number)
        .ok_or_else(|| DomainError::SequenceExhausted {
            report_number: report_number.to_string(),
        })
}

/// Parses a report number: one or more digits.
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` otherwise.
pub fn parse_report_number(input: &str) -> Result<ReportNumber, DomainError> {
    let trimmed: &str = input.trim();
    if trimmed.is_empty()
        || trimmed.len() > MAX_REPORT_NUMBER_LEN
        || !trimmed.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(DomainError::MalformedInput {
            field: "report number",
            expected: "digits only, e.g. 42",
        });
    }
    Ok(ReportNumber::new(trimmed))
}

/// Parses a sequence number typed as one or two digits (`2` becomes `02`).
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` for anything but one or two digits,
/// and `DomainError::OutOfRange` for `0` / `00`.
pub fn parse_sequence_number(input: &str) -> Result<SequenceNumber, DomainError> {
    let trimmed: &str = input.trim();
    if !(1..=2).contains(&trimmed.len()) || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::MalformedInput {
            field: "sequence number",
            expected: "one or two digits, e.g. 01",
        });
    }
    let value: u8 = trimmed.parse().map_err(|_| DomainError::MalformedInput {
        field: "sequence number",
        expected: "one or two digits, e.g. 01",
    })?;
    SequenceNumber::from_number(value).ok_or(DomainError::OutOfRange {
        field: "sequence number",
        min: 1,
        max: 99,
        value: u64::from(value),
    })
}

/// Parses a four-digit year between [`MIN_YEAR`] and [`MAX_YEAR`].
///
/// # Errors
///
/// Returns `DomainError::MalformedInput` if the text is not four digits and
/// `DomainError::InvalidYear` if the year is out of range.
pub fn parse_year(input: &str) -> Result<i32, DomainError> {
    let trimmed: &str = input.trim();
    if trimmed.len() != 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::MalformedInput {
            field: "year",
            expected: "four digits, e.g. 2024",
        });
    }
    let year: i32 = trimmed.parse().map_err(|_| DomainError::MalformedInput {
        field: "year",
        expected: "four digits, e.g. 2024",
    })?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DomainError::InvalidYear(year));
    }
    Ok(year)
}

/// Trims a free-text value and checks its length in characters.
///
/// # Errors
///
/// Returns `DomainError::InvalidText` if the trimmed value is empty or
/// longer than `max_len` characters.
pub fn validate_free_text(
    field: &'static str,
    input: &str,
    max_len: usize,
) -> Result<String, DomainError> {
    let trimmed: &str = input.trim();
    let len: usize = trimmed.chars().count();
    if len == 0 || len > max_len {
        return Err(DomainError::InvalidText { field, max_len });
    }
    Ok(trimmed.to_string())
}

/// Checks that team leader and driver are two different members.
///
/// # Errors
///
/// Returns `DomainError::SameTeamLeaderAndDriver` otherwise.
pub fn validate_distinct_members(
    team_leader: &MemberRef,
    driver: &MemberRef,
) -> Result<(), DomainError> {
    if team_leader.id == driver.id {
        return Err(DomainError::SameTeamLeaderAndDriver {
            member: driver.label.clone(),
        });
    }
    Ok(())
}

/// Returns the display id following the highest one in use (1 when none).
#[must_use]
pub const fn next_display_id(highest: Option<DisplayId>) -> DisplayId {
    match highest {
        Some(id) => DisplayId::new(id.value().saturating_add(1)),
        None => DisplayId::new(1),
    }
}

fn parse_digits(
    input: &str,
    field: &'static str,
    expected: &'static str,
) -> Result<u64, DomainError> {
    let trimmed: &str = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::MalformedInput { field, expected });
    }
    // Anything longer than u64 is certainly out of range.
    Ok(trimmed.parse().unwrap_or(u64::MAX))
}
