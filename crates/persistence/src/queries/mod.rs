// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries.
//!
//! All queries use Diesel DSL and return domain types; rows never leave
//! this crate.

pub mod incidents;
pub mod roster;
pub mod statistics;

use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::PersistenceError;

/// Storage format of every timestamp column.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Renders a timestamp in its stored form.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(at: PrimitiveDateTime) -> Result<String, PersistenceError> {
    at.format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRow` if the text is not in the stored form.
pub fn parse_timestamp(text: &str) -> Result<PrimitiveDateTime, PersistenceError> {
    PrimitiveDateTime::parse(text, TIMESTAMP_FORMAT).map_err(|e| PersistenceError::CorruptRow {
        table: "incidents",
        detail: format!("timestamp '{text}': {e}"),
    })
}

/// Converts a stored non-negative integer column.
pub(crate) fn stored_u32(column: &'static str, value: i32) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| PersistenceError::CorruptRow {
        table: "incidents",
        detail: format!("{column} is negative ({value})"),
    })
}

/// Converts a domain integer to its stored form.
pub(crate) fn storable_i32(column: &'static str, value: u32) -> Result<i32, PersistenceError> {
    i32::try_from(value).map_err(|_| {
        PersistenceError::SerializationError(format!("{column} {value} does not fit the column"))
    })
}
