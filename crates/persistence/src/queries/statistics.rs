// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use diesel::SqliteConnection;
use diesel::dsl::count_star;
use diesel::prelude::*;

use super::parse_timestamp;
use crate::data_models::{MonthCount, TypeCount, YearStatistics};
use crate::diesel_schema::incidents;
use crate::error::PersistenceError;

/// Computes activity totals for one year of departures.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored departure is corrupt.
pub fn statistics_for_year(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<YearStatistics, PersistenceError> {
    let total: i64 = incidents::table
        .filter(incidents::departure_year.eq(year))
        .count()
        .get_result(conn)?;

    let type_rows: Vec<(String, i64)> = incidents::table
        .filter(incidents::departure_year.eq(year))
        .group_by(incidents::incident_type)
        .select((incidents::incident_type, count_star()))
        .load(conn)?;
    let mut by_type: Vec<TypeCount> = type_rows
        .into_iter()
        .map(|(incident_type, count)| TypeCount {
            incident_type,
            count,
        })
        .collect();
    by_type.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.incident_type.cmp(&b.incident_type))
    });

    let departures: Vec<String> = incidents::table
        .filter(incidents::departure_year.eq(year))
        .select(incidents::departure)
        .load(conn)?;
    let mut months: BTreeMap<u8, i64> = BTreeMap::new();
    for departure in &departures {
        let month: u8 = u8::from(parse_timestamp(departure)?.month());
        *months.entry(month).or_insert(0) += 1;
    }
    let by_month: Vec<MonthCount> = months
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect();

    Ok(YearStatistics {
        year,
        total,
        by_type,
        by_month,
    })
}
