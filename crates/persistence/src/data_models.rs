// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use vvf_log_domain::QualificationFlags;

/// A member to be added to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub surname: String,
    pub qualification: String,
    pub land_license_grade: String,
    #[serde(default)]
    pub flags: QualificationFlags,
}

impl NewMember {
    /// Creates a new member entry with no qualification flags.
    #[must_use]
    pub fn new(name: &str, surname: &str, qualification: &str, land_license_grade: &str) -> Self {
        Self {
            name: name.to_string(),
            surname: surname.to_string(),
            qualification: qualification.to_string(),
            land_license_grade: land_license_grade.to_string(),
            flags: QualificationFlags::default(),
        }
    }
}

/// Flat, display-ready view of one incident leg.
///
/// Member and vehicle references are resolved to labels and timestamps
/// are rendered as `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentSummary {
    pub incident_id: i64,
    pub display_id: i64,
    pub report_number: String,
    pub sequence_number: String,
    pub departure: String,
    pub return_at: Option<String>,
    pub vehicle: String,
    pub team_leader: String,
    pub driver: String,
    /// Everyone on board, team leader and driver included, sorted by label.
    pub participants: Vec<String>,
    pub municipality: String,
    pub street: String,
    pub incident_type: String,
    pub personnel_changeover: bool,
    pub final_odometer: Option<u32>,
    pub fuel_liters: Option<u32>,
}

/// Number of legs of one incident type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub incident_type: String,
    pub count: i64,
}

/// Number of legs that departed in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    /// 1 = January.
    pub month: u8,
    pub count: i64,
}

/// Yearly activity totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearStatistics {
    pub year: i32,
    pub total: i64,
    /// Most frequent first; ties ordered by name.
    pub by_type: Vec<TypeCount>,
    /// Only months with at least one leg, in calendar order.
    pub by_month: Vec<MonthCount>,
}
