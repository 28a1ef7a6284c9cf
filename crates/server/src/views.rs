// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};
use vvf_log_domain::Member;
use vvf_log_persistence::IncidentSummary;

/// Default number of legs returned by `/incidents/recent`.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Largest number of legs `/incidents/recent` will return.
pub const MAX_RECENT_LIMIT: usize = 100;

/// Query parameters for the recent incidents endpoint.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Number of legs to return.
    pub limit: Option<usize>,
}

/// Query parameters for the report search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Year of departure, four digits.
    pub year: String,
    /// Report number, digits only.
    pub report: String,
}

/// API response for the recent incidents endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentIncidentsResponse {
    /// Newest departure first.
    pub incidents: Vec<IncidentSummary>,
}

/// API response for the report search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSearchResponse {
    pub year: i32,
    pub report_number: String,
    /// Every leg of the report, in sequence order.
    pub legs: Vec<IncidentSummary>,
}

/// API response for the roster endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembersResponse {
    /// The whole roster in surname order, inactive members included.
    pub members: Vec<Member>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    pub error: bool,
    /// Error message.
    pub message: String,
}
