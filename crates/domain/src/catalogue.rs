// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// The fixed incident-type catalogue, in display order.
pub const INCIDENT_TYPES: &[&str] = &[
    "Fire",
    "Vegetation Fire",
    "Road Accident",
    "Technical Rescue",
    "Flooding",
    "Gas Leak",
    "Door Opening",
    "Animal Rescue",
    "Structural Check",
    "Person Search",
    "Hazardous Materials",
    "Fallen Tree",
];

/// Number of catalogue entries offered per page.
pub const CATALOGUE_PAGE_SIZE: usize = 6;

/// Maximum length of a free-text incident type.
pub const CUSTOM_INCIDENT_TYPE_MAX_LEN: usize = 80;

/// Returns the number of catalogue pages.
#[must_use]
pub const fn catalogue_page_count() -> usize {
    INCIDENT_TYPES.len().div_ceil(CATALOGUE_PAGE_SIZE)
}

/// Returns the `(index, label)` pairs shown on one catalogue page.
///
/// Pages past the end are empty.
#[must_use]
pub fn catalogue_page(page: usize) -> Vec<(usize, &'static str)> {
    INCIDENT_TYPES
        .iter()
        .copied()
        .enumerate()
        .skip(page.saturating_mul(CATALOGUE_PAGE_SIZE))
        .take(CATALOGUE_PAGE_SIZE)
        .collect()
}

/// Resolves a catalogue index to its label.
///
/// # Errors
///
/// Returns `DomainError::UnknownIncidentType` if the index is out of range.
pub fn incident_type_label(index: usize) -> Result<&'static str, DomainError> {
    INCIDENT_TYPES
        .get(index)
        .copied()
        .ok_or(DomainError::UnknownIncidentType(index))
}
