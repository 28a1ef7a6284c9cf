// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;
use time::macros::datetime;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::MalformedInput {
        field: "time",
        expected: "HHMM or HH:MM",
    };
    assert_eq!(format!("{err}"), "Invalid time: expected HHMM or HH:MM");

    let err: DomainError = DomainError::InvalidTime {
        hours: 25,
        minutes: 7,
    };
    assert_eq!(
        format!("{err}"),
        "Invalid time 25:07: hours must be 00-23 and minutes 00-59"
    );

    let err: DomainError = DomainError::OdometerBelowLast {
        vehicle: String::from("AB123CD"),
        last: 1000,
        entered: 950,
    };
    assert_eq!(
        format!("{err}"),
        "Odometer 950 is below the last recorded value 1000 for vehicle AB123CD"
    );

    let err: DomainError = DomainError::SequenceExhausted {
        report_number: String::from("42"),
    };
    assert_eq!(
        format!("{err}"),
        "Report 42 has no sequence numbers left (maximum 99)"
    );

    let err: DomainError = DomainError::InvalidYear(1800);
    assert_eq!(
        format!("{err}"),
        "Invalid year 1800: must be between 1900 and 2200"
    );

    let err: DomainError = DomainError::MissingField("vehicle");
    assert_eq!(format!("{err}"), "Required field 'vehicle' is missing");
}

#[test]
fn test_return_not_after_departure_names_both_timestamps() {
    let err: DomainError = DomainError::ReturnNotAfterDeparture {
        departure: datetime!(2024-05-01 16:00),
        return_at: datetime!(2024-05-01 14:00),
    };
    let message: String = format!("{err}");
    assert!(message.contains("14:00"));
    assert!(message.contains("16:00"));
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::NoLinkableIncidents);
    assert_eq!(
        err.to_string(),
        "No previous incidents exist; start a new report instead"
    );
}
