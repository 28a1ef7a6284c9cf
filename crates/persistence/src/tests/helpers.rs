// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Date, PrimitiveDateTime};
use vvf_log::Clock;
use vvf_log_domain::{
    DisplayId, MemberId, MemberRef, NewIncident, ReportNumber, SequenceNumber, VehicleRef,
};

use crate::{NewMember, Persistence};

pub const ROSSI: MemberId = MemberId::new(1);
pub const BIANCHI: MemberId = MemberId::new(2);
pub const VERDI: MemberId = MemberId::new(3);

/// Clock pinned to a single day.
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// An in-memory database with three members and two vehicles.
///
/// Members: Rossi Mario (1), Bianchi Luca (2), Verdi Giuseppe (3).
/// Vehicles: `AB123CD` (APS) and `EF456GH` (ABP).
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let rossi: MemberId = persistence
        .insert_member(&NewMember::new("Mario", "Rossi", "CSV", "III"))
        .unwrap();
    let bianchi: MemberId = persistence
        .insert_member(&NewMember::new("Luca", "Bianchi", "VV", "II"))
        .unwrap();
    let verdi: MemberId = persistence
        .insert_member(&NewMember::new("Giuseppe", "Verdi", "CSV", "IIIE"))
        .unwrap();
    assert_eq!((rossi, bianchi, verdi), (ROSSI, BIANCHI, VERDI));

    persistence.insert_vehicle("AB123CD", "APS").unwrap();
    persistence.insert_vehicle("EF456GH", "ABP").unwrap();

    persistence
}

pub fn member_ref(id: MemberId, label: &str) -> MemberRef {
    MemberRef {
        id,
        label: label.to_string(),
    }
}

/// A two-hour leg on `AB123CD` led by Rossi and driven by Bianchi.
pub fn create_test_incident(
    report: &str,
    sequence: &str,
    departure: PrimitiveDateTime,
    odometer: u32,
) -> NewIncident {
    NewIncident {
        display_id: DisplayId::new(1),
        report_number: ReportNumber::new(report),
        sequence_number: SequenceNumber::new(sequence),
        departure,
        return_at: Some(departure + time::Duration::hours(2)),
        vehicle: VehicleRef {
            tag: String::from("AB123CD"),
            kind: String::from("APS"),
        },
        team_leader: member_ref(ROSSI, "Rossi Mario"),
        driver: member_ref(BIANCHI, "Bianchi Luca"),
        municipality: String::from("Como"),
        street: String::from("Via Roma"),
        incident_type: String::from("Fire"),
        personnel_changeover: false,
        final_odometer: Some(odometer),
        fuel_liters: Some(30),
    }
}
