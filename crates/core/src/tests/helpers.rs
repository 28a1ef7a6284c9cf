// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ChoiceValue, Clock, DatePick, Event, IncidentStore, OperatorId, ReferenceData, Reply,
    ReplyKind, StoreError, WizardEngine,
};
use time::macros::date;
use time::{Date, PrimitiveDateTime};
use vvf_log_domain::{
    DisplayId, FieldUpdate, IncidentId, IncidentKey, IncidentRecord, Member, MemberId, MemberRef,
    NewIncident, QualificationFlags, ReportNumber, SequenceNumber, Vehicle, VehicleRef,
    next_display_id,
};

/// In-memory stand-in for the store, with switchable failures.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub members: Vec<Member>,
    pub vehicles: Vec<Vehicle>,
    pub incidents: Vec<IncidentRecord>,
    pub failing_commits: u32,
    pub failing_updates: u32,
    pub commit_attempts: u32,
}

impl ReferenceData for FakeBackend {
    fn list_active_members(&mut self) -> Result<Vec<Member>, StoreError> {
        Ok(self.members.iter().filter(|m| m.active).cloned().collect())
    }

    fn get_member(&mut self, id: MemberId) -> Result<Option<Member>, StoreError> {
        Ok(self.members.iter().find(|m| m.id == id).cloned())
    }

    fn list_active_vehicles(&mut self) -> Result<Vec<Vehicle>, StoreError> {
        Ok(self.vehicles.iter().filter(|v| v.active).cloned().collect())
    }

    fn last_odometer(
        &mut self,
        vehicle_tag: &str,
        excluding: Option<IncidentId>,
    ) -> Result<u32, StoreError> {
        Ok(self
            .incidents
            .iter()
            .filter(|r| r.vehicle.tag == vehicle_tag && Some(r.id) != excluding)
            .filter_map(|r| r.final_odometer)
            .max()
            .unwrap_or(0))
    }
}

impl IncidentStore for FakeBackend {
    fn next_display_id(&mut self) -> Result<DisplayId, StoreError> {
        Ok(next_display_id(
            self.incidents.iter().map(|r| r.display_id).max(),
        ))
    }

    fn highest_sequence_number(
        &mut self,
        year: i32,
        report_number: &ReportNumber,
    ) -> Result<Option<String>, StoreError> {
        Ok(self
            .incidents
            .iter()
            .filter(|r| r.year() == year && &r.report_number == report_number)
            .map(|r| r.sequence_number.as_str().to_string())
            .max())
    }

    fn recent_incidents(&mut self, limit: usize) -> Result<Vec<IncidentRecord>, StoreError> {
        let mut records: Vec<IncidentRecord> = self.incidents.clone();
        records.sort_by(|a, b| b.departure.cmp(&a.departure));
        records.truncate(limit);
        Ok(records)
    }

    fn get_incident(&mut self, id: IncidentId) -> Result<Option<IncidentRecord>, StoreError> {
        Ok(self.incidents.iter().find(|r| r.id == id).cloned())
    }

    fn commit_incident(
        &mut self,
        incident: &NewIncident,
        participants: &[MemberId],
    ) -> Result<IncidentId, StoreError> {
        self.commit_attempts += 1;
        if self.failing_commits > 0 {
            self.failing_commits -= 1;
            return Err(StoreError::new("disk full"));
        }
        let id: IncidentId = IncidentId::new(i64::try_from(self.incidents.len()).unwrap() + 1);
        self.incidents.push(IncidentRecord {
            id,
            display_id: incident.display_id,
            report_number: incident.report_number.clone(),
            sequence_number: incident.sequence_number.clone(),
            departure: incident.departure,
            return_at: incident.return_at,
            vehicle: incident.vehicle.clone(),
            team_leader: incident.team_leader.clone(),
            driver: incident.driver.clone(),
            participants: participants.to_vec(),
            municipality: incident.municipality.clone(),
            street: incident.street.clone(),
            incident_type: incident.incident_type.clone(),
            personnel_changeover: incident.personnel_changeover,
            final_odometer: incident.final_odometer,
            fuel_liters: incident.fuel_liters,
        });
        Ok(id)
    }

    fn find_incident(&mut self, key: &IncidentKey) -> Result<Option<IncidentRecord>, StoreError> {
        Ok(self.incidents.iter().find(|r| &r.key() == key).cloned())
    }

    fn update_field(&mut self, key: &IncidentKey, update: &FieldUpdate) -> Result<(), StoreError> {
        if self.failing_updates > 0 {
            self.failing_updates -= 1;
            return Err(StoreError::new("database is locked"));
        }
        let record: &mut IncidentRecord = self
            .incidents
            .iter_mut()
            .find(|r| &r.key() == key)
            .ok_or_else(|| StoreError::new("not found"))?;
        update.apply_to(record);
        Ok(())
    }
}

/// A clock stuck on one day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

pub const TODAY: Date = date!(2024 - 05 - 01);
pub const OPERATOR: OperatorId = OperatorId::new(1);

pub const ROSSI: MemberId = MemberId::new(1);
pub const BIANCHI: MemberId = MemberId::new(2);
pub const VERDI: MemberId = MemberId::new(3);
pub const NERI: MemberId = MemberId::new(4);
pub const GIALLI: MemberId = MemberId::new(5);
pub const VIOLA: MemberId = MemberId::new(6);

pub fn create_test_member(id: MemberId, name: &str, surname: &str, active: bool) -> Member {
    Member {
        id,
        name: name.to_string(),
        surname: surname.to_string(),
        qualification: String::from("VV"),
        land_license_grade: String::from("II"),
        flags: QualificationFlags::default(),
        active,
    }
}

pub fn create_test_vehicle(tag: &str, kind: &str) -> Vehicle {
    Vehicle {
        tag: tag.to_string(),
        kind: kind.to_string(),
        active: true,
    }
}

/// Five active members, one inactive, two vehicles, no incidents.
pub fn create_test_backend() -> FakeBackend {
    FakeBackend {
        members: vec![
            create_test_member(ROSSI, "Mario", "Rossi", true),
            create_test_member(BIANCHI, "Luca", "Bianchi", true),
            create_test_member(VERDI, "Giuseppe", "Verdi", true),
            create_test_member(NERI, "Andrea", "Neri", true),
            create_test_member(GIALLI, "Paolo", "Gialli", true),
            create_test_member(VIOLA, "Carlo", "Viola", false),
        ],
        vehicles: vec![
            create_test_vehicle("AB123CD", "APS"),
            create_test_vehicle("EF456GH", "ABP"),
        ],
        ..FakeBackend::default()
    }
}

pub fn create_test_record(
    id: i64,
    report: &str,
    sequence: &str,
    departure: PrimitiveDateTime,
    odometer: u32,
) -> IncidentRecord {
    IncidentRecord {
        id: IncidentId::new(id),
        display_id: DisplayId::new(id),
        report_number: ReportNumber::new(report),
        sequence_number: SequenceNumber::new(sequence),
        departure,
        return_at: Some(departure + time::Duration::hours(2)),
        vehicle: VehicleRef {
            tag: String::from("AB123CD"),
            kind: String::from("APS"),
        },
        team_leader: MemberRef {
            id: ROSSI,
            label: String::from("Rossi Mario"),
        },
        driver: MemberRef {
            id: BIANCHI,
            label: String::from("Bianchi Luca"),
        },
        participants: vec![ROSSI, BIANCHI],
        municipality: String::from("Como"),
        street: String::from("Via Roma"),
        incident_type: String::from("Flooding"),
        personnel_changeover: false,
        final_odometer: Some(odometer),
        fuel_liters: None,
    }
}

pub fn create_test_engine(backend: FakeBackend) -> WizardEngine<FakeBackend, FixedClock> {
    WizardEngine::new(backend, FixedClock(TODAY))
}

pub fn text(engine: &mut WizardEngine<FakeBackend, FixedClock>, value: &str) -> Reply {
    engine.handle(OPERATOR, Event::Text(value.to_string()))
}

pub fn choose(engine: &mut WizardEngine<FakeBackend, FixedClock>, value: ChoiceValue) -> Reply {
    engine.handle(OPERATOR, Event::Choice(value))
}

pub fn assert_prompt(reply: &Reply) {
    assert_eq!(reply.kind, ReplyKind::Prompt, "unexpected reply: {reply:?}");
}

/// Drives a new report from the start up to the roster step.
///
/// Team leader Rossi, driver Bianchi, vehicle `AB123CD`,
/// 01/05/2024 08:00 to 10:00.
pub fn drive_to_roster(engine: &mut WizardEngine<FakeBackend, FixedClock>, report: &str) -> Reply {
    assert_prompt(&engine.handle(OPERATOR, Event::StartNewIncident));
    assert_prompt(&choose(engine, ChoiceValue::NewReport));
    assert_prompt(&text(engine, report));
    assert_prompt(&choose(engine, ChoiceValue::Date(DatePick::Today)));
    assert_prompt(&text(engine, "0800"));
    assert_prompt(&choose(engine, ChoiceValue::Date(DatePick::Today)));
    assert_prompt(&text(engine, "10:00"));
    assert_prompt(&choose(
        engine,
        ChoiceValue::Vehicle(String::from("AB123CD")),
    ));
    assert_prompt(&choose(engine, ChoiceValue::Member(ROSSI)));
    choose(engine, ChoiceValue::Member(BIANCHI))
}

/// Declines every member still pending in the roster.
pub fn decline_everyone(engine: &mut WizardEngine<FakeBackend, FixedClock>) -> Reply {
    loop {
        let session = engine.session(OPERATOR).unwrap();
        let Some(head) = session.pending_roster().first().cloned() else {
            panic!("roster step without pending members");
        };
        let reply: Reply = choose(
            engine,
            ChoiceValue::Participant {
                member: head.id,
                include: false,
            },
        );
        let done: bool = engine
            .session(OPERATOR)
            .is_none_or(|s| s.pending_roster().is_empty());
        if done {
            return reply;
        }
    }
}

/// Drives a new report all the way to the review step.
pub fn drive_to_review(engine: &mut WizardEngine<FakeBackend, FixedClock>, report: &str) -> Reply {
    drive_to_roster(engine, report);
    decline_everyone(engine);
    assert_prompt(&text(engine, "Como"));
    assert_prompt(&text(engine, "Via Roma"));
    assert_prompt(&choose(engine, ChoiceValue::IncidentType(0)));
    assert_prompt(&text(engine, "520"));
    text(engine, "30")
}
