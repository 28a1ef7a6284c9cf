// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::PrimitiveDateTime;

/// Identifier of a roster member, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    /// Creates a new `MemberId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted incident record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(i64);

impl IncidentId {
    /// Creates a new `IncidentId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for IncidentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The globally monotonic number that identifies one intervention.
///
/// Every leg of the same intervention shares the same display id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayId(i64);

impl DisplayId {
    /// Creates a new `DisplayId`.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DisplayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A report number as written on the paper report.
///
/// Leading zeros are significant and preserved.
/// Use `parse_report_number` to build one from operator input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportNumber(String);

impl ReportNumber {
    /// Creates a `ReportNumber` from an already validated value.
    ///
    /// # Arguments
    ///
    /// * `value` - The report number digits
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the report number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReportNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two-digit leg number within a report (`01`..`99`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceNumber(String);

impl SequenceNumber {
    /// Sequence number of the first leg of every report.
    pub const FIRST: &'static str = "01";

    /// Creates a `SequenceNumber` from an already validated value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the sequence number of a report's first leg.
    #[must_use]
    pub fn first() -> Self {
        Self(Self::FIRST.to_string())
    }

    /// Builds a zero-padded sequence number from its numeric value.
    ///
    /// Returns `None` when `number` is outside `1..=99`.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        if (1..=99).contains(&number) {
            Some(Self(format!("{number:02}")))
        } else {
            None
        }
    }

    /// Returns the sequence number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether this leg follows an earlier leg of the same report.
    ///
    /// The single follow-up rule: any value other than `01`.
    #[must_use]
    pub fn is_follow_up(&self) -> bool {
        self.0 != Self::FIRST
    }
}

impl std::fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extra qualifications held by a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationFlags {
    /// Nautical license.
    pub nautical_license: bool,
    /// Rope rescue (SAF).
    pub saf: bool,
    /// Pre-hospital trauma care (TPSS).
    pub tpss: bool,
    /// Breathing apparatus (ATP).
    pub atp: bool,
}

/// A member of the brigade roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Store-assigned identifier.
    pub id: MemberId,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Rank or role (e.g. `CSV`, `VV`).
    pub qualification: String,
    /// Land driving license grade (e.g. `III`, `IIIE`).
    pub land_license_grade: String,
    /// Additional qualifications.
    pub flags: QualificationFlags,
    /// Only active members are offered by the wizards.
    pub active: bool,
}

impl Member {
    /// Returns the label shown to operators: surname, then name.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.surname, self.name)
    }

    /// Returns a lightweight reference suitable for storing in a draft.
    #[must_use]
    pub fn to_ref(&self) -> MemberRef {
        MemberRef {
            id: self.id,
            label: self.display_name(),
        }
    }

    /// Stable roster ordering: surname, then name, then id.
    #[must_use]
    pub fn roster_cmp(&self, other: &Self) -> Ordering {
        self.surname
            .cmp(&other.surname)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Sorts members into roster order.
pub fn sort_roster(members: &mut [Member]) {
    members.sort_by(Member::roster_cmp);
}

/// A member chosen for a role, with the label captured at choice time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    /// The member's identifier.
    pub id: MemberId,
    /// Surname and name.
    pub label: String,
}

/// A vehicle of the brigade fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// License plate.
    pub tag: String,
    /// Vehicle type (e.g. `APS`, `ABP`).
    pub kind: String,
    /// Only active vehicles are offered by the wizards.
    pub active: bool,
}

impl Vehicle {
    /// Returns a lightweight reference suitable for storing in a draft.
    #[must_use]
    pub fn to_ref(&self) -> VehicleRef {
        VehicleRef {
            tag: self.tag.clone(),
            kind: self.kind.clone(),
        }
    }

    /// Pick-list ordering: kind, then tag.
    #[must_use]
    pub fn fleet_cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.tag.cmp(&other.tag))
    }
}

/// A vehicle chosen for an incident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleRef {
    /// License plate.
    pub tag: String,
    /// Vehicle type.
    pub kind: String,
}

impl std::fmt::Display for VehicleRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.tag)
    }
}

/// A persisted incident record: one leg of an intervention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRecord {
    /// Store-assigned identifier.
    pub id: IncidentId,
    /// Intervention number shared by every leg.
    pub display_id: DisplayId,
    /// Paper report number.
    pub report_number: ReportNumber,
    /// Leg number within the report.
    pub sequence_number: SequenceNumber,
    /// When the vehicle left.
    pub departure: PrimitiveDateTime,
    /// When the vehicle came back; `None` while still open.
    pub return_at: Option<PrimitiveDateTime>,
    /// The vehicle used.
    pub vehicle: VehicleRef,
    /// Team leader.
    pub team_leader: MemberRef,
    /// Driver.
    pub driver: MemberRef,
    /// Everyone on board, team leader and driver included.
    pub participants: Vec<MemberId>,
    /// Municipality of the incident.
    pub municipality: String,
    /// Street of the incident.
    pub street: String,
    /// Incident type label.
    pub incident_type: String,
    /// Whether the crew changed since the previous leg.
    pub personnel_changeover: bool,
    /// Odometer reading at return.
    pub final_odometer: Option<u32>,
    /// Fuel added, in liters.
    pub fuel_liters: Option<u32>,
}

impl IncidentRecord {
    /// Returns the calendar year of the departure.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.departure.year()
    }

    /// Returns the key that identifies this record in the edit wizard.
    #[must_use]
    pub fn key(&self) -> IncidentKey {
        IncidentKey {
            year: self.year(),
            report_number: self.report_number.clone(),
            sequence_number: self.sequence_number.clone(),
        }
    }
}

/// A validated record ready to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    /// Intervention number.
    pub display_id: DisplayId,
    /// Paper report number.
    pub report_number: ReportNumber,
    /// Leg number within the report.
    pub sequence_number: SequenceNumber,
    /// When the vehicle left.
    pub departure: PrimitiveDateTime,
    /// When the vehicle came back.
    pub return_at: Option<PrimitiveDateTime>,
    /// The vehicle used.
    pub vehicle: VehicleRef,
    /// Team leader.
    pub team_leader: MemberRef,
    /// Driver.
    pub driver: MemberRef,
    /// Municipality of the incident.
    pub municipality: String,
    /// Street of the incident.
    pub street: String,
    /// Incident type label.
    pub incident_type: String,
    /// Whether the crew changed since the previous leg.
    pub personnel_changeover: bool,
    /// Odometer reading at return.
    pub final_odometer: Option<u32>,
    /// Fuel added, in liters.
    pub fuel_liters: Option<u32>,
}

/// Locates one record: departure year, report number, sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IncidentKey {
    /// Calendar year of the departure.
    pub year: i32,
    /// Paper report number.
    pub report_number: ReportNumber,
    /// Leg number within the report.
    pub sequence_number: SequenceNumber,
}

impl std::fmt::Display for IncidentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}-{}",
            self.year, self.report_number, self.sequence_number
        )
    }
}

/// A single-field change applied to a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// New departure timestamp.
    Departure(PrimitiveDateTime),
    /// New return timestamp.
    Return(PrimitiveDateTime),
    /// New vehicle.
    Vehicle(VehicleRef),
    /// New changeover flag.
    PersonnelChangeover(bool),
    /// New team leader.
    TeamLeader(MemberRef),
    /// New driver.
    Driver(MemberRef),
    /// New municipality and street, always changed together.
    Address {
        /// Municipality.
        municipality: String,
        /// Street.
        street: String,
    },
    /// New incident type label.
    IncidentType(String),
    /// New odometer reading.
    FinalOdometer(u32),
    /// New fuel amount; `None` clears it.
    FuelLiters(Option<u32>),
}

impl FieldUpdate {
    /// Returns a human readable name of the changed field.
    #[must_use]
    pub const fn field_name(&self) -> &'static str {
        match self {
            Self::Departure(_) => "departure",
            Self::Return(_) => "return",
            Self::Vehicle(_) => "vehicle",
            Self::PersonnelChangeover(_) => "personnel changeover",
            Self::TeamLeader(_) => "team leader",
            Self::Driver(_) => "driver",
            Self::Address { .. } => "address",
            Self::IncidentType(_) => "incident type",
            Self::FinalOdometer(_) => "final odometer",
            Self::FuelLiters(_) => "fuel liters",
        }
    }

    /// Applies this update to an in-memory record.
    ///
    /// Changing the team leader or driver also swaps the participant entry
    /// of the member being replaced.
    pub fn apply_to(&self, record: &mut IncidentRecord) {
        match self {
            Self::Departure(at) => record.departure = *at,
            Self::Return(at) => record.return_at = Some(*at),
            Self::Vehicle(vehicle) => record.vehicle = vehicle.clone(),
            Self::PersonnelChangeover(flag) => record.personnel_changeover = *flag,
            Self::TeamLeader(member) => {
                replace_participant(&mut record.participants, record.team_leader.id, member.id);
                record.team_leader = member.clone();
            }
            Self::Driver(member) => {
                replace_participant(&mut record.participants, record.driver.id, member.id);
                record.driver = member.clone();
            }
            Self::Address {
                municipality,
                street,
            } => {
                record.municipality.clone_from(municipality);
                record.street.clone_from(street);
            }
            Self::IncidentType(label) => record.incident_type.clone_from(label),
            Self::FinalOdometer(value) => record.final_odometer = Some(*value),
            Self::FuelLiters(value) => record.fuel_liters = *value,
        }
    }
}

fn replace_participant(participants: &mut Vec<MemberId>, old: MemberId, new: MemberId) {
    participants.retain(|id| *id != old);
    if !participants.contains(&new) {
        participants.push(new);
    }
}
