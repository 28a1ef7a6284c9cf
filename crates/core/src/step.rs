// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Steps of the new-incident wizard. Edit sub-flows reuse the field steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// New report or further leg of an existing one.
    ChooseReportKind,
    /// Type the number of a new report.
    EnterReportNumber,
    /// Pick the record a new leg follows.
    PickLinkedIncident,
    /// Departure date.
    PickDepartureDate,
    /// Departure time.
    EnterDepartureTime,
    /// Return date.
    PickReturnDate,
    /// Return time.
    EnterReturnTime,
    /// Vehicle.
    PickVehicle,
    /// Crew changeover, follow-up legs only.
    AskChangeover,
    /// Team leader.
    PickTeamLeader,
    /// Driver.
    PickDriver,
    /// One yes/no question per remaining active member.
    RosterTraversal,
    /// Municipality.
    EnterMunicipality,
    /// Street.
    EnterStreet,
    /// Incident type from the catalogue.
    PickIncidentType,
    /// Incident type as free text.
    EnterCustomIncidentType,
    /// Final odometer.
    EnterFinalOdometer,
    /// Fuel added.
    EnterFuelLiters,
    /// Confirm or discard.
    Review,
}

/// Steps of the edit wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditStep {
    /// Year of the record.
    EnterYear,
    /// Report number of the record.
    EnterReportNumber,
    /// Sequence number of the record.
    EnterSequenceNumber,
    /// Choose which field to change.
    FieldMenu,
    /// Inside a field sub-flow.
    Field(Step),
}

/// Where an operator's session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStep {
    /// New-incident wizard.
    NewIncident(Step),
    /// Edit wizard.
    Edit(EditStep),
}

/// Fields the edit wizard can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditableField {
    /// Departure date and time.
    Departure,
    /// Return date and time.
    Return,
    /// Vehicle.
    Vehicle,
    /// Crew changeover flag.
    Changeover,
    /// Team leader.
    TeamLeader,
    /// Driver.
    Driver,
    /// Municipality and street.
    Address,
    /// Incident type.
    IncidentType,
    /// Final odometer.
    FinalOdometer,
    /// Fuel added.
    FuelLiters,
}

impl EditableField {
    /// Every editable field, in menu order.
    pub const ALL: [Self; 10] = [
        Self::Departure,
        Self::Return,
        Self::Vehicle,
        Self::Changeover,
        Self::TeamLeader,
        Self::Driver,
        Self::Address,
        Self::IncidentType,
        Self::FinalOdometer,
        Self::FuelLiters,
    ];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Departure => "Departure",
            Self::Return => "Return",
            Self::Vehicle => "Vehicle",
            Self::Changeover => "Crew changeover",
            Self::TeamLeader => "Team leader",
            Self::Driver => "Driver",
            Self::Address => "Address",
            Self::IncidentType => "Incident type",
            Self::FinalOdometer => "Final odometer",
            Self::FuelLiters => "Fuel liters",
        }
    }

    /// The field steps that collect a new value for this field.
    #[must_use]
    pub fn steps(self) -> Vec<Step> {
        match self {
            Self::Departure => vec![Step::PickDepartureDate, Step::EnterDepartureTime],
            Self::Return => vec![Step::PickReturnDate, Step::EnterReturnTime],
            Self::Vehicle => vec![Step::PickVehicle],
            Self::Changeover => vec![Step::AskChangeover],
            Self::TeamLeader => vec![Step::PickTeamLeader],
            Self::Driver => vec![Step::PickDriver],
            Self::Address => vec![Step::EnterMunicipality, Step::EnterStreet],
            Self::IncidentType => vec![Step::PickIncidentType],
            Self::FinalOdometer => vec![Step::EnterFinalOdometer],
            Self::FuelLiters => vec![Step::EnterFuelLiters],
        }
    }
}

/// Builds the ordered data-entry steps that follow report selection.
///
/// The changeover question only exists for follow-up legs, and address and
/// incident type are skipped when they were carried over from the linked leg.
///
/// # Arguments
///
/// * `follow_up` - Whether the leg's sequence number is not `01`
/// * `carried_over` - Whether address and type were copied from the linked leg
#[must_use]
pub fn entry_plan(follow_up: bool, carried_over: bool) -> Vec<Step> {
    let mut plan: Vec<Step> = vec![
        Step::PickDepartureDate,
        Step::EnterDepartureTime,
        Step::PickReturnDate,
        Step::EnterReturnTime,
        Step::PickVehicle,
    ];
    if follow_up {
        plan.push(Step::AskChangeover);
    }
    plan.extend([Step::PickTeamLeader, Step::PickDriver, Step::RosterTraversal]);
    if !carried_over {
        plan.extend([
            Step::EnterMunicipality,
            Step::EnterStreet,
            Step::PickIncidentType,
        ]);
    }
    plan.extend([
        Step::EnterFinalOdometer,
        Step::EnterFuelLiters,
        Step::Review,
    ]);
    plan
}
