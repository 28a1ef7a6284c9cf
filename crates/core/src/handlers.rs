// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One handler per data-entry field.
//!
//! Handlers read the current draft and return an updated copy, so a
//! rejected input never leaves a trace in the session.

use crate::collaborators::{Clock, ReferenceData};
use crate::error::CoreError;
use crate::event::{ChoiceValue, DatePick, Input};
use time::{Date, Duration, PrimitiveDateTime, Time};
use vvf_log_domain::{
    ADDRESS_MAX_LEN, CUSTOM_INCIDENT_TYPE_MAX_LEN, DomainError, Draft, IncidentId, Member,
    MemberId, MemberRef, catalogue_page_count, incident_type_label, parse_date,
    parse_fuel_liters, parse_odometer, parse_time_of_day, validate_date_order,
    validate_distinct_members, validate_free_text, validate_odometer,
    validate_return_after_departure,
};

const DATE_INPUT: &str = "a date button or a date as DD/MM/YYYY";
const TIME_INPUT: &str = "a time as HHMM or HH:MM";
const YES_NO_INPUT: &str = "a yes or no button";

/// What a catalogue step asked the engine to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogueAction {
    Selected,
    ShowPage(usize),
    Other,
}

fn resolve_date(input: &Input, clock: &impl Clock) -> Result<Date, CoreError> {
    match input {
        Input::Choice(ChoiceValue::Date(DatePick::Today)) => Ok(clock.today()),
        Input::Choice(ChoiceValue::Date(DatePick::Yesterday)) => clock
            .today()
            .checked_sub(Duration::days(1))
            .ok_or_else(|| DomainError::InvalidDate(String::from("no day before today")).into()),
        Input::Text(text) => Ok(parse_date(text)?),
        Input::Choice(_) => Err(CoreError::format(DATE_INPUT)),
    }
}

fn resolve_time(input: &Input) -> Result<Time, CoreError> {
    Ok(parse_time_of_day(input.text(TIME_INPUT)?)?)
}

fn yes_no(input: &Input) -> Result<bool, CoreError> {
    match input.choice(YES_NO_INPUT)? {
        ChoiceValue::Changeover(answer) => Ok(*answer),
        _ => Err(CoreError::format(YES_NO_INPUT)),
    }
}

fn active_member(
    reference: &mut impl ReferenceData,
    id: MemberId,
) -> Result<MemberRef, CoreError> {
    let member: Option<Member> = reference.get_member(id)?;
    match member {
        Some(member) if member.active => Ok(member.to_ref()),
        _ => Err(DomainError::UnknownMember(id.value()).into()),
    }
}

fn member_choice(input: &Input) -> Result<MemberId, CoreError> {
    match input.choice("a member button")? {
        ChoiceValue::Member(id) => Ok(*id),
        _ => Err(CoreError::format("a member button")),
    }
}

pub(crate) fn pick_departure_date(
    draft: &Draft,
    input: &Input,
    clock: &impl Clock,
) -> Result<Draft, CoreError> {
    let date: Date = resolve_date(input, clock)?;
    let mut next: Draft = draft.clone();
    next.departure_date = Some(date);
    Ok(next)
}

/// Also checks against a known return time, which only exists when editing.
pub(crate) fn enter_departure_time(draft: &Draft, input: &Input) -> Result<Draft, CoreError> {
    let time: Time = resolve_time(input)?;
    let date: Date = draft
        .departure_date
        .ok_or(DomainError::MissingField("departure date"))?;
    let departure: PrimitiveDateTime = PrimitiveDateTime::new(date, time);
    if let Some(return_at) = draft.return_at {
        validate_return_after_departure(departure, return_at)?;
    }
    let mut next: Draft = draft.clone();
    next.departure = Some(departure);
    Ok(next)
}

pub(crate) fn pick_return_date(
    draft: &Draft,
    input: &Input,
    clock: &impl Clock,
) -> Result<Draft, CoreError> {
    let date: Date = resolve_date(input, clock)?;
    let departure: PrimitiveDateTime = draft
        .departure
        .ok_or(DomainError::MissingField("departure"))?;
    validate_date_order(departure.date(), date)?;
    let mut next: Draft = draft.clone();
    next.return_date = Some(date);
    Ok(next)
}

pub(crate) fn enter_return_time(draft: &Draft, input: &Input) -> Result<Draft, CoreError> {
    let time: Time = resolve_time(input)?;
    let date: Date = draft
        .return_date
        .ok_or(DomainError::MissingField("return date"))?;
    let departure: PrimitiveDateTime = draft
        .departure
        .ok_or(DomainError::MissingField("departure"))?;
    let return_at: PrimitiveDateTime = PrimitiveDateTime::new(date, time);
    validate_return_after_departure(departure, return_at)?;
    let mut next: Draft = draft.clone();
    next.return_at = Some(return_at);
    Ok(next)
}

/// A reading already on the draft (only when editing) must still hold for
/// the new vehicle.
pub(crate) fn pick_vehicle(
    draft: &Draft,
    input: &Input,
    reference: &mut impl ReferenceData,
    editing: Option<IncidentId>,
) -> Result<Draft, CoreError> {
    let ChoiceValue::Vehicle(tag) = input.choice("a vehicle button")? else {
        return Err(CoreError::format("a vehicle button"));
    };
    let vehicle = reference
        .list_active_vehicles()?
        .into_iter()
        .find(|vehicle| &vehicle.tag == tag)
        .ok_or_else(|| DomainError::UnknownVehicle(tag.clone()))?;
    if let Some(recorded) = draft.final_odometer {
        let last: u32 = reference.last_odometer(&vehicle.tag, editing)?;
        validate_odometer(&vehicle.tag, recorded, last)?;
    }
    let mut next: Draft = draft.clone();
    next.vehicle = Some(vehicle.to_ref());
    Ok(next)
}

pub(crate) fn ask_changeover(draft: &Draft, input: &Input) -> Result<Draft, CoreError> {
    let changeover: bool = yes_no(input)?;
    let mut next: Draft = draft.clone();
    next.personnel_changeover = changeover;
    Ok(next)
}

/// Rejects the current driver, which is only set when editing.
pub(crate) fn pick_team_leader(
    draft: &Draft,
    input: &Input,
    reference: &mut impl ReferenceData,
) -> Result<Draft, CoreError> {
    let team_leader: MemberRef = active_member(reference, member_choice(input)?)?;
    if let Some(driver) = &draft.driver {
        validate_distinct_members(&team_leader, driver)?;
    }
    let mut next: Draft = draft.clone();
    next.team_leader = Some(team_leader);
    Ok(next)
}

pub(crate) fn pick_driver(
    draft: &Draft,
    input: &Input,
    reference: &mut impl ReferenceData,
) -> Result<Draft, CoreError> {
    let driver: MemberRef = active_member(reference, member_choice(input)?)?;
    if let Some(team_leader) = &draft.team_leader {
        validate_distinct_members(team_leader, &driver)?;
    }
    let mut next: Draft = draft.clone();
    next.driver = Some(driver);
    Ok(next)
}

pub(crate) fn enter_municipality(draft: &Draft, input: &Input) -> Result<Draft, CoreError> {
    let text: &str = input.text("the municipality as text")?;
    let municipality: String = validate_free_text("municipality", text, ADDRESS_MAX_LEN)?;
    let mut next: Draft = draft.clone();
    next.municipality = Some(municipality);
    Ok(next)
}

pub(crate) fn enter_street(draft: &Draft, input: &Input) -> Result<Draft, CoreError> {
    let text: &str = input.text("the street as text")?;
    let street: String = validate_free_text("street", text, ADDRESS_MAX_LEN)?;
    let mut next: Draft = draft.clone();
    next.street = Some(street);
    Ok(next)
}

pub(crate) fn pick_incident_type(
    draft: &Draft,
    input: &Input,
) -> Result<(Draft, CatalogueAction), CoreError> {
    const EXPECTED: &str = "an incident type button";
    match input.choice(EXPECTED)? {
        ChoiceValue::IncidentType(index) => {
            let label: &str = incident_type_label(*index)?;
            let mut next: Draft = draft.clone();
            next.incident_type = Some(label.to_string());
            Ok((next, CatalogueAction::Selected))
        }
        ChoiceValue::CataloguePage(page) if *page < catalogue_page_count() => {
            Ok((draft.clone(), CatalogueAction::ShowPage(*page)))
        }
        ChoiceValue::OtherIncidentType => Ok((draft.clone(), CatalogueAction::Other)),
        _ => Err(CoreError::format(EXPECTED)),
    }
}

pub(crate) fn enter_custom_incident_type(
    draft: &Draft,
    input: &Input,
) -> Result<Draft, CoreError> {
    let text: &str = input.text("the incident type as text")?;
    let label: String = validate_free_text("incident type", text, CUSTOM_INCIDENT_TYPE_MAX_LEN)?;
    let mut next: Draft = draft.clone();
    next.incident_type = Some(label);
    Ok(next)
}

/// Checks against the vehicle's last odometer, leaving out `editing`.
pub(crate) fn enter_final_odometer(
    draft: &Draft,
    input: &Input,
    reference: &mut impl ReferenceData,
    editing: Option<IncidentId>,
) -> Result<Draft, CoreError> {
    let value: u32 = parse_odometer(input.text("the odometer as a number")?)?;
    let vehicle = draft
        .vehicle
        .as_ref()
        .ok_or(DomainError::MissingField("vehicle"))?;
    let last: u32 = reference.last_odometer(&vehicle.tag, editing)?;
    validate_odometer(&vehicle.tag, value, last)?;
    let mut next: Draft = draft.clone();
    next.final_odometer = Some(value);
    Ok(next)
}

pub(crate) fn enter_fuel_liters(draft: &Draft, input: &Input) -> Result<Draft, CoreError> {
    let liters: Option<u32> = match input {
        Input::Text(text) => Some(parse_fuel_liters(text)?),
        Input::Choice(ChoiceValue::SkipFuel) => None,
        Input::Choice(_) => {
            return Err(CoreError::format("liters as a number or the skip button"));
        }
    };
    let mut next: Draft = draft.clone();
    next.fuel_liters = liters;
    Ok(next)
}
