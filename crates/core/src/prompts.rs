// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collaborators::Backend;
use crate::engine::LINKABLE_INCIDENT_LIMIT;
use crate::error::{CoreError, StoreError};
use crate::event::{ChoiceValue, DatePick};
use crate::reply::ChoiceOption;
use crate::session::Session;
use crate::step::{EditStep, EditableField, SessionStep, Step};
use time::PrimitiveDateTime;
use time::macros::format_description;
use vvf_log_domain::{
    Draft, IncidentRecord, Member, Vehicle, catalogue_page, catalogue_page_count, sort_roster,
};

/// Text and buttons for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Prompt {
    pub text: String,
    pub choices: Vec<ChoiceOption>,
}

impl Prompt {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            choices: Vec::new(),
        }
    }

    fn with_choices(text: impl Into<String>, choices: Vec<ChoiceOption>) -> Self {
        Self {
            text: text.into(),
            choices,
        }
    }
}

fn yes_no(yes: ChoiceValue, no: ChoiceValue) -> Vec<ChoiceOption> {
    vec![ChoiceOption::new("Yes", yes), ChoiceOption::new("No", no)]
}

fn date_choices() -> Vec<ChoiceOption> {
    vec![
        ChoiceOption::new("Today", ChoiceValue::Date(DatePick::Today)),
        ChoiceOption::new("Yesterday", ChoiceValue::Date(DatePick::Yesterday)),
    ]
}

fn member_choices(
    backend: &mut impl Backend,
    exclude: Option<vvf_log_domain::MemberId>,
) -> Result<Vec<ChoiceOption>, StoreError> {
    let mut members: Vec<Member> = backend.list_active_members()?;
    sort_roster(&mut members);
    Ok(members
        .iter()
        .filter(|member| Some(member.id) != exclude)
        .map(|member| ChoiceOption::new(member.display_name(), ChoiceValue::Member(member.id)))
        .collect())
}

fn vehicle_choices(backend: &mut impl Backend) -> Result<Vec<ChoiceOption>, StoreError> {
    let mut vehicles: Vec<Vehicle> = backend.list_active_vehicles()?;
    vehicles.sort_by(Vehicle::fleet_cmp);
    Ok(vehicles
        .iter()
        .map(|vehicle| {
            ChoiceOption::new(
                vehicle.to_ref().to_string(),
                ChoiceValue::Vehicle(vehicle.tag.clone()),
            )
        })
        .collect())
}

fn catalogue_choices(page: usize) -> Vec<ChoiceOption> {
    let mut choices: Vec<ChoiceOption> = catalogue_page(page)
        .into_iter()
        .map(|(index, label)| ChoiceOption::new(label, ChoiceValue::IncidentType(index)))
        .collect();
    if page > 0 {
        choices.push(ChoiceOption::new(
            "Previous",
            ChoiceValue::CataloguePage(page - 1),
        ));
    }
    if page + 1 < catalogue_page_count() {
        choices.push(ChoiceOption::new("More", ChoiceValue::CataloguePage(page + 1)));
    }
    choices.push(ChoiceOption::new("Other", ChoiceValue::OtherIncidentType));
    choices
}

/// Formats a timestamp the way operators type it.
pub(crate) fn timestamp(value: PrimitiveDateTime) -> String {
    let format = format_description!("[day]/[month]/[year] [hour]:[minute]");
    value.format(&format).unwrap_or_else(|_| value.to_string())
}

/// Short one-line description used in pick lists.
pub(crate) fn record_label(record: &IncidentRecord) -> String {
    format!(
        "#{} R{}/{} {} {}",
        record.display_id,
        record.report_number,
        record.sequence_number,
        timestamp(record.departure),
        record.municipality
    )
}

fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| String::from("-"), |v| v.to_string())
}

/// Multi-line summary shown at review and in the edit menu.
pub(crate) fn summary(draft: &Draft) -> String {
    let mut lines: Vec<String> = vec![
        format!(
            "Report: {}/{}",
            or_dash(draft.report_number.as_ref()),
            or_dash(draft.sequence_number.as_ref())
        ),
        format!("Intervention: #{}", or_dash(draft.display_id)),
        format!("Departure: {}", or_dash(draft.departure.map(timestamp))),
        format!("Return: {}", or_dash(draft.return_at.map(timestamp))),
        format!("Vehicle: {}", or_dash(draft.vehicle.as_ref())),
    ];
    if draft.is_follow_up() {
        let changeover: &str = if draft.personnel_changeover { "yes" } else { "no" };
        lines.push(format!("Crew changeover: {changeover}"));
    }
    lines.push(format!(
        "Team leader: {}",
        or_dash(draft.team_leader.as_ref().map(|m| m.label.as_str()))
    ));
    lines.push(format!(
        "Driver: {}",
        or_dash(draft.driver.as_ref().map(|m| m.label.as_str()))
    ));
    lines.push(format!(
        "Address: {}, {}",
        or_dash(draft.street.as_deref()),
        or_dash(draft.municipality.as_deref())
    ));
    lines.push(format!(
        "Incident type: {}",
        or_dash(draft.incident_type.as_deref())
    ));
    lines.push(format!(
        "Final odometer: {}",
        or_dash(draft.final_odometer)
    ));
    lines.push(format!("Fuel liters: {}", or_dash(draft.fuel_liters)));
    lines.join("\n")
}

fn field_prompt(
    step: Step,
    session: &Session,
    backend: &mut impl Backend,
) -> Result<Prompt, CoreError> {
    let draft: &Draft = &session.draft;
    let prompt: Prompt = match step {
        Step::ChooseReportKind => Prompt::with_choices(
            "Is this a new report or a further leg of an existing one?",
            vec![
                ChoiceOption::new("New report", ChoiceValue::NewReport),
                ChoiceOption::new("Link to existing report", ChoiceValue::LinkedReport),
            ],
        ),
        Step::EnterReportNumber => Prompt::text("Enter the report number."),
        Step::PickLinkedIncident => {
            let records: Vec<IncidentRecord> =
                backend.recent_incidents(LINKABLE_INCIDENT_LIMIT)?;
            let choices: Vec<ChoiceOption> = records
                .iter()
                .map(|record| {
                    ChoiceOption::new(record_label(record), ChoiceValue::LinkIncident(record.id))
                })
                .collect();
            Prompt::with_choices("Which incident does this leg follow?", choices)
        }
        Step::PickDepartureDate => {
            Prompt::with_choices("Departure date? Or type DD/MM/YYYY.", date_choices())
        }
        Step::EnterDepartureTime => Prompt::text("Departure time? (HHMM)"),
        Step::PickReturnDate => {
            Prompt::with_choices("Return date? Or type DD/MM/YYYY.", date_choices())
        }
        Step::EnterReturnTime => Prompt::text("Return time? (HHMM)"),
        Step::PickVehicle => Prompt::with_choices("Which vehicle?", vehicle_choices(backend)?),
        Step::AskChangeover => Prompt::with_choices(
            "Did the crew change since the previous leg?",
            yes_no(ChoiceValue::Changeover(true), ChoiceValue::Changeover(false)),
        ),
        Step::PickTeamLeader => Prompt::with_choices(
            "Who was the team leader?",
            member_choices(backend, draft.driver.as_ref().map(|m| m.id))?,
        ),
        Step::PickDriver => Prompt::with_choices(
            "Who was the driver?",
            member_choices(backend, draft.team_leader.as_ref().map(|m| m.id))?,
        ),
        Step::RosterTraversal => match session.pending_roster.first() {
            Some(head) => Prompt::with_choices(
                format!(
                    "Was {} on board? ({} left)",
                    head.label,
                    session.pending_roster.len()
                ),
                yes_no(
                    ChoiceValue::Participant {
                        member: head.id,
                        include: true,
                    },
                    ChoiceValue::Participant {
                        member: head.id,
                        include: false,
                    },
                ),
            ),
            None => Prompt::text("Nobody left to ask about."),
        },
        Step::EnterMunicipality => Prompt::text("Municipality?"),
        Step::EnterStreet => Prompt::text("Street?"),
        Step::PickIncidentType => Prompt::with_choices(
            format!(
                "Incident type? (page {} of {})",
                session.catalogue_page + 1,
                catalogue_page_count()
            ),
            catalogue_choices(session.catalogue_page),
        ),
        Step::EnterCustomIncidentType => Prompt::text("Type the incident type."),
        Step::EnterFinalOdometer => match &draft.vehicle {
            Some(vehicle) => {
                let last: u32 = backend.last_odometer(&vehicle.tag, session.editing_id())?;
                Prompt::text(format!(
                    "Final odometer of {vehicle}? (last recorded: {last} km)"
                ))
            }
            None => Prompt::text("Final odometer?"),
        },
        Step::EnterFuelLiters => Prompt::with_choices(
            "Liters of fuel added?",
            vec![ChoiceOption::new("Skip", ChoiceValue::SkipFuel)],
        ),
        Step::Review => Prompt::with_choices(
            format!("Please review:\n{}", summary(draft)),
            vec![
                ChoiceOption::new("Save", ChoiceValue::Confirm(true)),
                ChoiceOption::new("Cancel", ChoiceValue::Confirm(false)),
            ],
        ),
    };
    Ok(prompt)
}

fn menu_prompt(session: &Session) -> Prompt {
    let heading: String = session
        .edit
        .as_ref()
        .and_then(|edit| edit.record.as_ref())
        .map_or_else(String::new, |record| {
            format!("Editing {}\n", record_label(record))
        });
    let mut choices: Vec<ChoiceOption> = EditableField::ALL
        .iter()
        .map(|field| ChoiceOption::new(field.label(), ChoiceValue::EditField(*field)))
        .collect();
    choices.push(ChoiceOption::new("Done", ChoiceValue::EditDone));
    Prompt::with_choices(
        format!(
            "{heading}{}\nWhich field do you want to change?",
            summary(&session.draft)
        ),
        choices,
    )
}

/// Builds the prompt for the session's current step.
pub(crate) fn prompt_for(
    session: &Session,
    backend: &mut impl Backend,
) -> Result<Prompt, CoreError> {
    match session.step {
        SessionStep::NewIncident(step) | SessionStep::Edit(EditStep::Field(step)) => {
            field_prompt(step, session, backend)
        }
        SessionStep::Edit(EditStep::EnterYear) => {
            Ok(Prompt::text("Year of the incident to edit? (YYYY)"))
        }
        SessionStep::Edit(EditStep::EnterReportNumber) => Ok(Prompt::text("Report number?")),
        SessionStep::Edit(EditStep::EnterSequenceNumber) => {
            Ok(Prompt::text("Sequence number? (e.g. 01)"))
        }
        SessionStep::Edit(EditStep::FieldMenu) => Ok(menu_prompt(session)),
    }
}
