// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The edit wizard: locate one record, then change one field at a time.

use crate::collaborators::{Backend, Clock};
use crate::engine::{Applied, Transition, WizardEngine};
use crate::error::CoreError;
use crate::event::{ChoiceValue, Input};
use crate::reply::{Reply, ReplyKind};
use crate::session::{EditState, Session};
use crate::step::{EditStep, EditableField, SessionStep};
use tracing::{info, warn};
use vvf_log_domain::{
    DomainError, Draft, FieldUpdate, IncidentKey, IncidentRecord, SequenceNumber,
    parse_report_number, parse_sequence_number, parse_year,
};

fn edit_state(session: &mut Session) -> Result<&mut EditState, CoreError> {
    session
        .edit
        .as_mut()
        .ok_or_else(|| CoreError::Lookup(String::from("edit session state")))
}

pub(crate) fn enter_year(session: &mut Session, input: &Input) -> Result<Transition, CoreError> {
    let year: i32 = parse_year(input.text("the year as YYYY")?)?;
    edit_state(session)?.year = Some(year);
    session.step = SessionStep::Edit(EditStep::EnterReportNumber);
    Ok(Transition::Stay)
}

pub(crate) fn enter_report_number(
    session: &mut Session,
    input: &Input,
) -> Result<Transition, CoreError> {
    let report_number = parse_report_number(input.text("the report number as digits")?)?;
    edit_state(session)?.report_number = Some(report_number);
    session.step = SessionStep::Edit(EditStep::EnterSequenceNumber);
    Ok(Transition::Stay)
}

pub(crate) fn field_menu(session: &mut Session, input: &Input) -> Result<Transition, CoreError> {
    const EXPECTED: &str = "a field button or done";
    match input.choice(EXPECTED)? {
        ChoiceValue::EditField(field) => {
            let edit: &mut EditState = edit_state(session)?;
            let record: &IncidentRecord = edit
                .record
                .as_ref()
                .ok_or_else(|| CoreError::Lookup(String::from("record being edited")))?;
            let draft: Draft = Draft::from_record(record);
            edit.field = Some(*field);
            session.draft = draft;
            session.catalogue_page = 0;
            session.start_plan(field.steps());
            Ok(Transition::Stay)
        }
        ChoiceValue::EditDone => Ok(Transition::Finish(Reply::terminal(
            ReplyKind::Committed,
            "Editing finished.",
        ))),
        _ => Err(CoreError::format(EXPECTED)),
    }
}

/// Reads the value collected by a field sub-flow out of the draft.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if the sub-flow left the value unset.
pub(crate) fn field_update(field: EditableField, draft: &Draft) -> Result<FieldUpdate, DomainError> {
    let update: FieldUpdate = match field {
        EditableField::Departure => FieldUpdate::Departure(
            draft
                .departure
                .ok_or(DomainError::MissingField("departure"))?,
        ),
        EditableField::Return => {
            FieldUpdate::Return(draft.return_at.ok_or(DomainError::MissingField("return"))?)
        }
        EditableField::Vehicle => FieldUpdate::Vehicle(
            draft
                .vehicle
                .clone()
                .ok_or(DomainError::MissingField("vehicle"))?,
        ),
        EditableField::Changeover => FieldUpdate::PersonnelChangeover(draft.personnel_changeover),
        EditableField::TeamLeader => FieldUpdate::TeamLeader(
            draft
                .team_leader
                .clone()
                .ok_or(DomainError::MissingField("team leader"))?,
        ),
        EditableField::Driver => FieldUpdate::Driver(
            draft
                .driver
                .clone()
                .ok_or(DomainError::MissingField("driver"))?,
        ),
        EditableField::Address => FieldUpdate::Address {
            municipality: draft
                .municipality
                .clone()
                .ok_or(DomainError::MissingField("municipality"))?,
            street: draft
                .street
                .clone()
                .ok_or(DomainError::MissingField("street"))?,
        },
        EditableField::IncidentType => FieldUpdate::IncidentType(
            draft
                .incident_type
                .clone()
                .ok_or(DomainError::MissingField("incident type"))?,
        ),
        EditableField::FinalOdometer => FieldUpdate::FinalOdometer(
            draft
                .final_odometer
                .ok_or(DomainError::MissingField("final odometer"))?,
        ),
        EditableField::FuelLiters => FieldUpdate::FuelLiters(draft.fuel_liters),
    };
    Ok(update)
}

impl<B: Backend, C: Clock> WizardEngine<B, C> {
    /// Looks up the record to edit. A miss ends the wizard.
    pub(crate) fn enter_sequence_number(
        &mut self,
        session: &mut Session,
        input: &Input,
    ) -> Result<Transition, CoreError> {
        let sequence_number: SequenceNumber =
            parse_sequence_number(input.text("the sequence number as digits")?)?;
        let edit: &mut EditState = edit_state(session)?;
        let key: IncidentKey = IncidentKey {
            year: edit.year.ok_or(DomainError::MissingField("year"))?,
            report_number: edit
                .report_number
                .clone()
                .ok_or(DomainError::MissingField("report number"))?,
            sequence_number,
        };

        let record: IncidentRecord = self
            .backend
            .find_incident(&key)?
            .ok_or_else(|| CoreError::Lookup(format!("no incident {key}")))?;
        info!(key = %key, incident_id = %record.id, "Record loaded for editing");

        let draft: Draft = Draft::from_record(&record);
        edit.record = Some(record);
        session.draft = draft;
        session.step = SessionStep::Edit(EditStep::FieldMenu);
        Ok(Transition::Stay)
    }

    /// Saves the value collected by a finished field sub-flow and returns
    /// to the field menu. A failed save is reported and the record is left
    /// unchanged.
    pub(crate) fn commit_field(&mut self, session: &mut Session) -> Result<Applied, CoreError> {
        let edit: &mut EditState = session
            .edit
            .as_mut()
            .ok_or_else(|| CoreError::Lookup(String::from("edit session state")))?;
        let field: EditableField = edit
            .field
            .take()
            .ok_or(DomainError::MissingField("field being edited"))?;
        let record: &mut IncidentRecord = edit
            .record
            .as_mut()
            .ok_or_else(|| CoreError::Lookup(String::from("record being edited")))?;

        let update: FieldUpdate = field_update(field, &session.draft)?;
        let key: IncidentKey = record.key();

        let applied: Applied = match self.backend.update_field(&key, &update) {
            Ok(()) => {
                info!(key = %key, field = update.field_name(), "Field updated");
                update.apply_to(record);
                Applied::Continue {
                    kind: ReplyKind::Prompt,
                    notice: Some(format!("Updated {}.", update.field_name())),
                }
            }
            Err(err) => {
                warn!(key = %key, field = update.field_name(), error = %err, "Field update failed");
                Applied::Continue {
                    kind: ReplyKind::Retry,
                    notice: Some(format!(
                        "Could not update {}: {err}",
                        update.field_name()
                    )),
                }
            }
        };

        session.draft = Draft::from_record(record);
        session.plan.clear();
        session.cursor = 0;
        session.step = SessionStep::Edit(EditStep::FieldMenu);
        Ok(applied)
    }
}
