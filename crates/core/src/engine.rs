// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collaborators::{Backend, Clock};
use crate::error::CoreError;
use crate::event::{ChoiceValue, Event, Input, OperatorId};
use crate::handlers::{self, CatalogueAction};
use crate::prompts::{self, Prompt};
use crate::reply::{Reply, ReplyKind};
use crate::roster;
use crate::session::{Session, SessionStore};
use crate::step::{EditStep, SessionStep, Step, entry_plan};
use tracing::{debug, info, warn};
use vvf_log_domain::{
    DisplayId, DomainError, Draft, IncidentId, IncidentKey, IncidentRecord, Member, ReportNumber,
    SequenceNumber, next_sequence_number, parse_report_number,
};

/// How many recent records are offered when linking a new leg.
pub const LINKABLE_INCIDENT_LIMIT: usize = 15;

const NO_SESSION: &str = "no active session, start a new incident or an edit first";

/// The result of handling one input at the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Move to the next step of the plan.
    Advance,
    /// Enter an off-plan step, keeping the plan position.
    Detour(Step),
    /// Show another catalogue page.
    ShowPage(usize),
    /// Prompt for whatever step the session now points at.
    Stay,
    /// Re-offer the current step with a notice, keeping session changes.
    Retry(String),
    /// End the wizard with this reply.
    Finish(Reply),
}

/// A transition after it has been applied to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Applied {
    Continue {
        kind: ReplyKind,
        notice: Option<String>,
    },
    Finished(Reply),
}

impl Applied {
    pub(crate) const fn prompt() -> Self {
        Self::Continue {
            kind: ReplyKind::Prompt,
            notice: None,
        }
    }
}

/// Drives the new-incident and edit wizards for every operator.
///
/// Each call to [`WizardEngine::handle`] processes exactly one event and
/// produces exactly one reply. The step handlers work on a copy of the
/// operator's session which only replaces the stored one when the input was
/// accepted, so a rejected input leaves no trace.
#[derive(Debug)]
pub struct WizardEngine<B, C> {
    pub(crate) backend: B,
    pub(crate) clock: C,
    sessions: SessionStore,
}

impl<B: Backend, C: Clock> WizardEngine<B, C> {
    /// Creates an engine with no open sessions.
    ///
    /// # Arguments
    ///
    /// * `backend` - Reference data and incident store
    /// * `clock` - Source of today's date
    #[must_use]
    pub fn new(backend: B, clock: C) -> Self {
        Self::with_session_store(backend, clock, SessionStore::new())
    }

    /// Creates an engine over an existing session store.
    #[must_use]
    pub const fn with_session_store(backend: B, clock: C, sessions: SessionStore) -> Self {
        Self {
            backend,
            clock,
            sessions,
        }
    }

    /// Returns an operator's open session.
    #[must_use]
    pub fn session(&self, operator: OperatorId) -> Option<&Session> {
        self.sessions.get(operator)
    }

    /// Returns every open session.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Returns the backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend for direct queries.
    pub const fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Handles one event from an operator.
    ///
    /// # Arguments
    ///
    /// * `operator` - Who sent the event
    /// * `event` - What they sent
    ///
    /// # Returns
    ///
    /// The message to show the operator. Errors never escape: they are
    /// turned into a retry prompt or a terminal reply.
    pub fn handle(&mut self, operator: OperatorId, event: Event) -> Reply {
        match event {
            Event::StartNewIncident => self.start(operator, Session::new_incident()),
            Event::StartEdit => self.start(operator, Session::edit()),
            Event::Cancel => self.cancel(operator),
            Event::Text(text) => self.handle_input(operator, &Input::Text(text)),
            Event::Choice(choice) => self.handle_input(operator, &Input::Choice(choice)),
        }
    }

    fn start(&mut self, operator: OperatorId, session: Session) -> Reply {
        let replaced: bool = self.sessions.remove(operator).is_some();
        info!(operator = %operator, step = ?session.step, replaced, "Starting wizard");
        match self.render(&session, ReplyKind::Prompt, None) {
            Ok(reply) => {
                self.sessions.insert(operator, session);
                reply
            }
            Err(err) => self.abort(operator, &err),
        }
    }

    fn cancel(&mut self, operator: OperatorId) -> Reply {
        match self.sessions.remove(operator) {
            Some(session) => {
                info!(operator = %operator, step = ?session.step, "Wizard cancelled");
                let text: &str = if session.edit.is_some() {
                    "Editing cancelled. Fields already saved are kept."
                } else {
                    "Cancelled. Nothing was saved."
                };
                Reply::terminal(ReplyKind::Cancelled, text)
            }
            None => {
                debug!(operator = %operator, "Cancel without an open session");
                Reply::terminal(
                    ReplyKind::Aborted,
                    CoreError::Lookup(String::from(NO_SESSION)).to_string(),
                )
            }
        }
    }

    fn handle_input(&mut self, operator: OperatorId, input: &Input) -> Reply {
        let Some(current) = self.sessions.get(operator).cloned() else {
            debug!(operator = %operator, "Input without an open session");
            return Reply::terminal(
                ReplyKind::Aborted,
                CoreError::Lookup(String::from(NO_SESSION)).to_string(),
            );
        };

        let mut next: Session = current.clone();
        let result: Result<Applied, CoreError> = self
            .dispatch(&mut next, input)
            .and_then(|transition| self.apply(&mut next, transition));

        match result {
            Ok(Applied::Continue { kind, notice }) => match self.render(&next, kind, notice) {
                Ok(reply) => {
                    debug!(operator = %operator, from = ?current.step, to = ?next.step, "Transition");
                    self.sessions.insert(operator, next);
                    reply
                }
                Err(err) => self.abort(operator, &err),
            },
            Ok(Applied::Finished(reply)) => {
                info!(operator = %operator, kind = ?reply.kind, "Wizard finished");
                self.sessions.remove(operator);
                reply
            }
            Err(err) if err.is_recoverable() => {
                debug!(operator = %operator, step = ?current.step, error = %err, "Input rejected");
                match self.render(&current, ReplyKind::Retry, Some(err.to_string())) {
                    Ok(reply) => reply,
                    Err(err) => self.abort(operator, &err),
                }
            }
            Err(err) => self.abort(operator, &err),
        }
    }

    fn abort(&mut self, operator: OperatorId, err: &CoreError) -> Reply {
        warn!(operator = %operator, error = %err, "Wizard aborted");
        self.sessions.remove(operator);
        Reply::terminal(ReplyKind::Aborted, format!("{err}. Please start again."))
    }

    fn render(
        &mut self,
        session: &Session,
        kind: ReplyKind,
        notice: Option<String>,
    ) -> Result<Reply, CoreError> {
        let prompt: Prompt = prompts::prompt_for(session, &mut self.backend)?;
        let text: String = match notice {
            Some(notice) => format!("{notice}\n{}", prompt.text),
            None => prompt.text,
        };
        Ok(Reply {
            kind,
            text,
            choices: prompt.choices,
            step: Some(session.step),
        })
    }

    /// The transition table: routes the input to the current step's handler.
    fn dispatch(&mut self, session: &mut Session, input: &Input) -> Result<Transition, CoreError> {
        match session.step {
            SessionStep::NewIncident(Step::ChooseReportKind) => {
                self.choose_report_kind(session, input)
            }
            SessionStep::NewIncident(Step::EnterReportNumber) => {
                self.enter_report_number(session, input)
            }
            SessionStep::NewIncident(Step::PickLinkedIncident) => {
                self.pick_linked_incident(session, input)
            }
            SessionStep::NewIncident(Step::RosterTraversal) => {
                if roster::decide(session, input)? {
                    Ok(Transition::Advance)
                } else {
                    Ok(Transition::Stay)
                }
            }
            SessionStep::NewIncident(Step::Review) => self.review(session, input),
            SessionStep::NewIncident(step) | SessionStep::Edit(EditStep::Field(step)) => {
                self.field_step(session, step, input)
            }
            SessionStep::Edit(EditStep::EnterYear) => crate::edit::enter_year(session, input),
            SessionStep::Edit(EditStep::EnterReportNumber) => {
                crate::edit::enter_report_number(session, input)
            }
            SessionStep::Edit(EditStep::EnterSequenceNumber) => {
                self.enter_sequence_number(session, input)
            }
            SessionStep::Edit(EditStep::FieldMenu) => crate::edit::field_menu(session, input),
        }
    }

    /// Runs the handler of a data-entry step shared by both wizards.
    fn field_step(
        &mut self,
        session: &mut Session,
        step: Step,
        input: &Input,
    ) -> Result<Transition, CoreError> {
        let draft: &Draft = &session.draft;
        let (next, transition): (Draft, Transition) = match step {
            Step::PickDepartureDate => {
                let next: Draft = handlers::pick_departure_date(draft, input, &self.clock)?;
                self.ensure_key_free(&next, session.editing_id())?;
                (next, Transition::Advance)
            }
            Step::EnterDepartureTime => (
                handlers::enter_departure_time(draft, input)?,
                Transition::Advance,
            ),
            Step::PickReturnDate => (
                handlers::pick_return_date(draft, input, &self.clock)?,
                Transition::Advance,
            ),
            Step::EnterReturnTime => (
                handlers::enter_return_time(draft, input)?,
                Transition::Advance,
            ),
            Step::PickVehicle => (
                handlers::pick_vehicle(draft, input, &mut self.backend, session.editing_id())?,
                Transition::Advance,
            ),
            Step::AskChangeover => (
                handlers::ask_changeover(draft, input)?,
                Transition::Advance,
            ),
            Step::PickTeamLeader => (
                handlers::pick_team_leader(draft, input, &mut self.backend)?,
                Transition::Advance,
            ),
            Step::PickDriver => (
                handlers::pick_driver(draft, input, &mut self.backend)?,
                Transition::Advance,
            ),
            Step::EnterMunicipality => (
                handlers::enter_municipality(draft, input)?,
                Transition::Advance,
            ),
            Step::EnterStreet => (handlers::enter_street(draft, input)?, Transition::Advance),
            Step::PickIncidentType => {
                let (next, action) = handlers::pick_incident_type(draft, input)?;
                let transition: Transition = match action {
                    CatalogueAction::Selected => Transition::Advance,
                    CatalogueAction::ShowPage(page) => Transition::ShowPage(page),
                    CatalogueAction::Other => Transition::Detour(Step::EnterCustomIncidentType),
                };
                (next, transition)
            }
            Step::EnterCustomIncidentType => (
                handlers::enter_custom_incident_type(draft, input)?,
                Transition::Advance,
            ),
            Step::EnterFinalOdometer => (
                handlers::enter_final_odometer(
                    draft,
                    input,
                    &mut self.backend,
                    session.editing_id(),
                )?,
                Transition::Advance,
            ),
            Step::EnterFuelLiters => (
                handlers::enter_fuel_liters(draft, input)?,
                Transition::Advance,
            ),
            Step::ChooseReportKind
            | Step::EnterReportNumber
            | Step::PickLinkedIncident
            | Step::RosterTraversal
            | Step::Review => {
                return Err(CoreError::Lookup(format!(
                    "{step:?} is not a field that can be edited"
                )));
            }
        };
        session.draft = next;
        Ok(transition)
    }

    /// Rejects a departure date whose year already holds another record
    /// with the draft's report and sequence number.
    fn ensure_key_free(
        &mut self,
        draft: &Draft,
        editing: Option<IncidentId>,
    ) -> Result<(), CoreError> {
        let (Some(date), Some(report_number), Some(sequence_number)) = (
            draft.departure_date,
            draft.report_number.as_ref(),
            draft.sequence_number.as_ref(),
        ) else {
            return Ok(());
        };
        let key: IncidentKey = IncidentKey {
            year: date.year(),
            report_number: report_number.clone(),
            sequence_number: sequence_number.clone(),
        };
        match self.backend.find_incident(&key)? {
            Some(existing) if Some(existing.id) != editing => {
                Err(DomainError::ReportAlreadyExists {
                    year: key.year,
                    report_number: format!("{report_number}/{sequence_number}"),
                }
                .into())
            }
            _ => Ok(()),
        }
    }

    fn apply(&mut self, session: &mut Session, transition: Transition) -> Result<Applied, CoreError> {
        match transition {
            Transition::Advance => self.advance(session),
            Transition::Detour(step) => {
                session.set_field_step(step);
                Ok(Applied::prompt())
            }
            Transition::ShowPage(page) => {
                session.catalogue_page = page;
                Ok(Applied::prompt())
            }
            Transition::Stay => Ok(Applied::prompt()),
            Transition::Retry(notice) => Ok(Applied::Continue {
                kind: ReplyKind::Retry,
                notice: Some(notice),
            }),
            Transition::Finish(reply) => Ok(Applied::Finished(reply)),
        }
    }

    /// Moves to the next planned step, running its entry actions.
    fn advance(&mut self, session: &mut Session) -> Result<Applied, CoreError> {
        loop {
            if !session.advance_cursor() {
                if session.edit.is_some() {
                    return self.commit_field(session);
                }
                return Err(CoreError::Lookup(String::from(
                    "no step left in the new-incident plan",
                )));
            }
            match session.current_field_step() {
                Some(Step::RosterTraversal) => {
                    let members: Vec<Member> = self.backend.list_active_members()?;
                    if roster::seed(session, members)? {
                        debug!("Roster has nobody left to ask about, skipping");
                        continue;
                    }
                }
                Some(Step::PickIncidentType) => session.catalogue_page = 0,
                _ => {}
            }
            return Ok(Applied::prompt());
        }
    }

    fn choose_report_kind(
        &mut self,
        session: &mut Session,
        input: &Input,
    ) -> Result<Transition, CoreError> {
        const EXPECTED: &str = "the new report or link button";
        match input.choice(EXPECTED)? {
            ChoiceValue::NewReport => session.plan.push(Step::EnterReportNumber),
            ChoiceValue::LinkedReport => {
                let recent: Vec<IncidentRecord> = self.backend.recent_incidents(1)?;
                if recent.is_empty() {
                    return Err(DomainError::NoLinkableIncidents.into());
                }
                session.plan.push(Step::PickLinkedIncident);
            }
            _ => return Err(CoreError::format(EXPECTED)),
        }
        Ok(Transition::Advance)
    }

    fn enter_report_number(
        &mut self,
        session: &mut Session,
        input: &Input,
    ) -> Result<Transition, CoreError> {
        let report_number: ReportNumber =
            parse_report_number(input.text("the report number as digits")?)?;

        let display_id: DisplayId = self.backend.next_display_id()?;
        debug!(report = %report_number, display_id = %display_id, "New report");

        session.draft.report_number = Some(report_number);
        session.draft.sequence_number = Some(SequenceNumber::first());
        session.draft.display_id = Some(display_id);
        session.plan.extend(entry_plan(false, false));
        Ok(Transition::Advance)
    }

    fn pick_linked_incident(
        &mut self,
        session: &mut Session,
        input: &Input,
    ) -> Result<Transition, CoreError> {
        const EXPECTED: &str = "one of the incident buttons";
        let ChoiceValue::LinkIncident(id) = input.choice(EXPECTED)? else {
            return Err(CoreError::format(EXPECTED));
        };
        let record: IncidentRecord = self
            .backend
            .get_incident(*id)?
            .ok_or_else(|| CoreError::Lookup(format!("incident {id}")))?;

        let highest: Option<String> = self
            .backend
            .highest_sequence_number(record.year(), &record.report_number)?;
        let sequence_number: SequenceNumber =
            next_sequence_number(&record.report_number, highest.as_deref())?;
        debug!(
            report = %record.report_number,
            sequence = %sequence_number,
            "Linked to existing report"
        );

        let draft: &mut Draft = &mut session.draft;
        draft.report_number = Some(record.report_number.clone());
        draft.display_id = Some(record.display_id);
        draft.linked_from = Some(record.id);
        if sequence_number.is_follow_up() {
            draft.carry_over_from(&record);
        }
        draft.sequence_number = Some(sequence_number);

        let plan: Vec<Step> = entry_plan(draft.is_follow_up(), draft.carried_over);
        session.plan.extend(plan);
        Ok(Transition::Advance)
    }
}
