// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event::OperatorId;
use crate::step::{EditStep, EditableField, SessionStep, Step};
use std::collections::HashMap;
use vvf_log_domain::{Draft, IncidentId, IncidentRecord, MemberId, MemberRef, ReportNumber};

/// Lookup progress and loaded record of the edit wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditState {
    pub(crate) year: Option<i32>,
    pub(crate) report_number: Option<ReportNumber>,
    pub(crate) record: Option<IncidentRecord>,
    pub(crate) field: Option<EditableField>,
}

impl EditState {
    /// The record being edited, once located.
    #[must_use]
    pub const fn record(&self) -> Option<&IncidentRecord> {
        self.record.as_ref()
    }

    /// The field currently being edited.
    #[must_use]
    pub const fn field(&self) -> Option<EditableField> {
        self.field
    }
}

/// One operator's in-progress wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) step: SessionStep,
    pub(crate) plan: Vec<Step>,
    pub(crate) cursor: usize,
    pub(crate) draft: Draft,
    pub(crate) pending_roster: Vec<MemberRef>,
    pub(crate) accepted_participants: Vec<MemberId>,
    pub(crate) catalogue_page: usize,
    pub(crate) commit_failures: u8,
    pub(crate) edit: Option<EditState>,
}

impl Session {
    /// A fresh new-incident session.
    #[must_use]
    pub fn new_incident() -> Self {
        Self {
            step: SessionStep::NewIncident(Step::ChooseReportKind),
            plan: vec![Step::ChooseReportKind],
            cursor: 0,
            draft: Draft::default(),
            pending_roster: Vec::new(),
            accepted_participants: Vec::new(),
            catalogue_page: 0,
            commit_failures: 0,
            edit: None,
        }
    }

    /// A fresh edit session.
    #[must_use]
    pub fn edit() -> Self {
        Self {
            step: SessionStep::Edit(EditStep::EnterYear),
            plan: Vec::new(),
            cursor: 0,
            draft: Draft::default(),
            pending_roster: Vec::new(),
            accepted_participants: Vec::new(),
            catalogue_page: 0,
            commit_failures: 0,
            edit: Some(EditState::default()),
        }
    }

    /// The step awaiting input.
    #[must_use]
    pub const fn step(&self) -> SessionStep {
        self.step
    }

    /// The ordered steps of the current flow.
    #[must_use]
    pub fn plan(&self) -> &[Step] {
        &self.plan
    }

    /// The draft being filled in.
    #[must_use]
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Members not yet asked about, head first.
    #[must_use]
    pub fn pending_roster(&self) -> &[MemberRef] {
        &self.pending_roster
    }

    /// Members on board so far.
    #[must_use]
    pub fn accepted_participants(&self) -> &[MemberId] {
        &self.accepted_participants
    }

    /// Number of failed commit attempts.
    #[must_use]
    pub const fn commit_failures(&self) -> u8 {
        self.commit_failures
    }

    /// Edit wizard state, for edit sessions.
    #[must_use]
    pub const fn edit_state(&self) -> Option<&EditState> {
        self.edit.as_ref()
    }

    /// The persisted record being edited, excluded from odometer checks.
    pub(crate) fn editing_id(&self) -> Option<IncidentId> {
        self.edit
            .as_ref()
            .and_then(|edit| edit.record.as_ref())
            .map(|record| record.id)
    }

    pub(crate) fn current_field_step(&self) -> Option<Step> {
        match self.step {
            SessionStep::NewIncident(step) | SessionStep::Edit(EditStep::Field(step)) => {
                Some(step)
            }
            SessionStep::Edit(_) => None,
        }
    }

    /// Points the session at a field step, in whichever wizard is running.
    pub(crate) const fn set_field_step(&mut self, step: Step) {
        self.step = if self.edit.is_some() {
            SessionStep::Edit(EditStep::Field(step))
        } else {
            SessionStep::NewIncident(step)
        };
    }

    /// Moves to the next planned step; `false` when the plan is exhausted.
    pub(crate) fn advance_cursor(&mut self) -> bool {
        let next: usize = self.cursor + 1;
        match self.plan.get(next).copied() {
            Some(step) => {
                self.cursor = next;
                self.set_field_step(step);
                true
            }
            None => false,
        }
    }

    /// Replaces the plan and points at its first step.
    pub(crate) fn start_plan(&mut self, plan: Vec<Step>) {
        self.plan = plan;
        self.cursor = 0;
        if let Some(step) = self.plan.first().copied() {
            self.set_field_step(step);
        }
    }
}

/// Per-operator sessions. At most one per operator.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: HashMap<OperatorId, Session>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an operator's session.
    #[must_use]
    pub fn get(&self, operator: OperatorId) -> Option<&Session> {
        self.sessions.get(&operator)
    }

    /// Stores a session, returning the one it replaced.
    pub fn insert(&mut self, operator: OperatorId, session: Session) -> Option<Session> {
        self.sessions.insert(operator, session)
    }

    /// Removes an operator's session.
    pub fn remove(&mut self, operator: OperatorId) -> Option<Session> {
        self.sessions.remove(&operator)
    }

    /// Number of open sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
