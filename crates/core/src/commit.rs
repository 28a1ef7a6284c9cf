// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collaborators::{Backend, Clock};
use crate::engine::{Transition, WizardEngine};
use crate::error::CoreError;
use crate::event::{ChoiceValue, Input};
use crate::reply::{Reply, ReplyKind};
use crate::session::Session;
use tracing::{error, info, warn};
use vvf_log_domain::{IncidentId, NewIncident};

impl<B: Backend, C: Clock> WizardEngine<B, C> {
    /// Handles the review step: save or discard the completed draft.
    ///
    /// A failed save keeps the draft and offers the review again once; a
    /// second failure ends the wizard.
    pub(crate) fn review(
        &mut self,
        session: &mut Session,
        input: &Input,
    ) -> Result<Transition, CoreError> {
        const EXPECTED: &str = "the save or cancel button";
        let confirmed: bool = match input.choice(EXPECTED)? {
            ChoiceValue::Confirm(confirmed) => *confirmed,
            _ => return Err(CoreError::format(EXPECTED)),
        };
        if !confirmed {
            return Ok(Transition::Finish(Reply::terminal(
                ReplyKind::Cancelled,
                "Report discarded. Nothing was saved.",
            )));
        }

        let incident: NewIncident = session.draft.to_new_incident()?;
        match self
            .backend
            .commit_incident(&incident, &session.accepted_participants)
        {
            Ok(id) => Ok(Transition::Finish(committed_reply(id, &incident))),
            Err(err) if session.commit_failures == 0 => {
                warn!(
                    report = %incident.report_number,
                    sequence = %incident.sequence_number,
                    error = %err,
                    "Commit failed, offering one retry"
                );
                session.commit_failures += 1;
                Ok(Transition::Retry(format!(
                    "Could not save the report: {err}. Press save to try again or cancel."
                )))
            }
            Err(err) => {
                error!(
                    report = %incident.report_number,
                    sequence = %incident.sequence_number,
                    error = %err,
                    "Commit failed again, giving up"
                );
                Err(CoreError::Commit(err.to_string()))
            }
        }
    }
}

fn committed_reply(id: IncidentId, incident: &NewIncident) -> Reply {
    info!(
        incident_id = %id,
        report = %incident.report_number,
        sequence = %incident.sequence_number,
        display_id = %incident.display_id,
        "Incident committed"
    );
    Reply::terminal(
        ReplyKind::Committed,
        format!(
            "Saved report {}/{} (intervention #{}).",
            incident.report_number, incident.sequence_number, incident.display_id
        ),
    )
}
