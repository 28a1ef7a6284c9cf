// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::step::EditableField;
use serde::{Deserialize, Serialize};
use vvf_log_domain::{IncidentId, MemberId};

/// Identity of the operator driving a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorId(i64);

impl OperatorId {
    /// Creates a new `OperatorId`.
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

impl std::fmt::Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inbound event from the conversation channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Start the new-incident wizard, discarding any open session.
    StartNewIncident,
    /// Start the edit wizard, discarding any open session.
    StartEdit,
    /// Abandon the open session.
    Cancel,
    /// Free text typed by the operator.
    Text(String),
    /// A button pressed by the operator.
    Choice(ChoiceValue),
}

/// Relative date shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePick {
    /// The clock's current date.
    Today,
    /// The day before.
    Yesterday,
}

/// The value attached to a button; echoed back when it is pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceValue {
    /// Log a brand-new report.
    NewReport,
    /// Log a further leg of an existing report.
    LinkedReport,
    /// The existing record to link to.
    LinkIncident(IncidentId),
    /// A relative date.
    Date(DatePick),
    /// A vehicle tag.
    Vehicle(String),
    /// A member, for team leader or driver.
    Member(MemberId),
    /// A roster decision about one member.
    Participant {
        /// The member being decided on.
        member: MemberId,
        /// Whether the member was on board.
        include: bool,
    },
    /// Whether the crew changed since the previous leg.
    Changeover(bool),
    /// A catalogue entry by index.
    IncidentType(usize),
    /// Show another catalogue page.
    CataloguePage(usize),
    /// Type an incident type not in the catalogue.
    OtherIncidentType,
    /// No fuel was added.
    SkipFuel,
    /// Save (`true`) or discard (`false`) the reviewed report.
    Confirm(bool),
    /// Edit one field of the loaded record.
    EditField(EditableField),
    /// Finish editing.
    EditDone,
}

/// Operator input once session management events are filtered out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Input {
    Text(String),
    Choice(ChoiceValue),
}

impl Input {
    pub(crate) fn text(&self, expected: &str) -> Result<&str, crate::CoreError> {
        match self {
            Self::Text(text) => Ok(text.as_str()),
            Self::Choice(_) => Err(crate::CoreError::format(expected)),
        }
    }

    pub(crate) fn choice(&self, expected: &str) -> Result<&ChoiceValue, crate::CoreError> {
        match self {
            Self::Choice(choice) => Ok(choice),
            Self::Text(_) => Err(crate::CoreError::format(expected)),
        }
    }
}
