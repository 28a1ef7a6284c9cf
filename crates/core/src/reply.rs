// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event::ChoiceValue;
use crate::step::SessionStep;
use serde::{Deserialize, Serialize};

/// What kind of message a reply is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    /// Asks for the next input.
    Prompt,
    /// Asks again for the same input after a rejection.
    Retry,
    /// The wizard finished and its data was saved.
    Committed,
    /// The operator abandoned the wizard.
    Cancelled,
    /// The wizard ended because of an unrecoverable error.
    Aborted,
}

/// One button offered to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Button text.
    pub label: String,
    /// Value sent back when the button is pressed.
    pub value: ChoiceValue,
}

impl ChoiceOption {
    /// Creates a new `ChoiceOption`.
    #[must_use]
    pub fn new(label: impl Into<String>, value: ChoiceValue) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The single outbound message produced for each inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    /// Message kind.
    pub kind: ReplyKind,
    /// Message text.
    pub text: String,
    /// Buttons to offer; may be empty.
    pub choices: Vec<ChoiceOption>,
    /// The step now awaiting input; `None` once the session is gone.
    pub step: Option<SessionStep>,
}

impl Reply {
    pub(crate) fn terminal(kind: ReplyKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            choices: Vec::new(),
            step: None,
        }
    }

    /// Returns whether the reply ended the session.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.step.is_none()
    }

    /// Returns the value of the button with the given label, if offered.
    #[must_use]
    pub fn choice_labelled(&self, label: &str) -> Option<&ChoiceValue> {
        self.choices
            .iter()
            .find(|choice| choice.label == label)
            .map(|choice| &choice.value)
    }
}
