// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod collaborators;
mod commit;
mod edit;
mod engine;
mod error;
mod event;
mod handlers;
mod prompts;
mod reply;
mod roster;
mod session;
mod step;

#[cfg(test)]
mod tests;

pub use collaborators::{Backend, Clock, IncidentStore, ReferenceData, SystemClock};
pub use engine::{LINKABLE_INCIDENT_LIMIT, WizardEngine};
pub use error::{CoreError, StoreError};
pub use event::{ChoiceValue, DatePick, Event, OperatorId};
pub use reply::{ChoiceOption, Reply, ReplyKind};
pub use session::{EditState, Session, SessionStore};
pub use step::{EditStep, EditableField, SessionStep, Step, entry_plan};
