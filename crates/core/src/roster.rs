// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::event::{ChoiceValue, Input};
use crate::session::Session;
use vvf_log_domain::{DomainError, Member, MemberId, MemberRef, sort_roster};

const EXPECTED: &str = "a yes or no button for the member shown";

/// Prepares the roster questions for a session that reached the roster step.
///
/// Team leader and driver are already on board, so they are accepted up
/// front and left out of the questions. Returns `true` when nobody is left
/// to ask about.
///
/// # Errors
///
/// Returns `DomainError::MissingField` if team leader or driver are unset.
pub(crate) fn seed(session: &mut Session, mut members: Vec<Member>) -> Result<bool, CoreError> {
    let team_leader: MemberId = session
        .draft
        .team_leader
        .as_ref()
        .map(|m| m.id)
        .ok_or(DomainError::MissingField("team leader"))?;
    let driver: MemberId = session
        .draft
        .driver
        .as_ref()
        .map(|m| m.id)
        .ok_or(DomainError::MissingField("driver"))?;

    sort_roster(&mut members);
    session.pending_roster = members
        .iter()
        .filter(|m| m.active && m.id != team_leader && m.id != driver)
        .map(Member::to_ref)
        .collect();
    session.accepted_participants = vec![team_leader, driver];

    Ok(session.pending_roster.is_empty())
}

/// Applies one yes/no decision to the head of the pending roster.
///
/// Returns `true` once every member has been decided on.
///
/// # Errors
///
/// Returns a format error for anything but a decision about the current
/// head, including a stale button for an earlier member.
pub(crate) fn decide(session: &mut Session, input: &Input) -> Result<bool, CoreError> {
    let ChoiceValue::Participant { member, include } = input.choice(EXPECTED)? else {
        return Err(CoreError::format(EXPECTED));
    };
    let head: &MemberRef = session
        .pending_roster
        .first()
        .ok_or_else(|| CoreError::format(EXPECTED))?;
    if head.id != *member {
        return Err(CoreError::format(EXPECTED));
    }

    let decided: MemberRef = session.pending_roster.remove(0);
    if *include && !session.accepted_participants.contains(&decided.id) {
        session.accepted_participants.push(decided.id);
    }

    Ok(session.pending_roster.is_empty())
}
