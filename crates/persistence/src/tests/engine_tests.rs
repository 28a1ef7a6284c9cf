// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The wizard engine running on top of the `SQLite` store.

use super::helpers::{BIANCHI, FixedClock, ROSSI, VERDI, create_test_persistence};
use crate::Persistence;
use time::macros::{date, datetime};
use vvf_log::{
    ChoiceValue, DatePick, EditableField, Event, IncidentStore, OperatorId, Reply, ReplyKind,
    WizardEngine,
};
use vvf_log_domain::{IncidentKey, IncidentRecord, ReportNumber, SequenceNumber};

const OPERATOR: OperatorId = OperatorId::new(7);

type Engine = WizardEngine<Persistence, FixedClock>;

fn create_engine() -> Engine {
    WizardEngine::new(create_test_persistence(), FixedClock(date!(2024 - 05 - 01)))
}

fn text(engine: &mut Engine, value: &str) -> Reply {
    engine.handle(OPERATOR, Event::Text(value.to_string()))
}

fn choose(engine: &mut Engine, value: ChoiceValue) -> Reply {
    engine.handle(OPERATOR, Event::Choice(value))
}

fn assert_prompt(reply: &Reply) {
    assert_eq!(reply.kind, ReplyKind::Prompt, "unexpected reply: {reply:?}");
}

fn stored(engine: &mut Engine, sequence: &str) -> IncidentRecord {
    engine
        .backend_mut()
        .find_incident(&IncidentKey {
            year: 2024,
            report_number: ReportNumber::new("42"),
            sequence_number: SequenceNumber::new(sequence),
        })
        .unwrap()
        .unwrap()
}

/// Commits report 42/01: 08:00 to 10:00 on `AB123CD`, Rossi leading,
/// Bianchi driving, Verdi on board.
fn commit_first_leg(engine: &mut Engine) {
    assert_prompt(&engine.handle(OPERATOR, Event::StartNewIncident));
    assert_prompt(&choose(engine, ChoiceValue::NewReport));
    assert_prompt(&text(engine, "42"));
    assert_prompt(&choose(engine, ChoiceValue::Date(DatePick::Today)));
    assert_prompt(&text(engine, "08:00"));
    assert_prompt(&choose(engine, ChoiceValue::Date(DatePick::Today)));
    assert_prompt(&text(engine, "10:00"));
    assert_prompt(&choose(engine, ChoiceValue::Vehicle(String::from("AB123CD"))));
    assert_prompt(&choose(engine, ChoiceValue::Member(ROSSI)));
    assert_prompt(&choose(engine, ChoiceValue::Member(BIANCHI)));
    assert_prompt(&choose(
        engine,
        ChoiceValue::Participant {
            member: VERDI,
            include: true,
        },
    ));
    assert_prompt(&text(engine, "Como"));
    assert_prompt(&text(engine, "Via Roma"));
    assert_prompt(&choose(engine, ChoiceValue::IncidentType(0)));
    assert_prompt(&text(engine, "520"));
    assert_prompt(&text(engine, "30"));

    let reply: Reply = choose(engine, ChoiceValue::Confirm(true));
    assert_eq!(reply.kind, ReplyKind::Committed, "{reply:?}");
}

#[test]
fn test_new_report_is_persisted() {
    let mut engine = create_engine();
    commit_first_leg(&mut engine);

    let record: IncidentRecord = stored(&mut engine, "01");
    assert_eq!(record.display_id.value(), 1);
    assert_eq!(record.departure, datetime!(2024-05-01 08:00));
    assert_eq!(record.return_at, Some(datetime!(2024-05-01 10:00)));
    assert_eq!(record.participants, vec![ROSSI, BIANCHI, VERDI]);
    assert_eq!(record.incident_type, "Fire");
    assert_eq!(record.final_odometer, Some(520));
    assert_eq!(record.fuel_liters, Some(30));
}

#[test]
fn test_reusing_report_number_in_same_year_is_rejected() {
    let mut engine = create_engine();
    commit_first_leg(&mut engine);

    engine.handle(OPERATOR, Event::StartNewIncident);
    choose(&mut engine, ChoiceValue::NewReport);
    assert_prompt(&text(&mut engine, "42"));
    let reply: Reply = choose(&mut engine, ChoiceValue::Date(DatePick::Today));

    assert_eq!(reply.kind, ReplyKind::Retry);
    assert!(reply.text.contains("42/01 already exists in 2024"));
    assert!(engine.session(OPERATOR).is_some());
}

/// Logs a new report with typed dates, 08:00 to 10:00, nobody else on board.
fn commit_dated_report(engine: &mut Engine, report: &str, date: &str, odometer: &str) -> Reply {
    assert_prompt(&engine.handle(OPERATOR, Event::StartNewIncident));
    assert_prompt(&choose(engine, ChoiceValue::NewReport));
    assert_prompt(&text(engine, report));
    assert_prompt(&text(engine, date));
    assert_prompt(&text(engine, "0800"));
    assert_prompt(&text(engine, date));
    assert_prompt(&text(engine, "1000"));
    assert_prompt(&choose(engine, ChoiceValue::Vehicle(String::from("AB123CD"))));
    assert_prompt(&choose(engine, ChoiceValue::Member(ROSSI)));
    assert_prompt(&choose(engine, ChoiceValue::Member(BIANCHI)));
    assert_prompt(&choose(
        engine,
        ChoiceValue::Participant {
            member: VERDI,
            include: false,
        },
    ));
    assert_prompt(&text(engine, "Como"));
    assert_prompt(&text(engine, "Via Roma"));
    assert_prompt(&choose(engine, ChoiceValue::IncidentType(0)));
    assert_prompt(&text(engine, odometer));
    assert_prompt(&choose(engine, ChoiceValue::SkipFuel));
    choose(engine, ChoiceValue::Confirm(true))
}

#[test]
fn test_report_number_is_checked_against_departure_year() {
    let mut engine: Engine =
        WizardEngine::new(create_test_persistence(), FixedClock(date!(2025 - 01 - 01)));
    let reply: Reply = commit_dated_report(&mut engine, "42", "30/12/2024", "520");
    assert_eq!(reply.kind, ReplyKind::Committed, "{reply:?}");

    engine.handle(OPERATOR, Event::StartNewIncident);
    choose(&mut engine, ChoiceValue::NewReport);
    assert_prompt(&text(&mut engine, "42"));
    let reply: Reply = text(&mut engine, "31/12/2024");
    assert_eq!(reply.kind, ReplyKind::Retry, "{reply:?}");
    assert!(reply.text.contains("already exists in 2024"));

    // The same number is free in the clock's year.
    assert_prompt(&text(&mut engine, "01/01/2025"));
    engine.handle(OPERATOR, Event::Cancel);

    let reply: Reply = commit_dated_report(&mut engine, "42", "01/01/2025", "600");
    assert_eq!(reply.kind, ReplyKind::Committed, "{reply:?}");
    let both: usize = [2024, 2025]
        .into_iter()
        .filter(|year| {
            engine
                .backend_mut()
                .find_incident(&IncidentKey {
                    year: *year,
                    report_number: ReportNumber::new("42"),
                    sequence_number: SequenceNumber::first(),
                })
                .unwrap()
                .is_some()
        })
        .count();
    assert_eq!(both, 2);
}

#[test]
fn test_linked_leg_continues_the_report() {
    let mut engine = create_engine();
    commit_first_leg(&mut engine);
    let first: IncidentRecord = stored(&mut engine, "01");

    engine.handle(OPERATOR, Event::StartNewIncident);
    let reply: Reply = choose(&mut engine, ChoiceValue::LinkedReport);
    assert_eq!(reply.choices.len(), 1);
    assert_prompt(&choose(&mut engine, ChoiceValue::LinkIncident(first.id)));
    choose(&mut engine, ChoiceValue::Date(DatePick::Today));
    text(&mut engine, "1100");
    choose(&mut engine, ChoiceValue::Date(DatePick::Today));
    text(&mut engine, "1200");
    choose(&mut engine, ChoiceValue::Vehicle(String::from("AB123CD")));
    choose(&mut engine, ChoiceValue::Changeover(false));
    choose(&mut engine, ChoiceValue::Member(ROSSI));
    choose(&mut engine, ChoiceValue::Member(BIANCHI));
    choose(
        &mut engine,
        ChoiceValue::Participant {
            member: VERDI,
            include: false,
        },
    );

    let reply: Reply = text(&mut engine, "510");
    assert_eq!(reply.kind, ReplyKind::Retry, "odometer went backwards");
    text(&mut engine, "540");
    choose(&mut engine, ChoiceValue::SkipFuel);
    let reply: Reply = choose(&mut engine, ChoiceValue::Confirm(true));
    assert_eq!(reply.kind, ReplyKind::Committed, "{reply:?}");

    let second: IncidentRecord = stored(&mut engine, "02");
    assert_eq!(second.display_id, first.display_id);
    assert_eq!(second.municipality, "Como");
    assert_eq!(second.incident_type, "Fire");
    assert_eq!(second.participants, vec![ROSSI, BIANCHI]);
    assert_eq!(second.fuel_liters, None);
}

#[test]
fn test_edit_team_leader_is_persisted() {
    let mut engine = create_engine();
    commit_first_leg(&mut engine);

    assert_prompt(&engine.handle(OPERATOR, Event::StartEdit));
    assert_prompt(&text(&mut engine, "2024"));
    assert_prompt(&text(&mut engine, "42"));
    assert_prompt(&text(&mut engine, "1"));
    assert_prompt(&choose(
        &mut engine,
        ChoiceValue::EditField(EditableField::TeamLeader),
    ));
    let reply: Reply = choose(&mut engine, ChoiceValue::Member(VERDI));
    assert_prompt(&reply);
    assert!(reply.text.contains("Updated team leader."), "{}", reply.text);

    let reply: Reply = choose(&mut engine, ChoiceValue::EditDone);
    assert_eq!(reply.kind, ReplyKind::Committed);

    let record: IncidentRecord = stored(&mut engine, "01");
    assert_eq!(record.team_leader.id, VERDI);
    assert_eq!(record.participants, vec![BIANCHI, VERDI]);
}
