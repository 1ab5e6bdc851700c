// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TEST_NOW, create_test_draft, create_test_roster, mid, pid, plan, record, run,
};
use crate::{Change, Command, CoreError, Roster, Rules, WriteOp, apply, resolve_status};
use pointage_domain::{
    AttendanceRecord, AttendanceStatus, DateSpan, FlatDailyRate, MissionVocabulary,
    PersonnelDailyStatus, ResolvedStatus,
};
use time::UtcOffset;
use time::macros::date;

/// a: absent record, b: on mission, c: inside a permission interval.
fn create_busy_roster() -> Roster {
    let duration = DateSpan::new(date!(2024 - 04 - 01), date!(2024 - 04 - 05)).unwrap();
    let mut roster: Roster = Roster::from_parts(
        create_test_roster().personnel().cloned().collect(),
        vec![
            record("a", date!(2024 - 04 - 03), AttendanceStatus::Absent),
            AttendanceRecord::permission(pid("c"), date!(2024 - 04 - 01), Some(duration)),
        ],
        Vec::new(),
        Vec::new(),
    );
    run(
        &mut roster,
        Command::CreateMission {
            mission_id: mid("m1"),
            draft: create_test_draft(&["b"], date!(2024 - 04 - 03), date!(2024 - 04 - 03)),
        },
    )
    .unwrap();
    roster
}

#[test]
fn test_validate_then_resolve_matches_snapshot() {
    let mut roster: Roster = create_busy_roster();
    let day = date!(2024 - 04 - 03);
    let before: Vec<PersonnelDailyStatus> = ["a", "b", "c"]
        .iter()
        .map(|id| resolve_status(&roster, &pid(id), day))
        .collect();

    let transition = run(&mut roster, Command::ValidateDate { date: day }).unwrap();

    assert_eq!(transition.change, Change::DayValidated { date: day });
    let snapshot: Vec<&AttendanceRecord> = transition.batch.attendance_upserts().collect();
    assert_eq!(snapshot.len(), 3);
    for (id, expected) in ["a", "b", "c"].iter().zip(&before) {
        let after = resolve_status(&roster, &pid(id), day);
        assert_eq!(&after, expected);
        let stored = roster.record(&pid(id), day).unwrap();
        assert_eq!(ResolvedStatus::from(stored.status), expected.status);
    }
    let c = roster.record(&pid("c"), day).unwrap();
    assert_eq!(c.status, AttendanceStatus::Permission);
    assert!(c.permission_duration.is_some());
}

#[test]
fn test_validate_records_timestamp() {
    let roster: Roster = create_test_roster();

    let transition = plan(
        &roster,
        Command::ValidateDate {
            date: date!(2024 - 04 - 03),
        },
    )
    .unwrap();

    let Some(WriteOp::UpsertDailyStatus(status)) = transition.batch.ops().last() else {
        panic!("validation must end with the daily status");
    };
    assert!(status.validated);
    assert_eq!(status.validated_at.as_deref(), Some("2024-01-15T09:30:00Z"));
}

#[test]
fn test_validate_snapshots_completed_mission_as_present() {
    let mut roster: Roster = create_busy_roster();
    run(
        &mut roster,
        Command::CompleteMission {
            mission_id: mid("m1"),
        },
    )
    .unwrap();

    run(
        &mut roster,
        Command::ValidateDate {
            date: date!(2024 - 04 - 03),
        },
    )
    .unwrap();

    let b = roster.record(&pid("b"), date!(2024 - 04 - 03)).unwrap();
    assert_eq!(b.status, AttendanceStatus::Present);
    assert_eq!(b.mission_id, None);
}

#[test]
fn test_validate_twice_is_rejected() {
    let mut roster: Roster = create_test_roster();
    let day = date!(2024 - 04 - 03);
    run(&mut roster, Command::ValidateDate { date: day }).unwrap();

    assert_eq!(
        plan(&roster, Command::ValidateDate { date: day }),
        Err(CoreError::AlreadyValidated { date: day })
    );
}

#[test]
fn test_validate_rejects_unformattable_clock() {
    let roster: Roster = create_test_roster();
    let vocabulary = MissionVocabulary::default();
    let hours = FlatDailyRate::default();
    // RFC 3339 offsets have no seconds.
    let offset = UtcOffset::from_hms(1, 0, 30).unwrap();
    let rules = Rules {
        vocabulary: &vocabulary,
        hours: &hours,
        now: TEST_NOW.replace_offset(offset),
    };

    let result = apply(
        &roster,
        &rules,
        Command::ValidateDate {
            date: date!(2024 - 04 - 03),
        },
    );

    assert!(matches!(result, Err(CoreError::TimestampFormat { .. })));
}

#[test]
fn test_reactivate_keeps_snapshot() {
    let mut roster: Roster = create_busy_roster();
    let day = date!(2024 - 04 - 03);
    run(&mut roster, Command::ValidateDate { date: day }).unwrap();
    let snapshot: Vec<AttendanceRecord> = roster.attendance().filter(|r| r.date == day).cloned().collect();

    let transition = run(&mut roster, Command::ReactivateDate { date: day }).unwrap();

    assert_eq!(transition.batch.len(), 1);
    assert!(!roster.is_validated(day));
    assert!(roster.daily_status(day).unwrap().validated_at.is_some());
    let after: Vec<AttendanceRecord> = roster.attendance().filter(|r| r.date == day).cloned().collect();
    assert_eq!(after, snapshot);
}

#[test]
fn test_reactivate_unvalidated_day_is_rejected() {
    let roster: Roster = create_test_roster();
    let day = date!(2024 - 04 - 03);

    assert_eq!(
        plan(&roster, Command::ReactivateDate { date: day }),
        Err(CoreError::NotValidated { date: day })
    );
}

#[test]
fn test_is_validated_defaults_to_false() {
    let roster: Roster = create_test_roster();

    assert!(!roster.is_validated(date!(2024 - 04 - 03)));
    assert!(roster.daily_status(date!(2024 - 04 - 03)).is_none());
}
