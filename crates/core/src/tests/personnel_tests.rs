// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    TEST_NOW, create_test_details, create_test_mission, create_test_roster, mid, pid, plan,
    record, run, validated,
};
use crate::{Change, Command, CoreError, MissionPatch, Roster, WriteOp};
use pointage_domain::{AttendanceStatus, DomainError};
use time::macros::date;

#[test]
fn test_add_personnel_starts_present_today() {
    let mut roster: Roster = create_test_roster();

    let transition = run(
        &mut roster,
        Command::AddPersonnel {
            personnel_id: pid("d"),
            details: create_test_details("M-100", "Awa", "Diallo"),
        },
    )
    .unwrap();

    assert_eq!(
        transition.change,
        Change::PersonnelAdded {
            personnel_id: pid("d")
        }
    );
    assert_eq!(roster.personnel_count(), 4);
    let today = roster.record(&pid("d"), TEST_NOW.date()).unwrap();
    assert_eq!(today.status, AttendanceStatus::Present);
}

#[test]
fn test_add_personnel_on_validated_day_skips_attendance() {
    let roster: Roster = Roster::from_parts(
        create_test_roster().personnel().cloned().collect(),
        Vec::new(),
        Vec::new(),
        vec![validated(TEST_NOW.date())],
    );

    let transition = plan(
        &roster,
        Command::AddPersonnel {
            personnel_id: pid("d"),
            details: create_test_details("M-100", "Awa", "Diallo"),
        },
    )
    .unwrap();

    assert_eq!(transition.batch.len(), 1);
    assert!(matches!(transition.batch.ops()[0], WriteOp::UpsertPerson(_)));
}

#[test]
fn test_add_personnel_rejects_duplicate_matricule() {
    let roster: Roster = create_test_roster();

    let result = plan(
        &roster,
        Command::AddPersonnel {
            personnel_id: pid("d"),
            details: create_test_details("m-a", "Awa", "Diallo"),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateMatricule(_)))
    ));
}

#[test]
fn test_add_personnel_rejects_missing_name() {
    let roster: Roster = create_test_roster();

    let result = plan(
        &roster,
        Command::AddPersonnel {
            personnel_id: pid("d"),
            details: create_test_details("M-100", "", "Diallo"),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidName(_)))
    ));
}

#[test]
fn test_update_personnel_keeps_own_matricule() {
    let mut roster: Roster = create_test_roster();

    run(
        &mut roster,
        Command::UpdatePersonnel {
            personnel_id: pid("a"),
            details: create_test_details("M-a", "Jeanne", "Martin"),
        },
    )
    .unwrap();

    let updated = roster.person(&pid("a")).unwrap();
    assert_eq!(updated.first_name, "Jeanne");
    assert_eq!(updated.display_name(), "Martin Jeanne");
}

#[test]
fn test_update_personnel_rejects_other_matricule() {
    let roster: Roster = create_test_roster();

    let result = plan(
        &roster,
        Command::UpdatePersonnel {
            personnel_id: pid("a"),
            details: create_test_details("M-b", "Jean", "Nom"),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateMatricule(_)))
    ));
}

#[test]
fn test_update_unknown_personnel() {
    let roster: Roster = create_test_roster();

    let result = plan(
        &roster,
        Command::UpdatePersonnel {
            personnel_id: pid("ghost"),
            details: create_test_details("M-z", "Jean", "Nom"),
        },
    );

    assert_eq!(result, Err(CoreError::PersonnelNotFound(pid("ghost"))));
}

#[test]
fn test_delete_personnel_cascades() {
    let mut roster: Roster = Roster::from_parts(
        create_test_roster().personnel().cloned().collect(),
        vec![
            record("a", date!(2024 - 01 - 01), AttendanceStatus::Absent),
            record("a", date!(2024 - 01 - 02), AttendanceStatus::Present),
            record("b", date!(2024 - 01 - 01), AttendanceStatus::Absent),
        ],
        vec![create_test_mission(
            "m1",
            &["a", "b"],
            date!(2024 - 01 - 03),
            date!(2024 - 01 - 04),
        )],
        vec![validated(date!(2024 - 01 - 01))],
    );

    run(
        &mut roster,
        Command::DeletePersonnel {
            personnel_id: pid("a"),
        },
    )
    .unwrap();

    assert!(roster.person(&pid("a")).is_none());
    assert_eq!(roster.records_for(&pid("a")).count(), 0);
    assert_eq!(roster.records_for(&pid("b")).count(), 1);
    let mission = roster.mission(&mid("m1")).unwrap();
    assert_eq!(mission.personnel_ids, vec![pid("b")]);
    assert_eq!(mission.total_hours, 8);
}

#[test]
fn test_delete_sole_member_removes_mission() {
    let mut roster: Roster = Roster::from_parts(
        create_test_roster().personnel().cloned().collect(),
        vec![record("a", date!(2024 - 01 - 03), AttendanceStatus::Mission)],
        vec![
            create_test_mission("m1", &["a"], date!(2024 - 01 - 03), date!(2024 - 01 - 04)),
            create_test_mission("m2", &["a", "b"], date!(2024 - 01 - 05), date!(2024 - 01 - 05)),
        ],
        Vec::new(),
    );

    let transition = run(
        &mut roster,
        Command::DeletePersonnel {
            personnel_id: pid("a"),
        },
    )
    .unwrap();

    assert!(
        transition
            .batch
            .ops()
            .contains(&WriteOp::DeleteMission(mid("m1")))
    );
    assert!(roster.mission(&mid("m1")).is_none());
    assert_eq!(
        roster.mission(&mid("m2")).unwrap().personnel_ids,
        vec![pid("b")]
    );

    // The surviving mission still accepts edits that leave members alone.
    let edited = run(
        &mut roster,
        Command::UpdateMission {
            mission_id: mid("m2"),
            patch: MissionPatch {
                kilometers: Some(Some(10)),
                ..MissionPatch::default()
            },
        },
    );
    assert!(edited.is_ok());
    assert!(matches!(
        plan(
            &roster,
            Command::UpdateMission {
                mission_id: mid("m1"),
                patch: MissionPatch::default(),
            },
        ),
        Err(CoreError::MissionNotFound(_))
    ));
}

#[test]
fn test_command_names() {
    assert_eq!(
        Command::ValidateDate {
            date: date!(2024 - 01 - 01)
        }
        .name(),
        "ValidateDate"
    );
    assert_eq!(
        Command::DeleteMission {
            mission_id: mid("m1")
        }
        .name(),
        "DeleteMission"
    );
}
