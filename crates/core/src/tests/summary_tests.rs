// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_details, create_test_mission, create_test_person, mid, pid, record,
};
use crate::{
    Fallback, PersonnelSelection, Roster, mileage_report, mission_board, monthly_table, summary,
};
use pointage_domain::{
    AttendanceStatus, HoursTable, MissionStatus, Person, PersonnelId, ResolvedStatus,
};
use time::macros::date;

#[test]
fn test_summary_counts_mission_only_person() {
    let roster: Roster = Roster::from_parts(
        vec![
            create_test_person("a"),
            create_test_person("b"),
            create_test_person("c"),
        ],
        vec![record("b", date!(2024 - 05 - 02), AttendanceStatus::Absent)],
        vec![create_test_mission(
            "m1",
            &["a"],
            date!(2024 - 05 - 01),
            date!(2024 - 05 - 03),
        )],
        Vec::new(),
    );

    let result = summary(&roster, date!(2024 - 05 - 02));

    assert_eq!(result.total_personnel, 3);
    assert_eq!(result.mission, 1);
    assert_eq!(result.absent, 1);
    assert_eq!(result.present, 1);
    assert_eq!(result.permission, 0);
}

#[test]
fn test_summary_counts_completed_mission_as_present() {
    let mut mission = create_test_mission("m1", &["a"], date!(2024 - 05 - 01), date!(2024 - 05 - 03));
    mission.status = MissionStatus::Completed;
    let mut tagged = record("a", date!(2024 - 05 - 02), AttendanceStatus::Mission);
    tagged.mission_id = Some(mid("m1"));
    let roster: Roster = Roster::from_parts(
        vec![create_test_person("a")],
        vec![tagged],
        vec![mission],
        Vec::new(),
    );

    let result = summary(&roster, date!(2024 - 05 - 02));

    assert_eq!(result.present, 1);
    assert_eq!(result.mission, 0);
}

#[test]
fn test_monthly_table_uses_not_available_and_hours() {
    let roster: Roster = Roster::from_parts(
        vec![create_test_person("a")],
        vec![
            record("a", date!(2024 - 05 - 01), AttendanceStatus::Present),
            record("a", date!(2024 - 05 - 02), AttendanceStatus::Absent),
        ],
        vec![create_test_mission(
            "m1",
            &["a"],
            date!(2024 - 05 - 03),
            date!(2024 - 05 - 03),
        )],
        Vec::new(),
    );

    let table = monthly_table(
        &roster,
        &PersonnelSelection::All,
        date!(2024 - 05 - 01),
        date!(2024 - 05 - 04),
        &HoursTable::default(),
        Fallback::NotAvailable,
    );

    assert_eq!(table.rows.len(), 1);
    let row = &table.rows[0];
    let statuses: Vec<ResolvedStatus> = row.days.iter().map(|c| c.status).collect();
    assert_eq!(
        statuses,
        vec![
            ResolvedStatus::Present,
            ResolvedStatus::Absent,
            ResolvedStatus::Mission,
            ResolvedStatus::NotAvailable,
        ]
    );
    assert_eq!(row.total_hours, 16);
    assert_eq!(row.counts.not_available, 1);
    assert_eq!(row.counts.mission, 1);
    assert_eq!(table.total_hours(), 16);
}

#[test]
fn test_monthly_table_pays_unrecorded_days_as_present() {
    let roster: Roster = Roster::from_parts(
        vec![create_test_person("a")],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    );

    let table = monthly_table(
        &roster,
        &PersonnelSelection::All,
        date!(2024 - 03 - 01),
        date!(2024 - 03 - 03),
        &HoursTable::default(),
        Fallback::Present,
    );

    let row = &table.rows[0];
    let statuses: Vec<ResolvedStatus> = row.days.iter().map(|c| c.status).collect();
    assert_eq!(statuses, vec![ResolvedStatus::NotAvailable; 3]);
    assert_eq!(row.counts.not_available, 3);
    assert!(row.days.iter().all(|c| c.hours == 8));
    assert_eq!(row.total_hours, 24);
}

#[test]
fn test_monthly_table_hours_fallback_leaves_recorded_days_alone() {
    let roster: Roster = Roster::from_parts(
        vec![create_test_person("a")],
        vec![record("a", date!(2024 - 05 - 02), AttendanceStatus::Absent)],
        Vec::new(),
        Vec::new(),
    );

    let table = monthly_table(
        &roster,
        &PersonnelSelection::All,
        date!(2024 - 05 - 01),
        date!(2024 - 05 - 03),
        &HoursTable::default(),
        Fallback::Present,
    );

    let hours: Vec<u32> = table.rows[0].days.iter().map(|c| c.hours).collect();
    assert_eq!(hours, vec![8, 0, 8]);
    assert_eq!(table.total_hours(), 16);
}

#[test]
fn test_monthly_table_selection_and_order() {
    let zola: Person = Person::from_details(
        PersonnelId::new("z"),
        create_test_details("M-1", "Emile", "Zola"),
    );
    let adam: Person = Person::from_details(
        PersonnelId::new("y"),
        create_test_details("M-2", "Paul", "Adam"),
    );
    let roster: Roster = Roster::from_parts(vec![zola, adam], Vec::new(), Vec::new(), Vec::new());

    let all = monthly_table(
        &roster,
        &PersonnelSelection::All,
        date!(2024 - 05 - 01),
        date!(2024 - 05 - 01),
        &HoursTable::default(),
        Fallback::NotAvailable,
    );
    let one = monthly_table(
        &roster,
        &PersonnelSelection::One(pid("z")),
        date!(2024 - 05 - 01),
        date!(2024 - 05 - 01),
        &HoursTable::default(),
        Fallback::NotAvailable,
    );
    let unknown = monthly_table(
        &roster,
        &PersonnelSelection::One(pid("ghost")),
        date!(2024 - 05 - 01),
        date!(2024 - 05 - 01),
        &HoursTable::default(),
        Fallback::NotAvailable,
    );

    let names: Vec<&str> = all.rows.iter().map(|r| r.display_name.as_str()).collect();
    assert_eq!(names, vec!["Adam Paul", "Zola Emile"]);
    assert_eq!(one.rows.len(), 1);
    assert_eq!(one.rows[0].personnel_id, pid("z"));
    assert!(unknown.rows.is_empty());
}

#[test]
fn test_mileage_report_filters_and_totals() {
    let mut early = create_test_mission("m1", &["a"], date!(2024 - 05 - 20), date!(2024 - 06 - 02));
    early.kilometers = Some(120);
    early.vehicle = Some(String::from("Toyota 4x4"));
    let mut later = create_test_mission("m2", &["a"], date!(2024 - 05 - 03), date!(2024 - 05 - 03));
    later.kilometers = Some(45);
    let mut zero = create_test_mission("m3", &["a"], date!(2024 - 05 - 04), date!(2024 - 05 - 04));
    zero.kilometers = Some(0);
    let mut outside = create_test_mission("m4", &["a"], date!(2024 - 06 - 01), date!(2024 - 06 - 01));
    outside.kilometers = Some(300);
    let roster: Roster = Roster::from_parts(
        vec![create_test_person("a")],
        Vec::new(),
        vec![early, later, zero, outside],
        Vec::new(),
    );

    let report = mileage_report(&roster, date!(2024 - 05 - 01), date!(2024 - 05 - 31));

    let ids: Vec<&str> = report.entries.iter().map(|e| e.mission_id.value()).collect();
    assert_eq!(ids, vec!["m2", "m1"]);
    assert_eq!(report.total_kilometers, 165);
    assert_eq!(report.entries[1].vehicle.as_deref(), Some("Toyota 4x4"));
}

#[test]
fn test_mission_board_splits_on_today() {
    let roster: Roster = Roster::from_parts(
        vec![create_test_person("a")],
        Vec::new(),
        vec![
            create_test_mission("old", &["a"], date!(2024 - 04 - 01), date!(2024 - 04 - 02)),
            create_test_mission("now", &["a"], date!(2024 - 05 - 01), date!(2024 - 05 - 10)),
            create_test_mission("next", &["a"], date!(2024 - 05 - 20), date!(2024 - 05 - 20)),
        ],
        Vec::new(),
    );

    let board = mission_board(&roster, date!(2024 - 05 - 05));

    let upcoming: Vec<&str> = board.upcoming.iter().map(|m| m.id.value()).collect();
    let past: Vec<&str> = board.past.iter().map(|m| m.id.value()).collect();
    assert_eq!(upcoming, vec!["now", "next"]);
    assert_eq!(past, vec!["old"]);
}

#[test]
fn test_daily_summary_serializes_camel_case() {
    let roster: Roster = Roster::from_parts(vec![create_test_person("a")], Vec::new(), Vec::new(), Vec::new());

    let json = serde_json::to_value(summary(&roster, date!(2024 - 05 - 02))).unwrap();

    assert_eq!(json["date"], "2024-05-02");
    assert_eq!(json["totalPersonnel"], 1);
    assert_eq!(json["present"], 1);
}
