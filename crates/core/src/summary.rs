// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only aggregates over a roster: the daily board, the monthly hours
//! table, the mileage report and the mission board.

use crate::resolver::{Fallback, resolve_effective_status};
use crate::roster::Roster;
use pointage_domain::interval::iso_date;
use pointage_domain::{
    HoursTable, Mission, MissionId, Person, PersonnelId, ResolvedStatus, days_in_span,
};
use serde::Serialize;
use time::Date;

/// Per-status headcount for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub total_personnel: usize,
    pub present: usize,
    pub absent: usize,
    pub mission: usize,
    pub permission: usize,
}

/// Counts every person's effective status on `date`, defaulting to present.
#[must_use]
pub fn summary(roster: &Roster, date: Date) -> DailySummary {
    let mut result: DailySummary = DailySummary {
        date,
        total_personnel: roster.personnel_count(),
        present: 0,
        absent: 0,
        mission: 0,
        permission: 0,
    };
    for person in roster.personnel() {
        match resolve_effective_status(roster, &person.id, date, Fallback::Present).status {
            ResolvedStatus::Present | ResolvedStatus::NotAvailable => result.present += 1,
            ResolvedStatus::Absent => result.absent += 1,
            ResolvedStatus::Mission => result.mission += 1,
            ResolvedStatus::Permission => result.permission += 1,
        }
    }
    result
}

/// Which people a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PersonnelSelection {
    #[default]
    All,
    One(PersonnelId),
}

/// One day of one person in the monthly table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub status: ResolvedStatus,
    pub hours: u32,
}

/// Number of days per resolved status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub present: u32,
    pub absent: u32,
    pub mission: u32,
    pub permission: u32,
    pub not_available: u32,
}

impl StatusCounts {
    const fn record(&mut self, status: ResolvedStatus) {
        match status {
            ResolvedStatus::Present => self.present += 1,
            ResolvedStatus::Absent => self.absent += 1,
            ResolvedStatus::Mission => self.mission += 1,
            ResolvedStatus::Permission => self.permission += 1,
            ResolvedStatus::NotAvailable => self.not_available += 1,
        }
    }
}

/// One person's line in the monthly table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    pub personnel_id: PersonnelId,
    pub matricule: String,
    pub rank: String,
    pub display_name: String,
    pub days: Vec<DayCell>,
    pub counts: StatusCounts,
    pub total_hours: u32,
}

/// Per-person, per-day statuses and hours over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTable {
    #[serde(with = "iso_date")]
    pub start: Date,
    #[serde(with = "iso_date")]
    pub end: Date,
    pub rows: Vec<MonthlyRow>,
}

impl MonthlyTable {
    /// Returns the sum of every row's hours.
    #[must_use]
    pub fn total_hours(&self) -> u64 {
        self.rows.iter().map(|r| u64::from(r.total_hours)).sum()
    }
}

/// Builds the hours table for `start..=end`.
///
/// Days with no information show as `N/A` in the cells and counts. Their
/// hours are those of `hours_fallback`: [`Fallback::Present`] for the hours
/// view, [`Fallback::NotAvailable`] to pay nothing for unknown days. Rows
/// are sorted by last name, then first name. An unknown selected person
/// yields no rows.
#[must_use]
pub fn monthly_table(
    roster: &Roster,
    selection: &PersonnelSelection,
    start: Date,
    end: Date,
    hours: &HoursTable,
    hours_fallback: Fallback,
) -> MonthlyTable {
    let days: Vec<Date> = days_in_span(start, end);

    let mut people: Vec<&Person> = match selection {
        PersonnelSelection::All => roster.personnel().collect(),
        PersonnelSelection::One(id) => roster.person(id).into_iter().collect(),
    };
    people.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });

    let rows: Vec<MonthlyRow> = people
        .into_iter()
        .map(|person| {
            let mut counts: StatusCounts = StatusCounts::default();
            let cells: Vec<DayCell> = days
                .iter()
                .map(|day| {
                    let status: ResolvedStatus =
                        resolve_effective_status(roster, &person.id, *day, Fallback::NotAvailable)
                            .status;
                    counts.record(status);
                    let paid_as: ResolvedStatus = if status == ResolvedStatus::NotAvailable {
                        hours_fallback.status()
                    } else {
                        status
                    };
                    DayCell {
                        date: *day,
                        status,
                        hours: hours.hours_for(paid_as),
                    }
                })
                .collect();
            MonthlyRow {
                personnel_id: person.id.clone(),
                matricule: person.matricule.clone(),
                rank: person.rank.clone(),
                display_name: person.display_name(),
                total_hours: cells.iter().map(|c| c.hours).sum(),
                days: cells,
                counts,
            }
        })
        .collect();

    MonthlyTable { start, end, rows }
}

/// A mission with recorded mileage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageEntry {
    pub mission_id: MissionId,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub name: String,
    pub description: String,
    pub vehicle: Option<String>,
    pub kilometers: u32,
}

/// Vehicle usage over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MileageReport {
    pub entries: Vec<MileageEntry>,
    pub total_kilometers: u64,
}

/// Lists missions with kilometers that start within `start..=end`.
///
/// Entries are ordered by start date, then mission id.
#[must_use]
pub fn mileage_report(roster: &Roster, start: Date, end: Date) -> MileageReport {
    let mut entries: Vec<MileageEntry> = roster
        .missions()
        .filter(|m| m.start_date >= start && m.start_date <= end)
        .filter_map(|m| {
            let kilometers: u32 = m.kilometers.filter(|km| *km > 0)?;
            Some(MileageEntry {
                mission_id: m.id.clone(),
                start_date: m.start_date,
                end_date: m.end_date,
                name: m.name.clone(),
                description: m.description.clone(),
                vehicle: m.vehicle.clone(),
                kilometers,
            })
        })
        .collect();
    entries.sort_by(|a, b| {
        a.start_date
            .cmp(&b.start_date)
            .then_with(|| a.mission_id.cmp(&b.mission_id))
    });

    let total_kilometers: u64 = entries.iter().map(|e| u64::from(e.kilometers)).sum();
    MileageReport {
        entries,
        total_kilometers,
    }
}

/// Missions split around today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionBoard {
    /// Missions ending today or later, soonest start first.
    pub upcoming: Vec<Mission>,
    /// Missions that ended before today, most recent first.
    pub past: Vec<Mission>,
}

/// Splits missions into upcoming or ongoing versus past.
#[must_use]
pub fn mission_board(roster: &Roster, today: Date) -> MissionBoard {
    let (mut upcoming, mut past): (Vec<Mission>, Vec<Mission>) = roster
        .missions()
        .cloned()
        .partition(|m| m.end_date >= today);
    upcoming.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.id.cmp(&b.id)));
    past.sort_by(|a, b| b.end_date.cmp(&a.end_date).then_with(|| a.id.cmp(&b.id)));
    MissionBoard { upcoming, past }
}
