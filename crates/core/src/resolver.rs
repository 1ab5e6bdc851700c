// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status resolution.
//!
//! A person's status on a day is derived from three sources, first match
//! wins:
//!
//! 1. the direct attendance record for that person and day,
//! 2. an active mission spanning the day that lists the person,
//! 3. a permission record whose duration covers the day.
//!
//! When nothing matches, the caller-chosen [`Fallback`] applies. Resolution
//! is total: unknown people and days simply fall through.

use crate::roster::Roster;
use pointage_domain::{
    AttendanceStatus, Mission, MissionId, PersonnelDailyStatus, PersonnelId, ResolvedStatus,
    days_in_span,
};
use std::collections::{BTreeMap, HashMap};
use time::Date;

/// What a day with no information resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Live board: a person is present unless told otherwise.
    #[default]
    Present,
    /// Historical reports: no information is shown as `N/A`.
    NotAvailable,
}

impl Fallback {
    pub(crate) const fn status(self) -> ResolvedStatus {
        match self {
            Self::Present => ResolvedStatus::Present,
            Self::NotAvailable => ResolvedStatus::NotAvailable,
        }
    }
}

/// Anything that can find a mission by id.
pub trait MissionLookup {
    /// Returns the mission with `id`, if it exists.
    fn find_mission(&self, id: &MissionId) -> Option<&Mission>;
}

impl MissionLookup for Roster {
    fn find_mission(&self, id: &MissionId) -> Option<&Mission> {
        self.mission(id)
    }
}

impl MissionLookup for [Mission] {
    fn find_mission(&self, id: &MissionId) -> Option<&Mission> {
        self.iter().find(|m| &m.id == id)
    }
}

impl MissionLookup for BTreeMap<MissionId, Mission> {
    fn find_mission(&self, id: &MissionId) -> Option<&Mission> {
        self.get(id)
    }
}

impl MissionLookup for HashMap<MissionId, Mission> {
    fn find_mission(&self, id: &MissionId) -> Option<&Mission> {
        self.get(id)
    }
}

/// Resolves one person's raw status on `date`, defaulting to present.
#[must_use]
pub fn resolve_status(roster: &Roster, personnel_id: &PersonnelId, date: Date) -> PersonnelDailyStatus {
    resolve_with_fallback(roster, personnel_id, date, Fallback::Present)
}

/// Resolves one person's raw status on `date` with an explicit fallback.
#[must_use]
pub fn resolve_with_fallback(
    roster: &Roster,
    personnel_id: &PersonnelId,
    date: Date,
    fallback: Fallback,
) -> PersonnelDailyStatus {
    if let Some(record) = roster.record(personnel_id, date) {
        return PersonnelDailyStatus {
            date,
            status: record.status.into(),
            mission_id: record.mission_id.clone(),
            permission_duration: record.permission_duration,
        };
    }

    if let Some(mission) = roster
        .missions()
        .find(|m| m.is_active() && m.span().contains(date) && m.has_member(personnel_id))
    {
        return PersonnelDailyStatus {
            date,
            status: ResolvedStatus::Mission,
            mission_id: Some(mission.id.clone()),
            permission_duration: None,
        };
    }

    let covering_permission = roster.records_for(personnel_id).find_map(|record| {
        (record.status == AttendanceStatus::Permission)
            .then_some(record.permission_duration)
            .flatten()
            .filter(|duration| duration.contains(date))
    });
    if let Some(duration) = covering_permission {
        return PersonnelDailyStatus {
            date,
            status: ResolvedStatus::Permission,
            mission_id: None,
            permission_duration: Some(duration),
        };
    }

    PersonnelDailyStatus::plain(date, fallback.status())
}

/// Resolves one person's raw status for every day of `start..=end`.
///
/// A reversed range yields no days.
#[must_use]
pub fn resolve_range(
    roster: &Roster,
    personnel_id: &PersonnelId,
    start: Date,
    end: Date,
    fallback: Fallback,
) -> Vec<PersonnelDailyStatus> {
    days_in_span(start, end)
        .into_iter()
        .map(|day| resolve_with_fallback(roster, personnel_id, day, fallback))
        .collect()
}

/// Reinterprets a raw status in light of the mission lifecycle.
///
/// A mission status pointing at a completed or deleted mission becomes
/// present. A mission status without a mission reference is kept.
#[must_use]
pub fn effective_status<L>(raw: PersonnelDailyStatus, missions: &L) -> PersonnelDailyStatus
where
    L: MissionLookup + ?Sized,
{
    if raw.status != ResolvedStatus::Mission {
        return raw;
    }
    let Some(mission_id) = raw.mission_id.as_ref() else {
        return raw;
    };
    match missions.find_mission(mission_id) {
        Some(mission) if mission.is_active() => raw,
        _ => PersonnelDailyStatus {
            date: raw.date,
            status: ResolvedStatus::Present,
            mission_id: None,
            permission_duration: None,
        },
    }
}

/// Resolves and then applies [`effective_status`].
#[must_use]
pub fn resolve_effective_status(
    roster: &Roster,
    personnel_id: &PersonnelId,
    date: Date,
    fallback: Fallback,
) -> PersonnelDailyStatus {
    effective_status(
        resolve_with_fallback(roster, personnel_id, date, fallback),
        roster,
    )
}
