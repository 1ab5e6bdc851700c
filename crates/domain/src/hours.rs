// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hours accounting.
//!
//! Two flat rules live here: how many hours a mission is worth, and how many
//! hours a single resolved day counts for in the monthly hours report.

use crate::types::ResolvedStatus;
use serde::{Deserialize, Serialize};

/// Policy computing a mission's `total_hours`.
///
/// `total_hours` must always be recomputable from the mission's headcount,
/// so implementations take nothing else.
pub trait HoursPolicy: Send + Sync {
    /// Returns the total hours for a mission staffed by `headcount` people.
    fn mission_hours(&self, headcount: usize) -> u32;
}

/// A fixed number of hours per assigned person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatDailyRate {
    hours_per_person: u32,
}

impl FlatDailyRate {
    /// The default rate of one working day.
    pub const DEFAULT_HOURS: u32 = 8;

    /// Creates a new flat rate.
    #[must_use]
    pub const fn new(hours_per_person: u32) -> Self {
        Self { hours_per_person }
    }
}

impl Default for FlatDailyRate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOURS)
    }
}

impl HoursPolicy for FlatDailyRate {
    fn mission_hours(&self, headcount: usize) -> u32 {
        u32::try_from(headcount)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.hours_per_person)
    }
}

/// Hours credited per resolved daily status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursTable {
    pub present: u32,
    pub absent: u32,
    pub mission: u32,
    pub permission: u32,
    pub not_available: u32,
}

impl HoursTable {
    /// Returns the hours credited for `status`.
    #[must_use]
    pub const fn hours_for(&self, status: ResolvedStatus) -> u32 {
        match status {
            ResolvedStatus::Present => self.present,
            ResolvedStatus::Absent => self.absent,
            ResolvedStatus::Mission => self.mission,
            ResolvedStatus::Permission => self.permission,
            ResolvedStatus::NotAvailable => self.not_available,
        }
    }
}

impl Default for HoursTable {
    fn default() -> Self {
        Self {
            present: 8,
            absent: 0,
            mission: 8,
            permission: 0,
            not_available: 0,
        }
    }
}
