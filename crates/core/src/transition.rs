// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::batch::WriteBatch;
use pointage_domain::interval::iso_date;
use pointage_domain::{AttendanceStatus, HoursPolicy, MissionId, MissionVocabulary, PersonnelId};
use serde::Serialize;
use time::{Date, OffsetDateTime};

/// Configuration and clock reading a transition depends on.
#[derive(Clone, Copy)]
pub struct Rules<'a> {
    /// Allowed mission names and descriptions.
    pub vocabulary: &'a MissionVocabulary,
    /// Mission hours policy.
    pub hours: &'a dyn HoursPolicy,
    /// The current instant; its UTC date is "today".
    pub now: OffsetDateTime,
}

impl std::fmt::Debug for Rules<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("vocabulary", self.vocabulary)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

/// What a command changed, as broadcast to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Change {
    PersonnelAdded {
        personnel_id: PersonnelId,
    },
    PersonnelUpdated {
        personnel_id: PersonnelId,
    },
    PersonnelDeleted {
        personnel_id: PersonnelId,
    },
    AttendanceSet {
        personnel_id: PersonnelId,
        #[serde(with = "iso_date")]
        start: Date,
        #[serde(with = "iso_date")]
        end: Date,
        status: AttendanceStatus,
    },
    MissionCreated {
        mission_id: MissionId,
    },
    MissionUpdated {
        mission_id: MissionId,
    },
    MissionCompleted {
        mission_id: MissionId,
    },
    MissionReactivated {
        mission_id: MissionId,
    },
    MissionDeleted {
        mission_id: MissionId,
    },
    DayValidated {
        #[serde(with = "iso_date")]
        date: Date,
    },
    DayReactivated {
        #[serde(with = "iso_date")]
        date: Date,
    },
}

/// The result of applying a command.
///
/// Nothing has been written yet: the batch must be committed to a store
/// (and applied to any cached roster) for the change to take effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Every write the command requires, committed atomically.
    pub batch: WriteBatch,
    /// What changed.
    pub change: Change,
}
