// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage_domain::{
    AttendanceStatus, DateSpan, MissionDraft, MissionId, PermissionDuration, PersonDetails,
    PersonnelId,
};
use time::Date;

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes. Identifiers of new
/// entities are allocated before the command is built, so applying a
/// command never does I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a person to the roster.
    AddPersonnel {
        /// Store-allocated id for the new person.
        personnel_id: PersonnelId,
        details: PersonDetails,
    },
    /// Replace a person's editable details.
    UpdatePersonnel {
        personnel_id: PersonnelId,
        details: PersonDetails,
    },
    /// Remove a person, their attendance, and their mission assignments.
    DeletePersonnel { personnel_id: PersonnelId },
    /// Set a person's status on a day, or over a permission interval.
    SetStatus {
        personnel_id: PersonnelId,
        date: Date,
        status: AttendanceStatus,
        /// Only meaningful with `AttendanceStatus::Permission`. When present,
        /// every day of the interval is written and `date` is ignored.
        permission_duration: Option<PermissionDuration>,
    },
    /// Create an active mission and tag its members' days.
    CreateMission {
        /// Store-allocated id for the new mission.
        mission_id: MissionId,
        draft: MissionDraft,
    },
    /// Partially update a mission.
    UpdateMission {
        mission_id: MissionId,
        patch: MissionPatch,
    },
    /// Mark an active mission as completed.
    CompleteMission { mission_id: MissionId },
    /// Return a completed mission to active.
    ReactivateMission { mission_id: MissionId },
    /// Delete a mission and revert the days it tagged.
    DeleteMission { mission_id: MissionId },
    /// Snapshot every person's effective status for a day and lock it.
    ValidateDate { date: Date },
    /// Unlock a validated day, keeping its snapshot.
    ReactivateDate { date: Date },
}

impl Command {
    /// Returns the command name used in logs and change events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddPersonnel { .. } => "AddPersonnel",
            Self::UpdatePersonnel { .. } => "UpdatePersonnel",
            Self::DeletePersonnel { .. } => "DeletePersonnel",
            Self::SetStatus { .. } => "SetStatus",
            Self::CreateMission { .. } => "CreateMission",
            Self::UpdateMission { .. } => "UpdateMission",
            Self::CompleteMission { .. } => "CompleteMission",
            Self::ReactivateMission { .. } => "ReactivateMission",
            Self::DeleteMission { .. } => "DeleteMission",
            Self::ValidateDate { .. } => "ValidateDate",
            Self::ReactivateDate { .. } => "ReactivateDate",
        }
    }
}

/// Fields of a mission update. `None` leaves a field unchanged.
///
/// `vehicle` and `kilometers` are doubly optional so they can be cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub span: Option<DateSpan>,
    pub personnel_ids: Option<Vec<PersonnelId>>,
    pub vehicle: Option<Option<String>>,
    pub kilometers: Option<Option<u32>>,
}

impl MissionPatch {
    /// Returns whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.span.is_none()
            && self.personnel_ids.is_none()
            && self.vehicle.is_none()
            && self.kilometers.is_none()
    }
}
