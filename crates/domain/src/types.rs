// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::interval::{DateSpan, format_iso_date, iso_date};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Opaque identifier of a person, assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonnelId(String);

impl PersonnelId {
    /// Creates a new `PersonnelId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonnelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a mission, assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionId(String);

impl MissionId {
    /// Creates a new `MissionId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A member of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Store identifier.
    pub id: PersonnelId,
    /// Unique business code.
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    pub rank: String,
    pub contact: String,
    pub address: String,
    pub email: String,
}

impl Person {
    /// Builds a person from a store id and its editable details.
    #[must_use]
    pub fn from_details(id: PersonnelId, details: PersonDetails) -> Self {
        Self {
            id,
            matricule: details.matricule,
            first_name: details.first_name,
            last_name: details.last_name,
            rank: details.rank,
            contact: details.contact,
            address: details.address,
            email: details.email,
        }
    }

    /// Returns "LASTNAME Firstname" as displayed on the roster.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.last_name, self.first_name)
    }
}

/// Editable fields of a person, as entered on the personnel form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDetails {
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
}

/// Caller-supplied fields of a mission. Status and hours are never taken from callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionDraft {
    pub name: String,
    pub description: String,
    pub span: DateSpan,
    pub personnel_ids: Vec<PersonnelId>,
    pub vehicle: Option<String>,
    pub kilometers: Option<u32>,
}

/// Daily presence status of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Mission,
    Permission,
}

impl AttendanceStatus {
    /// All statuses, in display order.
    pub const ALL: [Self; 4] = [Self::Present, Self::Absent, Self::Mission, Self::Permission];

    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Mission => "mission",
            Self::Permission => "permission",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "mission" => Ok(Self::Mission),
            "permission" => Ok(Self::Permission),
            _ => Err(DomainError::InvalidAttendanceStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission interval, inclusive on both ends.
pub type PermissionDuration = DateSpan;

/// A sparse per-(person, date) attendance fact.
///
/// There is at most one record per `(personnel_id, date)`; its identity is
/// derived from both so that every write is an idempotent upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub personnel_id: PersonnelId,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_duration: Option<PermissionDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_id: Option<MissionId>,
}

impl AttendanceRecord {
    /// Creates a plain record with no permission duration or mission reference.
    #[must_use]
    pub const fn new(personnel_id: PersonnelId, date: Date, status: AttendanceStatus) -> Self {
        Self {
            personnel_id,
            date,
            status,
            permission_duration: None,
            mission_id: None,
        }
    }

    /// Creates a record attributing the person to a mission on `date`.
    #[must_use]
    pub const fn mission(personnel_id: PersonnelId, date: Date, mission_id: MissionId) -> Self {
        Self {
            personnel_id,
            date,
            status: AttendanceStatus::Mission,
            permission_duration: None,
            mission_id: Some(mission_id),
        }
    }

    /// Creates a permission record for one day of `duration`.
    #[must_use]
    pub const fn permission(
        personnel_id: PersonnelId,
        date: Date,
        duration: Option<PermissionDuration>,
    ) -> Self {
        Self {
            personnel_id,
            date,
            status: AttendanceStatus::Permission,
            permission_duration: duration,
            mission_id: None,
        }
    }

    /// Returns the deterministic record id `{personnelId}_{date}`.
    #[must_use]
    pub fn record_id(&self) -> String {
        attendance_record_id(&self.personnel_id, self.date)
    }
}

/// Builds the deterministic attendance record id `{personnelId}_{date}`.
#[must_use]
pub fn attendance_record_id(personnel_id: &PersonnelId, date: Date) -> String {
    format!("{}_{}", personnel_id.value(), format_iso_date(date))
}

/// Lifecycle of a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    #[default]
    Active,
    Completed,
}

impl MissionStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl FromStr for MissionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidMissionStatus(s.to_string())),
        }
    }
}

/// A named, dated work assignment for one or more people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: MissionId,
    /// Name from the controlled vocabulary.
    pub name: String,
    /// Description from the name-dependent vocabulary.
    pub description: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the mission. Equal to `start_date` for single-day missions.
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub personnel_ids: Vec<PersonnelId>,
    /// Derived from `personnel_ids` by the hours policy; never set by callers.
    pub total_hours: u32,
    pub status: MissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<u32>,
}

impl Mission {
    /// Returns the inclusive day span of the mission.
    #[must_use]
    pub const fn span(&self) -> DateSpan {
        DateSpan {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Returns whether the mission is still active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == MissionStatus::Active
    }

    /// Returns whether `personnel_id` is assigned to the mission.
    #[must_use]
    pub fn has_member(&self, personnel_id: &PersonnelId) -> bool {
        self.personnel_ids.contains(personnel_id)
    }
}

/// Validation state of one calendar day. Absence of a record means "not validated".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatus {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub validated: bool,
    /// RFC 3339 timestamp of the last validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<String>,
}

/// A resolved status, which may be "no information" in historical views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedStatus {
    #[serde(rename = "present")]
    Present,
    #[serde(rename = "absent")]
    Absent,
    #[serde(rename = "mission")]
    Mission,
    #[serde(rename = "permission")]
    Permission,
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl ResolvedStatus {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Mission => "mission",
            Self::Permission => "permission",
            Self::NotAvailable => "N/A",
        }
    }

    /// Returns the attendance status, if any information exists.
    #[must_use]
    pub const fn attendance(&self) -> Option<AttendanceStatus> {
        match self {
            Self::Present => Some(AttendanceStatus::Present),
            Self::Absent => Some(AttendanceStatus::Absent),
            Self::Mission => Some(AttendanceStatus::Mission),
            Self::Permission => Some(AttendanceStatus::Permission),
            Self::NotAvailable => None,
        }
    }
}

impl From<AttendanceStatus> for ResolvedStatus {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => Self::Present,
            AttendanceStatus::Absent => Self::Absent,
            AttendanceStatus::Mission => Self::Mission,
            AttendanceStatus::Permission => Self::Permission,
        }
    }
}

impl std::fmt::Display for ResolvedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolver's output for one person on one day.
///
/// Derived on every read; only persisted when a day is validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelDailyStatus {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub status: ResolvedStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_id: Option<MissionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_duration: Option<PermissionDuration>,
}

impl PersonnelDailyStatus {
    /// A status with no mission or permission detail.
    #[must_use]
    pub const fn plain(date: Date, status: ResolvedStatus) -> Self {
        Self {
            date,
            status,
            mission_id: None,
            permission_duration: None,
        }
    }
}
