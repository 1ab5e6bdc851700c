// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross this boundary as ISO `YYYY-MM-DD` strings. Field names are
//! camelCase on the wire.

use pointage::{Change, DailySummary, Fallback};
use pointage_domain::{
    AttendanceStatus, DateSpan, DomainError, Mission, MissionDraft, PermissionDuration, Person,
    PersonDetails, PersonnelDailyStatus, PersonnelId, parse_iso_date,
};
use serde::{Deserialize, Deserializer, Serialize};
use time::Date;

use crate::error::ApiError;

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Parses an ISO date, naming `field` on failure.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if `value` is not a `YYYY-MM-DD` date.
pub fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_iso_date(value).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_kilometers(value: i64) -> Result<u32, ApiError> {
    u32::try_from(value).map_err(|_| DomainError::InvalidKilometers(value).into())
}

/// API request to create or edit a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRequest {
    /// Unique business code.
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

impl PersonRequest {
    /// Converts the request into editable person details.
    #[must_use]
    pub fn into_details(self) -> PersonDetails {
        PersonDetails {
            matricule: self.matricule.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            rank: self.rank,
            contact: self.contact,
            address: self.address,
            email: self.email,
        }
    }
}

/// API request to set a person's status on a day or over a permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetStatusRequest {
    pub personnel_id: String,
    /// The day to set (ISO 8601). Ignored when a permission duration is given.
    pub date: String,
    /// One of `present`, `absent`, `mission`, `permission`.
    pub status: String,
    /// First day of the permission (ISO 8601).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_start: Option<String>,
    /// Last day of the permission (ISO 8601), inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_end: Option<String>,
}

impl SetStatusRequest {
    /// Parses the status field.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is not recognized.
    pub fn parse_status(&self) -> Result<AttendanceStatus, ApiError> {
        Ok(self.status.trim().parse::<AttendanceStatus>()?)
    }

    /// Parses the permission bounds.
    ///
    /// Both bounds or neither must be given. They are ignored for statuses
    /// other than `permission`.
    ///
    /// # Errors
    ///
    /// Returns an error if only one bound is given, a bound is not a date,
    /// or the span ends before it starts.
    pub fn parse_permission(&self) -> Result<Option<PermissionDuration>, ApiError> {
        match (&self.permission_start, &self.permission_end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => Ok(Some(DateSpan::parse(start, end)?)),
            _ => Err(DomainError::MissingPermissionDuration.into()),
        }
    }
}

/// API request to create a mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMissionRequest {
    pub name: String,
    pub description: String,
    pub start_date: String,
    /// Defaults to `start_date` for a single-day mission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub personnel_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kilometers: Option<i64>,
}

impl CreateMissionRequest {
    /// Converts the request into a mission draft.
    ///
    /// # Errors
    ///
    /// Returns an error if a date is malformed, the span is reversed, or the
    /// kilometers are negative.
    pub fn into_draft(self) -> Result<MissionDraft, ApiError> {
        let start: Date = parse_date_field("startDate", &self.start_date)?;
        let end: Date = match &self.end_date {
            Some(end) => parse_date_field("endDate", end)?,
            None => start,
        };
        Ok(MissionDraft {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            span: DateSpan::new(start, end)?,
            personnel_ids: self
                .personnel_ids
                .iter()
                .map(|id| PersonnelId::new(id))
                .collect(),
            vehicle: self.vehicle.filter(|v| !v.trim().is_empty()),
            kilometers: self.kilometers.map(parse_kilometers).transpose()?,
        })
    }
}

/// API request to partially update a mission.
///
/// Omitted fields are left unchanged. `vehicle` and `kilometers` may be
/// set to `null` to clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMissionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personnel_ids: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub vehicle: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub kilometers: Option<Option<i64>>,
}

impl UpdateMissionRequest {
    /// Converts the request into a patch of `current`.
    ///
    /// A single changed bound is combined with the other bound of `current`.
    ///
    /// # Errors
    ///
    /// Returns an error if a date is malformed, the resulting span is
    /// reversed, or the kilometers are negative.
    pub fn into_patch(self, current: &Mission) -> Result<pointage::MissionPatch, ApiError> {
        let span: Option<DateSpan> = if self.start_date.is_none() && self.end_date.is_none() {
            None
        } else {
            let start: Date = match &self.start_date {
                Some(start) => parse_date_field("startDate", start)?,
                None => current.start_date,
            };
            let end: Date = match &self.end_date {
                Some(end) => parse_date_field("endDate", end)?,
                None => current.end_date,
            };
            Some(DateSpan::new(start, end)?)
        };

        Ok(pointage::MissionPatch {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            span,
            personnel_ids: self
                .personnel_ids
                .map(|ids| ids.iter().map(|id| PersonnelId::new(id)).collect()),
            vehicle: self.vehicle,
            kilometers: self
                .kilometers
                .map(|km| km.map(parse_kilometers).transpose())
                .transpose()?,
        })
    }
}

/// Query parameters for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
    /// `present` (default) or `na`.
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Parses a fallback query value.
///
/// # Errors
///
/// Returns an error for anything but `present`, `na` or `n/a`.
pub fn parse_fallback(value: Option<&str>) -> Result<Fallback, ApiError> {
    match value.map(|v| v.trim().to_lowercase()).as_deref() {
        None | Some("" | "present") => Ok(Fallback::Present),
        Some("na" | "n/a") => Ok(Fallback::NotAvailable),
        Some(other) => Err(ApiError::InvalidInput {
            field: String::from("fallback"),
            message: format!("Unknown fallback '{other}'. Must be 'present' or 'na'"),
        }),
    }
}

/// Query parameters for the monthly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyQuery {
    /// The month as `YYYY-MM`.
    pub month: String,
    /// Restricts the report to one person.
    #[serde(default)]
    pub personnel_id: Option<String>,
    /// How unrecorded days are paid: `present` (default) or `na`.
    #[serde(default)]
    pub hours_fallback: Option<String>,
}

/// Query parameters for the mileage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MileageQuery {
    /// The month as `YYYY-MM`.
    pub month: String,
}

/// API response for write operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteResponse {
    /// Success indicator.
    pub success: bool,
    /// A human-readable summary.
    pub message: String,
    /// Id of the created entity, for create operations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Number of store operations committed.
    pub writes: usize,
    /// What changed.
    pub change: Change,
}

/// API response listing the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonnelListResponse {
    /// People sorted by last name, then first name.
    pub personnel: Vec<Person>,
}

/// API response for one person on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatusResponse {
    pub personnel_id: PersonnelId,
    pub date: String,
    /// Status derived from records, missions and permissions.
    pub resolved: PersonnelDailyStatus,
    /// `resolved` with completed missions shown as present.
    pub effective: PersonnelDailyStatus,
    /// Whether the day is locked.
    pub validated: bool,
}

/// API response for one person over a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRangeResponse {
    pub personnel_id: PersonnelId,
    pub start: String,
    pub end: String,
    pub days: Vec<PersonnelDailyStatus>,
}

/// One row of the daily board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub personnel_id: PersonnelId,
    pub display_name: String,
    pub status: PersonnelDailyStatus,
}

/// API response for the daily board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayResponse {
    pub date: String,
    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_at: Option<String>,
    pub summary: DailySummary,
    pub entries: Vec<DayEntry>,
}

/// One mission name and its allowed descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub name: String,
    /// Empty when any description is accepted.
    pub descriptions: Vec<String>,
}

/// API response describing the mission vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyResponse {
    pub missions: Vec<VocabularyEntry>,
}
