// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API operations.
//!
//! Each operation parses its request, runs the matching core command or read
//! and shapes the result. Writes go through `AttendanceService::execute`, so
//! they are committed before the operation returns.

use pointage::{
    AttendanceService, AttendanceStore, Command, CoreError, DailySummary, EntityKind, Fallback,
    MileageReport, MissionBoard, MissionPatch, MonthlyTable, PersonnelSelection, Roster,
    Submitted, mission_board, resolve_effective_status, resolve_range, resolve_with_fallback,
};
use pointage_domain::{
    HoursTable, Mission, MissionDraft, MissionId, MissionVocabulary, Person, PersonnelDailyStatus,
    PersonnelId, format_iso_date, parse_month,
};
use time::Date;
use tracing::info;

use crate::error::{ApiError, translate_core_error};
use crate::request_response::{
    AttendanceRangeResponse, AttendanceStatusResponse, CreateMissionRequest, DayEntry,
    DayResponse, MileageQuery, MonthlyQuery, PersonRequest, PersonnelListResponse, RangeQuery,
    SetStatusRequest, UpdateMissionRequest, VocabularyEntry, VocabularyResponse, WriteResponse,
    parse_date_field, parse_fallback,
};

fn write_response(submitted: Submitted, message: String, id: Option<String>) -> WriteResponse {
    WriteResponse {
        success: true,
        message,
        id,
        writes: submitted.writes,
        change: submitted.change,
    }
}

fn require_person<'a>(roster: &'a Roster, personnel_id: &str) -> Result<&'a Person, ApiError> {
    roster
        .person(&PersonnelId::new(personnel_id))
        .ok_or_else(|| {
            translate_core_error(CoreError::PersonnelNotFound(PersonnelId::new(
                personnel_id,
            )))
        })
}

fn require_mission<'a>(roster: &'a Roster, mission_id: &str) -> Result<&'a Mission, ApiError> {
    roster
        .mission(&MissionId::new(mission_id))
        .ok_or_else(|| {
            translate_core_error(CoreError::MissionNotFound(MissionId::new(mission_id)))
        })
}

/// Lists the roster sorted by last name, then first name.
#[must_use]
pub fn list_personnel(roster: &Roster) -> PersonnelListResponse {
    let mut personnel: Vec<Person> = roster.personnel().cloned().collect();
    personnel.sort_by(|a, b| {
        a.last_name
            .cmp(&b.last_name)
            .then_with(|| a.first_name.cmp(&b.first_name))
    });
    PersonnelListResponse { personnel }
}

/// Returns one person.
///
/// # Errors
///
/// Returns an error if the person does not exist.
pub fn get_personnel(roster: &Roster, personnel_id: &str) -> Result<Person, ApiError> {
    require_person(roster, personnel_id).cloned()
}

/// Adds a person under a freshly allocated id.
///
/// # Errors
///
/// Returns an error if the details are invalid, the matricule is taken, or
/// the store fails.
pub fn create_personnel<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    request: PersonRequest,
) -> Result<WriteResponse, ApiError> {
    let details = request.into_details();
    let personnel_id: PersonnelId =
        PersonnelId::new(&service.allocate_id(EntityKind::Personnel)?);
    info!(
        personnel_id = %personnel_id,
        matricule = %details.matricule,
        "Creating personnel"
    );

    let submitted: Submitted = service.execute(Command::AddPersonnel {
        personnel_id: personnel_id.clone(),
        details,
    })?;
    Ok(write_response(
        submitted,
        format!("Added personnel {personnel_id}"),
        Some(personnel_id.value().to_string()),
    ))
}

/// Replaces a person's details.
///
/// # Errors
///
/// Returns an error if the person does not exist, the details are invalid,
/// or the store fails.
pub fn update_personnel<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    personnel_id: &str,
    request: PersonRequest,
) -> Result<WriteResponse, ApiError> {
    info!(personnel_id, "Updating personnel");
    let submitted: Submitted = service.execute(Command::UpdatePersonnel {
        personnel_id: PersonnelId::new(personnel_id),
        details: request.into_details(),
    })?;
    Ok(write_response(
        submitted,
        format!("Updated personnel {personnel_id}"),
        None,
    ))
}

/// Deletes a person with their attendance and mission assignments.
///
/// # Errors
///
/// Returns an error if the person does not exist or the store fails.
pub fn delete_personnel<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    personnel_id: &str,
) -> Result<WriteResponse, ApiError> {
    info!(personnel_id, "Deleting personnel");
    let submitted: Submitted = service.execute(Command::DeletePersonnel {
        personnel_id: PersonnelId::new(personnel_id),
    })?;
    Ok(write_response(
        submitted,
        format!("Deleted personnel {personnel_id}"),
        None,
    ))
}

/// Sets a person's status on a day or over a permission.
///
/// # Errors
///
/// Returns an error if the input is malformed, the person does not exist, a
/// written day is validated, or the store fails.
pub fn set_status<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    request: &SetStatusRequest,
) -> Result<WriteResponse, ApiError> {
    let date: Date = parse_date_field("date", &request.date)?;
    let status = request.parse_status()?;
    let permission_duration = request.parse_permission()?;
    info!(
        personnel_id = %request.personnel_id,
        date = %request.date,
        status = %status,
        "Setting attendance status"
    );

    let submitted: Submitted = service.execute(Command::SetStatus {
        personnel_id: PersonnelId::new(&request.personnel_id),
        date,
        status,
        permission_duration,
    })?;
    Ok(write_response(
        submitted,
        format!("Set {} to {status}", request.personnel_id),
        None,
    ))
}

/// Resolves one person on one day.
///
/// # Errors
///
/// Returns an error if the date is malformed or the person does not exist.
pub fn get_attendance(
    roster: &Roster,
    personnel_id: &str,
    date: &str,
) -> Result<AttendanceStatusResponse, ApiError> {
    let day: Date = parse_date_field("date", date)?;
    let person: &Person = require_person(roster, personnel_id)?;

    let resolved: PersonnelDailyStatus =
        resolve_with_fallback(roster, &person.id, day, Fallback::Present);
    let effective: PersonnelDailyStatus =
        resolve_effective_status(roster, &person.id, day, Fallback::Present);
    Ok(AttendanceStatusResponse {
        personnel_id: person.id.clone(),
        date: format_iso_date(day),
        resolved,
        effective,
        validated: roster.is_validated(day),
    })
}

/// Resolves one person over a range. A reversed range yields no days.
///
/// # Errors
///
/// Returns an error if a date or the fallback is malformed, or the person
/// does not exist.
pub fn get_attendance_range(
    roster: &Roster,
    personnel_id: &str,
    query: &RangeQuery,
) -> Result<AttendanceRangeResponse, ApiError> {
    let start: Date = parse_date_field("start", &query.start)?;
    let end: Date = parse_date_field("end", &query.end)?;
    let fallback: Fallback = parse_fallback(query.fallback.as_deref())?;
    let person: &Person = require_person(roster, personnel_id)?;

    Ok(AttendanceRangeResponse {
        personnel_id: person.id.clone(),
        start: format_iso_date(start),
        end: format_iso_date(end),
        days: resolve_range(roster, &person.id, start, end, fallback),
    })
}

/// Splits missions into upcoming and past around `today`.
#[must_use]
pub fn list_missions(roster: &Roster, today: Date) -> MissionBoard {
    mission_board(roster, today)
}

/// Returns one mission.
///
/// # Errors
///
/// Returns an error if the mission does not exist.
pub fn get_mission(roster: &Roster, mission_id: &str) -> Result<Mission, ApiError> {
    require_mission(roster, mission_id).cloned()
}

/// Creates a mission under a freshly allocated id.
///
/// # Errors
///
/// Returns an error if the input is malformed or violates a mission rule, a
/// member does not exist, a covered day is validated, or the store fails.
pub fn create_mission<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    request: CreateMissionRequest,
) -> Result<WriteResponse, ApiError> {
    let draft: MissionDraft = request.into_draft()?;
    let mission_id: MissionId = MissionId::new(&service.allocate_id(EntityKind::Mission)?);
    info!(
        mission_id = %mission_id,
        name = %draft.name,
        members = draft.personnel_ids.len(),
        "Creating mission"
    );

    let submitted: Submitted = service.execute(Command::CreateMission {
        mission_id: mission_id.clone(),
        draft,
    })?;
    Ok(write_response(
        submitted,
        format!("Created mission {mission_id}"),
        Some(mission_id.value().to_string()),
    ))
}

/// Partially updates a mission.
///
/// # Errors
///
/// Returns an error if the mission does not exist, the input is malformed or
/// violates a mission rule, a touched day is validated, or the store fails.
pub fn update_mission<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    mission_id: &str,
    request: UpdateMissionRequest,
) -> Result<WriteResponse, ApiError> {
    let patch: MissionPatch = {
        let current: &Mission = require_mission(service.roster(), mission_id)?;
        request.into_patch(current)?
    };
    info!(mission_id, "Updating mission");

    let submitted: Submitted = service.execute(Command::UpdateMission {
        mission_id: MissionId::new(mission_id),
        patch,
    })?;
    Ok(write_response(
        submitted,
        format!("Updated mission {mission_id}"),
        None,
    ))
}

/// Marks a mission as completed.
///
/// # Errors
///
/// Returns an error if the mission does not exist or is not active.
pub fn complete_mission<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    mission_id: &str,
) -> Result<WriteResponse, ApiError> {
    info!(mission_id, "Completing mission");
    let submitted: Submitted = service.execute(Command::CompleteMission {
        mission_id: MissionId::new(mission_id),
    })?;
    Ok(write_response(
        submitted,
        format!("Completed mission {mission_id}"),
        None,
    ))
}

/// Returns a completed mission to active.
///
/// # Errors
///
/// Returns an error if the mission does not exist or is not completed.
pub fn reactivate_mission<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    mission_id: &str,
) -> Result<WriteResponse, ApiError> {
    info!(mission_id, "Reactivating mission");
    let submitted: Submitted = service.execute(Command::ReactivateMission {
        mission_id: MissionId::new(mission_id),
    })?;
    Ok(write_response(
        submitted,
        format!("Reactivated mission {mission_id}"),
        None,
    ))
}

/// Deletes a mission and reverts the days it tagged.
///
/// # Errors
///
/// Returns an error if the mission does not exist, a reverted day is
/// validated, or the store fails.
pub fn delete_mission<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    mission_id: &str,
) -> Result<WriteResponse, ApiError> {
    info!(mission_id, "Deleting mission");
    let submitted: Submitted = service.execute(Command::DeleteMission {
        mission_id: MissionId::new(mission_id),
    })?;
    Ok(write_response(
        submitted,
        format!("Deleted mission {mission_id}"),
        None,
    ))
}

/// Builds the daily board: every person's effective status plus counts.
///
/// # Errors
///
/// Returns an error if the date is malformed.
pub fn get_day(roster: &Roster, date: &str) -> Result<DayResponse, ApiError> {
    let day: Date = parse_date_field("date", date)?;
    let mut entries: Vec<DayEntry> = roster
        .personnel()
        .map(|person| DayEntry {
            personnel_id: person.id.clone(),
            display_name: person.display_name(),
            status: resolve_effective_status(roster, &person.id, day, Fallback::Present),
        })
        .collect();
    entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    let daily_status = roster.daily_status(day);
    Ok(DayResponse {
        date: format_iso_date(day),
        validated: daily_status.is_some_and(|s| s.validated),
        validated_at: daily_status.and_then(|s| s.validated_at.clone()),
        summary: pointage::summary(roster, day),
        entries,
    })
}

/// Validates a day, freezing every person's effective status.
///
/// # Errors
///
/// Returns an error if the date is malformed, the day is already validated,
/// or the store fails.
pub fn validate_day<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    date: &str,
) -> Result<WriteResponse, ApiError> {
    let day: Date = parse_date_field("date", date)?;
    info!(date, "Validating day");
    let submitted: Submitted = service.execute(Command::ValidateDate { date: day })?;
    Ok(write_response(
        submitted,
        format!("Validated {}", format_iso_date(day)),
        None,
    ))
}

/// Unlocks a validated day.
///
/// # Errors
///
/// Returns an error if the date is malformed, the day is not validated, or
/// the store fails.
pub fn reactivate_day<S: AttendanceStore>(
    service: &mut AttendanceService<S>,
    date: &str,
) -> Result<WriteResponse, ApiError> {
    let day: Date = parse_date_field("date", date)?;
    info!(date, "Reactivating day");
    let submitted: Submitted = service.execute(Command::ReactivateDate { date: day })?;
    Ok(write_response(
        submitted,
        format!("Reactivated {}", format_iso_date(day)),
        None,
    ))
}

/// Counts effective statuses on a day.
///
/// # Errors
///
/// Returns an error if the date is malformed.
pub fn get_summary(roster: &Roster, date: &str) -> Result<DailySummary, ApiError> {
    let day: Date = parse_date_field("date", date)?;
    Ok(pointage::summary(roster, day))
}

/// Builds the monthly hours table.
///
/// Unrecorded days show as `N/A` but are paid as present unless the query
/// asks for `na`.
///
/// # Errors
///
/// Returns an error if the month or the fallback is malformed, or the
/// selected person does not exist.
pub fn monthly_report(
    roster: &Roster,
    query: &MonthlyQuery,
    hours: &HoursTable,
) -> Result<MonthlyTable, ApiError> {
    let (start, end) = parse_month(&query.month)?;
    let hours_fallback: Fallback = parse_fallback(query.hours_fallback.as_deref())?;
    let selection: PersonnelSelection = match query.personnel_id.as_deref() {
        None | Some("") => PersonnelSelection::All,
        Some(id) => PersonnelSelection::One(require_person(roster, id)?.id.clone()),
    };
    Ok(pointage::monthly_table(
        roster,
        &selection,
        start,
        end,
        hours,
        hours_fallback,
    ))
}

/// Lists missions with mileage starting in the month.
///
/// # Errors
///
/// Returns an error if the month is malformed.
pub fn mileage_report(roster: &Roster, query: &MileageQuery) -> Result<MileageReport, ApiError> {
    let (start, end) = parse_month(&query.month)?;
    Ok(pointage::mileage_report(roster, start, end))
}

/// Describes the mission vocabulary.
#[must_use]
pub fn vocabulary(vocabulary: &MissionVocabulary) -> VocabularyResponse {
    VocabularyResponse {
        missions: vocabulary
            .names()
            .map(|name| VocabularyEntry {
                name: name.to_string(),
                descriptions: vocabulary
                    .descriptions(name)
                    .map(<[String]>::to_vec)
                    .unwrap_or_default(),
            })
            .collect(),
    }
}
