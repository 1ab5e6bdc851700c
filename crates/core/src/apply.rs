// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::batch::{WriteBatch, WriteOp};
use crate::command::{Command, MissionPatch};
use crate::error::CoreError;
use crate::resolver::{Fallback, resolve_effective_status};
use crate::roster::Roster;
use crate::transition::{Change, Rules, Transition};
use pointage_domain::{
    AttendanceRecord, AttendanceStatus, DailyStatus, DomainError, Mission, MissionDraft,
    MissionId, MissionStatus, PermissionDuration, Person, PersonDetails, PersonnelId,
    format_iso_date, validate_matricule_unique, validate_mission_fields, validate_mission_shape,
    validate_person_fields,
};
use std::collections::BTreeSet;
use time::Date;
use time::format_description::well_known::Rfc3339;

/// Applies a command to the current roster, producing the writes it requires.
///
/// This function is pure and deterministic: it validates the command against
/// `roster` and plans a `WriteBatch`, but performs no I/O and does not
/// modify `roster`. On error nothing is planned.
///
/// # Arguments
///
/// * `roster` - The current snapshot
/// * `rules` - Vocabulary, hours policy and clock
/// * `command` - The command to apply
///
/// # Errors
///
/// Returns an error if:
/// - A referenced person or mission does not exist
/// - Input violates a domain rule
/// - A write would land on a validated day
/// - A mission or day lifecycle change does not apply to its current state
pub fn apply(
    roster: &Roster,
    rules: &Rules<'_>,
    command: Command,
) -> Result<Transition, CoreError> {
    match command {
        Command::AddPersonnel {
            personnel_id,
            details,
        } => add_personnel(roster, rules, personnel_id, details),
        Command::UpdatePersonnel {
            personnel_id,
            details,
        } => update_personnel(roster, personnel_id, details),
        Command::DeletePersonnel { personnel_id } => delete_personnel(roster, rules, personnel_id),
        Command::SetStatus {
            personnel_id,
            date,
            status,
            permission_duration,
        } => set_status(roster, personnel_id, date, status, permission_duration),
        Command::CreateMission { mission_id, draft } => {
            create_mission(roster, rules, mission_id, draft)
        }
        Command::UpdateMission { mission_id, patch } => {
            update_mission(roster, rules, &mission_id, patch)
        }
        Command::CompleteMission { mission_id } => {
            transition_mission(roster, &mission_id, MissionStatus::Completed)
        }
        Command::ReactivateMission { mission_id } => {
            transition_mission(roster, &mission_id, MissionStatus::Active)
        }
        Command::DeleteMission { mission_id } => delete_mission(roster, &mission_id),
        Command::ValidateDate { date } => validate_date(roster, rules, date),
        Command::ReactivateDate { date } => reactivate_date(roster, date),
    }
}

/// Fails with `LockedDate` on the first validated day in `days`.
fn ensure_unlocked<I>(roster: &Roster, days: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = Date>,
{
    match days.into_iter().find(|day| roster.is_validated(*day)) {
        Some(date) => Err(CoreError::LockedDate { date }),
        None => Ok(()),
    }
}

fn require_person<'a>(roster: &'a Roster, id: &PersonnelId) -> Result<&'a Person, CoreError> {
    roster
        .person(id)
        .ok_or_else(|| CoreError::PersonnelNotFound(id.clone()))
}

fn require_mission<'a>(roster: &'a Roster, id: &MissionId) -> Result<&'a Mission, CoreError> {
    roster
        .mission(id)
        .ok_or_else(|| CoreError::MissionNotFound(id.clone()))
}

fn roster_people(roster: &Roster) -> Vec<Person> {
    roster.personnel().cloned().collect()
}

fn add_personnel(
    roster: &Roster,
    rules: &Rules<'_>,
    personnel_id: PersonnelId,
    details: PersonDetails,
) -> Result<Transition, CoreError> {
    validate_person_fields(&details)?;
    validate_matricule_unique(&roster_people(roster), &details.matricule, None)?;

    let mut batch: WriteBatch = WriteBatch::new();
    batch.push(WriteOp::UpsertPerson(Person::from_details(
        personnel_id.clone(),
        details,
    )));

    // A new person starts present today, unless today is already locked.
    let today: Date = rules.now.date();
    if !roster.is_validated(today) {
        batch.upsert_attendance(AttendanceRecord::new(
            personnel_id.clone(),
            today,
            AttendanceStatus::Present,
        ));
    }

    Ok(Transition {
        batch,
        change: Change::PersonnelAdded { personnel_id },
    })
}

fn update_personnel(
    roster: &Roster,
    personnel_id: PersonnelId,
    details: PersonDetails,
) -> Result<Transition, CoreError> {
    require_person(roster, &personnel_id)?;
    validate_person_fields(&details)?;
    validate_matricule_unique(
        &roster_people(roster),
        &details.matricule,
        Some(&personnel_id),
    )?;

    let mut batch: WriteBatch = WriteBatch::new();
    batch.push(WriteOp::UpsertPerson(Person::from_details(
        personnel_id.clone(),
        details,
    )));

    Ok(Transition {
        batch,
        change: Change::PersonnelUpdated { personnel_id },
    })
}

fn delete_personnel(
    roster: &Roster,
    rules: &Rules<'_>,
    personnel_id: PersonnelId,
) -> Result<Transition, CoreError> {
    require_person(roster, &personnel_id)?;

    let mut batch: WriteBatch = WriteBatch::new();
    for record in roster.records_for(&personnel_id) {
        batch.push(WriteOp::DeleteAttendance {
            personnel_id: personnel_id.clone(),
            date: record.date,
        });
    }
    for mission in roster.missions().filter(|m| m.has_member(&personnel_id)) {
        let mut updated: Mission = mission.clone();
        updated.personnel_ids.retain(|id| id != &personnel_id);
        // A mission needs at least one member; it leaves with its last one.
        if updated.personnel_ids.is_empty() {
            batch.push(WriteOp::DeleteMission(updated.id));
            continue;
        }
        updated.total_hours = rules.hours.mission_hours(updated.personnel_ids.len());
        batch.push(WriteOp::UpsertMission(updated));
    }
    batch.push(WriteOp::DeletePerson(personnel_id.clone()));

    Ok(Transition {
        batch,
        change: Change::PersonnelDeleted { personnel_id },
    })
}

fn set_status(
    roster: &Roster,
    personnel_id: PersonnelId,
    date: Date,
    status: AttendanceStatus,
    permission_duration: Option<PermissionDuration>,
) -> Result<Transition, CoreError> {
    require_person(roster, &personnel_id)?;

    let records: Vec<AttendanceRecord> = match (status, permission_duration) {
        (AttendanceStatus::Permission, Some(duration)) => {
            if duration.start > duration.end {
                return Err(DomainError::InvalidDateRange {
                    start: format_iso_date(duration.start),
                    end: format_iso_date(duration.end),
                }
                .into());
            }
            duration
                .days()
                .into_iter()
                .map(|day| AttendanceRecord::permission(personnel_id.clone(), day, Some(duration)))
                .collect()
        }
        (AttendanceStatus::Mission, _) => {
            // Re-selecting mission keeps an existing mission reference.
            let mission_id: Option<MissionId> = roster
                .record(&personnel_id, date)
                .filter(|r| r.status == AttendanceStatus::Mission)
                .and_then(|r| r.mission_id.clone());
            let mut record = AttendanceRecord::new(personnel_id.clone(), date, status);
            record.mission_id = mission_id;
            vec![record]
        }
        (AttendanceStatus::Permission, None) => {
            vec![AttendanceRecord::permission(personnel_id.clone(), date, None)]
        }
        (AttendanceStatus::Present | AttendanceStatus::Absent, _) => {
            vec![AttendanceRecord::new(personnel_id.clone(), date, status)]
        }
    };

    ensure_unlocked(roster, records.iter().map(|r| r.date))?;

    let start: Date = records.first().map_or(date, |r| r.date);
    let end: Date = records.last().map_or(date, |r| r.date);
    let mut batch: WriteBatch = WriteBatch::new();
    for record in records {
        batch.upsert_attendance(record);
    }

    Ok(Transition {
        batch,
        change: Change::AttendanceSet {
            personnel_id,
            start,
            end,
            status,
        },
    })
}

fn member_days(personnel_ids: &[PersonnelId], days: &[Date]) -> BTreeSet<(PersonnelId, Date)> {
    personnel_ids
        .iter()
        .flat_map(|id| days.iter().map(move |day| (id.clone(), *day)))
        .collect()
}

fn is_tagged_with(
    roster: &Roster,
    personnel_id: &PersonnelId,
    date: Date,
    mission_id: &MissionId,
) -> bool {
    roster
        .record(personnel_id, date)
        .is_some_and(|r| r.mission_id.as_ref() == Some(mission_id))
}

fn create_mission(
    roster: &Roster,
    rules: &Rules<'_>,
    mission_id: MissionId,
    draft: MissionDraft,
) -> Result<Transition, CoreError> {
    validate_mission_fields(rules.vocabulary, &draft)?;
    for id in &draft.personnel_ids {
        require_person(roster, id)?;
    }

    let days: Vec<Date> = draft.span.days();
    ensure_unlocked(roster, days.iter().copied())?;

    let mission: Mission = Mission {
        id: mission_id.clone(),
        total_hours: rules.hours.mission_hours(draft.personnel_ids.len()),
        name: draft.name,
        description: draft.description,
        start_date: draft.span.start,
        end_date: draft.span.end,
        personnel_ids: draft.personnel_ids,
        status: MissionStatus::Active,
        vehicle: draft.vehicle,
        kilometers: draft.kilometers,
    };

    let mut batch: WriteBatch = WriteBatch::new();
    for (personnel_id, day) in member_days(&mission.personnel_ids, &days) {
        batch.upsert_attendance(AttendanceRecord::mission(
            personnel_id,
            day,
            mission_id.clone(),
        ));
    }
    batch.push(WriteOp::UpsertMission(mission));

    Ok(Transition {
        batch,
        change: Change::MissionCreated { mission_id },
    })
}

fn update_mission(
    roster: &Roster,
    rules: &Rules<'_>,
    mission_id: &MissionId,
    patch: MissionPatch,
) -> Result<Transition, CoreError> {
    let existing: &Mission = require_mission(roster, mission_id)?;
    let vocabulary_touched: bool = patch.name.is_some() || patch.description.is_some();

    let draft: MissionDraft = MissionDraft {
        name: patch.name.unwrap_or_else(|| existing.name.clone()),
        description: patch
            .description
            .unwrap_or_else(|| existing.description.clone()),
        span: patch.span.unwrap_or_else(|| existing.span()),
        personnel_ids: patch
            .personnel_ids
            .unwrap_or_else(|| existing.personnel_ids.clone()),
        vehicle: patch.vehicle.unwrap_or_else(|| existing.vehicle.clone()),
        kilometers: patch.kilometers.unwrap_or(existing.kilometers),
    };
    if vocabulary_touched {
        validate_mission_fields(rules.vocabulary, &draft)?;
    } else {
        validate_mission_shape(&draft)?;
    }
    for id in &draft.personnel_ids {
        require_person(roster, id)?;
    }

    let old_pairs = member_days(&existing.personnel_ids, &existing.span().days());
    let new_pairs = member_days(&draft.personnel_ids, &draft.span.days());

    let reverted: Vec<AttendanceRecord> = old_pairs
        .difference(&new_pairs)
        .filter(|(id, day)| is_tagged_with(roster, id, *day, mission_id))
        .map(|(id, day)| AttendanceRecord::new(id.clone(), *day, AttendanceStatus::Present))
        .collect();
    let tagged: Vec<AttendanceRecord> = new_pairs
        .difference(&old_pairs)
        .map(|(id, day)| AttendanceRecord::mission(id.clone(), *day, mission_id.clone()))
        .collect();
    ensure_unlocked(roster, reverted.iter().chain(&tagged).map(|r| r.date))?;

    let mission: Mission = Mission {
        id: mission_id.clone(),
        total_hours: rules.hours.mission_hours(draft.personnel_ids.len()),
        name: draft.name,
        description: draft.description,
        start_date: draft.span.start,
        end_date: draft.span.end,
        personnel_ids: draft.personnel_ids,
        status: existing.status,
        vehicle: draft.vehicle,
        kilometers: draft.kilometers,
    };

    let mut batch: WriteBatch = WriteBatch::new();
    for record in reverted.into_iter().chain(tagged) {
        batch.upsert_attendance(record);
    }
    batch.push(WriteOp::UpsertMission(mission));

    Ok(Transition {
        batch,
        change: Change::MissionUpdated {
            mission_id: mission_id.clone(),
        },
    })
}

fn transition_mission(
    roster: &Roster,
    mission_id: &MissionId,
    to: MissionStatus,
) -> Result<Transition, CoreError> {
    let existing: &Mission = require_mission(roster, mission_id)?;
    if existing.status == to {
        return Err(CoreError::InvalidMissionTransition {
            mission_id: mission_id.clone(),
            from: existing.status,
            to,
        });
    }

    let mut updated: Mission = existing.clone();
    updated.status = to;
    let mut batch: WriteBatch = WriteBatch::new();
    batch.push(WriteOp::UpsertMission(updated));

    let mission_id: MissionId = mission_id.clone();
    let change: Change = match to {
        MissionStatus::Completed => Change::MissionCompleted { mission_id },
        MissionStatus::Active => Change::MissionReactivated { mission_id },
    };
    Ok(Transition { batch, change })
}

fn delete_mission(roster: &Roster, mission_id: &MissionId) -> Result<Transition, CoreError> {
    let existing: &Mission = require_mission(roster, mission_id)?;

    // Members' spanned days, plus anything else still pointing at the mission.
    let mut targets = member_days(&existing.personnel_ids, &existing.span().days());
    targets.extend(
        roster
            .attendance()
            .filter(|r| r.mission_id.as_ref() == Some(mission_id))
            .map(|r| (r.personnel_id.clone(), r.date)),
    );

    let reverted: Vec<AttendanceRecord> = targets
        .into_iter()
        .filter(|(id, day)| is_tagged_with(roster, id, *day, mission_id))
        .map(|(id, day)| AttendanceRecord::new(id, day, AttendanceStatus::Present))
        .collect();
    ensure_unlocked(roster, reverted.iter().map(|r| r.date))?;

    let mut batch: WriteBatch = WriteBatch::new();
    for record in reverted {
        batch.upsert_attendance(record);
    }
    batch.push(WriteOp::DeleteMission(mission_id.clone()));

    Ok(Transition {
        batch,
        change: Change::MissionDeleted {
            mission_id: mission_id.clone(),
        },
    })
}

fn validate_date(roster: &Roster, rules: &Rules<'_>, date: Date) -> Result<Transition, CoreError> {
    if roster.is_validated(date) {
        return Err(CoreError::AlreadyValidated { date });
    }

    let validated_at: String = rules
        .now
        .format(&Rfc3339)
        .map_err(|e| CoreError::TimestampFormat {
            message: e.to_string(),
        })?;

    let mut batch: WriteBatch = WriteBatch::new();
    for person in roster.personnel() {
        let resolved = resolve_effective_status(roster, &person.id, date, Fallback::Present);
        let Some(status) = resolved.status.attendance() else {
            continue;
        };
        batch.upsert_attendance(AttendanceRecord {
            personnel_id: person.id.clone(),
            date,
            status,
            permission_duration: resolved.permission_duration,
            mission_id: resolved.mission_id,
        });
    }
    batch.push(WriteOp::UpsertDailyStatus(DailyStatus {
        date,
        validated: true,
        validated_at: Some(validated_at),
    }));

    Ok(Transition {
        batch,
        change: Change::DayValidated { date },
    })
}

fn reactivate_date(roster: &Roster, date: Date) -> Result<Transition, CoreError> {
    let Some(current) = roster.daily_status(date).filter(|d| d.validated) else {
        return Err(CoreError::NotValidated { date });
    };

    let mut batch: WriteBatch = WriteBatch::new();
    batch.push(WriteOp::UpsertDailyStatus(DailyStatus {
        date,
        validated: false,
        validated_at: current.validated_at.clone(),
    }));

    Ok(Transition {
        batch,
        change: Change::DayReactivated { date },
    })
}
