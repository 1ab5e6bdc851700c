// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversions to and from domain values.

use diesel::prelude::*;
use pointage_domain::{
    AttendanceRecord, AttendanceStatus, DailyStatus, DateSpan, Mission, MissionId, MissionStatus,
    Person, PersonnelId, attendance_record_id, format_iso_date, parse_iso_date,
};
use time::Date;

use crate::diesel_schema::{attendance, daily_status, missions, personnel};
use crate::error::PersistenceError;

fn parse_date(table: &'static str, value: &str) -> Result<Date, PersistenceError> {
    parse_iso_date(value).map_err(|e| PersistenceError::CorruptRow {
        table,
        reason: e.to_string(),
    })
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = personnel, primary_key(personnel_id))]
pub struct PersonRow {
    pub personnel_id: String,
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    pub rank: String,
    pub contact: String,
    pub address: String,
    pub email: String,
}

impl From<&Person> for PersonRow {
    fn from(person: &Person) -> Self {
        Self {
            personnel_id: person.id.value().to_string(),
            matricule: person.matricule.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            rank: person.rank.clone(),
            contact: person.contact.clone(),
            address: person.address.clone(),
            email: person.email.clone(),
        }
    }
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: PersonnelId::new(&row.personnel_id),
            matricule: row.matricule,
            first_name: row.first_name,
            last_name: row.last_name,
            rank: row.rank,
            contact: row.contact,
            address: row.address,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = attendance, primary_key(record_id), treat_none_as_null = true)]
pub struct AttendanceRow {
    pub record_id: String,
    pub personnel_id: String,
    pub date: String,
    pub status: String,
    pub permission_start: Option<String>,
    pub permission_end: Option<String>,
    pub mission_id: Option<String>,
}

impl From<&AttendanceRecord> for AttendanceRow {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            record_id: attendance_record_id(&record.personnel_id, record.date),
            personnel_id: record.personnel_id.value().to_string(),
            date: format_iso_date(record.date),
            status: record.status.as_str().to_string(),
            permission_start: record.permission_duration.map(|d| format_iso_date(d.start)),
            permission_end: record.permission_duration.map(|d| format_iso_date(d.end)),
            mission_id: record.mission_id.as_ref().map(|m| m.value().to_string()),
        }
    }
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = PersistenceError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status: AttendanceStatus =
            row.status
                .parse()
                .map_err(|e: pointage_domain::DomainError| PersistenceError::CorruptRow {
                    table: "attendance",
                    reason: e.to_string(),
                })?;
        let permission_duration: Option<DateSpan> = match (row.permission_start, row.permission_end)
        {
            (Some(start), Some(end)) => Some(DateSpan {
                start: parse_date("attendance", &start)?,
                end: parse_date("attendance", &end)?,
            }),
            _ => None,
        };
        Ok(Self {
            personnel_id: PersonnelId::new(&row.personnel_id),
            date: parse_date("attendance", &row.date)?,
            status,
            permission_duration,
            mission_id: row.mission_id.as_deref().map(MissionId::new),
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = missions, primary_key(mission_id), treat_none_as_null = true)]
pub struct MissionRow {
    pub mission_id: String,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub total_hours: i32,
    pub status: String,
    pub vehicle: Option<String>,
    pub kilometers: Option<i32>,
}

impl MissionRow {
    /// Builds the row for `mission`. Membership is stored separately.
    pub fn from_mission(mission: &Mission) -> Result<Self, PersistenceError> {
        let to_column = |value: u32, column: &str| {
            i32::try_from(value).map_err(|_| {
                PersistenceError::QueryFailed(format!("{column} {value} does not fit the column"))
            })
        };
        Ok(Self {
            mission_id: mission.id.value().to_string(),
            name: mission.name.clone(),
            description: mission.description.clone(),
            start_date: format_iso_date(mission.start_date),
            end_date: format_iso_date(mission.end_date),
            total_hours: to_column(mission.total_hours, "total_hours")?,
            status: mission.status.as_str().to_string(),
            vehicle: mission.vehicle.clone(),
            kilometers: mission
                .kilometers
                .map(|km| to_column(km, "kilometers"))
                .transpose()?,
        })
    }

    /// Rebuilds the mission with its ordered member ids.
    pub fn into_mission(self, personnel_ids: Vec<PersonnelId>) -> Result<Mission, PersistenceError> {
        let corrupt = |reason: String| PersistenceError::CorruptRow {
            table: "missions",
            reason,
        };
        let status: MissionStatus = self.status.parse().map_err(
            |e: pointage_domain::DomainError| corrupt(e.to_string()),
        )?;
        Ok(Mission {
            id: MissionId::new(&self.mission_id),
            name: self.name,
            description: self.description,
            start_date: parse_date("missions", &self.start_date)?,
            end_date: parse_date("missions", &self.end_date)?,
            personnel_ids,
            total_hours: u32::try_from(self.total_hours)
                .map_err(|_| corrupt(format!("negative total_hours {}", self.total_hours)))?,
            status,
            vehicle: self.vehicle,
            kilometers: self
                .kilometers
                .map(|km| {
                    u32::try_from(km).map_err(|_| corrupt(format!("negative kilometers {km}")))
                })
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = daily_status, primary_key(date), treat_none_as_null = true)]
pub struct DailyStatusRow {
    pub date: String,
    pub validated: i32,
    pub validated_at: Option<String>,
}

impl From<&DailyStatus> for DailyStatusRow {
    fn from(status: &DailyStatus) -> Self {
        Self {
            date: format_iso_date(status.date),
            validated: i32::from(status.validated),
            validated_at: status.validated_at.clone(),
        }
    }
}

impl TryFrom<DailyStatusRow> for DailyStatus {
    type Error = PersistenceError;

    fn try_from(row: DailyStatusRow) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date("daily_status", &row.date)?,
            validated: row.validated != 0,
            validated_at: row.validated_at,
        })
    }
}
