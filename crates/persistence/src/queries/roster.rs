// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pointage::Roster;
use pointage_domain::{
    AttendanceRecord, DailyStatus, Mission, Person, PersonnelId, format_iso_date,
};
use std::collections::HashMap;
use time::Date;
use tracing::debug;

use crate::data_models::{AttendanceRow, DailyStatusRow, MissionRow, PersonRow};
use crate::diesel_schema::{attendance, daily_status, mission_personnel, missions, personnel};
use crate::error::PersistenceError;

/// Loads every entity into a roster snapshot.
///
/// Runs in one transaction so the snapshot is consistent.
///
/// # Errors
///
/// Returns an error if a query fails or a stored row is corrupt.
pub fn load_roster(conn: &mut SqliteConnection) -> Result<Roster, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let people: Vec<Person> = personnel::table
            .order(personnel::personnel_id)
            .select(PersonRow::as_select())
            .load::<PersonRow>(conn)?
            .into_iter()
            .map(Person::from)
            .collect();

        let records: Vec<AttendanceRecord> = attendance::table
            .order(attendance::record_id)
            .select(AttendanceRow::as_select())
            .load::<AttendanceRow>(conn)?
            .into_iter()
            .map(AttendanceRecord::try_from)
            .collect::<Result<_, _>>()?;

        let memberships: Vec<(String, String)> = mission_personnel::table
            .order((mission_personnel::mission_id, mission_personnel::position))
            .select((mission_personnel::mission_id, mission_personnel::personnel_id))
            .load(conn)?;
        let mut members: HashMap<String, Vec<PersonnelId>> = HashMap::new();
        for (mission_id, personnel_id) in memberships {
            members
                .entry(mission_id)
                .or_default()
                .push(PersonnelId::new(&personnel_id));
        }

        let mission_list: Vec<Mission> = missions::table
            .order(missions::mission_id)
            .select(MissionRow::as_select())
            .load::<MissionRow>(conn)?
            .into_iter()
            .map(|row| {
                let personnel_ids: Vec<PersonnelId> =
                    members.remove(&row.mission_id).unwrap_or_default();
                row.into_mission(personnel_ids)
            })
            .collect::<Result<_, _>>()?;

        let statuses: Vec<DailyStatus> = daily_status::table
            .order(daily_status::date)
            .select(DailyStatusRow::as_select())
            .load::<DailyStatusRow>(conn)?
            .into_iter()
            .map(DailyStatus::try_from)
            .collect::<Result<_, _>>()?;

        debug!(
            personnel = people.len(),
            attendance = records.len(),
            missions = mission_list.len(),
            daily_statuses = statuses.len(),
            "Loaded roster"
        );

        Ok(Roster::from_parts(people, records, mission_list, statuses))
    })
}

/// Reads the validation record of one day.
///
/// # Errors
///
/// Returns an error if the query fails or the row is corrupt.
pub fn get_daily_status(
    conn: &mut SqliteConnection,
    date: Date,
) -> Result<Option<DailyStatus>, PersistenceError> {
    daily_status::table
        .find(format_iso_date(date))
        .select(DailyStatusRow::as_select())
        .first::<DailyStatusRow>(conn)
        .optional()?
        .map(DailyStatus::try_from)
        .transpose()
}
