// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pointage::{WriteBatch, WriteOp};
use pointage_domain::{Mission, attendance_record_id};
use tracing::{debug, info};

use crate::data_models::{AttendanceRow, DailyStatusRow, MissionRow, PersonRow};
use crate::diesel_schema::{attendance, daily_status, mission_personnel, missions, personnel};
use crate::error::PersistenceError;

/// Commits every operation of `batch` in one transaction.
///
/// Operations run in batch order. If any fails, the transaction is rolled
/// back and nothing is written.
///
/// # Errors
///
/// Returns the first failing operation's error.
pub fn commit_batch(conn: &mut SqliteConnection, batch: &WriteBatch) -> Result<(), PersistenceError> {
    if batch.is_empty() {
        return Ok(());
    }

    conn.transaction::<_, PersistenceError, _>(|conn| {
        for op in batch.ops() {
            apply_op(conn, op)?;
        }
        Ok(())
    })?;

    info!(writes = batch.len(), "Committed write batch");
    Ok(())
}

fn apply_op(conn: &mut SqliteConnection, op: &WriteOp) -> Result<(), PersistenceError> {
    match op {
        WriteOp::UpsertPerson(person) => {
            let row: PersonRow = PersonRow::from(person);
            diesel::insert_into(personnel::table)
                .values(&row)
                .on_conflict(personnel::personnel_id)
                .do_update()
                .set(&row)
                .execute(conn)?;
        }
        WriteOp::DeletePerson(personnel_id) => {
            diesel::delete(personnel::table.find(personnel_id.value())).execute(conn)?;
        }
        WriteOp::UpsertAttendance(record) => {
            let row: AttendanceRow = AttendanceRow::from(record);
            diesel::insert_into(attendance::table)
                .values(&row)
                .on_conflict(attendance::record_id)
                .do_update()
                .set(&row)
                .execute(conn)?;
        }
        WriteOp::DeleteAttendance { personnel_id, date } => {
            diesel::delete(attendance::table.find(attendance_record_id(personnel_id, *date)))
                .execute(conn)?;
        }
        WriteOp::UpsertMission(mission) => upsert_mission(conn, mission)?,
        WriteOp::DeleteMission(mission_id) => {
            diesel::delete(
                mission_personnel::table.filter(mission_personnel::mission_id.eq(mission_id.value())),
            )
            .execute(conn)?;
            diesel::delete(missions::table.find(mission_id.value())).execute(conn)?;
        }
        WriteOp::UpsertDailyStatus(status) => {
            let row: DailyStatusRow = DailyStatusRow::from(status);
            diesel::insert_into(daily_status::table)
                .values(&row)
                .on_conflict(daily_status::date)
                .do_update()
                .set(&row)
                .execute(conn)?;
        }
    }
    Ok(())
}

/// Writes the mission row and replaces its membership, keeping member order.
fn upsert_mission(conn: &mut SqliteConnection, mission: &Mission) -> Result<(), PersistenceError> {
    let row: MissionRow = MissionRow::from_mission(mission)?;
    diesel::insert_into(missions::table)
        .values(&row)
        .on_conflict(missions::mission_id)
        .do_update()
        .set(&row)
        .execute(conn)?;

    diesel::delete(
        mission_personnel::table.filter(mission_personnel::mission_id.eq(mission.id.value())),
    )
    .execute(conn)?;
    for (position, personnel_id) in (0_i32..).zip(&mission.personnel_ids) {
        diesel::insert_into(mission_personnel::table)
            .values((
                mission_personnel::mission_id.eq(mission.id.value()),
                mission_personnel::personnel_id.eq(personnel_id.value()),
                mission_personnel::position.eq(position),
            ))
            .execute(conn)?;
    }

    debug!(
        mission_id = mission.id.value(),
        members = mission.personnel_ids.len(),
        "Upserted mission"
    );
    Ok(())
}
