// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::batch::{WriteBatch, WriteOp};
use pointage_domain::{
    AttendanceRecord, DailyStatus, Mission, MissionId, Person, PersonnelId,
};
use std::collections::BTreeMap;
use time::Date;

/// In-memory snapshot of every entity the resolver reads.
///
/// All reads are pure functions over a `Roster`. Attendance is keyed by
/// `(personnel_id, date)`, which is the record identity, so iteration order
/// is the deterministic record-id order per person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    personnel: BTreeMap<PersonnelId, Person>,
    attendance: BTreeMap<(PersonnelId, Date), AttendanceRecord>,
    missions: BTreeMap<MissionId, Mission>,
    daily_statuses: BTreeMap<Date, DailyStatus>,
}

impl Roster {
    /// Creates an empty roster.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            personnel: BTreeMap::new(),
            attendance: BTreeMap::new(),
            missions: BTreeMap::new(),
            daily_statuses: BTreeMap::new(),
        }
    }

    /// Builds a roster from the lists returned by a store.
    ///
    /// Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_parts(
        personnel: Vec<Person>,
        attendance: Vec<AttendanceRecord>,
        missions: Vec<Mission>,
        daily_statuses: Vec<DailyStatus>,
    ) -> Self {
        Self {
            personnel: personnel.into_iter().map(|p| (p.id.clone(), p)).collect(),
            attendance: attendance
                .into_iter()
                .map(|r| ((r.personnel_id.clone(), r.date), r))
                .collect(),
            missions: missions.into_iter().map(|m| (m.id.clone(), m)).collect(),
            daily_statuses: daily_statuses.into_iter().map(|d| (d.date, d)).collect(),
        }
    }

    /// Returns every person, ordered by id.
    pub fn personnel(&self) -> impl Iterator<Item = &Person> {
        self.personnel.values()
    }

    /// Returns the number of people on the roster.
    #[must_use]
    pub fn personnel_count(&self) -> usize {
        self.personnel.len()
    }

    /// Looks up a person.
    #[must_use]
    pub fn person(&self, id: &PersonnelId) -> Option<&Person> {
        self.personnel.get(id)
    }

    /// Returns every attendance record, ordered by record id.
    pub fn attendance(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.attendance.values()
    }

    /// Returns the direct record for `(personnel_id, date)`.
    #[must_use]
    pub fn record(&self, personnel_id: &PersonnelId, date: Date) -> Option<&AttendanceRecord> {
        self.attendance.get(&(personnel_id.clone(), date))
    }

    /// Returns the records of one person, ordered by date.
    pub fn records_for<'a>(
        &'a self,
        personnel_id: &PersonnelId,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + 'a {
        self.attendance
            .range((personnel_id.clone(), Date::MIN)..=(personnel_id.clone(), Date::MAX))
            .map(|(_, record)| record)
    }

    /// Returns every mission, ordered by id.
    pub fn missions(&self) -> impl Iterator<Item = &Mission> {
        self.missions.values()
    }

    /// Looks up a mission.
    #[must_use]
    pub fn mission(&self, id: &MissionId) -> Option<&Mission> {
        self.missions.get(id)
    }

    /// Returns the validation record for `date`, if one was ever written.
    #[must_use]
    pub fn daily_status(&self, date: Date) -> Option<&DailyStatus> {
        self.daily_statuses.get(&date)
    }

    /// Returns every validation record, ordered by date.
    pub fn daily_statuses(&self) -> impl Iterator<Item = &DailyStatus> {
        self.daily_statuses.values()
    }

    /// Returns whether `date` is validated. A missing record means not validated.
    #[must_use]
    pub fn is_validated(&self, date: Date) -> bool {
        self.daily_statuses.get(&date).is_some_and(|d| d.validated)
    }

    /// Applies a planned batch to this snapshot.
    ///
    /// This mirrors what a store does on commit, so a cache updated this way
    /// matches the store after a successful commit.
    pub fn apply_batch(&mut self, batch: &WriteBatch) {
        for op in batch.ops() {
            self.apply_op(op);
        }
    }

    fn apply_op(&mut self, op: &WriteOp) {
        match op {
            WriteOp::UpsertPerson(person) => {
                self.personnel.insert(person.id.clone(), person.clone());
            }
            WriteOp::DeletePerson(id) => {
                self.personnel.remove(id);
            }
            WriteOp::UpsertAttendance(record) => {
                self.attendance.insert(
                    (record.personnel_id.clone(), record.date),
                    record.clone(),
                );
            }
            WriteOp::DeleteAttendance { personnel_id, date } => {
                self.attendance.remove(&(personnel_id.clone(), *date));
            }
            WriteOp::UpsertMission(mission) => {
                self.missions.insert(mission.id.clone(), mission.clone());
            }
            WriteOp::DeleteMission(id) => {
                self.missions.remove(id);
            }
            WriteOp::UpsertDailyStatus(status) => {
                self.daily_statuses.insert(status.date, status.clone());
            }
        }
    }
}
