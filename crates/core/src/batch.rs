// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Planned writes.
//!
//! A `WriteBatch` is everything one command changes. Stores must commit a
//! batch all-or-nothing; operations are applied in order and are upserts or
//! deletes keyed by deterministic ids, so replaying a batch is harmless.

use pointage_domain::{AttendanceRecord, DailyStatus, Mission, MissionId, Person, PersonnelId};
use time::Date;

/// A single keyed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    UpsertPerson(Person),
    DeletePerson(PersonnelId),
    UpsertAttendance(AttendanceRecord),
    DeleteAttendance {
        personnel_id: PersonnelId,
        date: Date,
    },
    UpsertMission(Mission),
    DeleteMission(MissionId),
    UpsertDailyStatus(DailyStatus),
}

/// An ordered list of writes committed atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Appends an operation.
    pub fn push(&mut self, op: WriteOp) {
        self.ops.push(op);
    }

    /// Appends an attendance upsert.
    pub fn upsert_attendance(&mut self, record: AttendanceRecord) {
        self.ops.push(WriteOp::UpsertAttendance(record));
    }

    /// Returns the operations in commit order.
    #[must_use]
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    /// Returns the number of operations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns whether the batch writes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns the attendance records this batch upserts.
    pub fn attendance_upserts(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.ops.iter().filter_map(|op| match op {
            WriteOp::UpsertAttendance(record) => Some(record),
            _ => None,
        })
    }
}

impl IntoIterator for WriteBatch {
    type Item = WriteOp;
    type IntoIter = std::vec::IntoIter<WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
