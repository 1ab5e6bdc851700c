// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::batch::WriteBatch;
use crate::error::StoreError;
use crate::roster::Roster;
use pointage_domain::DailyStatus;
use time::Date;

/// Kind of entity a new identifier is allocated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Personnel,
    Mission,
}

impl EntityKind {
    /// Returns the stable name of the kind, used as a sequence key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Personnel => "personnel",
            Self::Mission => "mission",
        }
    }
}

/// The durable entity store.
///
/// Implementations must make `commit` all-or-nothing: after an error, none
/// of the batch's writes are visible to a later `load_roster`.
pub trait AttendanceStore {
    /// Loads every person, attendance record, mission and daily status.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn load_roster(&mut self) -> Result<Roster, StoreError>;

    /// Reads the validation record of one day.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_daily_status(&mut self, date: Date) -> Result<Option<DailyStatus>, StoreError>;

    /// Allocates a new unique identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot allocate one.
    fn next_id(&mut self, kind: EntityKind) -> Result<String, StoreError>;

    /// Commits every write of `batch` atomically and in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is committed in that case.
    fn commit(&mut self, batch: &WriteBatch) -> Result<(), StoreError>;
}
