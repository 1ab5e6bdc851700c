// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Two-phase command execution over a cached roster.
//!
//! `submit` validates a command against the cache, applies its batch to the
//! cache immediately and queues it. `reconcile` commits queued batches in
//! order. When the store rejects one, the rest of the queue is dropped and
//! the cache is reloaded from the store, which is the durable truth.

use crate::apply::apply;
use crate::command::Command;
use crate::error::CoreError;
use crate::roster::Roster;
use crate::store::{AttendanceStore, EntityKind};
use crate::transition::{Change, Rules, Transition};
use pointage_domain::{DailyStatus, HoursPolicy, MissionVocabulary};
use std::collections::VecDeque;
use time::{Date, OffsetDateTime};
use tracing::{debug, error, info, warn};

type Clock = Box<dyn Fn() -> OffsetDateTime + Send + Sync>;

/// A batch applied to the cache but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    /// Ticket handed back in [`Submitted`].
    pub ticket: u64,
    /// Name of the command that produced the batch.
    pub command: &'static str,
    /// The batch and the change it announces.
    pub transition: Transition,
}

/// Acknowledgement of a submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    /// Position of the write in the pending queue, unique per service.
    pub ticket: u64,
    pub change: Change,
    /// Number of store operations in the batch.
    pub writes: usize,
}

/// Owns the store, the cached roster and the queue of pending writes.
pub struct AttendanceService<S> {
    store: S,
    roster: Roster,
    pending: VecDeque<PendingWrite>,
    vocabulary: MissionVocabulary,
    hours: Box<dyn HoursPolicy>,
    clock: Clock,
    next_ticket: u64,
}

impl<S> std::fmt::Debug for AttendanceService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceService")
            .field("personnel", &self.roster.personnel_count())
            .field("pending", &self.pending.len())
            .field("next_ticket", &self.next_ticket)
            .finish_non_exhaustive()
    }
}

impl<S: AttendanceStore> AttendanceService<S> {
    /// Creates a service and loads the initial snapshot from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn new(
        mut store: S,
        vocabulary: MissionVocabulary,
        hours: Box<dyn HoursPolicy>,
    ) -> Result<Self, CoreError> {
        let roster: Roster = store.load_roster()?;
        info!(
            personnel = roster.personnel_count(),
            "Loaded roster snapshot"
        );
        Ok(Self {
            store,
            roster,
            pending: VecDeque::new(),
            vocabulary,
            hours,
            clock: Box::new(OffsetDateTime::now_utc),
            next_ticket: 1,
        })
    }

    /// Replaces the wall clock, mainly for tests.
    #[must_use]
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> OffsetDateTime + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    /// Returns the cached snapshot, including pending writes.
    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the mission vocabulary.
    #[must_use]
    pub const fn vocabulary(&self) -> &MissionVocabulary {
        &self.vocabulary
    }

    /// Returns today's date according to the service clock (UTC).
    #[must_use]
    pub fn today(&self) -> Date {
        (self.clock)().date()
    }

    /// Returns the number of writes awaiting `reconcile`.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Returns the pending writes in commit order.
    pub fn pending(&self) -> impl Iterator<Item = &PendingWrite> {
        self.pending.iter()
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Reads a day's validation record straight from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn daily_status(&mut self, date: Date) -> Result<Option<DailyStatus>, CoreError> {
        Ok(self.store.get_daily_status(date)?)
    }

    /// Allocates an id for a new person or mission.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot allocate one.
    pub fn allocate_id(&mut self, kind: EntityKind) -> Result<String, CoreError> {
        Ok(self.store.next_id(kind)?)
    }

    /// Validates `command` against the cache and queues its writes.
    ///
    /// The cache reflects the change as soon as this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected. Nothing is queued then.
    pub fn submit(&mut self, command: Command) -> Result<Submitted, CoreError> {
        let name: &'static str = command.name();
        let rules: Rules<'_> = Rules {
            vocabulary: &self.vocabulary,
            hours: self.hours.as_ref(),
            now: (self.clock)(),
        };

        let transition: Transition = match apply(&self.roster, &rules, command) {
            Ok(transition) => transition,
            Err(e) => {
                warn!(command = name, error = %e, "Command rejected");
                return Err(e);
            }
        };

        self.roster.apply_batch(&transition.batch);
        let ticket: u64 = self.next_ticket;
        self.next_ticket += 1;
        let submitted: Submitted = Submitted {
            ticket,
            change: transition.change.clone(),
            writes: transition.batch.len(),
        };
        debug!(
            command = name,
            ticket,
            writes = submitted.writes,
            "Queued write"
        );
        self.pending.push_back(PendingWrite {
            ticket,
            command: name,
            transition,
        });
        Ok(submitted)
    }

    /// Commits pending writes in order.
    ///
    /// Returns the number of batches committed.
    ///
    /// # Errors
    ///
    /// Returns the first store error. The remaining queue is discarded and
    /// the cache is reloaded from the store.
    pub fn reconcile(&mut self) -> Result<usize, CoreError> {
        let mut committed: usize = 0;
        while let Some(write) = self.pending.pop_front() {
            if let Err(e) = self.store.commit(&write.transition.batch) {
                error!(
                    command = write.command,
                    ticket = write.ticket,
                    dropped = self.pending.len(),
                    error = %e,
                    "Commit failed, restoring snapshot from store"
                );
                self.pending.clear();
                match self.store.load_roster() {
                    Ok(roster) => self.roster = roster,
                    Err(reload) => {
                        error!(error = %reload, "Failed to reload snapshot after commit failure");
                    }
                }
                return Err(CoreError::Store(e));
            }
            info!(
                command = write.command,
                ticket = write.ticket,
                writes = write.transition.batch.len(),
                "Committed write"
            );
            committed += 1;
        }
        Ok(committed)
    }

    /// Commits pending writes, then reloads the snapshot from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if a commit or the reload fails.
    pub fn refresh(&mut self) -> Result<(), CoreError> {
        self.reconcile()?;
        self.roster = self.store.load_roster()?;
        debug!(
            personnel = self.roster.personnel_count(),
            "Refreshed roster snapshot"
        );
        Ok(())
    }

    /// Submits `command` and commits everything pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected or a commit fails.
    pub fn execute(&mut self, command: Command) -> Result<Submitted, CoreError> {
        let submitted: Submitted = self.submit(command)?;
        self.reconcile()?;
        Ok(submitted)
    }
}
