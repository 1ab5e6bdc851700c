// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for Pointage.
//!
//! This crate implements the `AttendanceStore` contract on top of Diesel.
//! Every entity has a deterministic key (`personnel_id`, `mission_id`,
//! `{personnel_id}_{date}` for attendance, the ISO date for daily status), so
//! every write is an upsert or a delete by key.
//!
//! ## Atomicity
//!
//! A `WriteBatch` is committed inside a single transaction. A failing
//! operation rolls back the whole batch, so a snapshot loaded afterwards
//! never contains half a command.
//!
//! ## Migrations
//!
//! Migrations under `migrations/` are embedded and applied on open.
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory()`, which gives each instance its
//! own shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use pointage::{AttendanceStore, EntityKind, Roster, StoreError, WriteBatch};
use pointage_domain::DailyStatus;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed entity store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory database.
    ///
    /// Each call receives a unique database instance via an atomic counter,
    /// so instances never share data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:pointage_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Loads every person, attendance record, mission and daily status.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is corrupt.
    pub fn load_roster(&mut self) -> Result<Roster, PersistenceError> {
        queries::load_roster(&mut self.conn)
    }

    /// Reads the validation record of one day.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_daily_status(&mut self, date: Date) -> Result<Option<DailyStatus>, PersistenceError> {
        queries::get_daily_status(&mut self.conn, date)
    }

    /// Commits a batch atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails. Nothing is written in that case.
    pub fn commit(&mut self, batch: &WriteBatch) -> Result<(), PersistenceError> {
        mutations::commit_batch(&mut self.conn, batch)
    }

    /// Allocates a new identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence cannot be advanced.
    pub fn next_id(&mut self, kind: EntityKind) -> Result<String, PersistenceError> {
        mutations::next_id(&mut self.conn, kind)
    }
}

impl AttendanceStore for Persistence {
    fn load_roster(&mut self) -> Result<Roster, StoreError> {
        Ok(Self::load_roster(self)?)
    }

    fn get_daily_status(&mut self, date: Date) -> Result<Option<DailyStatus>, StoreError> {
        Ok(Self::get_daily_status(self, date)?)
    }

    fn next_id(&mut self, kind: EntityKind) -> Result<String, StoreError> {
        Ok(Self::next_id(self, kind)?)
    }

    fn commit(&mut self, batch: &WriteBatch) -> Result<(), StoreError> {
        Ok(Self::commit(self, batch)?)
    }
}
