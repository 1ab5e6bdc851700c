// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod batch;
mod command;
mod error;
pub mod resolver;
mod roster;
mod service;
mod store;
pub mod summary;
mod transition;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use batch::{WriteBatch, WriteOp};
pub use command::{Command, MissionPatch};
pub use error::{CoreError, StoreError};
pub use resolver::{
    Fallback, MissionLookup, effective_status, resolve_effective_status, resolve_range,
    resolve_status, resolve_with_fallback,
};
pub use roster::Roster;
pub use service::{AttendanceService, PendingWrite, Submitted};
pub use store::{AttendanceStore, EntityKind};
pub use summary::{
    DailySummary, DayCell, MileageEntry, MileageReport, MissionBoard, MonthlyRow, MonthlyTable,
    PersonnelSelection, StatusCounts, mileage_report, mission_board, monthly_table, summary,
};
pub use transition::{Change, Rules, Transition};
