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

mod error;
mod hours;
pub mod interval;
mod types;
mod validation;
mod vocabulary;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use hours::{FlatDailyRate, HoursPolicy, HoursTable};
pub use interval::{
    DateSpan, days_between, days_in_span, format_iso_date, month_span, parse_iso_date, parse_month,
};
pub use types::{
    AttendanceRecord, AttendanceStatus, DailyStatus, Mission, MissionDraft, MissionId,
    MissionStatus, PermissionDuration, Person, PersonDetails, PersonnelDailyStatus, PersonnelId,
    ResolvedStatus, attendance_record_id,
};
pub use validation::{
    validate_matricule_unique, validate_mission_fields, validate_mission_shape,
    validate_person_fields,
};
pub use vocabulary::MissionVocabulary;
