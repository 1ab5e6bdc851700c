// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the attendance tracker.
//!
//! This crate turns transport-neutral requests into core commands and reads,
//! and core results into response DTOs. It owns the `ApiError` taxonomy that
//! the HTTP layer maps to status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use csv_export::{mileage_report_csv, monthly_table_csv};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    complete_mission, create_mission, create_personnel, delete_mission, delete_personnel,
    get_attendance, get_attendance_range, get_day, get_mission, get_personnel, get_summary,
    list_missions, list_personnel, mileage_report, monthly_report, reactivate_day,
    reactivate_mission, set_status, update_mission, update_personnel, validate_day, vocabulary,
};
pub use request_response::{
    AttendanceRangeResponse, AttendanceStatusResponse, CreateMissionRequest, DayEntry,
    DayResponse, MileageQuery, MonthlyQuery, PersonRequest, PersonnelListResponse, RangeQuery,
    SetStatusRequest, UpdateMissionRequest, VocabularyEntry, VocabularyResponse, WriteResponse,
    parse_date_field, parse_fallback,
};
