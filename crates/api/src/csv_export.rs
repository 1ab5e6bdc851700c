// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of the monthly and mileage reports.
//!
//! Rendering is read-only: it formats an already computed report.

use pointage::{MileageReport, MonthlyTable};
use pointage_domain::format_iso_date;

use crate::error::ApiError;

const MONTHLY_COUNT_HEADERS: [&str; 6] =
    ["present", "absent", "mission", "permission", "N/A", "hours"];

fn csv_error(err: &impl std::fmt::Display) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ApiError> {
    let bytes: Vec<u8> = writer.into_inner().map_err(|e| csv_error(&e))?;
    String::from_utf8(bytes).map_err(|e| csv_error(&e))
}

/// Renders the monthly table as CSV.
///
/// One row per person: identity columns, one status column per day, the
/// per-status counts and the total hours.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn monthly_table_csv(table: &MonthlyTable) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let day_headers: Vec<String> = table
        .rows
        .first()
        .map(|row| row.days.iter().map(|c| format_iso_date(c.date)).collect())
        .unwrap_or_default();
    let mut header: Vec<String> = vec![
        String::from("matricule"),
        String::from("rank"),
        String::from("name"),
    ];
    header.extend(day_headers);
    header.extend(MONTHLY_COUNT_HEADERS.iter().map(ToString::to_string));
    writer.write_record(&header).map_err(|e| csv_error(&e))?;

    for row in &table.rows {
        let mut record: Vec<String> = vec![
            row.matricule.clone(),
            row.rank.clone(),
            row.display_name.clone(),
        ];
        record.extend(row.days.iter().map(|c| c.status.as_str().to_string()));
        record.extend(
            [
                row.counts.present,
                row.counts.absent,
                row.counts.mission,
                row.counts.permission,
                row.counts.not_available,
                row.total_hours,
            ]
            .iter()
            .map(ToString::to_string),
        );
        writer.write_record(&record).map_err(|e| csv_error(&e))?;
    }

    finish(writer)
}

/// Renders the mileage report as CSV, ending with a total line.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn mileage_report_csv(report: &MileageReport) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "missionId",
            "startDate",
            "endDate",
            "name",
            "description",
            "vehicle",
            "kilometers",
        ])
        .map_err(|e| csv_error(&e))?;

    for entry in &report.entries {
        writer
            .write_record([
                entry.mission_id.value(),
                format_iso_date(entry.start_date).as_str(),
                format_iso_date(entry.end_date).as_str(),
                entry.name.as_str(),
                entry.description.as_str(),
                entry.vehicle.as_deref().unwrap_or(""),
                entry.kilometers.to_string().as_str(),
            ])
            .map_err(|e| csv_error(&e))?;
    }
    writer
        .write_record([
            "total",
            "",
            "",
            "",
            "",
            "",
            report.total_kilometers.to_string().as_str(),
        ])
        .map_err(|e| csv_error(&e))?;

    finish(writer)
}
