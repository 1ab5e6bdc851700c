// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage_domain::{PersonnelId, ResolvedStatus};
use time::macros::date;

use super::helpers::{add_person, create_test_service};
use crate::{
    ApiError, RangeQuery, SetStatusRequest, get_attendance, get_attendance_range, set_status,
};

fn status_request(personnel_id: &str, date: &str, status: &str) -> SetStatusRequest {
    SetStatusRequest {
        personnel_id: personnel_id.to_string(),
        date: date.to_string(),
        status: status.to_string(),
        permission_start: None,
        permission_end: None,
    }
}

#[test]
fn test_set_status_then_get_attendance() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");

    let response = set_status(&mut service, &status_request(&id, "2024-03-05", "absent")).unwrap();
    assert_eq!(response.writes, 1);

    let attendance = get_attendance(service.roster(), &id, "2024-03-05").unwrap();
    assert_eq!(attendance.resolved.status, ResolvedStatus::Absent);
    assert_eq!(attendance.effective.status, ResolvedStatus::Absent);
    assert!(!attendance.validated);
}

#[test]
fn test_permission_request_expands_to_every_day() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");

    let mut request = status_request(&id, "2024-01-10", "permission");
    request.permission_start = Some(String::from("2024-01-10"));
    request.permission_end = Some(String::from("2024-01-12"));
    let response = set_status(&mut service, &request).unwrap();
    assert_eq!(response.writes, 3);

    let middle = get_attendance(service.roster(), &id, "2024-01-11").unwrap();
    assert_eq!(middle.resolved.status, ResolvedStatus::Permission);
    assert_eq!(
        middle.resolved.permission_duration.map(|d| d.end),
        Some(date!(2024 - 01 - 12))
    );
}

#[test]
fn test_one_sided_permission_is_rejected() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");

    let mut request = status_request(&id, "2024-01-10", "permission");
    request.permission_start = Some(String::from("2024-01-10"));

    let result = set_status(&mut service, &request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "permission_duration"
    ));
}

#[test]
fn test_unknown_status_and_bad_date_are_invalid_input() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");

    assert!(matches!(
        set_status(&mut service, &status_request(&id, "2024-03-05", "sick")),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));
    assert!(matches!(
        set_status(&mut service, &status_request(&id, "05/03/2024", "absent")),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date"
    ));
}

#[test]
fn test_set_status_for_unknown_person_is_not_found() {
    let mut service = create_test_service();
    let result = set_status(&mut service, &status_request("P000099", "2024-03-05", "absent"));
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_attendance_range_honors_fallback() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");
    set_status(&mut service, &status_request(&id, "2024-03-06", "absent")).unwrap();

    let query = RangeQuery {
        start: String::from("2024-03-05"),
        end: String::from("2024-03-07"),
        fallback: Some(String::from("na")),
    };
    let response = get_attendance_range(service.roster(), &id, &query).unwrap();
    let statuses: Vec<ResolvedStatus> = response.days.iter().map(|d| d.status).collect();
    assert_eq!(
        statuses,
        vec![
            ResolvedStatus::NotAvailable,
            ResolvedStatus::Absent,
            ResolvedStatus::NotAvailable
        ]
    );
    assert_eq!(response.personnel_id, PersonnelId::new(&id));

    let default_query = RangeQuery {
        fallback: None,
        ..query
    };
    let response = get_attendance_range(service.roster(), &id, &default_query).unwrap();
    assert_eq!(response.days[0].status, ResolvedStatus::Present);
}

#[test]
fn test_attendance_range_reversed_is_empty() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");

    let query = RangeQuery {
        start: String::from("2024-03-07"),
        end: String::from("2024-03-05"),
        fallback: None,
    };
    let response = get_attendance_range(service.roster(), &id, &query).unwrap();
    assert!(response.days.is_empty());
}

#[test]
fn test_unknown_fallback_is_invalid_input() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");

    let query = RangeQuery {
        start: String::from("2024-03-05"),
        end: String::from("2024-03-07"),
        fallback: Some(String::from("absent")),
    };
    assert!(matches!(
        get_attendance_range(service.roster(), &id, &query),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "fallback"
    ));
}
