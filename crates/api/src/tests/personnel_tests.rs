// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage::Change;
use pointage_domain::PersonnelId;

use super::helpers::{add_mission, add_person, create_test_person_request, create_test_service};
use crate::{
    ApiError, create_personnel, delete_personnel, get_personnel, list_personnel, update_personnel,
};

#[test]
fn test_create_personnel_allocates_sequential_ids() {
    let mut service = create_test_service();

    let first = create_personnel(&mut service, create_test_person_request("MAT-1", "Martin"))
        .unwrap();
    let second = create_personnel(&mut service, create_test_person_request("MAT-2", "Garcia"))
        .unwrap();

    assert!(first.success);
    assert_eq!(first.id.as_deref(), Some("P000001"));
    assert_eq!(second.id.as_deref(), Some("P000002"));
    assert_eq!(
        first.change,
        Change::PersonnelAdded {
            personnel_id: PersonnelId::new("P000001")
        }
    );
}

#[test]
fn test_create_personnel_trims_identity_fields() {
    let mut service = create_test_service();
    let mut request = create_test_person_request("  MAT-1 ", "Martin");
    request.first_name = String::from(" Camille ");

    let id = create_personnel(&mut service, request).unwrap().id.unwrap();

    let person = get_personnel(service.roster(), &id).unwrap();
    assert_eq!(person.matricule, "MAT-1");
    assert_eq!(person.first_name, "Camille");
}

#[test]
fn test_duplicate_matricule_is_a_rule_violation() {
    let mut service = create_test_service();
    add_person(&mut service, "MAT-1", "Martin");

    let result = create_personnel(&mut service, create_test_person_request("mat-1", "Garcia"));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_matricule"
    ));
    assert_eq!(service.roster().personnel_count(), 1);
}

#[test]
fn test_blank_last_name_is_invalid_input() {
    let mut service = create_test_service();
    let result = create_personnel(&mut service, create_test_person_request("MAT-1", "  "));
    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "name"));
}

#[test]
fn test_list_personnel_sorts_by_last_name() {
    let mut service = create_test_service();
    add_person(&mut service, "MAT-1", "Roux");
    add_person(&mut service, "MAT-2", "Blanc");
    add_person(&mut service, "MAT-3", "Morel");

    let names: Vec<String> = list_personnel(service.roster())
        .personnel
        .into_iter()
        .map(|p| p.last_name)
        .collect();
    assert_eq!(names, vec!["Blanc", "Morel", "Roux"]);
}

#[test]
fn test_update_personnel_replaces_details() {
    let mut service = create_test_service();
    let id = add_person(&mut service, "MAT-1", "Martin");

    let mut request = create_test_person_request("MAT-1", "Martin-Durand");
    request.rank = String::from("Major");
    update_personnel(&mut service, &id, request).unwrap();

    let person = get_personnel(service.roster(), &id).unwrap();
    assert_eq!(person.last_name, "Martin-Durand");
    assert_eq!(person.rank, "Major");
}

#[test]
fn test_update_unknown_personnel_is_not_found() {
    let mut service = create_test_service();
    let result = update_personnel(
        &mut service,
        "P000042",
        create_test_person_request("MAT-1", "Martin"),
    );
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_delete_personnel_removes_mission_membership() {
    let mut service = create_test_service();
    let a = add_person(&mut service, "MAT-1", "Martin");
    let b = add_person(&mut service, "MAT-2", "Garcia");
    let mission_id = add_mission(&mut service, &[&a, &b]);

    delete_personnel(&mut service, &a).unwrap();

    assert!(get_personnel(service.roster(), &a).is_err());
    let mission = crate::get_mission(service.roster(), &mission_id).unwrap();
    assert_eq!(mission.personnel_ids, vec![PersonnelId::new(&b)]);

    let stored = service.store_mut().load_roster().unwrap();
    assert_eq!(&stored, service.roster());
}
