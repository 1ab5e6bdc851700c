// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage::AttendanceService;
use pointage_domain::{FlatDailyRate, MissionVocabulary};
use pointage_persistence::Persistence;
use time::macros::datetime;

use crate::{CreateMissionRequest, PersonRequest, create_mission, create_personnel};

pub type TestService = AttendanceService<Persistence>;

/// A service over an empty in-memory store, frozen on 2024-03-04.
pub fn create_test_service() -> TestService {
    let persistence: Persistence = Persistence::new_in_memory().unwrap();
    AttendanceService::new(
        persistence,
        MissionVocabulary::default(),
        Box::new(FlatDailyRate::default()),
    )
    .unwrap()
    .with_clock(|| datetime!(2024-03-04 07:45 UTC))
}

pub fn create_test_person_request(matricule: &str, last_name: &str) -> PersonRequest {
    PersonRequest {
        matricule: matricule.to_string(),
        first_name: String::from("Camille"),
        last_name: last_name.to_string(),
        rank: String::from("Brigadier"),
        contact: String::new(),
        address: String::new(),
        email: String::new(),
    }
}

pub fn create_test_mission_request<S: AsRef<str>>(personnel_ids: &[S]) -> CreateMissionRequest {
    CreateMissionRequest {
        name: String::from("Escorte"),
        description: String::from("Escorte de convoi"),
        start_date: String::from("2024-03-10"),
        end_date: Some(String::from("2024-03-12")),
        personnel_ids: personnel_ids
            .iter()
            .map(|id| id.as_ref().to_string())
            .collect(),
        vehicle: Some(String::from("Peugeot 5008")),
        kilometers: Some(120),
    }
}

/// Adds a person and returns the allocated id.
pub fn add_person(service: &mut TestService, matricule: &str, last_name: &str) -> String {
    create_personnel(service, create_test_person_request(matricule, last_name))
        .unwrap()
        .id
        .unwrap()
}

/// Creates the standard test mission and returns the allocated id.
pub fn add_mission<S: AsRef<str>>(service: &mut TestService, personnel_ids: &[S]) -> String {
    create_mission(service, create_test_mission_request(personnel_ids))
        .unwrap()
        .id
        .unwrap()
}
