// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use pointage::{Command, Roster, Rules, WriteBatch, apply};
use pointage_domain::{
    DateSpan, FlatDailyRate, MissionDraft, MissionVocabulary, PersonDetails, PersonnelId,
};
use time::Date;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_details(matricule: &str, last_name: &str) -> PersonDetails {
    PersonDetails {
        matricule: matricule.to_string(),
        first_name: String::from("Marie"),
        last_name: last_name.to_string(),
        rank: String::from("Adjudant"),
        contact: String::from("+33 6 00 00 00 00"),
        address: String::new(),
        email: String::from("marie@example.org"),
    }
}

pub fn create_test_draft(personnel: &[&str], start: Date, end: Date) -> MissionDraft {
    MissionDraft {
        name: String::from("Garde"),
        description: String::from("Garde statique"),
        span: DateSpan::new(start, end).unwrap(),
        personnel_ids: personnel.iter().map(|id| PersonnelId::new(id)).collect(),
        vehicle: Some(String::from("Renault Master")),
        kilometers: Some(35),
    }
}

/// Plans `command` against the stored roster and commits it.
pub fn commit_command(persistence: &mut Persistence, command: Command) -> WriteBatch {
    let roster: Roster = persistence.load_roster().unwrap();
    let vocabulary = MissionVocabulary::default();
    let hours = FlatDailyRate::default();
    let rules = Rules {
        vocabulary: &vocabulary,
        hours: &hours,
        now: datetime!(2024-06-03 08:00 UTC),
    };
    let transition = apply(&roster, &rules, command).unwrap();
    persistence.commit(&transition.batch).unwrap();
    transition.batch
}

/// A store holding people `p1`, `p2` and `p3`.
pub fn create_seeded_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    for (id, matricule, name) in [
        ("p1", "MAT-1", "Bernard"),
        ("p2", "MAT-2", "Durand"),
        ("p3", "MAT-3", "Petit"),
    ] {
        commit_command(
            &mut persistence,
            Command::AddPersonnel {
                personnel_id: PersonnelId::new(id),
                details: create_test_details(matricule, name),
            },
        );
    }
    persistence
}
