// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AttendanceStore, Command, CoreError, EntityKind, Roster, Rules, StoreError, Transition,
    WriteBatch, apply,
};
use pointage_domain::{
    AttendanceRecord, AttendanceStatus, DailyStatus, DateSpan, FlatDailyRate, Mission,
    MissionDraft, MissionId, MissionStatus, MissionVocabulary, Person, PersonDetails,
    PersonnelId,
};
use time::macros::datetime;
use time::{Date, OffsetDateTime};

/// The instant every test transition runs at.
pub const TEST_NOW: OffsetDateTime = datetime!(2024-01-15 09:30 UTC);

pub fn create_test_details(matricule: &str, first_name: &str, last_name: &str) -> PersonDetails {
    PersonDetails {
        matricule: matricule.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        rank: String::from("Sergent"),
        contact: String::new(),
        address: String::new(),
        email: String::new(),
    }
}

pub fn create_test_person(id: &str) -> Person {
    Person::from_details(
        PersonnelId::new(id),
        create_test_details(&format!("M-{id}"), "Jean", &format!("Nom-{id}")),
    )
}

/// A roster holding people `a`, `b` and `c`.
pub fn create_test_roster() -> Roster {
    Roster::from_parts(
        vec![
            create_test_person("a"),
            create_test_person("b"),
            create_test_person("c"),
        ],
        Vec::new(),
        Vec::new(),
        Vec::new(),
    )
}

pub fn pid(id: &str) -> PersonnelId {
    PersonnelId::new(id)
}

pub fn mid(id: &str) -> MissionId {
    MissionId::new(id)
}

pub fn create_test_draft(personnel: &[&str], start: Date, end: Date) -> MissionDraft {
    MissionDraft {
        name: String::from("Patrouille"),
        description: String::from("Patrouille de nuit"),
        span: DateSpan::new(start, end).unwrap(),
        personnel_ids: personnel.iter().map(|id| pid(id)).collect(),
        vehicle: None,
        kilometers: None,
    }
}

pub fn create_test_mission(id: &str, personnel: &[&str], start: Date, end: Date) -> Mission {
    Mission {
        id: mid(id),
        name: String::from("Escorte"),
        description: String::from("Escorte de convoi"),
        start_date: start,
        end_date: end,
        personnel_ids: personnel.iter().map(|id| pid(id)).collect(),
        total_hours: 8 * u32::try_from(personnel.len()).unwrap(),
        status: MissionStatus::Active,
        vehicle: None,
        kilometers: None,
    }
}

pub fn validated(date: Date) -> DailyStatus {
    DailyStatus {
        date,
        validated: true,
        validated_at: Some(String::from("2024-01-01T00:00:00Z")),
    }
}

pub fn record(id: &str, date: Date, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord::new(pid(id), date, status)
}

/// Applies `command` with the default vocabulary and hours policy.
pub fn plan(roster: &Roster, command: Command) -> Result<Transition, CoreError> {
    let vocabulary: MissionVocabulary = MissionVocabulary::default();
    let hours: FlatDailyRate = FlatDailyRate::default();
    let rules: Rules<'_> = Rules {
        vocabulary: &vocabulary,
        hours: &hours,
        now: TEST_NOW,
    };
    apply(roster, &rules, command)
}

/// Applies `command` and folds its batch into `roster`.
pub fn run(roster: &mut Roster, command: Command) -> Result<Transition, CoreError> {
    let transition: Transition = plan(roster, command)?;
    roster.apply_batch(&transition.batch);
    Ok(transition)
}

/// A store kept in memory, with a switch to make commits fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub roster: Roster,
    pub fail_commits: bool,
    pub commits: usize,
    next_id: u64,
}

impl MemoryStore {
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }
}

impl AttendanceStore for MemoryStore {
    fn load_roster(&mut self) -> Result<Roster, StoreError> {
        Ok(self.roster.clone())
    }

    fn get_daily_status(&mut self, date: Date) -> Result<Option<DailyStatus>, StoreError> {
        Ok(self.roster.daily_status(date).cloned())
    }

    fn next_id(&mut self, kind: EntityKind) -> Result<String, StoreError> {
        self.next_id += 1;
        Ok(format!("{}-{}", kind.as_str(), self.next_id))
    }

    fn commit(&mut self, batch: &WriteBatch) -> Result<(), StoreError> {
        if self.fail_commits {
            return Err(StoreError::new("disk full"));
        }
        self.roster.apply_batch(batch);
        self.commits += 1;
        Ok(())
    }
}
