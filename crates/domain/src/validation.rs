// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{MissionDraft, Person, PersonDetails, PersonnelId};
use crate::vocabulary::MissionVocabulary;
use std::collections::HashSet;

/// Validates that a person's required fields are present.
///
/// This does NOT check matricule uniqueness (that requires the roster).
///
/// # Errors
///
/// Returns an error if:
/// - The matricule is empty
/// - The first or last name is empty
pub fn validate_person_fields(details: &PersonDetails) -> Result<(), DomainError> {
    if details.matricule.trim().is_empty() {
        return Err(DomainError::InvalidMatricule(String::from(
            "Matricule cannot be empty",
        )));
    }

    if details.first_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "First name cannot be empty",
        )));
    }

    if details.last_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Last name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that `matricule` is not used by anyone on the roster.
///
/// `exclude` skips the person being edited. Comparison ignores case and
/// surrounding whitespace.
///
/// # Errors
///
/// Returns `DomainError::DuplicateMatricule` if another person holds it.
pub fn validate_matricule_unique(
    personnel: &[Person],
    matricule: &str,
    exclude: Option<&PersonnelId>,
) -> Result<(), DomainError> {
    let wanted: String = matricule.trim().to_uppercase();
    let taken: bool = personnel
        .iter()
        .filter(|p| exclude != Some(&p.id))
        .any(|p| p.matricule.trim().to_uppercase() == wanted);

    if taken {
        return Err(DomainError::DuplicateMatricule(matricule.trim().to_string()));
    }
    Ok(())
}

/// Validates mission input against the vocabulary and basic shape rules.
///
/// Existence of the referenced personnel is checked by the caller, which
/// owns the roster.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty or unknown, or the description is not allowed for it
/// - No personnel are assigned, or one is assigned twice
/// - The span ends before it starts
pub fn validate_mission_fields(
    vocabulary: &MissionVocabulary,
    draft: &MissionDraft,
) -> Result<(), DomainError> {
    if draft.name.trim().is_empty() {
        return Err(DomainError::InvalidMissionName(String::from(
            "Mission name cannot be empty",
        )));
    }
    vocabulary.check(&draft.name, &draft.description)?;
    validate_mission_shape(draft)
}

/// Validates the vocabulary-independent rules of a mission.
///
/// Used on its own when an update leaves the name and description alone,
/// so missions created under an older vocabulary stay editable.
///
/// # Errors
///
/// Returns an error if no personnel are assigned, one is assigned twice, or
/// the span ends before it starts.
pub fn validate_mission_shape(draft: &MissionDraft) -> Result<(), DomainError> {
    if draft.personnel_ids.is_empty() {
        return Err(DomainError::EmptyMissionPersonnel);
    }

    let mut seen: HashSet<&PersonnelId> = HashSet::new();
    for id in &draft.personnel_ids {
        if !seen.insert(id) {
            return Err(DomainError::DuplicateMissionPersonnel(id.to_string()));
        }
    }

    // Spans built through DateSpan::new are already ordered; deserialized ones may not be.
    if draft.span.start > draft.span.end {
        return Err(DomainError::InvalidDateRange {
            start: crate::interval::format_iso_date(draft.span.start),
            end: crate::interval::format_iso_date(draft.span.end),
        });
    }

    Ok(())
}
