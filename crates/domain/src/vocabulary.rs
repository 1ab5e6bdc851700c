// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Controlled vocabulary for mission names and descriptions.
//!
//! The vocabulary is static configuration: it is loaded once at startup and
//! only consulted when validating mission input.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Mission name to allowed descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionVocabulary {
    entries: BTreeMap<String, Vec<String>>,
}

impl MissionVocabulary {
    /// Creates a vocabulary from explicit entries.
    #[must_use]
    pub const fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Loads a vocabulary from a JSON object of `name -> [descriptions]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid vocabulary.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let raw: String = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DomainError::InvalidVocabulary(e.to_string()))?;
        Self::from_json_str(&raw)
    }

    /// Parses a vocabulary from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or declares no mission names.
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let vocabulary: Self =
            serde_json::from_str(raw).map_err(|e| DomainError::InvalidVocabulary(e.to_string()))?;
        if vocabulary.entries.is_empty() {
            return Err(DomainError::InvalidVocabulary(String::from(
                "at least one mission name is required",
            )));
        }
        Ok(vocabulary)
    }

    /// Returns the known mission names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the descriptions allowed for `name`, if it is known.
    #[must_use]
    pub fn descriptions(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Checks a name/description pair against the vocabulary.
    ///
    /// A name with an empty description list accepts any description.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the description is not allowed.
    pub fn check(&self, name: &str, description: &str) -> Result<(), DomainError> {
        let Some(allowed) = self.descriptions(name) else {
            return Err(DomainError::InvalidMissionName(format!(
                "'{name}' is not a known mission"
            )));
        };
        if allowed.is_empty() || allowed.iter().any(|d| d == description) {
            Ok(())
        } else {
            Err(DomainError::InvalidMissionDescription {
                name: name.to_string(),
                description: description.to_string(),
            })
        }
    }
}

impl Default for MissionVocabulary {
    fn default() -> Self {
        let entries: BTreeMap<String, Vec<String>> = [
            (
                "Patrouille",
                vec!["Patrouille de jour", "Patrouille de nuit", "Patrouille routière"],
            ),
            (
                "Escorte",
                vec!["Escorte de convoi", "Escorte de personnalité"],
            ),
            (
                "Garde",
                vec!["Garde statique", "Garde de bâtiment officiel"],
            ),
            (
                "Service d'ordre",
                vec!["Manifestation publique", "Événement sportif", "Cérémonie officielle"],
            ),
            ("Formation", vec!["Stage", "Instruction", "Tir d'entraînement"]),
        ]
        .into_iter()
        .map(|(name, descriptions)| {
            (
                name.to_string(),
                descriptions.into_iter().map(String::from).collect(),
            )
        })
        .collect();
        Self::new(entries)
    }
}
