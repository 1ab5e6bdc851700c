// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Failed to parse a date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// A date range ends before it starts.
    InvalidDateRange {
        /// The requested first day.
        start: String,
        /// The requested last day.
        end: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Attendance status string is not recognized.
    InvalidAttendanceStatus(String),
    /// Mission status string is not recognized.
    InvalidMissionStatus(String),
    /// Matricule is empty or invalid.
    InvalidMatricule(String),
    /// Matricule is already used by another person.
    DuplicateMatricule(String),
    /// First or last name is empty.
    InvalidName(String),
    /// Mission name is empty or not part of the vocabulary.
    InvalidMissionName(String),
    /// Mission description is not allowed for the mission name.
    InvalidMissionDescription {
        /// The mission name.
        name: String,
        /// The rejected description.
        description: String,
    },
    /// A mission must have at least one assigned person.
    EmptyMissionPersonnel,
    /// The same person is listed twice on a mission.
    DuplicateMissionPersonnel(String),
    /// Kilometers must not be negative.
    InvalidKilometers(i64),
    /// A permission was requested without its duration.
    MissingPermissionDuration,
    /// The vocabulary file could not be read.
    InvalidVocabulary(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: {start} is after {end}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidAttendanceStatus(s) => write!(f, "Invalid attendance status: '{s}'"),
            Self::InvalidMissionStatus(s) => write!(f, "Invalid mission status: '{s}'"),
            Self::InvalidMatricule(msg) => write!(f, "Invalid matricule: {msg}"),
            Self::DuplicateMatricule(matricule) => {
                write!(f, "Matricule '{matricule}' is already assigned")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidMissionName(msg) => write!(f, "Invalid mission name: {msg}"),
            Self::InvalidMissionDescription { name, description } => {
                write!(
                    f,
                    "Description '{description}' is not allowed for mission '{name}'"
                )
            }
            Self::EmptyMissionPersonnel => {
                write!(f, "A mission requires at least one assigned person")
            }
            Self::DuplicateMissionPersonnel(id) => {
                write!(f, "Personnel '{id}' is assigned to the mission more than once")
            }
            Self::InvalidKilometers(km) => {
                write!(f, "Invalid kilometers: {km}. Must be zero or greater")
            }
            Self::MissingPermissionDuration => {
                write!(f, "A permission requires both a start and an end date")
            }
            Self::InvalidVocabulary(msg) => write!(f, "Invalid mission vocabulary: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
