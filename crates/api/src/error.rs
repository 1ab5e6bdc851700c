// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use pointage::CoreError;
use pointage_domain::{DomainError, format_iso_date};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with the current lifecycle state.
    Conflict {
        /// The rule that blocked the request.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message, .. } => write!(f, "{message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::InvalidInput {
                field: String::from("date"),
                message,
            }
        }
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("date_range"),
            message,
        },
        DomainError::InvalidAttendanceStatus(_) => ApiError::InvalidInput {
            field: String::from("status"),
            message,
        },
        DomainError::InvalidMissionStatus(_) => ApiError::InvalidInput {
            field: String::from("mission_status"),
            message,
        },
        DomainError::InvalidMatricule(_) => ApiError::InvalidInput {
            field: String::from("matricule"),
            message,
        },
        DomainError::DuplicateMatricule(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_matricule"),
            message,
        },
        DomainError::InvalidName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidMissionName(_) => ApiError::InvalidInput {
            field: String::from("mission_name"),
            message,
        },
        DomainError::InvalidMissionDescription { .. } => ApiError::InvalidInput {
            field: String::from("description"),
            message,
        },
        DomainError::EmptyMissionPersonnel => ApiError::DomainRuleViolation {
            rule: String::from("mission_requires_personnel"),
            message,
        },
        DomainError::DuplicateMissionPersonnel(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_mission_personnel"),
            message,
        },
        DomainError::InvalidKilometers(_) => ApiError::InvalidInput {
            field: String::from("kilometers"),
            message,
        },
        DomainError::MissingPermissionDuration => ApiError::InvalidInput {
            field: String::from("permission_duration"),
            message,
        },
        DomainError::InvalidVocabulary(_) => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::LockedDate { date } => ApiError::Conflict {
            rule: String::from("validated_day_locked"),
            message: format!(
                "Day {} is validated and cannot be modified",
                format_iso_date(date)
            ),
        },
        CoreError::AlreadyValidated { date } => ApiError::Conflict {
            rule: String::from("day_already_validated"),
            message: format!("Day {} is already validated", format_iso_date(date)),
        },
        CoreError::NotValidated { date } => ApiError::Conflict {
            rule: String::from("day_not_validated"),
            message: format!("Day {} is not validated", format_iso_date(date)),
        },
        err @ CoreError::InvalidMissionTransition { .. } => ApiError::Conflict {
            rule: String::from("mission_lifecycle"),
            message: err.to_string(),
        },
        CoreError::PersonnelNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Personnel"),
            message: format!("Personnel '{id}' does not exist"),
        },
        CoreError::MissionNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Mission"),
            message: format!("Mission '{id}' does not exist"),
        },
        err @ CoreError::TimestampFormat { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        CoreError::Store(store_err) => ApiError::Internal {
            message: store_err.to_string(),
        },
    }
}
