// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pointage_domain::{DomainError, MissionId, MissionStatus, PersonnelId, format_iso_date};
use time::Date;

/// Failure reported by an `AttendanceStore` implementation.
///
/// The core never retries; the message is carried to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Creates a new store error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Store error: {}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A write targets a validated day.
    LockedDate {
        /// The first locked day the operation would touch.
        date: Date,
    },
    /// The referenced person does not exist.
    PersonnelNotFound(PersonnelId),
    /// The referenced mission does not exist.
    MissionNotFound(MissionId),
    /// The requested lifecycle change does not apply to the mission's current status.
    InvalidMissionTransition {
        mission_id: MissionId,
        from: MissionStatus,
        to: MissionStatus,
    },
    /// The day is already validated.
    AlreadyValidated {
        date: Date,
    },
    /// The day is not validated, so it cannot be reactivated.
    NotValidated {
        date: Date,
    },
    /// The clock produced a time that cannot be written as RFC 3339.
    TimestampFormat {
        message: String,
    },
    /// The store rejected a read or a commit.
    Store(StoreError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::LockedDate { date } => write!(
                f,
                "Day {} is validated and cannot be modified",
                format_iso_date(*date)
            ),
            Self::PersonnelNotFound(id) => write!(f, "Personnel '{id}' not found"),
            Self::MissionNotFound(id) => write!(f, "Mission '{id}' not found"),
            Self::InvalidMissionTransition {
                mission_id,
                from,
                to,
            } => write!(
                f,
                "Mission '{mission_id}' cannot go from {} to {}",
                from.as_str(),
                to.as_str()
            ),
            Self::AlreadyValidated { date } => {
                write!(f, "Day {} is already validated", format_iso_date(*date))
            }
            Self::NotValidated { date } => {
                write!(f, "Day {} is not validated", format_iso_date(*date))
            }
            Self::TimestampFormat { message } => {
                write!(f, "Cannot format timestamp: {message}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DomainViolation(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
