// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use shift_alert_domain::BookingAlert;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// The requested alert was not found.
    AlertNotFound(i64),
    /// The requested staff profile was not found.
    StaffNotFound(String),
    /// A compare-and-swap lost the race: the stored version no longer
    /// matches the expected version. Carries the current record so the
    /// caller can report or retry against fresh state.
    Conflict {
        /// The alert as currently stored.
        current: Box<BookingAlert>,
    },
    /// Serialization/deserialization error.
    SerializationError(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::AlertNotFound(id) => write!(f, "Alert not found: {id}"),
            Self::StaffNotFound(id) => write!(f, "Staff profile not found: {id}"),
            Self::Conflict { current } => {
                write!(
                    f,
                    "Version conflict on alert {}: stored version is {}",
                    current.alert_id.unwrap_or(-1),
                    current.version
                )
            }
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<rusqlite::Error> for PersistenceError {
    fn from(err: rusqlite::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
